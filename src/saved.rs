//! Named saved queries

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{self, StorageError};

const SAVED_FILE: &str = "saved_queries.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedFile {
    #[serde(default)]
    queries: Vec<SavedQuery>,
}

/// Default saved-query file next to the configuration file
pub fn saved_queries_path() -> Option<PathBuf> {
    storage::config_dir().map(|p| p.join(SAVED_FILE))
}

/// Saved queries keyed by unique name.
///
/// Every change is written through to the backing file before it is applied,
/// so a failed write leaves the collection unchanged.
#[derive(Debug, Default)]
pub struct SavedQueries {
    queries: Vec<SavedQuery>,
    path: Option<PathBuf>,
}

impl SavedQueries {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let file: SavedFile = storage::read_toml(&path)?;
        log::debug!("Loaded {} saved queries", file.queries.len());
        Ok(Self {
            queries: file.queries,
            path: Some(path),
        })
    }

    pub fn list(&self) -> &[SavedQuery] {
        &self.queries
    }

    pub fn get(&self, name: &str) -> Option<&SavedQuery> {
        self.queries.iter().find(|q| q.name == name.trim())
    }

    pub fn save(
        &mut self,
        name: &str,
        expression: &str,
        description: Option<&str>,
    ) -> Result<&SavedQuery, StorageError> {
        self.save_at(name, expression, description, Utc::now())
    }

    /// Create or overwrite by name. Overwriting keeps `created_at`.
    pub fn save_at(
        &mut self,
        name: &str,
        expression: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&SavedQuery, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let mut queries = self.queries.clone();
        let index = match queries.iter().position(|q| q.name == name) {
            Some(index) => {
                let existing = &mut queries[index];
                existing.expression = expression.to_string();
                existing.description = description;
                existing.updated_at = now;
                index
            }
            None => {
                queries.push(SavedQuery {
                    name: name.to_string(),
                    expression: expression.to_string(),
                    description,
                    created_at: now,
                    updated_at: now,
                });
                queries.len() - 1
            }
        };

        self.commit(queries)?;
        Ok(&self.queries[index])
    }

    /// Remove by name, returning whether anything was removed
    pub fn delete(&mut self, name: &str) -> Result<bool, StorageError> {
        let mut queries = self.queries.clone();
        let before = queries.len();
        queries.retain(|q| q.name != name.trim());
        if queries.len() == before {
            return Ok(false);
        }
        self.commit(queries)?;
        Ok(true)
    }

    fn commit(&mut self, queries: Vec<SavedQuery>) -> Result<(), StorageError> {
        if let Some(path) = &self.path {
            let file = SavedFile { queries };
            storage::write_toml(path, &file)?;
            self.queries = file.queries;
        } else {
            self.queries = queries;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "saved_tests.rs"]
mod saved_tests;
