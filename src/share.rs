//! Shareable references to a query.
//!
//! A query travels as the `q` parameter of a link, base64 URL-safe encoded
//! without padding so it survives copy and paste untouched.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;
use url::Url;

pub const SHARE_PARAM: &str = "q";

/// Base used when no `--share-base` is configured
pub const DEFAULT_SHARE_BASE: &str = "jsonq://share";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid link: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("query is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("link has no 'q' parameter")]
    MissingParameter,
}

pub fn encode_share_param(expression: &str) -> String {
    URL_SAFE_NO_PAD.encode(expression)
}

/// Decode a share parameter. Trailing `=` padding is tolerated.
pub fn decode_share_param(param: &str) -> Result<String, ShareError> {
    let bytes = URL_SAFE_NO_PAD.decode(param.trim().trim_end_matches('='))?;
    Ok(String::from_utf8(bytes)?)
}

/// `base` with its `q` parameter set to the encoded expression
pub fn share_link(base: &str, expression: &str) -> Result<Url, ShareError> {
    let mut url = Url::parse(base)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(SHARE_PARAM, &encode_share_param(expression));
    Ok(url)
}

pub fn query_from_link(link: &str) -> Result<String, ShareError> {
    let url = Url::parse(link.trim())?;
    let param = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(ShareError::MissingParameter)?;
    decode_share_param(&param)
}

/// Accept either a full link or a bare parameter
pub fn resolve_shared(input: &str) -> Result<String, ShareError> {
    if input.contains("://") {
        query_from_link(input)
    } else {
        decode_share_param(input)
    }
}
