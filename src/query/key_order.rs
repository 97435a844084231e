//! Restores projection key order after evaluation
//!
//! `jmespath` builds objects on a sorted map, so `{B: b, A: a}` comes back as
//! `{"A": .., "B": ..}`. The key order written in each multi-select hash is
//! read from the compiled AST and reapplied to matching result objects.

use jmespath::ast::Ast;
use serde_json::{Map, Value};

/// Key lists of every multi-select hash in `ast`, in written order
pub fn hash_key_orders(ast: &Ast) -> Vec<Vec<String>> {
    let mut orders = Vec::new();
    collect(ast, &mut orders);
    orders
}

fn collect(ast: &Ast, orders: &mut Vec<Vec<String>>) {
    match ast {
        Ast::MultiHash { elements, .. } => {
            let mut keys: Vec<String> = Vec::with_capacity(elements.len());
            for pair in elements {
                if !keys.contains(&pair.key) {
                    keys.push(pair.key.clone());
                }
                collect(&pair.value, orders);
            }
            orders.push(keys);
        }
        Ast::Comparison { lhs, rhs, .. }
        | Ast::And { lhs, rhs, .. }
        | Ast::Or { lhs, rhs, .. }
        | Ast::Projection { lhs, rhs, .. }
        | Ast::Subexpr { lhs, rhs, .. } => {
            collect(lhs, orders);
            collect(rhs, orders);
        }
        Ast::Condition { predicate, then, .. } => {
            collect(predicate, orders);
            collect(then, orders);
        }
        Ast::Expref { ast, .. } => collect(ast, orders),
        Ast::Flatten { node, .. } | Ast::Not { node, .. } | Ast::ObjectValues { node, .. } => {
            collect(node, orders)
        }
        Ast::Function { args, .. } => args.iter().for_each(|arg| collect(arg, orders)),
        Ast::MultiList { elements, .. } => elements.iter().for_each(|element| collect(element, orders)),
        _ => {}
    }
}

/// Reorder every object in `value` whose key set is exactly one of `orders`
pub fn restore_key_order(value: &mut Value, orders: &[Vec<String>]) {
    if orders.is_empty() {
        return;
    }

    match value {
        Value::Array(items) => items.iter_mut().for_each(|item| restore_key_order(item, orders)),
        Value::Object(map) => {
            map.values_mut().for_each(|child| restore_key_order(child, orders));

            let Some(order) = orders
                .iter()
                .find(|order| order.len() == map.len() && order.iter().all(|key| map.contains_key(key)))
            else {
                return;
            };

            let mut reordered = Map::with_capacity(map.len());
            for key in order {
                if let Some(child) = map.remove(key) {
                    reordered.insert(key.clone(), child);
                }
            }
            *map = reordered;
        }
        _ => {}
    }
}
