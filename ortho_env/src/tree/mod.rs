//! Construction and deep merging of configuration trees.
//!
//! Every environment entry becomes a minimal single-path tree, which is then
//! merged into the tree accumulated so far. Trees are plain
//! [`serde_json::Value`] objects so they can be handed to any encoder.

use serde_json::{Map, Value};

use crate::error::{EnvError, EnvResult};

/// Wrap `leaf` in nested single-key objects following `reversed` segments.
///
/// `reversed` yields segments innermost first: the first segment maps directly
/// to `leaf` and each later segment wraps the previous object.
///
/// # Examples
///
/// ```rust
/// use ortho_env::tree::build_tree;
/// use serde_json::{Value, json};
///
/// let tree = build_tree(["host", "database"], json!("localhost"));
/// assert_eq!(Value::Object(tree), json!({"database": {"host": "localhost"}}));
/// ```
pub fn build_tree<'s, I>(reversed: I, leaf: Value) -> Map<String, Value>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut segments = reversed.into_iter();
    let mut tree = Map::new();
    let Some(innermost) = segments.next() else {
        return tree;
    };
    tree.insert(innermost.to_owned(), leaf);
    for segment in segments {
        let mut outer = Map::new();
        outer.insert(segment.to_owned(), Value::Object(tree));
        tree = outer;
    }
    tree
}

/// Deep-merge `incoming` into `target`.
///
/// Behaviour:
/// - Keys missing from `target` are inserted with their whole subtree.
/// - Objects present on both sides merge recursively.
/// - Scalars and arrays present on both sides are replaced by the incoming
///   value, so later entries win.
/// - An object colliding with a scalar or array, in either direction, is a
///   conflict.
///
/// # Errors
///
/// Returns [`EnvError::MergeConflict`] naming the dotted path of the first
/// object-versus-value collision. `target` may already hold part of
/// `incoming` when this happens; callers discard it.
///
/// # Examples
///
/// ```rust
/// use ortho_env::tree::merge_tree;
/// use serde_json::json;
///
/// let mut acc = json!({"a": {"b": 1}, "c": 1});
/// let incoming = json!({"a": {"d": 2}, "c": 2})
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// merge_tree(&mut acc, incoming)?;
/// assert_eq!(acc, json!({"a": {"b": 1, "d": 2}, "c": 2}));
/// # Ok::<_, ortho_env::EnvError>(())
/// ```
pub fn merge_tree(target: &mut Value, incoming: Map<String, Value>) -> EnvResult<()> {
    let mut path = Vec::new();
    merge_object(target, incoming, &mut path)
}

fn merge_object(
    target: &mut Value,
    incoming: Map<String, Value>,
    path: &mut Vec<String>,
) -> EnvResult<()> {
    let Some(target_map) = target.as_object_mut() else {
        return Err(conflict(path));
    };

    for (key, value) in incoming {
        match target_map.get_mut(&key) {
            Some(existing) => {
                path.push(key);
                merge_value(existing, value, path)?;
                path.pop();
            }
            None => {
                target_map.insert(key, value);
            }
        }
    }
    Ok(())
}

fn merge_value(existing: &mut Value, incoming: Value, path: &mut Vec<String>) -> EnvResult<()> {
    match (existing.is_object(), incoming) {
        (true, Value::Object(map)) => merge_object(existing, map, path),
        (false, Value::Object(_)) | (true, _) => Err(conflict(path)),
        (false, value) => {
            *existing = value;
            Ok(())
        }
    }
}

fn conflict(path: &[String]) -> EnvError {
    EnvError::MergeConflict {
        path: path.join("."),
    }
}
