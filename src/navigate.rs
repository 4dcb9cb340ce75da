//! Path evaluation over raw JSON responses.
//!
//! The browse API returns deeply nested renderer trees whose exact shape
//! varies between surfaces. This module provides the generic navigation
//! primitives the assemblers are built on: required and optional path
//! selection plus unbounded-depth search by property name.
//!
//! The path grammar is dot-separated property names with optional `name[i]`
//! array indexing, e.g. `title.runs[0].text`. There is no length operator;
//! a "last element" index has to be computed by the caller before the path
//! string is built.

use serde_json::Value;

use crate::error::{Result, YtMusicError};

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Property lookup on an object.
    Key(String),
    /// Element lookup on an array.
    Index(usize),
}

/// Parse a path expression into its segments.
///
/// Malformed index brackets are treated as unresolvable rather than panicking;
/// `select` will report the full path as not found.
fn parse_path(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let (name, rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if name.is_empty() {
            return None;
        }
        segments.push(Segment::Key(name.to_string()));

        let mut rest = rest;
        while let Some(stripped) = rest.strip_prefix('[') {
            let close = stripped.find(']')?;
            let index: usize = stripped[..close].parse().ok()?;
            segments.push(Segment::Index(index));
            rest = &stripped[close + 1..];
        }
        if !rest.is_empty() {
            return None;
        }
    }

    Some(segments)
}

/// Walk the parsed segments down the tree, stopping at the first mismatch.
fn walk<'a>(node: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let mut current = node;
    for segment in segments {
        current = match segment {
            Segment::Key(name) => current.as_object()?.get(name)?,
            Segment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Resolve a required path.
///
/// Fails with [`YtMusicError::PathNotFound`] if any segment is absent,
/// an index is past the array bounds, or a segment is applied to a scalar.
/// Used for fields whose absence indicates a malformed or unrecognized
/// response shape.
pub fn select<'a>(node: &'a Value, path: &str) -> Result<&'a Value> {
    parse_path(path)
        .and_then(|segments| walk(node, &segments))
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: path.to_string(),
        })
}

/// Resolve an optional path; identical traversal to [`select`] but returns
/// `None` instead of failing.
pub fn select_optional<'a>(node: &'a Value, path: &str) -> Option<&'a Value> {
    parse_path(path).and_then(|segments| walk(node, &segments))
}

/// Collect every node reachable under the given property name, at any depth,
/// in document order (pre-order).
///
/// Used where the exact wrapping of a needed container varies between
/// response variants, e.g. the streaming-data section whose enclosing
/// renderer differs by caller. Callers should pass the smallest subtree they
/// already hold to bound the traversal.
pub fn find_all_by_key<'a>(node: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut matches = Vec::new();
    collect_by_key(node, key, &mut matches);
    matches
}

fn collect_by_key<'a>(node: &'a Value, key: &str, matches: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                if name == key {
                    matches.push(child);
                }
                collect_by_key(child, key, matches);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_by_key(child, key, matches);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_nested_path() {
        let node = json!({
            "title": { "runs": [{ "text": "Some Song" }] }
        });

        let text = select(&node, "title.runs[0].text").unwrap();
        assert_eq!(text.as_str(), Some("Some Song"));
    }

    #[test]
    fn test_select_missing_path_names_path() {
        let node = json!({ "title": {} });

        let err = select(&node, "title.runs[0].text").unwrap_err();
        match err {
            YtMusicError::PathNotFound { path } => assert_eq!(path, "title.runs[0].text"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_index_out_of_bounds() {
        let node = json!({ "runs": [{ "text": "a" }] });

        assert!(select(&node, "runs[1].text").is_err());
    }

    #[test]
    fn test_select_index_into_scalar() {
        let node = json!({ "runs": "not an array" });

        assert!(select(&node, "runs[0]").is_err());
        assert!(select(&node, "runs.text").is_err());
    }

    #[test]
    fn test_select_optional_returns_none() {
        let node = json!({ "a": { "b": 1 } });

        assert_eq!(select_optional(&node, "a.b"), Some(&json!(1)));
        assert_eq!(select_optional(&node, "a.c"), None);
    }

    #[test]
    fn test_find_all_by_key_document_order() {
        let node = json!({
            "outer": {
                "target": 1,
                "list": [
                    { "target": 2 },
                    { "nested": { "target": 3 } }
                ]
            },
            "target": 4
        });

        let found = find_all_by_key(&node, "target");
        let values: Vec<i64> = found.iter().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_find_all_by_key_no_matches() {
        let node = json!({ "a": [1, 2, 3] });
        assert!(find_all_by_key(&node, "missing").is_empty());
    }
}
