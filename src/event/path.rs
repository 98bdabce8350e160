// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Path resolution for the event tree.
//!
//! A path addresses one node in the tree. It is either a flat string using `/`
//! as the segment separator, or an arbitrarily nested sequence of such
//! strings. Resolution flattens it into an ordered list of segments:
//!
//! * every string leaf is split on `/`
//! * each piece is trimmed
//! * empty pieces are discarded
//!
//! Resolution is pure and total. `""`, `"/"` and an empty sequence all resolve
//! to no segments at all, which denotes the root.
//!
//! # Examples
//!
//! ```rust
//! use mercury_events::event::{join, split, Path};
//!
//! assert_eq!(split("a//b/"), vec!["a", "b"]);
//!
//! let nested = Path::from(vec![Path::from("ui/ menu "), Path::from(vec!["file", "/open/"])]);
//! assert_eq!(nested.walk(), vec!["ui", "menu", "file", "open"]);
//! assert_eq!(join(&nested), "ui/menu/file/open");
//! ```

use crate::errors::PathError;
use serde_json::Value;

/// The segment separator used by flat string paths.
pub const SEPARATOR: char = '/';

/// A path into the event tree, possibly nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    /// A flat `/`-separated string
    Segment(String),
    /// A sequence of paths, concatenated in order
    Nested(Vec<Path>),
}

impl Path {
    /// The empty path, which denotes the root node.
    pub fn root() -> Self {
        Path::Nested(Vec::new())
    }

    /// Flattens this path into its ordered, non-empty, trimmed segments.
    pub fn walk(&self) -> Vec<String> {
        let mut segments = Vec::new();
        self.walk_into(&mut segments);
        segments
    }

    /// Normalizes this path into its canonical `/`-joined string form.
    pub fn join(&self) -> String {
        self.walk().join("/")
    }

    /// True when the path resolves to the root.
    pub fn is_root(&self) -> bool {
        match self {
            Path::Segment(s) => split(s).is_empty(),
            Path::Nested(parts) => parts.iter().all(Path::is_root),
        }
    }

    fn walk_into(&self, out: &mut Vec<String>) {
        match self {
            Path::Segment(s) => out.extend(split(s)),
            Path::Nested(parts) => {
                for part in parts {
                    part.walk_into(out);
                }
            }
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::root()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.join())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::Segment(s.to_string())
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::Segment(s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::Segment(s.clone())
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

impl<T: Into<Path>> From<Vec<T>> for Path {
    fn from(parts: Vec<T>) -> Self {
        Path::Nested(parts.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Path>, const N: usize> From<[T; N]> for Path {
    fn from(parts: [T; N]) -> Self {
        Path::Nested(parts.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for Path {
    type Error = PathError;

    /// Converts a JSON string or (nested) array of strings into a path.
    ///
    /// Any other JSON value is a caller contract violation and is rejected
    /// rather than silently dropped.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Path::Segment(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Path::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Path::Nested),
            other => Err(PathError::InvalidSegment {
                found: json_kind(&other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Splits a flat string on `/`, trims each piece and drops empty ones.
pub fn split(path: &str) -> Vec<String> {
    path.split(SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flattens any path into its segments. Equivalent to [`Path::walk`].
pub fn walk(path: impl Into<Path>) -> Vec<String> {
    path.into().walk()
}

/// Normalizes any path into its canonical string. Equivalent to [`Path::join`].
pub fn join(path: impl Into<Path>) -> String {
    path.into().join()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_collapses_empty_segments() {
        assert_eq!(split("a//b/"), vec!["a", "b"]);
        assert_eq!(split("/a/b"), vec!["a", "b"]);
        assert_eq!(split(" a / b "), vec!["a", "b"]);
        assert_eq!(split("a/ /b"), vec!["a", "b"]);
    }

    #[test]
    fn test_root_forms_resolve_to_nothing() {
        assert!(split("").is_empty());
        assert!(split("/").is_empty());
        assert!(split("///").is_empty());
        assert!(Path::root().walk().is_empty());
        assert!(Path::from("/").is_root());
        assert!(Path::from(vec!["", "/"]).is_root());
        assert!(!Path::from("a").is_root());
    }

    #[test]
    fn test_walk_flattens_nested_paths_in_order() {
        let path = Path::from(vec![
            Path::from("a/b"),
            Path::from(vec![Path::from("c"), Path::from(vec!["d/e"])]),
            Path::from("f"),
        ]);
        assert_eq!(path.walk(), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_join_is_stable_under_rewalking() {
        let paths = vec![
            Path::from("a//b/"),
            Path::from(vec!["x", "/y/z/"]),
            Path::from(["", "q"]),
            Path::root(),
        ];
        for p in paths {
            let joined = p.join();
            assert_eq!(joined, join(p.walk()));
            assert_eq!(joined, join(joined.as_str()));
        }
    }

    #[test]
    fn test_display_prefixes_separator() {
        assert_eq!(Path::from("a/b").to_string(), "/a/b");
        assert_eq!(Path::root().to_string(), "/");
    }

    #[test]
    fn test_try_from_json() {
        let path = Path::try_from(json!(["ui", ["menu/file", "open"]])).unwrap();
        assert_eq!(path.join(), "ui/menu/file/open");

        let err = Path::try_from(json!(["ui", 7])).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidSegment {
                found: "number".to_string()
            }
        );
        assert!(Path::try_from(json!({"a": "b"})).is_err());
    }
}
