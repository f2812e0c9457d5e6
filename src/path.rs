use crate::error::QueryError;
use crate::value::{Value, type_name};

/// A segment in a navigable path.
///
/// Paths are strings split on the session separator (`.` by default). A
/// segment wrapped in `[` `]` is a zero-based array index; everything else
/// is an object key.
///
/// # Examples
/// - `"users.[0].name"` → `[Key("users"), Index(0), Key("name")]`
/// - `"vendor.items"` → `[Key("vendor"), Key("items")]`
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Object field access by name
    Key(String),

    /// Array element access by zero-based index
    Index(usize),
}

fn is_index(segment: &str) -> bool {
    segment.starts_with('[') && segment.ends_with(']')
}

/// Split a path string into segments. A segment that looks like an index
/// but does not hold a number (`[x]`) is an error.
pub fn parse(path: &str, separator: &str) -> Result<Vec<Segment>, QueryError> {
    let mut segments = Vec::new();
    for part in path.split(separator) {
        if is_index(part) {
            let body = &part[1..part.len() - 1];
            let index = body
                .parse::<usize>()
                .map_err(|_| QueryError::InvalidIndex(part.to_string()))?;
            segments.push(Segment::Index(index));
        } else {
            segments.push(Segment::Key(part.to_string()));
        }
    }
    Ok(segments)
}

/// Walk a path down a value, segment by segment.
///
/// A key segment descends into an object that contains the key; an index
/// segment descends into an array within bounds. Any other combination
/// fails: a missing key or a non-object under a key segment reports
/// `InvalidNode`, while an index segment distinguishes "array too short"
/// (`IndexOutOfRange`) from "not an array at all" (`NotASequence`).
pub fn lookup<'a>(root: &'a Value, path: &str, separator: &str) -> Result<&'a Value, QueryError> {
    let mut current = root;
    for segment in parse(path, separator)? {
        match segment {
            Segment::Key(key) => match current {
                Value::Object(map) => match map.get(&key) {
                    Some(v) => current = v,
                    None => return Err(QueryError::InvalidNode(key)),
                },
                _ => return Err(QueryError::InvalidNode(key)),
            },
            Segment::Index(index) => match current {
                Value::Array(arr) => {
                    if index >= arr.len() {
                        return Err(QueryError::IndexOutOfRange {
                            index,
                            len: arr.len(),
                        });
                    }
                    current = &arr[index];
                }
                other => {
                    return Err(QueryError::NotASequence {
                        index,
                        found: type_name(other),
                    });
                }
            },
        }
    }
    Ok(current)
}

/// Split a projection spec into `(path, alias)`. The alias is everything
/// after ` as `; without one it falls back to the last path segment.
///
/// # Examples
/// - `"user.name as uname"` → `("user.name", "uname")`
/// - `"post.title"` → `("post.title", "title")`
/// - `"name"` → `("name", "name")`
pub fn make_alias<'a>(spec: &'a str, separator: &str) -> (&'a str, &'a str) {
    if let Some((path, alias)) = spec.split_once(" as ") {
        return (path.trim(), alias.trim());
    }
    let path = spec.trim();
    let alias = path.rsplit(separator).next().unwrap_or(path);
    (path, alias)
}
