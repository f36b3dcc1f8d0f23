//! # Form Paths
//!
//! A [`FormPath`] is the ordered list of keys leading from the form's root
//! value to one field. Validators report locations as JSON Pointers in one
//! of three styles, all of which decode to the same path:
//!
//! | style                 | example                             |
//! |-----------------------|-------------------------------------|
//! | unanchored            | `/address/lines/0`                  |
//! | document-anchored     | `#/address/lines/0`                 |
//! | absolute-URI-anchored | `https://x.org/s.json#/address/lines/0` |
//!
//! The display form renders index-like segments as `[n]` and every other
//! segment as `.name`, with the leading dot trimmed: `address.lines[0]`.
//!
//! ## Limitation
//!
//! An object key made only of digits renders exactly like an array index.
//! The display form is for people; keep the [`FormPath`] (or its pointer)
//! when a location has to be followed back into a value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered segments addressing a location inside a form value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPath(Vec<String>);

impl FormPath {
    /// The empty path, addressing the form's root value.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of a child field: this path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Path of the containing field, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as an unanchored RFC 6901 pointer (`""` for the root).
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        out
    }

    /// Render the dotted/bracketed display path, e.g. `items[2].name`.
    pub fn display_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if is_index_segment(segment) {
                write!(f, "[{segment}]")?;
            } else if i == 0 {
                f.write_str(segment)?;
            } else {
                write!(f, ".{segment}")?;
            }
        }
        Ok(())
    }
}

impl From<Vec<String>> for FormPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a FormPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a segment reads as a base-10 integer and so renders as `[n]`.
pub fn is_index_segment(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decode a JSON Pointer in any of the three recognized styles.
///
/// The empty pointer (and a bare `#`) decode to the root path. Consecutive
/// slashes produce literal empty-string segments; they are not skipped.
pub fn decode(pointer: &str) -> FormPath {
    if pointer.is_empty() || pointer == "#" {
        return FormPath::root();
    }
    let Some(body) = strip_anchor(pointer) else {
        return FormPath::root();
    };
    FormPath(body.split('/').map(unescape_segment).collect())
}

/// Decode a pointer and render it straight to its display path.
pub fn pointer_to_display(pointer: &str) -> String {
    decode(pointer).display_path()
}

/// Remove the pointer's anchor prefix. `None` when an absolute URI carries
/// no `#/` fragment at all.
fn strip_anchor(pointer: &str) -> Option<&str> {
    if let Some(body) = pointer.strip_prefix('/') {
        Some(body)
    } else if let Some(body) = pointer.strip_prefix("#/") {
        Some(body)
    } else if pointer.starts_with("http") {
        pointer.split_once("#/").map(|(_, body)| body)
    } else {
        Some(pointer)
    }
}

fn unescape_segment(segment: &str) -> String {
    if segment.contains('~') {
        segment.replace("~1", "/").replace("~0", "~")
    } else {
        segment.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_unanchored_pointer() {
        let path = decode("/address/lines/0");
        assert_eq!(path.segments(), &["address", "lines", "0"]);
        assert_eq!(path.display_path(), "address.lines[0]");
    }

    #[test]
    fn test_all_anchor_styles_agree() {
        let styles = [
            "/items/2/name",
            "#/items/2/name",
            "https://schemas.example.org/order.json#/items/2/name",
            "http://localhost/s#/items/2/name",
        ];
        for pointer in styles {
            let path = decode(pointer);
            assert_eq!(path.segments(), &["items", "2", "name"], "pointer {pointer}");
            assert_eq!(path.display_path(), "items[2].name", "pointer {pointer}");
        }
    }

    #[test]
    fn test_empty_pointer_is_root() {
        assert!(decode("").is_empty());
        assert!(decode("#").is_empty());
        assert_eq!(pointer_to_display(""), "");
    }

    #[test]
    fn test_uri_without_fragment_is_root() {
        assert!(decode("https://schemas.example.org/order.json").is_empty());
    }

    #[test]
    fn test_empty_segments_are_literal() {
        let path = decode("/a//b");
        assert_eq!(path.segments(), &["a", "", "b"]);
        assert_eq!(path.display_path(), "a..b");

        let single = decode("/");
        assert_eq!(single.segments(), &[""]);
        assert_eq!(single.display_path(), "");
    }

    #[test]
    fn test_leading_index_keeps_brackets() {
        assert_eq!(pointer_to_display("/0/name"), "[0].name");
        assert_eq!(pointer_to_display("/3"), "[3]");
    }

    #[test]
    fn test_numeric_key_renders_as_index() {
        // Documented ambiguity: "2024" may be an object key.
        assert_eq!(pointer_to_display("/totals/2024"), "totals[2024]");
    }

    #[test]
    fn test_index_segment_detection() {
        assert!(is_index_segment("0"));
        assert!(is_index_segment("42"));
        assert!(is_index_segment("-1"));
        assert!(!is_index_segment(""));
        assert!(!is_index_segment("-"));
        assert!(!is_index_segment("12abc"));
        assert!(!is_index_segment("+1"));
        assert!(!is_index_segment("name"));
    }

    #[test]
    fn test_pointer_escapes() {
        let path = decode("/a~1b/c~0d");
        assert_eq!(path.segments(), &["a/b", "c~d"]);
        assert_eq!(path.to_pointer(), "/a~1b/c~0d");
    }

    #[test]
    fn test_child_and_parent() {
        let root = FormPath::root();
        let field = root.child("contacts").child("1");
        assert_eq!(field.to_pointer(), "/contacts/1");
        assert_eq!(field.last(), Some("1"));
        assert_eq!(field.parent(), Some(FormPath::from_segments(["contacts"])));
        assert_eq!(root.parent(), None);
        assert_eq!(root.to_pointer(), "");
    }

    #[test]
    fn test_serializes_as_segment_array() {
        let path = FormPath::from_segments(["a", "0"]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["a", "0"]));
    }
}
