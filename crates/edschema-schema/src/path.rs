//! Schema paths.
//!
//! A path is a sequence of segments. Callers usually hand over a dotted
//! string (`"components.render.materialAssets.0"`), but pre-split
//! segments and a lone array index are accepted as well.

use std::fmt;

/// A pre-split schema path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
    /// Split a dotted path into segments.
    ///
    /// Splitting is literal: `""` is one empty segment and `"a..b"` has an
    /// empty middle segment, neither of which names a field in practice.
    pub fn parse(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Whether a segment addresses an array element.
pub(crate) fn is_index(segment: &str) -> bool {
    segment.parse::<u64>().is_ok()
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for SchemaPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<&String> for SchemaPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for SchemaPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<usize> for SchemaPath {
    fn from(index: usize) -> Self {
        Self(vec![index.to_string()])
    }
}

impl From<Vec<String>> for SchemaPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for SchemaPath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SchemaPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_dots() {
        let path = SchemaPath::parse("components.render.materialAssets.0");
        assert_eq!(path.len(), 4);
        assert_eq!(path.segments()[3], "0");
        assert_eq!(path.to_string(), "components.render.materialAssets.0");
    }

    #[test]
    fn empty_string_is_one_empty_segment() {
        let path = SchemaPath::parse("");
        assert_eq!(path.segments(), &[String::new()]);
    }

    #[test]
    fn from_index_and_segments() {
        assert_eq!(SchemaPath::from(2usize).segments(), &["2".to_string()]);
        let path = SchemaPath::from(&["a", "b.c"][..]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[1], "b.c");
    }

    #[test]
    fn index_segments() {
        assert!(is_index("0"));
        assert!(is_index("17"));
        assert!(!is_index("-1"));
        assert!(!is_index("x"));
        assert!(!is_index(""));
    }
}
