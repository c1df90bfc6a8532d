use crate::error::TransformError;
use std::fmt;

/// Separator used when a path is displayed or written in a mapping dictionary.
pub const PATH_SEPARATOR: &str = "->";

/// Element names from the document root down to the current node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XmlPath {
    segments: Vec<String>,
}

impl XmlPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `->` joined path. Blank input yields the empty path.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::new();
        }
        Self {
            segments: text.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Second-to-last segment: the element that owns the leaf's group.
    pub fn owner(&self) -> Option<&str> {
        self.segments
            .len()
            .checked_sub(2)
            .map(|idx| self.segments[idx].as_str())
    }

    pub fn folded(&self) -> FoldedPath {
        FoldedPath(self.segments.iter().map(|s| s.to_lowercase()).collect())
    }

    fn push(&mut self, segment: String) {
        self.segments.push(segment);
    }

    fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }
}

impl fmt::Display for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(PATH_SEPARATOR))
    }
}

/// Case-folded form of a path, used as the mapping table key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FoldedPath(Vec<String>);

/// Breadcrumb of currently open elements while a document is walked.
#[derive(Debug, Default)]
pub struct PathTracker {
    path: XmlPath,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str) {
        self.path.push(name.to_string());
    }

    /// Removes the innermost element. Fails when nothing is open.
    pub fn pop(&mut self) -> Result<String, TransformError> {
        self.path
            .pop()
            .ok_or_else(|| TransformError::ImbalancedStructure {
                position: 0,
                element: None,
            })
    }

    pub fn current(&self) -> &XmlPath {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
