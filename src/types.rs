use crate::xml_path::XmlPath;
use serde::{Deserialize, Serialize};

/// One row of the path dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub source_path: XmlPath,
    pub header_path: Option<XmlPath>,
    pub label: String,
}

impl MappingEntry {
    /// Builds an entry from the raw dictionary columns. A blank header column means none.
    pub fn new(source_path: &str, header_path: &str, label: &str) -> Self {
        let header_path = XmlPath::parse(header_path);
        Self {
            source_path: XmlPath::parse(source_path),
            header_path: (!header_path.is_empty()).then_some(header_path),
            label: label.to_string(),
        }
    }

    /// Display header: the parent section named one level above the leaf of the header path.
    pub fn header(&self) -> Option<&str> {
        self.header_path.as_ref().and_then(XmlPath::owner)
    }
}

/// Outcome of resolving a path to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    pub label: String,
    pub header: Option<String>,
    pub header_changed: bool,
}

/// Unit handed to a rendering sink, one per non-blank text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub header_changed: bool,
    pub label: String,
    pub text: String,
}

impl Record {
    pub fn new(resolved: ResolvedLabel, text: String) -> Self {
        Self {
            header: resolved.header,
            header_changed: resolved.header_changed,
            label: resolved.label,
            text,
        }
    }

    /// The `label: text` line every sink renders.
    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.text)
    }
}
