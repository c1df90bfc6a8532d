use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Terminal failure of a single document traversal.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("malformed XML at byte {position}: {message}")]
    MalformedXml { position: u64, message: String },
    #[error("closing tag {} at byte {position} has no matching open element", .element.as_deref().unwrap_or("<unknown>"))]
    ImbalancedStructure {
        position: u64,
        element: Option<String>,
    },
}

impl TransformError {
    pub fn position(&self) -> u64 {
        match self {
            TransformError::MalformedXml { position, .. }
            | TransformError::ImbalancedStructure { position, .. } => *position,
        }
    }

    pub(crate) fn at(self, position: u64, closing: Option<&str>) -> Self {
        match self {
            TransformError::MalformedXml { message, .. } => {
                TransformError::MalformedXml { position, message }
            }
            TransformError::ImbalancedStructure { element, .. } => {
                TransformError::ImbalancedStructure {
                    position,
                    element: element.or_else(|| closing.map(str::to_string)),
                }
            }
        }
    }
}

/// The dictionary source could not be read at all.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("mapping source {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A dictionary row that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("line {line}: expected 3 fields, found {found}")]
    WrongArity { line: usize, found: usize },
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },
}

impl RowError {
    pub fn line(&self) -> usize {
        match self {
            RowError::WrongArity { line, .. }
            | RowError::UnterminatedQuote { line }
            | RowError::InvalidEncoding { line } => *line,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("failed to write rendered output: {0}")]
    Io(#[from] io::Error),
}
