use crate::mapping::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "XMLRECORDS_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "xmlrecords.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    pub mapping_path: Option<PathBuf>,
    pub delimiter: char,
    pub has_header_row: bool,
    pub format: OutputFormat,
}

impl Default for TransformConfig {
    fn default() -> Self {
        let loader = LoaderOptions::default();
        Self {
            mapping_path: None,
            delimiter: loader.delimiter,
            has_header_row: loader.has_header_row,
            format: OutputFormat::default(),
        }
    }
}

impl TransformConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    /// Reads `xmlrecords.json` from `$XMLRECORDS_CONFIG_DIR`, or returns the defaults when
    /// the variable is unset.
    pub fn load_default() -> Result<Self, String> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => Self::load_from_file(Path::new(&dir).join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            delimiter: self.delimiter,
            has_header_row: self.has_header_row,
        }
    }
}
