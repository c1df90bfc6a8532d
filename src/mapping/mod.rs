use crate::error::{MappingError, RowError};
use crate::types::MappingEntry;
use crate::xml_path::{FoldedPath, XmlPath};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub mod loader;
pub mod shared;

pub use loader::LoaderOptions;
pub use shared::SharedMappingTable;

#[derive(Debug)]
struct Slot {
    entry: MappingEntry,
    header: Option<String>,
    /// Set once an entry with a header path of two or more segments was seen.
    header_fixed: bool,
}

/// Immutable path -> (label, header) dictionary. Lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct MappingTable {
    index: HashMap<FoldedPath, usize>,
    slots: Vec<Slot>,
    diagnostics: Vec<RowError>,
}

impl MappingTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from already validated entries.
    ///
    /// When several entries share a source path the first label wins, and the header comes
    /// from the first of them whose header path has at least two segments.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry);
        }
        tracing::debug!("[Mapping] Built table with {} paths", table.slots.len());
        table
    }

    /// Builds a table from raw `(source_path, header_path, label)` rows, numbered from 1.
    /// Rows of the wrong width are skipped and kept as diagnostics.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let numbered = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (idx + 1, row))
            .collect();
        Self::from_numbered_rows(numbered, Vec::new())
    }

    pub(crate) fn from_numbered_rows(
        rows: Vec<(usize, Vec<String>)>,
        mut diagnostics: Vec<RowError>,
    ) -> Self {
        let mut entries = Vec::with_capacity(rows.len());
        for (line, row) in rows {
            match row.as_slice() {
                [source, header, label] => entries.push(MappingEntry::new(source, header, label)),
                _ => diagnostics.push(RowError::WrongArity {
                    line,
                    found: row.len(),
                }),
            }
        }
        diagnostics.sort_by_key(RowError::line);
        for diagnostic in &diagnostics {
            tracing::warn!("[Mapping] Skipping dictionary row, {}", diagnostic);
        }

        let mut table = Self::build(entries);
        table.diagnostics = diagnostics;
        table
    }

    /// Reads a delimited dictionary from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R, options: &LoaderOptions) -> io::Result<Self> {
        let (rows, diagnostics) = loader::read_rows(reader, options)?;
        Ok(Self::from_numbered_rows(rows, diagnostics))
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        options: &LoaderOptions,
    ) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let unavailable = |source: io::Error| MappingError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let table = Self::from_reader(BufReader::new(file), options).map_err(unavailable)?;
        tracing::info!(
            "[Mapping] Loaded {} paths from {} ({} rows skipped)",
            table.len(),
            path.display(),
            table.diagnostics.len()
        );
        Ok(table)
    }

    fn insert(&mut self, entry: MappingEntry) {
        let header_path_len = entry.header_path.as_ref().map_or(0, XmlPath::len);
        let header = entry.header().map(str::to_string);

        match self.index.get(&entry.source_path.folded()) {
            Some(&idx) => {
                let slot = &mut self.slots[idx];
                if !slot.header_fixed && header_path_len > 1 {
                    slot.header = header;
                    slot.header_fixed = true;
                }
            }
            None => {
                self.index
                    .insert(entry.source_path.folded(), self.slots.len());
                self.slots.push(Slot {
                    entry,
                    header,
                    header_fixed: header_path_len > 1,
                });
            }
        }
    }

    fn slot(&self, path: &XmlPath) -> Option<&Slot> {
        self.index.get(&path.folded()).map(|&idx| &self.slots[idx])
    }

    pub fn lookup(&self, path: &XmlPath) -> Option<&MappingEntry> {
        self.slot(path).map(|slot| &slot.entry)
    }

    /// Mapped label for the path. An empty mapped label counts as no label.
    pub fn lookup_label(&self, path: &XmlPath) -> Option<&str> {
        self.slot(path)
            .map(|slot| slot.entry.label.as_str())
            .filter(|label| !label.is_empty())
    }

    pub fn lookup_header(&self, path: &XmlPath) -> Option<&str> {
        self.slot(path)
            .and_then(|slot| slot.header.as_deref())
            .filter(|header| !header.is_empty())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distinct entries in the order their paths first appeared.
    pub fn entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.slots.iter().map(|slot| &slot.entry)
    }

    pub fn diagnostics(&self) -> &[RowError] {
        &self.diagnostics
    }
}
