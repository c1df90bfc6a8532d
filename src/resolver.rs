use crate::mapping::MappingTable;
use crate::types::ResolvedLabel;
use crate::xml_path::XmlPath;
use std::collections::HashMap;

/// Counts emissions per exact path within one document.
#[derive(Debug, Default)]
pub struct RepetitionCounter {
    counts: HashMap<XmlPath, usize>,
}

impl RepetitionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based ordinal of this emission at `path`.
    pub fn next(&mut self, path: &XmlPath) -> usize {
        if let Some(count) = self.counts.get_mut(path) {
            *count += 1;
            return *count;
        }
        self.counts.insert(path.clone(), 1);
        1
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}

/// Turns the current path into the label and header a record is shown with.
#[derive(Debug)]
pub struct Resolver<'m> {
    table: &'m MappingTable,
    counter: RepetitionCounter,
}

impl<'m> Resolver<'m> {
    pub fn new(table: &'m MappingTable) -> Self {
        Self {
            table,
            counter: RepetitionCounter::new(),
        }
    }

    /// Resolves the path of a text node. The path length is the open-element depth.
    ///
    /// Headers only apply below the root element. A header counts as changed when it
    /// differs from the name of the element owning the current group, i.e. the parent of
    /// the innermost open element. Repeated values at one path get ` 2`, ` 3`, ...
    /// appended; the first stays bare.
    pub fn resolve(&mut self, path: &XmlPath) -> ResolvedLabel {
        let element_name = path.leaf().unwrap_or_default().trim();
        let mut label = self
            .table
            .lookup_label(path)
            .unwrap_or(element_name)
            .to_string();

        let mut header = None;
        let mut header_changed = false;
        if path.len() > 1 {
            if let Some(found) = self.table.lookup_header(path) {
                let owner = path.owner().unwrap_or_default().trim();
                header_changed = found != owner;
                header = Some(found.to_string());
            }
        }

        let ordinal = self.counter.next(path);
        if ordinal > 1 {
            label = format!("{label} {ordinal}");
        }

        ResolvedLabel {
            label,
            header,
            header_changed,
        }
    }
}
