use super::{LoaderOptions, MappingTable};
use crate::error::MappingError;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

type Loader = dyn Fn() -> Result<MappingTable, MappingError> + Send + Sync;

/// A mapping table that is loaded on first use and shared read-only afterwards.
///
/// Readers take the read lock only. The first caller to find the table missing takes the
/// write lock, checks again, and runs the loader. A failed load is handed back to that
/// caller and not remembered, so the next `get` tries again.
pub struct SharedMappingTable {
    loader: Box<Loader>,
    table: RwLock<Option<Arc<MappingTable>>>,
}

impl SharedMappingTable {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<MappingTable, MappingError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            table: RwLock::new(None),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>, options: LoaderOptions) -> Self {
        let path = path.into();
        Self::new(move || MappingTable::load_from_file(&path, &options))
    }

    pub fn preloaded(table: MappingTable) -> Self {
        Self {
            loader: Box::new(|| Ok(MappingTable::empty())),
            table: RwLock::new(Some(Arc::new(table))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn get(&self) -> Result<Arc<MappingTable>, MappingError> {
        if let Some(table) = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new((self.loader)()?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }
}

impl fmt::Debug for SharedMappingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedMappingTable")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
