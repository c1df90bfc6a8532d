pub mod config;
pub mod error;
pub mod mapping;
pub mod render;
pub mod resolver;
pub mod types;
pub mod walker;
pub mod xml_path;

pub use error::{MappingError, RenderError, RowError, TransformError};
pub use mapping::{MappingTable, SharedMappingTable};
pub use types::{MappingEntry, Record};
pub use walker::{collect_records, transform, transform_reader, RecordStream};
