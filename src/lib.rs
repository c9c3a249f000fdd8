#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod config;
pub mod dedup;
pub mod errors;
pub mod generate;
pub mod literal;
pub mod logger;
pub mod records;
pub mod render;
pub mod schema;
pub mod source;

pub use config::{
    DEFAULT_BATCH_SIZE, GeneratorConfig, LEGACY_COMPETITOR_LIMIT, MetricsMode, SnapshotDate,
};
pub use dedup::Deduplicator;
pub use errors::{Error, Result};
pub use generate::{GenerationSummary, Generator, Target};
pub use literal::SqlLiteral;
pub use records::{CompetitorRecord, LocationRecord, MetricsRecord};
pub use render::{Batcher, CorrelatedRow, SelectUnionInsert, SqlRow, ValuesInsert};
pub use source::{CsvSource, SourceRow};
