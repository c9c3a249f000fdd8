//! Generation settings.

use core::fmt::{self, Display};
use core::num::NonZeroUsize;
use core::str::FromStr;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::literal::SqlLiteral;

/// Rows per metrics or locations statement.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(50).unwrap();

/// The competitor cap historically applied to the `competitors` statement.
///
/// Not applied unless passed explicitly to
/// [`GeneratorConfig::competitor_limit()`].
pub const LEGACY_COMPETITOR_LIMIT: usize = 100;

/// The date every metrics snapshot is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotDate {
    /// The database's `CURRENT_DATE` at execution time.
    #[default]
    CurrentDate,
    /// A fixed calendar date, rendered as `'YYYY-MM-DD'`.
    Fixed(NaiveDate),
}

impl SnapshotDate {
    /// The literal embedded in each select.
    #[must_use]
    pub fn to_literal(self) -> SqlLiteral {
        match self {
            SnapshotDate::CurrentDate => SqlLiteral::Keyword("CURRENT_DATE"),
            SnapshotDate::Fixed(date) => SqlLiteral::Text(date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Whether the metrics path collapses rows sharing a competitor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsMode {
    /// One record per competitor name, last row wins. Holds every distinct
    /// record in memory before emitting.
    #[default]
    Deduplicated,
    /// One select per qualifying row, streamed batch by batch. Duplicate
    /// names in one batch make the upsert touch the same row twice, which
    /// PostgreSQL rejects.
    PerRow,
}

impl Display for MetricsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsMode::Deduplicated => f.write_str("deduplicated"),
            MetricsMode::PerRow => f.write_str("per-row"),
        }
    }
}

/// Error returned when parsing an unknown [`MetricsMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metrics mode `{0}`, expected `deduplicated` or `per-row`")]
pub struct UnknownMetricsMode(
    /// The rejected input.
    pub String,
);

impl FromStr for MetricsMode {
    type Err = UnknownMetricsMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deduplicated" | "dedup" => Ok(MetricsMode::Deduplicated),
            "per-row" | "per_row" => Ok(MetricsMode::PerRow),
            other => Err(UnknownMetricsMode(other.to_owned())),
        }
    }
}

/// Settings shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// The knowledge base CSV.
    pub input: PathBuf,
    /// Rows per metrics or locations statement.
    pub batch_size: NonZeroUsize,
    /// Emit at most this many competitors; `None` emits all of them.
    pub competitor_limit: Option<usize>,
    /// Date recorded on metrics snapshots.
    pub snapshot_date: SnapshotDate,
    /// Deduplication policy of the metrics path.
    pub metrics_mode: MetricsMode,
}

impl GeneratorConfig {
    /// Defaults for reading `input`.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            competitor_limit: None,
            snapshot_date: SnapshotDate::default(),
            metrics_mode: MetricsMode::default(),
        }
    }

    /// Set the batch size.
    #[must_use]
    pub fn batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Cap the competitors statement.
    #[must_use]
    pub fn competitor_limit(mut self, limit: Option<usize>) -> Self {
        self.competitor_limit = limit;
        self
    }

    /// Set the snapshot date.
    #[must_use]
    pub fn snapshot_date(mut self, snapshot_date: SnapshotDate) -> Self {
        self.snapshot_date = snapshot_date;
        self
    }

    /// Set the metrics mode.
    #[must_use]
    pub fn metrics_mode(mut self, metrics_mode: MetricsMode) -> Self {
        self.metrics_mode = metrics_mode;
        self
    }
}
