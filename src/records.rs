//! Normalized records derived from source rows.
//!
//! Each record type applies the field defaults for one target table and holds
//! its values as ready-to-render [`SqlLiteral`](crate::SqlLiteral)s. No input
//! is rejected here: empty or malformed values degrade to their defaults.

mod competitor;
mod location;
mod metrics;

pub use competitor::CompetitorRecord;
pub use location::LocationRecord;
pub use metrics::MetricsRecord;

/// Column holding the competitor's natural key.
pub const COMPETITOR_NAME: &str = "competitor_name";
