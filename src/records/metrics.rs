//! Submodule defining the normalized `competitor_metrics_daily` values.

use crate::errors::Result;
use crate::literal::SqlLiteral;
use crate::render::{CorrelatedRow, SqlRow};
use crate::source::SourceRow;

/// Review metrics observed for one competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRecord {
    /// Raw competitor name.
    pub name: String,
    /// Average rating, unquoted, or `NULL`.
    pub rating_avg: SqlLiteral,
    /// Review count, unquoted, or `NULL`.
    pub review_count: SqlLiteral,
    /// Market presence label or `NULL`.
    pub market_presence_label: SqlLiteral,
}

impl MetricsRecord {
    /// Normalize a source row.
    ///
    /// Returns `None` when the row carries neither a rating nor a review
    /// count; such rows produce no metrics at all.
    ///
    /// # Errors
    ///
    /// * `MissingColumn` - If the input header lacks one of the metrics columns.
    pub fn from_row(row: &SourceRow<'_>) -> Result<Option<Self>> {
        let name = row.get(super::COMPETITOR_NAME)?;
        let rating_avg = SqlLiteral::number_or_null(row.get("rating_avg")?);
        let review_count = SqlLiteral::number_or_null(row.get("review_count")?);
        let market_presence_label = SqlLiteral::text_or_null(row.get("market_presence_label")?);

        if rating_avg.is_null() && review_count.is_null() {
            return Ok(None);
        }

        Ok(Some(Self {
            name: name.to_owned(),
            rating_avg,
            review_count,
            market_presence_label,
        }))
    }
}

impl SqlRow for MetricsRecord {
    fn literals(&self) -> Vec<SqlLiteral> {
        vec![
            self.rating_avg.clone(),
            self.review_count.clone(),
            self.market_presence_label.clone(),
        ]
    }
}

impl CorrelatedRow for MetricsRecord {
    fn competitor_name(&self) -> &str {
        &self.name
    }
}
