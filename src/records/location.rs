//! Submodule defining the normalized `competitor_locations` values.

use crate::errors::Result;
use crate::literal::SqlLiteral;
use crate::render::{CorrelatedRow, SqlRow};
use crate::source::SourceRow;

/// Where a competitor trades, and how many outlets it runs there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    /// Raw competitor name.
    pub name: String,
    /// City, defaulting to `Unknown`.
    pub city: SqlLiteral,
    /// State, defaulting to `Unknown`.
    pub state: SqlLiteral,
    /// Locality or `NULL`.
    pub locality: SqlLiteral,
    /// Store count, `1` unless all digits.
    pub store_count: SqlLiteral,
    /// Branch count, `0` unless all digits.
    pub branch_count: SqlLiteral,
}

impl LocationRecord {
    /// Normalize a source row.
    ///
    /// # Errors
    ///
    /// * `MissingColumn` - If the input header lacks one of the location columns.
    pub fn from_row(row: &SourceRow<'_>) -> Result<Self> {
        Ok(Self {
            name: row.get(super::COMPETITOR_NAME)?.to_owned(),
            city: SqlLiteral::text_or(row.get("city")?, "Unknown"),
            state: SqlLiteral::text_or(row.get("state")?, "Unknown"),
            locality: SqlLiteral::text_or_null(row.get("locality")?),
            store_count: SqlLiteral::count_or(row.get("store_count")?, "1"),
            branch_count: SqlLiteral::count_or(row.get("branch_count")?, "0"),
        })
    }

    /// The city after defaulting, unescaped.
    #[must_use]
    pub fn city_name(&self) -> &str {
        match &self.city {
            SqlLiteral::Text(city) => city,
            _ => "",
        }
    }

    /// The state after defaulting, unescaped.
    #[must_use]
    pub fn state_name(&self) -> &str {
        match &self.state {
            SqlLiteral::Text(state) => state,
            _ => "",
        }
    }
}

impl SqlRow for LocationRecord {
    fn literals(&self) -> Vec<SqlLiteral> {
        vec![
            self.city.clone(),
            self.state.clone(),
            self.locality.clone(),
            self.store_count.clone(),
            self.branch_count.clone(),
        ]
    }
}

impl CorrelatedRow for LocationRecord {
    fn competitor_name(&self) -> &str {
        &self.name
    }
}
