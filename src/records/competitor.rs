//! Submodule defining the normalized `competitors` tuple.

use crate::errors::Result;
use crate::literal::SqlLiteral;
use crate::render::SqlRow;
use crate::source::SourceRow;

/// One `competitors` tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitorRecord {
    /// Raw competitor name, the natural key.
    pub name: String,
    /// Metal, defaulting to `unknown`.
    pub metal: SqlLiteral,
    /// Use category, defaulting to `General`.
    pub use_category: SqlLiteral,
    /// Region, defaulting to `unknown`.
    pub region: SqlLiteral,
    /// Business type, defaulting to `Showroom`.
    pub business_type: SqlLiteral,
    /// Price positioning, defaulting to `unknown`.
    pub price_positioning: SqlLiteral,
    /// `true` only when the presence column is exactly `Yes`.
    pub national_chain: SqlLiteral,
    /// Website or `NULL`.
    pub website: SqlLiteral,
    /// Instagram handle or `NULL`.
    pub instagram_handle: SqlLiteral,
    /// Facebook account or `NULL`.
    pub facebook_account: SqlLiteral,
}

impl CompetitorRecord {
    /// Normalize a source row.
    ///
    /// # Errors
    ///
    /// * `MissingColumn` - If the input header lacks one of the competitor columns.
    pub fn from_row(row: &SourceRow<'_>) -> Result<Self> {
        Ok(Self {
            name: row.get(super::COMPETITOR_NAME)?.to_owned(),
            metal: SqlLiteral::text_or(row.get("metal")?, "unknown"),
            use_category: SqlLiteral::text_or(row.get("use_category")?, "General"),
            region: SqlLiteral::text_or(row.get("region")?, "unknown"),
            business_type: SqlLiteral::text_or(row.get("business_type")?, "Showroom"),
            price_positioning: SqlLiteral::text_or(row.get("price_positioning")?, "unknown"),
            national_chain: SqlLiteral::yes_flag(row.get("national_chain_presence")?),
            website: SqlLiteral::text_or_null(row.get("website")?),
            instagram_handle: SqlLiteral::text_or_null(row.get("instagram_handle")?),
            facebook_account: SqlLiteral::text_or_null(row.get("facebook_account")?),
        })
    }
}

impl SqlRow for CompetitorRecord {
    fn literals(&self) -> Vec<SqlLiteral> {
        vec![
            SqlLiteral::Text(self.name.clone()),
            self.metal.clone(),
            self.use_category.clone(),
            self.region.clone(),
            self.business_type.clone(),
            self.price_positioning.clone(),
            self.national_chain.clone(),
            self.website.clone(),
            self.instagram_handle.clone(),
            self.facebook_account.clone(),
        ]
    }
}
