//! Target schema: the tables generated statements insert into.
mod table;

pub use table::{CompetitorLookup, OnConflict, Table};

/// `competitors`, keyed by its unique `competitor_name`.
pub const COMPETITORS: Table = Table::new(
    "competitors",
    &[
        "competitor_name",
        "metal",
        "use_category",
        "region",
        "business_type",
        "price_positioning",
        "national_chain",
        "website",
        "instagram_handle",
        "facebook_account",
    ],
    OnConflict::DoNothing {
        target: &["competitor_name"],
    },
);

/// `competitor_metrics_daily`, one row per competitor, day and window.
pub const COMPETITOR_METRICS_DAILY: Table = Table::new(
    "competitor_metrics_daily",
    &[
        "competitor_id",
        "snapshot_date",
        "rating_avg",
        "review_count",
        "market_presence_label",
        "timeframe_window",
    ],
    OnConflict::DoUpdate {
        target: &["competitor_id", "snapshot_date", "timeframe_window"],
        assign: &["rating_avg", "review_count", "market_presence_label"],
    },
);

/// `competitor_locations`, appended per input row.
pub const COMPETITOR_LOCATIONS: Table = Table::new(
    "competitor_locations",
    &[
        "competitor_id",
        "city",
        "state",
        "locality",
        "store_count",
        "branch_count",
    ],
    OnConflict::DoNothing { target: &[] },
);

/// Resolves `competitor_id` through `competitors.competitor_name`.
pub const COMPETITOR_BY_NAME: CompetitorLookup = CompetitorLookup {
    table: "competitors",
    alias: "c",
    id_column: "id",
    key_column: "competitor_name",
};

/// Rolling window every metrics snapshot is recorded under.
pub const TIMEFRAME_WINDOW: &str = "last_90_days";
