//! Target table descriptors.

use core::fmt::{self, Display};

/// How a statement resolves a uniqueness conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Skip conflicting rows. An empty target matches any constraint.
    DoNothing {
        /// Conflict target columns.
        target: &'static [&'static str],
    },
    /// Overwrite the listed columns from the incoming row.
    DoUpdate {
        /// Conflict target columns.
        target: &'static [&'static str],
        /// Columns assigned from `EXCLUDED`.
        assign: &'static [&'static str],
    },
}

fn write_target(f: &mut fmt::Formatter<'_>, target: &[&str]) -> fmt::Result {
    if target.is_empty() {
        return f.write_str("ON CONFLICT");
    }
    write!(f, "ON CONFLICT ({})", target.join(", "))
}

impl Display for OnConflict {
    /// Renders the clause without its terminating semicolon. The update form
    /// breaks the `SET` list onto its own line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnConflict::DoNothing { target } => {
                write_target(f, target)?;
                f.write_str(" DO NOTHING")
            }
            OnConflict::DoUpdate { target, assign } => {
                write_target(f, target)?;
                f.write_str(" DO UPDATE\nSET ")?;
                for (i, column) in assign.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{column} = EXCLUDED.{column}")?;
                }
                Ok(())
            }
        }
    }
}

/// A table that generated statements insert into.
///
/// Identifiers are emitted verbatim, unquoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    name: &'static str,
    columns: &'static [&'static str],
    on_conflict: OnConflict,
}

impl Table {
    /// Create a new table descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        columns: &'static [&'static str],
        on_conflict: OnConflict,
    ) -> Self {
        Self {
            name,
            columns,
            on_conflict,
        }
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The conflict clause closing every statement for this table.
    #[must_use]
    pub fn on_conflict(&self) -> OnConflict {
        self.on_conflict
    }

    /// `INSERT INTO <name> (<columns>)`, without a trailing newline.
    #[must_use]
    pub fn insert_header(&self) -> String {
        format!("INSERT INTO {} ({})", self.name, self.columns.join(", "))
    }
}

/// Resolves a competitor's database id from its name inside a statement.
///
/// Renders `SELECT <alias>.<id>, ... FROM <table> <alias> WHERE
/// <alias>.<key> = '<name>'`, deferring id resolution to execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitorLookup {
    /// Table holding the competitors.
    pub table: &'static str,
    /// Alias used inside the select.
    pub alias: &'static str,
    /// Surrogate id column.
    pub id_column: &'static str,
    /// Natural key column matched against the name.
    pub key_column: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_nothing_clause() {
        let clause = OnConflict::DoNothing {
            target: &["competitor_name"],
        };
        assert_eq!(clause.to_string(), "ON CONFLICT (competitor_name) DO NOTHING");
        assert_eq!(
            OnConflict::DoNothing { target: &[] }.to_string(),
            "ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn test_do_update_clause() {
        let clause = OnConflict::DoUpdate {
            target: &["competitor_id", "snapshot_date"],
            assign: &["rating_avg", "review_count"],
        };
        assert_eq!(
            clause.to_string(),
            "ON CONFLICT (competitor_id, snapshot_date) DO UPDATE\n\
             SET rating_avg = EXCLUDED.rating_avg, review_count = EXCLUDED.review_count"
        );
    }

    #[test]
    fn test_insert_header() {
        let table = Table::new(
            "users",
            &["id", "name"],
            OnConflict::DoNothing { target: &["id"] },
        );
        assert_eq!(table.insert_header(), "INSERT INTO users (id, name)");
    }
}
