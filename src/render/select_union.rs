//! The correlated `INSERT ... SELECT ... UNION ALL` statement shape.

use core::fmt::{self, Display};

use super::{CorrelatedRow, write_joined};
use crate::literal::{SqlLiteral, write_escaped};
use crate::schema::{CompetitorLookup, Table};

/// One `INSERT ... SELECT` statement over `rows`, one select per row.
///
/// Each select resolves the competitor id by name, then lists the `leading`
/// constants, the row's own literals and the `trailing` constants:
///
/// ```text
/// INSERT INTO competitor_metrics_daily (competitor_id, snapshot_date, ...)
/// SELECT c.id, CURRENT_DATE, 4.5, 120, NULL, 'last_90_days' FROM competitors c WHERE c.competitor_name = 'Tanishq'
/// UNION ALL
/// SELECT c.id, CURRENT_DATE, ...
/// ON CONFLICT (competitor_id, snapshot_date, timeframe_window) DO UPDATE
/// SET rating_avg = EXCLUDED.rating_avg, ...;
/// ```
///
/// A row whose name matches no competitor selects nothing and is skipped by
/// the database.
#[derive(Debug, Clone, Copy)]
pub struct SelectUnionInsert<'a, R> {
    table: &'a Table,
    lookup: &'a CompetitorLookup,
    leading: &'a [SqlLiteral],
    trailing: &'a [SqlLiteral],
    rows: &'a [R],
}

impl<'a, R: CorrelatedRow> SelectUnionInsert<'a, R> {
    /// Create the statement for `rows` with no constant columns.
    #[must_use]
    pub fn new(table: &'a Table, lookup: &'a CompetitorLookup, rows: &'a [R]) -> Self {
        Self {
            table,
            lookup,
            leading: &[],
            trailing: &[],
            rows,
        }
    }

    /// Constants placed between the resolved id and the row literals.
    #[must_use]
    pub fn leading(mut self, leading: &'a [SqlLiteral]) -> Self {
        self.leading = leading;
        self
    }

    /// Constants placed after the row literals.
    #[must_use]
    pub fn trailing(mut self, trailing: &'a [SqlLiteral]) -> Self {
        self.trailing = trailing;
        self
    }

    /// Number of unioned selects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the statement has no selects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn write_select(&self, f: &mut fmt::Formatter<'_>, row: &R) -> fmt::Result {
        let CompetitorLookup {
            table,
            alias,
            id_column,
            key_column,
        } = self.lookup;
        let literals = row.literals();
        write!(f, "SELECT {alias}.{id_column}")?;
        for group in [self.leading, literals.as_slice(), self.trailing] {
            if !group.is_empty() {
                f.write_str(", ")?;
                write_joined(f, group)?;
            }
        }
        write!(f, " FROM {table} {alias} WHERE {alias}.{key_column} = '")?;
        write_escaped(f, row.competitor_name())?;
        f.write_str("'")
    }
}

impl<R: CorrelatedRow> Display for SelectUnionInsert<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.table.insert_header())?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("UNION ALL\n")?;
            }
            self.write_select(f, row)?;
            f.write_str("\n")?;
        }
        write!(f, "{};", self.table.on_conflict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SqlRow;
    use crate::schema::{COMPETITOR_BY_NAME, OnConflict};

    struct Score(&'static str, &'static str);

    impl SqlRow for Score {
        fn literals(&self) -> Vec<SqlLiteral> {
            vec![SqlLiteral::Number(self.1.into())]
        }
    }

    impl CorrelatedRow for Score {
        fn competitor_name(&self) -> &str {
            self.0
        }
    }

    const SCORES: Table = Table::new(
        "scores",
        &["competitor_id", "day", "score", "window"],
        OnConflict::DoUpdate {
            target: &["competitor_id", "day"],
            assign: &["score"],
        },
    );

    #[test]
    fn test_selects_joined_by_union_all() {
        let rows = [Score("Tanishq", "9"), Score("Joe's", "7")];
        let leading = [SqlLiteral::Keyword("CURRENT_DATE")];
        let trailing = [SqlLiteral::Text("w".into())];
        let statement = SelectUnionInsert::new(&SCORES, &COMPETITOR_BY_NAME, &rows)
            .leading(&leading)
            .trailing(&trailing);
        assert_eq!(statement.len(), 2);
        assert_eq!(
            statement.to_string(),
            "INSERT INTO scores (competitor_id, day, score, window)\n\
             SELECT c.id, CURRENT_DATE, 9, 'w' FROM competitors c WHERE c.competitor_name = 'Tanishq'\n\
             UNION ALL\n\
             SELECT c.id, CURRENT_DATE, 7, 'w' FROM competitors c WHERE c.competitor_name = 'Joe''s'\n\
             ON CONFLICT (competitor_id, day) DO UPDATE\n\
             SET score = EXCLUDED.score;"
        );
    }

    #[test]
    fn test_without_constants() {
        let rows = [Score("A", "1")];
        let statement = SelectUnionInsert::new(&SCORES, &COMPETITOR_BY_NAME, &rows);
        assert!(
            statement
                .to_string()
                .contains("SELECT c.id, 1 FROM competitors c WHERE c.competitor_name = 'A'\n")
        );
    }
}
