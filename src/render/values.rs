//! The `INSERT ... VALUES` statement shape.

use core::fmt::{self, Display};

use super::{SqlRow, write_joined};
use crate::schema::Table;

/// One `INSERT ... VALUES` statement over `rows`.
///
/// Renders one tuple per line:
///
/// ```text
/// INSERT INTO competitors (competitor_name, ...)
/// VALUES
/// ('Tanishq', ...),
/// ('Kalyan', ...)
/// ON CONFLICT (competitor_name) DO NOTHING;
/// ```
///
/// An empty VALUES list is not valid SQL, so callers must not render an
/// empty slice.
#[derive(Debug, Clone, Copy)]
pub struct ValuesInsert<'a, R> {
    table: &'a Table,
    rows: &'a [R],
}

impl<'a, R: SqlRow> ValuesInsert<'a, R> {
    /// Create the statement for `rows`.
    #[must_use]
    pub fn new(table: &'a Table, rows: &'a [R]) -> Self {
        Self { table, rows }
    }

    /// Number of tuples in the statement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the statement has no tuples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: SqlRow> Display for ValuesInsert<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.table.insert_header())?;
        f.write_str("VALUES\n")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("(")?;
            write_joined(f, &row.literals())?;
            f.write_str(")")?;
        }
        write!(f, "\n{};", self.table.on_conflict())
    }
}
