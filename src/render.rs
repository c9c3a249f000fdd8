//! Rendering normalized records as batched SQL statements.
//!
//! Two statement shapes are produced:
//!
//! * [`ValuesInsert`]: `INSERT ... VALUES (...), (...)` for rows whose every
//!   value is known up front.
//! * [`SelectUnionInsert`]: `INSERT ... SELECT ... UNION ALL SELECT ...` for
//!   rows that reference a competitor by name, resolving its id with a
//!   correlated lookup when the statement executes.
//!
//! Both are closed by their table's [`OnConflict`](crate::schema::OnConflict)
//! clause. [`Batcher`] bounds how many rows go into one statement.

mod batch;
mod select_union;
mod values;

pub use batch::Batcher;
pub use select_union::SelectUnionInsert;
pub use values::ValuesInsert;

use crate::literal::SqlLiteral;

/// A record that renders as one tuple of literals.
pub trait SqlRow {
    /// The literals of this row, in column order.
    fn literals(&self) -> Vec<SqlLiteral>;
}

/// A record whose target row references a competitor by name.
///
/// Its [`SqlRow::literals`] exclude the resolved id.
pub trait CorrelatedRow: SqlRow {
    /// The raw, unescaped competitor name.
    fn competitor_name(&self) -> &str;
}

fn write_joined<W: core::fmt::Write>(out: &mut W, literals: &[SqlLiteral]) -> core::fmt::Result {
    for (i, literal) in literals.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{literal}")?;
    }
    Ok(())
}
