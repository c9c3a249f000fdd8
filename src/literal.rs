//! SQL literal fragments.
//!
//! Every normalized field ends up as one [`SqlLiteral`], whose [`Display`]
//! implementation produces the exact text embedded in the generated statement.

use core::fmt::{self, Display, Write};

/// A single value ready to be embedded in SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlLiteral {
    /// The unquoted `NULL` keyword.
    Null,
    /// Unquoted `true` / `false`.
    Bool(bool),
    /// A numeric value passed through unquoted, exactly as read.
    Number(String),
    /// A string literal; single quotes are doubled when rendered.
    Text(String),
    /// A bare SQL keyword or expression such as `CURRENT_DATE`.
    Keyword(&'static str),
}

impl SqlLiteral {
    /// Text literal, or `NULL` when the raw value is empty.
    #[must_use]
    pub fn text_or_null(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Null
        } else {
            Self::Text(raw.to_owned())
        }
    }

    /// Text literal, substituting `default` when the raw value is empty.
    #[must_use]
    pub fn text_or(raw: &str, default: &str) -> Self {
        if raw.is_empty() {
            Self::Text(default.to_owned())
        } else {
            Self::Text(raw.to_owned())
        }
    }

    /// Unquoted number, or `NULL` when the raw value is empty.
    ///
    /// The raw value is not validated.
    #[must_use]
    pub fn number_or_null(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Null
        } else {
            Self::Number(raw.to_owned())
        }
    }

    /// Unquoted count, substituting `default` unless the raw value is a
    /// non-empty run of ASCII digits.
    #[must_use]
    pub fn count_or(raw: &str, default: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Self::Number(raw.to_owned())
        } else {
            Self::Number(default.to_owned())
        }
    }

    /// `true` only for the exact token `Yes`.
    #[must_use]
    pub fn yes_flag(raw: &str) -> Self {
        Self::Bool(raw == "Yes")
    }

    /// Whether this literal renders as `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Write `raw` with each single quote doubled.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_escaped<W: Write>(out: &mut W, raw: &str) -> fmt::Result {
    for c in raw.chars() {
        if c == '\'' {
            out.write_str("''")?;
        } else {
            out.write_char(c)?;
        }
    }
    Ok(())
}

/// Return `raw` with each single quote doubled.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // Writing into a String never fails.
    let _ = write_escaped(&mut out, raw);
    out
}

impl Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlLiteral::Null => f.write_str("NULL"),
            SqlLiteral::Bool(true) => f.write_str("true"),
            SqlLiteral::Bool(false) => f.write_str("false"),
            SqlLiteral::Number(raw) => f.write_str(raw),
            SqlLiteral::Text(s) => {
                f.write_char('\'')?;
                write_escaped(f, s)?;
                f.write_char('\'')
            }
            SqlLiteral::Keyword(keyword) => f.write_str(keyword),
        }
    }
}
