//! Escaping fuzzer.
//!
//! Renders arbitrary text as a SQL string literal and checks that stripping
//! the outer quotes and collapsing every doubled quote restores the input.

use competitor_sqlgen::SqlLiteral;
use competitor_sqlgen::literal::escape_text;
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|text: String| {
            let rendered = SqlLiteral::Text(text.clone()).to_string();
            let inner = &rendered[1..rendered.len() - 1];
            assert_eq!(inner, escape_text(&text));
            assert_eq!(inner.replace("''", "'"), text);
            assert_eq!(inner.matches('\'').count(), 2 * text.matches('\'').count());
        });
    }
}
