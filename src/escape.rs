//! Quoting of identifiers and text embedded in generated SQL.
//!
//! Escaping is not idempotent: escaping already escaped text doubles its quotes again. Each piece
//! of text must be escaped exactly once for the context it is emitted into.

/// Whether `identifier` must be wrapped in single quotes to be emitted as SQL.
#[inline]
pub fn needs_escaping(identifier: &str) -> bool {
    identifier.contains('\'')
}

/// Double every single quote in `text`.
#[inline]
pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "''")
}

/// `identifier` as it can appear in a statement: bare when possible, otherwise single-quoted with
/// embedded quotes doubled.
pub fn quote_identifier_if_needed(identifier: &str) -> String {
    if needs_escaping(identifier) {
        format!("'{}'", escape_single_quotes(identifier))
    } else {
        identifier.to_owned()
    }
}
