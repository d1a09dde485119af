//! Leading-keyword classification of generated statements.

/// Execution path for a generated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `SELECT ...` — fetch rows and render them as a table.
    Read,
    /// `INSERT`/`UPDATE`/`DELETE` — execute and report affected rows.
    Write,
    /// Anything else: empty text, comments, DDL, multi-statement blobs.
    Unsupported,
}

/// Classify a statement by its lower-cased leading keyword only.
///
/// Classification never looks past the prefix; the original-case string is
/// what gets executed.
pub fn classify(sql: &str) -> StatementKind {
    let lower = sql.to_lowercase();
    if lower.starts_with("select") {
        StatementKind::Read
    } else if lower.starts_with("insert")
        || lower.starts_with("update")
        || lower.starts_with("delete")
    {
        StatementKind::Write
    } else {
        StatementKind::Unsupported
    }
}
