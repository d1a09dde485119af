//! Derives a single SQL statement from the raw model output.

use serde_json::Value;

/// Everything after this marker (any letter case) is commentary, not SQL.
const EXPLANATION_MARKER: &str = "Explanation:";

/// Flatten a prediction output payload into one text blob.
///
/// Replicate streams output as an ordered array of string fragments, joined
/// with no separator; older model versions return a single string. Anything
/// else is coerced to its JSON text form.
pub fn flatten_output(output: &Value) -> String {
    match output {
        Value::Array(fragments) => fragments
            .iter()
            .map(|f| match f {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract the SQL statement from a prediction output: the text before the
/// first case-insensitive `Explanation:` marker, trimmed of surrounding
/// whitespace. Absent marker keeps the whole text.
///
/// Validity is the classifier's concern; this never fails.
pub fn extract_sql(output: &Value) -> String {
    let text = flatten_output(output);
    let cut = find_marker(&text).unwrap_or(text.len());
    text[..cut].trim().to_string()
}

/// Byte offset of the first case-insensitive occurrence of the marker.
/// The marker is pure ASCII, so a byte-window scan is safe and any match
/// starts on a char boundary.
fn find_marker(text: &str) -> Option<usize> {
    let marker = EXPLANATION_MARKER.as_bytes();
    text.as_bytes()
        .windows(marker.len())
        .position(|window| window.eq_ignore_ascii_case(marker))
}
