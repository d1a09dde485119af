//! Interactive console loop.
//!
//! Two states: awaiting input and processing. One question is in flight at a
//! time; every pipeline error is reported and the loop prompts again. Only
//! "exit" (or end-of-input) leaves the loop.

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;

use crate::db::{Database, RowSet};
use crate::error::TanyaResult;
use crate::pipeline::{execute_sql, generate_sql, ExecutionResult};
use crate::predict::{PollBudget, PredictionApi};

const INPUT_PROMPT: &str = "Pertanyaan (natural language / \"exit\" untuk keluar): ";
const ERROR_PREFIX: &str = "Terjadi error:";

/// Run the console until the user asks to leave.
pub async fn run(
    api: &dyn PredictionApi,
    db: &dyn Database,
    budget: &PollBudget,
) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_path = dirs::home_dir()
        .map(|p| p.join(".tanyadb_history"))
        .unwrap_or_default();
    let _ = rl.load_history(&history_path);

    loop {
        match rl.readline(&format!("\n{INPUT_PROMPT}")) {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(question);

                if is_exit(question) {
                    break;
                }

                if let Err(e) = answer(api, db, budget, question).await {
                    eprintln!("{} {}", ERROR_PREFIX.red().bold(), e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {:?}", ERROR_PREFIX.red().bold(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    Ok(())
}

/// The loop ends on "exit", trimmed and case-folded. No pipeline call happens
/// for such a line.
fn is_exit(input: &str) -> bool {
    input.trim().to_lowercase() == "exit"
}

/// One full iteration: generate SQL, echo it, execute, render.
async fn answer(
    api: &dyn PredictionApi,
    db: &dyn Database,
    budget: &PollBudget,
    question: &str,
) -> TanyaResult<()> {
    let sql = generate_sql(api, budget, question).await?;

    println!("\n{}\n{}\n", "SQL:".cyan().bold(), sql.white().bold());

    match execute_sql(db, &sql).await? {
        ExecutionResult::Rows(rows) => {
            if rows.is_empty() {
                println!("{}", "(0 baris)".dimmed());
            } else {
                println!("{}", render_table(&rows));
                println!("{}", format!("({} baris)", rows.len()).dimmed());
            }
        }
        ExecutionResult::Affected(count) => {
            println!(
                "{} {}",
                "Query berhasil dijalankan. Baris terpengaruh:".green(),
                count.to_string().green().bold()
            );
        }
    }

    Ok(())
}

/// Render a row set as a bordered table, column order preserved.
pub fn render_table(rows: &RowSet) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(&rows.columns);

    for row in &rows.rows {
        table.add_row(row.iter().map(render_value));
    }
    table
}

/// SQL NULL renders as an empty cell; strings drop their JSON quotes.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_rows() -> RowSet {
        RowSet {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec![json!(1), json!("Budi")],
                vec![json!(2), Value::Null],
            ],
        }
    }

    #[test]
    fn test_exit_matches_after_trim_and_fold() {
        assert!(is_exit("exit"));
        assert!(is_exit("Exit"));
        assert!(is_exit(" EXIT "));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
    }

    #[test]
    fn test_table_contains_headers_and_cells() {
        let rendered = render_table(&sample_rows()).to_string();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("name"));
        assert!(rendered.contains("Budi"));
        assert!(rendered.contains('2'));
    }

    #[test]
    fn test_values_render_without_json_noise() {
        assert_eq!(render_value(&json!("Budi")), "Budi");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!(true)), "true");
    }
}
