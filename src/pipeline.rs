//! One question's round trip: prompt → prediction → extraction → execution.
//!
//! Split in two halves so the console can echo the generated SQL before the
//! database ever sees it, exactly like the original tool.

use crate::classify::{classify, StatementKind};
use crate::db::{Database, RowSet};
use crate::error::{TanyaError, TanyaResult};
use crate::extract::extract_sql;
use crate::predict::{await_output, PollBudget, PredictionApi};
use crate::prompt::build_prompt;

/// Outcome of the execution half of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Read path: zero or more rows.
    Rows(RowSet),
    /// Write path: affected-row count.
    Affected(u64),
}

/// Generation half: compose the prompt, submit it, wait out the polling
/// budget, and extract the SQL text from the output payload.
pub async fn generate_sql(
    api: &dyn PredictionApi,
    budget: &PollBudget,
    question: &str,
) -> TanyaResult<String> {
    let prompt = build_prompt(question);
    let job = api.create(&prompt).await?;
    let output = await_output(api, &job, budget).await?;
    Ok(extract_sql(&output))
}

/// Execution half: classify by leading keyword and dispatch. Unsupported
/// statements are rejected before any database call.
pub async fn execute_sql(db: &dyn Database, sql: &str) -> TanyaResult<ExecutionResult> {
    match classify(sql) {
        StatementKind::Read => Ok(ExecutionResult::Rows(db.fetch_rows(sql).await?)),
        StatementKind::Write => Ok(ExecutionResult::Affected(db.execute(sql).await?)),
        StatementKind::Unsupported => Err(TanyaError::Unsupported),
    }
}

impl ExecutionResult {
    pub fn rows(&self) -> Option<&RowSet> {
        match self {
            ExecutionResult::Rows(set) => Some(set),
            ExecutionResult::Affected(_) => None,
        }
    }
}
