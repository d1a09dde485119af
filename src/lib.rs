//! # tanyadb
//!
//! An interactive console that turns natural-language questions into SQL
//! with a hosted text-generation model, runs the SQL against PostgreSQL, and
//! prints the result.
//!
//! One iteration of the loop:
//!
//! 1. read a question (`repl`)
//! 2. compose the prompt and submit a prediction, polling until terminal
//!    (`prompt`, `predict`)
//! 3. extract the SQL text from the output payload (`extract`)
//! 4. classify by leading keyword and execute read or write path
//!    (`classify`, `db`)
//!
//! The prediction service and the database sit behind the [`predict::PredictionApi`]
//! and [`db::Database`] traits so the whole pipeline runs against fakes in
//! tests.

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod predict;
pub mod prompt;
pub mod repl;

pub use error::{TanyaError, TanyaResult};
