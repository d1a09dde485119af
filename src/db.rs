//! Database execution: the read path fetches rows, the write path reports
//! affected-row counts.
//!
//! Statements arrive as raw text straight from the model; there is no parsing
//! or validation here beyond what the server itself enforces.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row, TypeInfo};

use crate::error::{TanyaError, TanyaResult};

/// Column-ordered result of a read-path statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Minimal database contract. Like [`crate::predict::PredictionApi`], this is
/// a seam for tests: fakes stand in for a live server.
#[async_trait]
pub trait Database: Send + Sync {
    /// Read path: run the statement and collect every row.
    async fn fetch_rows(&self, sql: &str) -> TanyaResult<RowSet>;

    /// Write path: run the statement and report affected rows.
    async fn execute(&self, sql: &str) -> TanyaResult<u64>;
}

/// PostgreSQL-backed implementation over a shared sqlx pool.
///
/// One console session means one request in flight at a time, so the pool is
/// capped at a single connection — it exists for its lifecycle management
/// (lazy connect, clean close), not for parallelism.
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn connect(url: &str) -> TanyaResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| TanyaError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn fetch_rows(&self, sql: &str) -> TanyaResult<RowSet> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TanyaError::Query(e.to_string()))?;

        let mut set = RowSet::default();
        if let Some(first) = rows.first() {
            set.columns = first
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
        }
        for row in &rows {
            set.rows.push(decode_row(row));
        }
        Ok(set)
    }

    async fn execute(&self, sql: &str) -> TanyaResult<u64> {
        let result = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| TanyaError::Query(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

/// Decode one row into display-ready JSON values by column type name.
/// Types without a direct mapping fall back to text, then to NULL.
fn decode_row(row: &PgRow) -> Vec<Value> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, column)| decode_value(row, i, column.type_info().name()))
        .collect()
}

fn decode_value(row: &PgRow, i: usize, type_name: &str) -> Value {
    match type_name {
        "BOOL" => row
            .try_get::<bool, _>(i)
            .map(Value::Bool)
            .unwrap_or(Value::Null),
        "INT2" => row
            .try_get::<i16, _>(i)
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        "INT4" => row
            .try_get::<i32, _>(i)
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        "INT8" => row
            .try_get::<i64, _>(i)
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        "FLOAT4" => row
            .try_get::<f32, _>(i)
            .ok()
            .and_then(|v| serde_json::Number::from_f64(f64::from(v)))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "FLOAT8" => row
            .try_get::<f64, _>(i)
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "NUMERIC" => row
            .try_get::<rust_decimal::Decimal, _>(i)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(i)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        "TIMESTAMPTZ" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(i)
            .map(|v| Value::String(v.to_rfc3339()))
            .unwrap_or(Value::Null),
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(i)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(i)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        "UUID" => row
            .try_get::<sqlx::types::Uuid, _>(i)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        "JSON" | "JSONB" => row.try_get::<Value, _>(i).unwrap_or(Value::Null),
        _ => row
            .try_get::<String, _>(i)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rowset_len_and_empty() {
        let empty = RowSet::default();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let set = RowSet {
            columns: vec!["id".to_string()],
            rows: vec![vec![json!(1)], vec![json!(2)]],
        };
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
    }
}
