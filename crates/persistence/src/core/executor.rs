//! Query execution abstraction.
//!
//! The search layer only ever hands an executor SQL made of whitelisted column
//! names and compiler-generated tokens; every value arrives in `params`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{BackendError, StorageResult};
use crate::search::{CompiledQuery, SqlParam, query::COUNT_COLUMN};

/// One result row, keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// Executes parametrized SQL against a data store.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Returns a short name for the backend, used in logs.
    fn backend_name(&self) -> &'static str;

    /// Runs a query and returns its rows.
    async fn execute(&self, sql: &str, params: &[SqlParam]) -> StorageResult<Vec<Row>>;

    /// Checks that the store answers queries.
    async fn health_check(&self) -> StorageResult<()> {
        self.execute("SELECT 1", &[]).await.map(|_| ())
    }
}

/// Runs a row query and deserializes every row into `T`.
pub async fn fetch_records<T: DeserializeOwned>(
    executor: &dyn QueryExecutor,
    query: &CompiledQuery,
) -> StorageResult<Vec<T>> {
    let rows = run(executor, query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(Into::into))
        .collect()
}

/// Runs a count query and returns its total.
pub async fn fetch_count(executor: &dyn QueryExecutor, query: &CompiledQuery) -> StorageResult<i64> {
    let rows = run(executor, query).await?;
    rows.first()
        .and_then(|row| row.get(COUNT_COLUMN))
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            BackendError::QueryError {
                message: format!("count query on {} returned no total", query.table),
            }
            .into()
        })
}

async fn run(executor: &dyn QueryExecutor, query: &CompiledQuery) -> StorageResult<Vec<Row>> {
    let sql = query.to_sql();
    let params = query.params();
    debug!(
        backend = executor.backend_name(),
        sql = %sql,
        params = ?params,
        "Executing query"
    );
    executor.execute(&sql, &params).await
}
