//! Search orchestration: compile, count, fetch a page, build the connection.

use std::sync::Arc;

use tracing::{debug, error};

use super::compiler::compile_criteria;
use super::query::CompiledQuery;
use super::sql::CompiledFilter;
use crate::core::{QueryExecutor, fetch_count, fetch_records};
use crate::error::{SearchError, StorageResult};
use crate::types::{Connection, Lore, PageCursor, Record};

/// Runs cursor-paginated searches against a [`QueryExecutor`].
///
/// Each search issues two independent queries, a count and a page, run
/// concurrently. They are not read from the same snapshot.
#[derive(Clone)]
pub struct SearchOrchestrator {
    executor: Arc<dyn QueryExecutor>,
}

impl SearchOrchestrator {
    /// Creates an orchestrator over the given executor.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Runs a flexible search over the `Lore` table.
    ///
    /// Criteria that are rejected, or that compile to no predicates at all,
    /// produce an empty connection without touching the store or the cursor.
    pub async fn search(
        &self,
        criteria: &str,
        after: Option<&str>,
        page_size: usize,
    ) -> StorageResult<Connection<Lore>> {
        let filter = match compile_criteria(criteria) {
            Ok(filter) if !filter.is_empty() => filter,
            Ok(_) => {
                debug!("Criteria compiled to no predicates");
                return Ok(Connection::empty());
            }
            Err(e) => {
                debug!(error = %e, "Rejected criteria");
                return Ok(Connection::empty());
            }
        };

        self.paginate::<Lore>(&filter, after, page_size).await
    }

    /// Paginates any record table with an already compiled filter.
    ///
    /// An empty filter pages over the whole table. A blank `after` is treated
    /// as no cursor; any other cursor must decode.
    pub async fn paginate<R: Record>(
        &self,
        filter: &CompiledFilter,
        after: Option<&str>,
        page_size: usize,
    ) -> StorageResult<Connection<R>> {
        let cursor = after
            .filter(|c| !c.trim().is_empty())
            .map(PageCursor::decode)
            .transpose()?;

        let count_query = CompiledQuery::count::<R>(filter);
        let page_query = CompiledQuery::page::<R>(filter, cursor.map(|c| c.id()), page_size);

        let executor = self.executor.as_ref();
        let (total_count, rows) = tokio::try_join!(
            fetch_count(executor, &count_query),
            fetch_records::<R>(executor, &page_query),
        )
        .map_err(|source| {
            error!(table = R::TABLE, error = %source, "Search failed");
            SearchError::SearchFailed {
                table: R::TABLE.to_string(),
                source: Box::new(source),
            }
        })?;

        Ok(Connection::from_overfetch(
            rows,
            page_size,
            cursor.is_some(),
            total_count,
            R::id,
        ))
    }
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("backend", &self.executor.backend_name())
            .finish()
    }
}
