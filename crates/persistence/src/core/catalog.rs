//! Read operations over the `Lore` and `Person` tables.

use std::sync::Arc;

use tracing::debug;

use super::executor::{QueryExecutor, fetch_records};
use crate::error::StorageResult;
use crate::search::SearchOrchestrator;
use crate::search::filters::{object_name_filter, person_filter, with_submitter};
use crate::search::query::CompiledQuery;
use crate::search::sql::SqlParam;
use crate::types::{Connection, Lore, Person, PersonFilter, Recent, Record};

const RECENT_SQL: &str = "SELECT 'Lore' AS TBL_SRC, OBJECT_NAME AS DESCRIPTION, \
     CREATE_DATE, SUBMITTER AS submitter FROM Lore \
     UNION ALL \
     SELECT 'Person' AS TBL_SRC, CHARNAME AS DESCRIPTION, \
     CREATE_DATE, SUBMITTER AS submitter FROM Person \
     ORDER BY CREATE_DATE DESC LIMIT ?";

/// Every query the API layer can ask of the store.
#[derive(Clone)]
pub struct Catalog {
    executor: Arc<dyn QueryExecutor>,
    search: SearchOrchestrator,
}

impl Catalog {
    /// Creates a catalog reading through the given executor.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        let search = SearchOrchestrator::new(executor.clone());
        Self { executor, search }
    }

    /// Returns the backend name.
    pub fn backend_name(&self) -> &'static str {
        self.executor.backend_name()
    }

    /// Checks that the store answers queries.
    pub async fn health_check(&self) -> StorageResult<()> {
        self.executor.health_check().await
    }

    /// Returns the search orchestrator.
    pub fn search(&self) -> &SearchOrchestrator {
        &self.search
    }

    /// Fetches one lore entry by id.
    pub async fn lore(&self, id: i64) -> StorageResult<Option<Lore>> {
        self.by_id::<Lore>(id).await
    }

    /// Lists lore entries whose object name contains every token.
    pub async fn all_lore(&self, search_token: Option<&str>) -> StorageResult<Vec<Lore>> {
        let filter = object_name_filter(search_token);
        fetch_records(self.executor.as_ref(), &CompiledQuery::list::<Lore>(&filter)).await
    }

    /// Pages over lore entries filtered by object-name tokens and submitter.
    pub async fn lore_paginated(
        &self,
        search_token: Option<&str>,
        submitter: Option<&str>,
        after: Option<&str>,
        first: usize,
    ) -> StorageResult<Connection<Lore>> {
        let filter = with_submitter(object_name_filter(search_token), submitter);
        self.search.paginate::<Lore>(&filter, after, first).await
    }

    /// Runs a flexible criteria search.
    pub async fn flex_query(
        &self,
        criteria: &str,
        after: Option<&str>,
        first: usize,
    ) -> StorageResult<Connection<Lore>> {
        self.search.search(criteria, after, first).await
    }

    /// Fetches one person by id.
    pub async fn person(&self, id: i64) -> StorageResult<Option<Person>> {
        self.by_id::<Person>(id).await
    }

    /// Lists every person.
    pub async fn all_persons(&self) -> StorageResult<Vec<Person>> {
        let filter = person_filter(None);
        fetch_records(self.executor.as_ref(), &CompiledQuery::list::<Person>(&filter)).await
    }

    /// Pages over persons matching an optional filter.
    pub async fn persons_connection(
        &self,
        filter: Option<&PersonFilter>,
        after: Option<&str>,
        first: usize,
    ) -> StorageResult<Connection<Person>> {
        let filter = person_filter(filter);
        self.search.paginate::<Person>(&filter, after, first).await
    }

    /// Returns the most recent submissions across both tables, newest first.
    pub async fn recent(&self, limit: usize) -> StorageResult<Vec<Recent>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        debug!(sql = RECENT_SQL, limit, "Executing recent feed query");

        let rows = self
            .executor
            .execute(RECENT_SQL, &[SqlParam::integer(limit)])
            .await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(serde_json::Value::Object(row)).map_err(Into::into))
            .collect()
    }

    async fn by_id<R: Record>(&self, id: i64) -> StorageResult<Option<R>> {
        let mut records =
            fetch_records::<R>(self.executor.as_ref(), &CompiledQuery::by_id::<R>(id)).await?;
        Ok(records.pop())
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("backend", &self.executor.backend_name())
            .finish_non_exhaustive()
    }
}
