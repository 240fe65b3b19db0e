//! Query resolvers.

use async_graphql::{Context, Object};
use lorebot_persistence::{Catalog, Lore, Person, PersonFilter, Recent, is_valid_criteria};
use tracing::{debug, info};

use super::connection::{LoreConnection, PersonConnection};
use super::pagination::PageLimits;
use crate::error::{ApiResult, graphql_error};

/// Root of every read the API offers.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A single lore entry by id.
    async fn lore(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "LORE_ID")] lore_id: i64,
    ) -> ApiResult<Option<Lore>> {
        let catalog = ctx.data::<Catalog>()?;
        catalog.lore(lore_id).await.map_err(graphql_error)
    }

    /// Every lore entry, optionally narrowed by dot-separated name tokens.
    async fn all_lore(
        &self,
        ctx: &Context<'_>,
        search_token: Option<String>,
    ) -> ApiResult<Vec<Lore>> {
        let catalog = ctx.data::<Catalog>()?;
        catalog
            .all_lore(search_token.as_deref())
            .await
            .map_err(graphql_error)
    }

    /// Pages over lore entries by name tokens and submitter.
    async fn all_lore_paginated(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        search_token: Option<String>,
        submitter: Option<String>,
    ) -> ApiResult<LoreConnection> {
        let catalog = ctx.data::<Catalog>()?;
        let page_size = ctx.data::<PageLimits>()?.page_size(first);

        catalog
            .lore_paginated(
                search_token.as_deref(),
                submitter.as_deref(),
                after.as_deref(),
                page_size,
            )
            .await
            .map(Into::into)
            .map_err(graphql_error)
    }

    /// Pages over lore entries matching a flexible criteria string such as
    /// `weight>=10&item_type=weapon`.
    ///
    /// Criteria that fail validation yield an empty connection.
    #[graphql(name = "FlexQuery")]
    async fn flex_query(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        requestor: String,
        flex_criteria: String,
    ) -> ApiResult<LoreConnection> {
        let catalog = ctx.data::<Catalog>()?;
        let page_size = ctx.data::<PageLimits>()?.page_size(first);
        info!(requestor = %requestor, criteria = %flex_criteria, page_size, "FlexQuery");

        catalog
            .flex_query(&flex_criteria, after.as_deref(), page_size)
            .await
            .map(Into::into)
            .map_err(graphql_error)
    }

    /// Whether a criteria string would be accepted by `FlexQuery`.
    async fn is_valid_criteria(&self, flex_criteria: String) -> bool {
        is_valid_criteria(&flex_criteria)
    }

    /// A single person by id.
    async fn person(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "PERSON_ID")] person_id: i64,
    ) -> ApiResult<Option<Person>> {
        let catalog = ctx.data::<Catalog>()?;
        catalog.person(person_id).await.map_err(graphql_error)
    }

    /// Every person.
    async fn all_persons(&self, ctx: &Context<'_>) -> ApiResult<Vec<Person>> {
        let catalog = ctx.data::<Catalog>()?;
        catalog.all_persons().await.map_err(graphql_error)
    }

    /// Pages over persons matching an optional filter.
    async fn all_persons_connection(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        filter: Option<PersonFilter>,
    ) -> ApiResult<PersonConnection> {
        let catalog = ctx.data::<Catalog>()?;
        let page_size = ctx.data::<PageLimits>()?.page_size(first);

        catalog
            .persons_connection(filter.as_ref(), after.as_deref(), page_size)
            .await
            .map(Into::into)
            .map_err(graphql_error)
    }

    /// The latest submissions across lore and persons, newest first.
    async fn recent(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "DISCORD_USER")] discord_user: Option<String>,
    ) -> ApiResult<Vec<Recent>> {
        let catalog = ctx.data::<Catalog>()?;
        let limit = ctx.data::<PageLimits>()?.recent_limit;
        debug!(discord_user = ?discord_user, limit, "Recent feed requested");

        catalog.recent(limit).await.map_err(graphql_error)
    }
}
