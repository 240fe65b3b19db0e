//! GraphQL endpoint handlers.

use async_graphql::http::GraphiQLSource;
use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::state::AppState;

/// Path the GraphQL endpoint is mounted on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Executes a GraphQL request.
///
/// # HTTP Request
///
/// `POST [base]/graphql` with a JSON body `{ "query": ..., "variables": ... }`
///
/// Field errors are reported inside the response body with status 200, as
/// GraphQL clients expect.
pub async fn graphql_handler(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!(operation = ?request.operation_name, "Executing GraphQL request");

    let response = state.schema().execute(request).await;
    if response.is_err() {
        debug!(errors = response.errors.len(), "GraphQL request returned errors");
    }
    Json(response)
}

/// Serves the GraphiQL explorer.
///
/// # HTTP Request
///
/// `GET [base]/graphql`
pub async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
