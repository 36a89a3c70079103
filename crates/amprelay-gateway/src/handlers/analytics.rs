//! `GET /analytics`: pageview sink. Logs the ping and always answers 200.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};

use super::{first_param, QueryPairs};
use crate::app_state::AppState;

pub async fn analytics(
    State(app): State<AppState>,
    query: Option<Query<QueryPairs>>,
) -> StatusCode {
    let pairs = query.map(|Query(q)| q).unwrap_or_default();
    let get = |key: &str| first_param(&pairs, key).unwrap_or_default();
    tracing::info!(uuid = %get("uuid"), url = %get("url"), origin = %get("origin"), "pageview");
    app.metrics().pageviews.inc(&[]);
    StatusCode::OK
}
