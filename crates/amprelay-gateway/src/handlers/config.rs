//! `GET /config.json`

use axum::{
    extract::{OriginalUri, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use amprelay_core::error::AmpRelayError;
use amprelay_core::identity::IdentityToken;
use amprelay_core::origin::{reported_origin, OriginSignals, AMP_SAME_ORIGIN_HEADER, SOURCE_ORIGIN_PARAM};
use amprelay_core::record::AnalyticsRecord;

use super::{first_param, header_lossy, header_str, QueryPairs};
use crate::app_state::AppState;
use crate::error::ApiError;
use crate::transport::amp_cors;
use crate::transport::identity_cookie::{identity_set_cookie, read_identity_cookie, IdentityCookie};

pub async fn config_json(
    State(app): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Option<Query<QueryPairs>>,
) -> Result<Response, ApiError> {
    let metrics = app.metrics();
    let pairs = query.map(|Query(q)| q).unwrap_or_default();
    let source_origin = first_param(&pairs, SOURCE_ORIGIN_PARAM);
    // Presence is decided on raw bytes: an undecodable Origin still counts.
    let origin = header_lossy(&headers, header::ORIGIN);
    let origin = origin.as_deref();

    let decision = app.origins().verify(&OriginSignals {
        origin,
        amp_same_origin: header_str(&headers, AMP_SAME_ORIGIN_HEADER),
        source_origin,
    });
    tracing::info!(valid_origin = %decision.matched_origin(), "config origin check");

    if !decision.is_authorized() {
        metrics.config_requests.inc(&[("outcome", "rejected")]);
        tracing::warn!(
            origin = origin.unwrap_or_default(),
            source_origin = source_origin.unwrap_or_default(),
            "config request from unauthorized origin"
        );
        return Err(AmpRelayError::InvalidOrigin.into());
    }
    metrics.config_requests.inc(&[("outcome", "authorized")]);

    let mut issued = None;
    let identity = match read_identity_cookie(&headers) {
        IdentityCookie::Present(token) => {
            metrics.identity_tokens.inc(&[("source", "reused")]);
            token
        }
        IdentityCookie::Missing => {
            let token = app.tokens().generate();
            metrics.identity_tokens.inc(&[("source", "issued")]);
            tracing::debug!(uuid = %token, "issued identity token");
            issued = Some(token.clone());
            token
        }
        IdentityCookie::Malformed => {
            metrics.identity_tokens.inc(&[("source", "fallback")]);
            tracing::warn!("unreadable identity cookie, using fallback identity");
            IdentityToken::fallback()
        }
    };

    let record = AnalyticsRecord::new(
        identity,
        uri.to_string(),
        reported_origin(origin, header_str(&headers, header::REFERER)),
    );
    let body = app.template().render(&record)?;

    let mut out = HeaderMap::new();
    if let Some(token) = &issued {
        out.insert(header::SET_COOKIE, identity_set_cookie(token)?);
    }
    amp_cors::apply(&mut out, app.origins().amp_cache_origin(), decision.matched_origin())?;
    out.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok((StatusCode::OK, out, body).into_response())
}
