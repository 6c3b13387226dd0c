use crate::api::api_error::APIError;
use crate::api::model::{UpsertRecordRequest, UpsertRecordResult};
use crate::api::server::AppState;
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/dns/a-record", post(upsert_a_record))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn upsert_a_record(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    WithRejection(Json(payload), _): WithRejection<Json<UpsertRecordRequest>, APIError>,
) -> Result<Json<UpsertRecordResult>, APIError> {
    let client_addr = client_addr.ip();
    match state.engine.upsert(&payload.subdomain, payload.ip).await {
        Ok(fqdn) => {
            tracing::info!("accepted upsert from {client_addr} for \"{fqdn}\"");
            Ok(Json(UpsertRecordResult {
                fqdn: fqdn.to_utf8(),
            }))
        }
        Err(err) => {
            tracing::debug!(
                "rejected upsert from {client_addr} for \"{}\": {err}",
                payload.subdomain
            );
            Err(err.into())
        }
    }
}
