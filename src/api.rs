use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cloudflare;
use crate::config::Config;
use crate::page;

pub struct AppState {
    pub config: Config,
}

/// Envelope relayed to the caller after a purge attempt.
#[derive(Serialize)]
struct PurgeReport {
    success: bool,
    details: Value,
    timestamp: String,
    zone: String,
    domain: String,
    action: &'static str,
}

pub fn create_router(config: Config) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(index).fallback(not_found))
        .fallback(dispatch)
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();

    // Extract request info
    let method = request.method().clone();
    let uri = request.uri();
    let path = match uri.query() {
        Some(q) => format!("{}?{}", uri.path(), q),
        None => uri.path().to_string(),
    };
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or("-").trim().to_string())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "-".to_string());

    // Process request
    let response = next.run(request).await;

    // Extract response info
    let status = response.status().as_u16();
    let length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let duration = start.elapsed();

    // Access log format: method path "user-agent" ip status length duration
    info!(
        target: "access",
        "{} {} \"{}\" {} {} {} {:.3}ms",
        method, path, user_agent, ip, status, length, duration.as_secs_f64() * 1000.0
    );

    response
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let cf = &state.config.cloudflare;
    Html(page::render(&cf.domain, &cf.zone_id))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

// Purge is triggered from any path mentioning it, so it is matched here
// rather than pinned to a single literal path
async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if request.method() == Method::POST && request.uri().path().contains("purge") {
        return purge_cache(State(state)).await;
    }

    not_found().await.into_response()
}

async fn purge_cache(State(state): State<Arc<AppState>>) -> Response {
    let cf = &state.config.cloudflare;

    let (success, details) = match cloudflare::purge_everything(cf).await {
        Ok(details) => {
            let success = details
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if success {
                info!("Cache purged for zone {}", cf.zone_id);
            } else {
                error!("Cloudflare reported purge failure for zone {}", cf.zone_id);
            }
            (success, details)
        }
        Err(e) => {
            error!("Cache purge request failed: {:#}", e);
            let details = serde_json::json!({
                "success": false,
                "errors": [{ "message": format!("{:#}", e) }],
            });
            (false, details)
        }
    };

    let report = PurgeReport {
        success,
        details,
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
        zone: cf.zone_id.clone(),
        domain: cf.domain.clone(),
        action: "purge_everything",
    };

    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(report)).into_response()
}
