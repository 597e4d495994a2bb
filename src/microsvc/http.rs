//! HTTP transport (feature `http`).
//!
//! - `POST /:command`: JSON body is the command input, request headers become the session.
//! - `GET /health`: `{ "ok": true, "commands": [...] }`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::session::Session;
use super::service::Service;

/// Router exposing the service's commands.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", axum::routing::post(command_handler))
        .with_state(service)
}

/// Bind `addr` (e.g. `"0.0.0.0:3000"`) and serve until the future is dropped.
pub async fn serve<S: Send + Sync + 'static>(
    service: Arc<Service<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "http listening");
    axum::serve(listener, app).await
}

async fn health_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> impl IntoResponse {
    let commands: Vec<&str> = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

async fn command_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    // Dispatch may block on a book lock or a synchronous backend call.
    let name = command.clone();
    let outcome =
        tokio::task::spawn_blocking(move || service.dispatch(&name, input, session)).await;
    match outcome {
        Ok(Ok(value)) => (StatusCode::OK, Json(value)).into_response(),
        Ok(Err(e)) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            debug!(%command, status = status.as_u16(), "command error response");
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(join_err) => {
            error!(%command, error = %join_err, "command task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response()
        }
    }
}

/// Every header that is valid UTF-8 becomes a session variable (names are lowercase).
fn session_from_headers(headers: &HeaderMap) -> Session {
    let vars = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Session::from_map(vars)
}
