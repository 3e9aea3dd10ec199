//! HTTP JSON surface over the delay aggregates.
//!
//! Every request recomputes its aggregate from the store. Queries run on the
//! blocking pool and take the store lock for their duration, so at most one
//! query is in flight.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::delays::{self, AirlineDelay, HourDelay, RouteDelay};
use crate::error::{Error, Result};
use crate::storage::FlightData;

/// Shared handle to the store.
pub type SharedStore = Arc<Mutex<FlightData>>;

/// Build the application router.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/delays_by_airline", get(delays_by_airline))
        .route("/delays_by_hour", get(delays_by_hour))
        .route("/delays_by_route", get(delays_by_route))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve the API on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns [`Error::Server`] if the address cannot be bound or the server
/// fails while running.
pub async fn serve(addr: SocketAddr, store: FlightData) -> Result<()> {
    let app = router(Arc::new(Mutex::new(store)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::server(format!("failed to listen on {addr}"), source))?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| Error::server("failed to read bound address", source))?;
    info!("Serving flight delay API on http://{local_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| Error::server("server terminated", source))?;

    info!("Server has been shut down");
    Ok(())
}

/// Resolves on Ctrl-C, starting graceful shutdown.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Starting graceful shutdown...");
}

async fn index() -> Response {
    pretty_json(&json!({
        "message": "Welcome to the Flight Delay Analyzer API!",
        "available_endpoints": {
            "/delays_by_airline": "Get % of delayed flights by airline",
            "/delays_by_hour": "Get % of delayed flights by hour",
            "/delays_by_route": "Get % of delayed flights by origin and destination",
        },
        "status": "running",
    }))
}

async fn delays_by_airline(State(store): State<SharedStore>) -> Response {
    let result = run_query(store, |store| {
        delays::delays_by_airline(store)
            .iter()
            .map(AirlineDelay::from)
            .collect::<Vec<_>>()
    })
    .await;
    respond(result)
}

async fn delays_by_hour(State(store): State<SharedStore>) -> Response {
    let result = run_query(store, |store| {
        delays::delays_by_hour(store)
            .iter()
            .map(HourDelay::from)
            .collect::<Vec<_>>()
    })
    .await;
    respond(result)
}

async fn delays_by_route(State(store): State<SharedStore>) -> Response {
    let result = run_query(store, |store| {
        delays::delays_by_route(store)
            .iter()
            .map(RouteDelay::from)
            .collect::<Vec<_>>()
    })
    .await;
    respond(result)
}

/// Run `query` against the store on the blocking pool.
async fn run_query<T, F>(store: SharedStore, query: F) -> std::result::Result<T, StatusCode>
where
    F: FnOnce(&FlightData) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let store = store.lock().unwrap_or_else(PoisonError::into_inner);
        query(&store)
    })
    .await
    .map_err(|err| {
        error!(error = %err, "Query task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn respond<T: Serialize>(result: std::result::Result<T, StatusCode>) -> Response {
    match result {
        Ok(value) => pretty_json(&value),
        Err(status) => status.into_response(),
    }
}

/// Serialize `value` as indented JSON.
fn pretty_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            error!(error = %err, "Failed to serialize response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
