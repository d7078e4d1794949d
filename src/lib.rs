//! Wealth Planner is a web service for modelling long-term wealth growth and
//! tracking net worth.
//!
//! This library provides a JSON REST API with per-user isolation: users run
//! compound-growth projections, save simulator scenarios, record their assets
//! and liabilities, and set up recurring monthly investments. A daily batch
//! cycle materializes due recurring investments and snapshots every user's
//! net worth.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod forecast;
mod holding;
mod logging;
mod projection;
mod recurring;
mod routing;
mod scenario;
mod scheduler;
mod snapshot;

pub use app_state::AppState;
pub use auth::{AuthenticatedUser, USER_ID_HEADER, UserId};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use scheduler::{CycleOutcome, run_daily_cycle};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A numeric parameter to a projection or forecast was out of range or
    /// not a finite number.
    ///
    /// The string names the offending parameter so the client can fix the
    /// request.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An empty string was used where a name is required.
    #[error("{0} cannot be empty")]
    EmptyName(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created. Internally, this error may occur when a query returns no
    /// rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidParameter(_) | Error::EmptyName(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::DatabaseLock | Error::SqlError(_) => {
                tracing::error!("internal error while handling request: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Try again later or check the server logs.".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
