//! Defines the endpoint for the caller's net worth history.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    snapshot::{NetWorthSnapshot, get_snapshots_by_user},
};

/// The state needed to read net worth history.
#[derive(Debug, Clone)]
pub struct HistoryState {
    /// The database connection for reading snapshots.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing the caller's snapshots, oldest first.
pub async fn get_history_endpoint(
    State(state): State<HistoryState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<NetWorthSnapshot>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let snapshots = get_snapshots_by_user(&connection, &user_id)?;

    Ok(Json(snapshots))
}
