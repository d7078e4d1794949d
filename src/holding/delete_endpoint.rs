//! Defines the endpoint for deleting a holding.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, auth::AuthenticatedUser, database_id::DatabaseID, holding::delete_holding,
};

/// The state needed to delete a holding.
#[derive(Debug, Clone)]
pub struct DeleteHoldingState {
    /// The database connection for managing holdings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteHoldingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a holding owned by the caller.
pub async fn delete_holding_endpoint(
    State(state): State<DeleteHoldingState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(item_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    delete_holding(&connection, &user_id, item_id)?;

    Ok(StatusCode::NO_CONTENT)
}
