//! Defines the endpoint for deleting a saved scenario.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, auth::AuthenticatedUser, database_id::DatabaseID, scenario::delete_scenario,
};

/// The state needed to delete a scenario.
#[derive(Debug, Clone)]
pub struct DeleteScenarioState {
    /// The database connection for managing scenarios.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteScenarioState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting one of the caller's scenarios.
///
/// Deleting a scenario another user owns reports not found rather than
/// revealing that the ID exists.
pub async fn delete_scenario_endpoint(
    State(state): State<DeleteScenarioState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(scenario_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    delete_scenario(&connection, &user_id, scenario_id)?;

    Ok(StatusCode::NO_CONTENT)
}
