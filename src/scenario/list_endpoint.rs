//! Defines the endpoint for listing the caller's saved scenarios.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    scenario::{Scenario, get_scenarios_by_user},
};

/// The state needed to list scenarios.
#[derive(Debug, Clone)]
pub struct ListScenariosState {
    /// The database connection for reading scenarios.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListScenariosState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing the caller's scenarios, oldest first.
pub async fn list_scenarios_endpoint(
    State(state): State<ListScenariosState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<Scenario>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let scenarios = get_scenarios_by_user(&connection, &user_id)?;

    Ok(Json(scenarios))
}
