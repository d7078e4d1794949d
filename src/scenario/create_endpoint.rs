//! Defines the endpoint for saving a simulator scenario.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    database_id::DatabaseID,
    scenario::{ScenarioData, insert_scenario},
};

/// The state needed to save a scenario.
#[derive(Debug, Clone)]
pub struct CreateScenarioState {
    /// The database connection for managing scenarios.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateScenarioState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for saving a scenario.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioBody {
    /// The display name to save the scenario under.
    pub name: String,
    /// The simulator inputs to save.
    pub data: ScenarioData,
}

/// The response body confirming a saved scenario.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioResponse {
    /// The ID assigned to the new scenario.
    pub scenario_id: DatabaseID,
}

/// A route handler for saving a scenario owned by the caller.
pub async fn create_scenario_endpoint(
    State(state): State<CreateScenarioState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(body): Json<ScenarioBody>,
) -> Result<(StatusCode, Json<CreateScenarioResponse>), Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let scenario = insert_scenario(&connection, user_id, body.name, body.data)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateScenarioResponse {
            scenario_id: scenario.id,
        }),
    ))
}
