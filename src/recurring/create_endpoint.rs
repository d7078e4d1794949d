//! Defines the endpoint for creating a recurring contribution.

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
    auth::{AuthenticatedUser, UserId},
    database_id::DatabaseID,
    recurring::{NewRecurringContribution, insert_recurring_contribution},
};

/// The state needed to create a recurring contribution.
#[derive(Debug, Clone)]
pub struct CreateRecurringState {
    /// The database connection for managing recurring contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a recurring contribution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecurringBody {
    /// The name of the holding the contribution is added to.
    pub asset_name: String,
    /// The amount added each month, in currency units.
    pub amount: f64,
    /// The day of the month (1-28) the contribution triggers on.
    pub day_of_month: u8,
    /// Tags copied onto the materialized holding.
    #[serde(default)]
    pub tags: String,
}

/// The response body confirming a created recurring contribution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecurringResponse {
    /// The ID assigned to the new recurring contribution.
    pub recurring_id: DatabaseID,
}

/// A route handler for creating a recurring contribution owned by the
/// caller.
pub async fn create_recurring_endpoint(
    State(state): State<CreateRecurringState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(body): Json<RecurringBody>,
) -> Result<(StatusCode, Json<CreateRecurringResponse>), Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let contribution = insert_recurring_contribution(
        &connection,
        NewRecurringContribution {
            user_id,
            asset_name: body.asset_name,
            amount: body.amount,
            day_of_month: body.day_of_month,
            tags: body.tags,
        },
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRecurringResponse {
            recurring_id: contribution.id,
        }),
    ))
}
