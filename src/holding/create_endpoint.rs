//! Defines the endpoint for creating a new holding.

use std::sync::{Arc, Mutex};

use axum::{Json, extract::{FromRef, State}, http::StatusCode};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{AuthenticatedUser, UserId},
    database_id::DatabaseID,
    holding::{HoldingKind, NewHolding, insert_holding},
};

/// The state needed to create a holding.
#[derive(Debug, Clone)]
pub struct CreateHoldingState {
    /// The database connection for managing holdings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateHoldingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating or replacing a holding.
///
/// Unknown fields are rejected rather than silently persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HoldingBody {
    /// The display name, e.g. "Vanguard Global Stock".
    pub name: String,
    /// Whether this is an asset or a liability.
    #[serde(rename = "type")]
    pub kind: HoldingKind,
    /// The current value in currency units.
    pub value: f64,
    /// Free-text comma-separated tags.
    #[serde(default)]
    pub tags: String,
    /// The instrument's ISIN, for investment-type holdings.
    #[serde(default)]
    pub isin: Option<String>,
    /// The number of units held.
    #[serde(default)]
    pub shares: Option<f64>,
    /// The price per unit.
    #[serde(default)]
    pub price_per_share: Option<f64>,
}

impl HoldingBody {
    /// Attach an owner to the request body, producing the data to insert.
    ///
    /// Holdings created through the API are never recurring-origin; that
    /// flag is reserved for the daily cycle.
    pub fn into_new_holding(self, user_id: UserId) -> NewHolding {
        NewHolding {
            user_id,
            name: self.name,
            kind: self.kind,
            value: self.value,
            tags: self.tags,
            isin: self.isin,
            shares: self.shares,
            price_per_share: self.price_per_share,
            recurring: false,
        }
    }
}

/// The response body confirming a created holding.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoldingResponse {
    /// The ID assigned to the new holding.
    pub item_id: DatabaseID,
}

/// A route handler for creating a new holding owned by the caller.
pub async fn create_holding_endpoint(
    State(state): State<CreateHoldingState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(body): Json<HoldingBody>,
) -> Result<(StatusCode, Json<CreateHoldingResponse>), Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let holding = insert_holding(&connection, body.into_new_holding(user_id))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateHoldingResponse {
            item_id: holding.id,
        }),
    ))
}
