//! Defines the endpoint for replacing an existing holding.
//!
//! Holdings are mutated by full replacement only; there are no partial
//! patch semantics.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    database_id::DatabaseID,
    holding::{HoldingBody, HoldingItem, replace_holding},
};

/// The state needed to replace a holding.
#[derive(Debug, Clone)]
pub struct UpdateHoldingState {
    /// The database connection for managing holdings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateHoldingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing a holding owned by the caller.
///
/// Responds 404 when the holding does not exist or belongs to another user;
/// the two cases are indistinguishable to the caller by design.
pub async fn update_holding_endpoint(
    State(state): State<UpdateHoldingState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(item_id): Path<DatabaseID>,
    Json(body): Json<HoldingBody>,
) -> Result<Json<HoldingItem>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let holding = replace_holding(&connection, item_id, body.into_new_holding(user_id))?;

    Ok(Json(holding))
}
