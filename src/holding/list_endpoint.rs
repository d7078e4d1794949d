//! Defines the endpoint for listing the caller's holdings.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    holding::{HoldingItem, get_holdings_by_user},
};

/// The state needed to list holdings.
#[derive(Debug, Clone)]
pub struct ListHoldingsState {
    /// The database connection for reading holdings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListHoldingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing all of the caller's holdings.
pub async fn list_holdings_endpoint(
    State(state): State<ListHoldingsState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<HoldingItem>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let holdings = get_holdings_by_user(&connection, &user_id)?;

    Ok(Json(holdings))
}
