//! Defines the endpoint for listing the caller's recurring contributions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    recurring::{RecurringContribution, get_recurring_by_user},
};

/// The state needed to list recurring contributions.
#[derive(Debug, Clone)]
pub struct ListRecurringState {
    /// The database connection for reading recurring contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing all of the caller's recurring contributions.
pub async fn list_recurring_endpoint(
    State(state): State<ListRecurringState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<RecurringContribution>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let contributions = get_recurring_by_user(&connection, &user_id)?;

    Ok(Json(contributions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        auth::{AuthenticatedUser, UserId},
        db::initialize,
        recurring::{insert_recurring_contribution, test_contribution},
    };

    use super::{ListRecurringState, list_recurring_endpoint};

    #[tokio::test]
    async fn lists_only_the_callers_contributions() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        insert_recurring_contribution(
            &connection,
            test_contribution("user-1", "Index Fund", 500.0, 15),
        )
        .unwrap();
        insert_recurring_contribution(
            &connection,
            test_contribution("user-2", "Pension", 300.0, 1),
        )
        .unwrap();

        let state = ListRecurringState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let contributions =
            list_recurring_endpoint(State(state), AuthenticatedUser(UserId::new("user-1")))
                .await
                .unwrap()
                .0;

        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].asset_name, "Index Fund");
    }
}
