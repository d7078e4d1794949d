//! Defines the endpoint for deleting a recurring contribution.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, auth::AuthenticatedUser, database_id::DatabaseID,
    recurring::delete_recurring_contribution,
};

/// The state needed to delete a recurring contribution.
#[derive(Debug, Clone)]
pub struct DeleteRecurringState {
    /// The database connection for managing recurring contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a recurring contribution owned by the
/// caller.
///
/// Holdings already materialized from the contribution are kept; deleting
/// the instruction only stops future materializations.
pub async fn delete_recurring_endpoint(
    State(state): State<DeleteRecurringState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(recurring_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    delete_recurring_contribution(&connection, &user_id, recurring_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::{AuthenticatedUser, UserId},
        db::initialize,
        recurring::{get_recurring_by_user, insert_recurring_contribution, test_contribution},
    };

    use super::{DeleteRecurringState, delete_recurring_endpoint};

    fn get_test_state() -> DeleteRecurringState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteRecurringState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_the_callers_contribution() {
        let state = get_test_state();

        let id = {
            let connection = state.db_connection.lock().unwrap();
            insert_recurring_contribution(
                &connection,
                test_contribution("user-1", "Index Fund", 500.0, 15),
            )
            .unwrap()
            .id
        };

        let status = delete_recurring_endpoint(
            State(state.clone()),
            AuthenticatedUser(UserId::new("user-1")),
            Path(id),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);

        let connection = state.db_connection.lock().unwrap();
        let contributions = get_recurring_by_user(&connection, &UserId::new("user-1")).unwrap();
        assert!(contributions.is_empty());
    }

    #[tokio::test]
    async fn deleting_an_unknown_contribution_responds_not_found() {
        let result = delete_recurring_endpoint(
            State(get_test_state()),
            AuthenticatedUser(UserId::new("user-1")),
            Path(999),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
