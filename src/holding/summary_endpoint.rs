//! Defines the endpoint for the caller's net worth summary: asset and
//! liability totals plus the category allocation breakdown.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    holding::{NetWorthSummary, aggregate_holdings, get_holdings_by_user},
};

/// The state needed to compute a net worth summary.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading holdings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler computing totals and allocation over the caller's
/// holdings.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<NetWorthSummary>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let holdings = get_holdings_by_user(&connection, &user_id)?;

    Ok(Json(aggregate_holdings(&holdings)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        auth::{AuthenticatedUser, UserId},
        db::initialize,
        holding::{HoldingKind, insert_holding, test_holding},
    };

    use super::{SummaryState, get_summary_endpoint};

    fn get_test_state() -> SummaryState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SummaryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn summarizes_only_the_callers_holdings() {
        let state = get_test_state();

        {
            let connection = state.db_connection.lock().unwrap();
            insert_holding(
                &connection,
                test_holding("user-1", HoldingKind::Asset, 25_786.01, "fondos indexados"),
            )
            .unwrap();
            insert_holding(
                &connection,
                test_holding("user-1", HoldingKind::Liability, 4_000.0, ""),
            )
            .unwrap();
            insert_holding(
                &connection,
                test_holding("user-2", HoldingKind::Asset, 1_000_000.0, ""),
            )
            .unwrap();
        }

        let summary = get_summary_endpoint(State(state), AuthenticatedUser(UserId::new("user-1")))
            .await
            .unwrap()
            .0;

        assert_eq!(summary.total_assets, 25_786.01);
        assert_eq!(summary.total_liabilities, 4_000.0);
        assert_eq!(summary.net_worth, 25_786.01 - 4_000.0);
        assert_eq!(summary.allocation.len(), 1);
        assert_eq!(summary.allocation[0].category, "fondos indexados");
    }

    #[tokio::test]
    async fn empty_portfolio_summarizes_to_zero() {
        let summary = get_summary_endpoint(
            State(get_test_state()),
            AuthenticatedUser(UserId::new("user-1")),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(summary.total_assets, 0.0);
        assert_eq!(summary.net_worth, 0.0);
        assert!(summary.allocation.is_empty());
    }
}
