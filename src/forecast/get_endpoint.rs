//! Defines the endpoint for forecasting the caller's net worth.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    forecast::{ForecastPoint, forecast},
    holding::{aggregate_holdings, get_holdings_by_user},
    recurring::get_monthly_recurring_total,
};

/// The state needed to forecast net worth.
#[derive(Debug, Clone)]
pub struct ForecastState {
    /// The database connection for reading holdings and contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ForecastState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a net worth forecast.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForecastParams {
    /// How many years to forecast.
    pub years: u32,
    /// The expected annual return as a percentage.
    pub annual_return: f64,
    /// The expected annual inflation as a percentage.
    pub inflation: f64,
}

/// The response body for a net worth forecast.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    /// The caller's net worth today, the forecast's starting point.
    pub net_worth: f64,
    /// The sum of the caller's recurring contribution amounts per month.
    pub monthly_contribution: f64,
    /// The forecast trajectory, one point per year.
    pub trajectory: Vec<ForecastPoint>,
}

/// A route handler for forecasting the caller's net worth.
///
/// The starting point is the caller's current net worth (assets minus
/// liabilities across their holdings) and the contribution rate is the sum
/// of their recurring contribution amounts.
pub async fn get_forecast_endpoint(
    State(state): State<ForecastState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastResponse>, Error> {
    let (net_worth, monthly_contribution) = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

        let holdings = get_holdings_by_user(&connection, &user_id)?;
        let summary = aggregate_holdings(&holdings);
        let monthly_total = get_monthly_recurring_total(&connection, &user_id)?;

        (summary.net_worth, monthly_total)
    };

    let trajectory = forecast(
        net_worth,
        monthly_contribution,
        params.annual_return,
        params.inflation,
        params.years,
    )?;

    Ok(Json(ForecastResponse {
        net_worth,
        monthly_contribution,
        trajectory,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::{AuthenticatedUser, UserId},
        db::initialize,
        holding::{HoldingKind, insert_holding, test_holding},
        recurring::{insert_recurring_contribution, test_contribution},
    };

    use super::{ForecastParams, ForecastState, get_forecast_endpoint};

    fn get_test_state() -> ForecastState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ForecastState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn forecast_starts_from_the_callers_net_worth() {
        let state = get_test_state();

        {
            let connection = state.db_connection.lock().unwrap();
            insert_holding(
                &connection,
                test_holding("user-1", HoldingKind::Asset, 10_000.0, "ETF"),
            )
            .unwrap();
            insert_holding(
                &connection,
                test_holding("user-1", HoldingKind::Liability, 4_000.0, ""),
            )
            .unwrap();
            insert_recurring_contribution(&connection, test_contribution("user-1", "ETF", 100.0, 1))
                .unwrap();
        }

        let response = get_forecast_endpoint(
            State(state),
            AuthenticatedUser(UserId::new("user-1")),
            Query(ForecastParams {
                years: 1,
                annual_return: 10.0,
                inflation: 0.0,
            }),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(response.net_worth, 6_000.0);
        assert_eq!(response.monthly_contribution, 100.0);
        assert_eq!(response.trajectory.len(), 2);
        assert_eq!(response.trajectory[0].nominal, 6_000.0);
        assert_eq!(
            response.trajectory[1].nominal,
            ((6_000.0 + 1_200.0) * 1.1_f64).round()
        );
    }

    #[tokio::test]
    async fn no_holdings_forecasts_from_zero() {
        let response = get_forecast_endpoint(
            State(get_test_state()),
            AuthenticatedUser(UserId::new("user-1")),
            Query(ForecastParams {
                years: 5,
                annual_return: 7.0,
                inflation: 2.0,
            }),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(response.net_worth, 0.0);
        assert_eq!(response.monthly_contribution, 0.0);
        assert_eq!(response.trajectory[0].nominal, 0.0);
    }

    #[tokio::test]
    async fn zero_years_is_rejected() {
        let result = get_forecast_endpoint(
            State(get_test_state()),
            AuthenticatedUser(UserId::new("user-1")),
            Query(ForecastParams {
                years: 0,
                annual_return: 7.0,
                inflation: 2.0,
            }),
        )
        .await;

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
