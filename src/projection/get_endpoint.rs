//! Defines the endpoint for computing a compound growth projection.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    projection::{MILLIONAIRE_TARGET, first_threshold_age, project},
};

/// The query parameters for a projection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParams {
    /// The user's current age in years.
    pub age: u32,
    /// The capital already invested, in currency units.
    pub starting_capital: f64,
    /// The amount invested each month, in currency units.
    pub monthly_contribution: f64,
    /// The expected annual return as a percentage, e.g. 7 for 7%.
    pub annual_return: f64,
    /// The expected annual inflation as a percentage.
    pub inflation: f64,
    /// How many years to project.
    pub horizon_years: u32,
}

/// One year of the projected trajectory, keyed by the user's age.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    /// Years elapsed since the start of the projection.
    pub year_index: u32,
    /// The user's age at this point.
    pub age: u32,
    /// The value in currency units, not adjusted for inflation.
    pub nominal: f64,
    /// The inflation-adjusted value in start-year currency units.
    pub real: f64,
}

/// The response body for a projection request.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    /// The year-by-year trajectory, ordered by year index.
    pub trajectory: Vec<TrajectoryPoint>,
    /// The age at which the real value first reaches one million, if it
    /// does within the horizon.
    pub millionaire_age: Option<u32>,
}

/// A route handler for computing a compound growth projection.
///
/// The computation is pure; no authentication is required, matching the
/// public simulator page.
pub async fn get_projection_endpoint(
    Query(params): Query<ProjectionParams>,
) -> Result<Json<ProjectionResponse>, Error> {
    let points = project(
        params.starting_capital,
        params.monthly_contribution,
        params.annual_return,
        params.inflation,
        params.horizon_years,
    )?;

    let millionaire_age = first_threshold_age(&points, params.age, MILLIONAIRE_TARGET);

    let trajectory = points
        .into_iter()
        .map(|point| TrajectoryPoint {
            year_index: point.year_index,
            age: params.age + point.year_index,
            nominal: point.nominal,
            real: point.real,
        })
        .collect();

    Ok(Json(ProjectionResponse {
        trajectory,
        millionaire_age,
    }))
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;

    use crate::Error;

    use super::{ProjectionParams, get_projection_endpoint};

    fn params(horizon_years: u32) -> ProjectionParams {
        ProjectionParams {
            age: 30,
            starting_capital: 50_000.0,
            monthly_contribution: 1_000.0,
            annual_return: 7.0,
            inflation: 2.5,
            horizon_years,
        }
    }

    #[tokio::test]
    async fn trajectory_is_keyed_by_age() {
        let response = get_projection_endpoint(Query(params(10))).await.unwrap().0;

        assert_eq!(response.trajectory.len(), 11);
        assert_eq!(response.trajectory[0].age, 30);
        assert_eq!(response.trajectory[10].age, 40);
    }

    #[tokio::test]
    async fn reports_millionaire_age_when_reached() {
        let response = get_projection_endpoint(Query(params(50))).await.unwrap().0;

        let age = response
            .millionaire_age
            .expect("expected one million to be reached within 50 years");
        assert!(age > 30);
    }

    #[tokio::test]
    async fn invalid_capital_is_rejected() {
        let mut invalid = params(10);
        invalid.starting_capital = -10.0;

        let result = get_projection_endpoint(Query(invalid)).await;

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
