use serde::Serialize;

use crate::Error;

/// One year of a net worth forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Years elapsed since today, starting at zero.
    pub year_index: u32,
    /// The forecast net worth at this year, rounded to whole units.
    pub nominal: f64,
    /// The nominal value deflated by cumulative inflation back to a
    /// today-equivalent, rounded to whole units.
    pub real: f64,
}

/// Forecast net worth from the current position and recurring contributions.
///
/// Unlike the growth projector, which compounds monthly, the forecast works
/// in whole years: each year the twelve months of contributions are added up
/// front and the annual return is applied to the combined amount,
/// `capital = (capital + monthly * 12) * (1 + return / 100)`. The two models
/// are kept separate on purpose and must not be unified.
///
/// The current net worth may be negative (liabilities exceeding assets);
/// contributions and growth then work the balance back up.
///
/// # Errors
/// Returns [Error::InvalidParameter] if any argument is not a finite number,
/// if the monthly contribution is negative, or if the horizon is zero years.
pub fn forecast(
    current_net_worth: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
    annual_inflation_pct: f64,
    horizon_years: u32,
) -> Result<Vec<ForecastPoint>, Error> {
    validate_finite("netWorth", current_net_worth)?;
    validate_finite("monthlyContribution", monthly_contribution)?;
    validate_finite("annualReturn", annual_return_pct)?;
    validate_finite("inflation", annual_inflation_pct)?;

    if monthly_contribution < 0.0 {
        return Err(Error::InvalidParameter(
            "monthlyContribution must not be negative".to_owned(),
        ));
    }

    if horizon_years == 0 {
        return Err(Error::InvalidParameter(
            "years must be at least 1".to_owned(),
        ));
    }

    let annual_rate = annual_return_pct / 100.0;
    let inflation_rate = annual_inflation_pct / 100.0;
    let annual_contribution = monthly_contribution * 12.0;

    let mut capital = current_net_worth;
    let mut points = Vec::with_capacity(horizon_years as usize + 1);

    for year_index in 0..=horizon_years {
        let nominal = capital.round();
        let real = (nominal / (1.0 + inflation_rate).powi(year_index as i32)).round();

        points.push(ForecastPoint {
            year_index,
            nominal,
            real,
        });

        if year_index < horizon_years {
            capital = (capital + annual_contribution) * (1.0 + annual_rate);
        }
    }

    Ok(points)
}

fn validate_finite(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be a finite number"
        )))
    }
}

#[cfg(test)]
mod forecast_tests {
    use crate::Error;

    use super::forecast;

    #[test]
    fn returns_horizon_plus_one_points_in_year_order() {
        let points = forecast(10_000.0, 500.0, 6.0, 2.0, 20).unwrap();

        assert_eq!(points.len(), 21);

        for (index, point) in points.iter().enumerate() {
            assert_eq!(point.year_index, index as u32);
        }
    }

    #[test]
    fn contributions_are_added_before_the_years_growth() {
        // Year one must be (1000 + 12 * 100) * 1.1, not 1000 * 1.1 + 1200.
        let points = forecast(1_000.0, 100.0, 10.0, 0.0, 1).unwrap();

        assert_eq!(points[0].nominal, 1_000.0);
        assert_eq!(points[1].nominal, ((1_000.0 + 1_200.0) * 1.1_f64).round());
    }

    #[test]
    fn real_value_is_deflated_by_cumulative_inflation() {
        let points = forecast(10_000.0, 0.0, 0.0, 10.0, 2).unwrap();

        assert_eq!(points[2].nominal, 10_000.0);
        assert_eq!(points[2].real, (10_000.0 / 1.1_f64.powi(2)).round());
    }

    #[test]
    fn negative_net_worth_is_accepted_and_recovers_with_contributions() {
        let points = forecast(-5_000.0, 1_000.0, 0.0, 0.0, 1).unwrap();

        assert_eq!(points[0].nominal, -5_000.0);
        assert_eq!(points[1].nominal, 7_000.0);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let result = forecast(10_000.0, 500.0, 6.0, 2.0, 0);

        assert_eq!(
            result,
            Err(Error::InvalidParameter("years must be at least 1".to_owned()))
        );
    }

    #[test]
    fn negative_contribution_is_rejected() {
        let result = forecast(10_000.0, -1.0, 6.0, 2.0, 10);

        assert_eq!(
            result,
            Err(Error::InvalidParameter(
                "monthlyContribution must not be negative".to_owned()
            ))
        );
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let result = forecast(10_000.0, 0.0, f64::INFINITY, 2.0, 10);

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
