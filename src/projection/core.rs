use crate::Error;

/// The real (inflation-adjusted) value a user is aiming for by default.
pub const MILLIONAIRE_TARGET: f64 = 1_000_000.0;

/// One year of a compound growth trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPoint {
    /// Years elapsed since the start of the projection, starting at zero.
    pub year_index: u32,
    /// The capital at this year in currency units, rounded to whole units.
    pub nominal: f64,
    /// The nominal value deflated by cumulative inflation back to a
    /// start-year equivalent, rounded to whole units.
    pub real: f64,
}

/// Simulate compound growth with monthly contributions.
///
/// The annual return is converted to a monthly rate by simple division
/// (`annual_return_pct / 100 / 12`). This intentionally mirrors how the
/// product has always presented growth; it is not the geometric monthly
/// equivalent.
///
/// Each month, growth is applied before the contribution is added. One
/// point is recorded per year, `horizon_years + 1` points in total, so a
/// zero-year horizon yields a single point equal to the starting capital.
///
/// Negative return and inflation rates are accepted; they model pessimistic
/// scenarios.
///
/// # Errors
/// Returns [Error::InvalidParameter] if any argument is not a finite number
/// or if the starting capital or monthly contribution is negative.
pub fn project(
    starting_capital: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
    annual_inflation_pct: f64,
    horizon_years: u32,
) -> Result<Vec<ProjectionPoint>, Error> {
    validate_finite("startingCapital", starting_capital)?;
    validate_finite("monthlyContribution", monthly_contribution)?;
    validate_finite("annualReturn", annual_return_pct)?;
    validate_finite("inflation", annual_inflation_pct)?;

    if starting_capital < 0.0 {
        return Err(Error::InvalidParameter(
            "startingCapital must not be negative".to_owned(),
        ));
    }

    if monthly_contribution < 0.0 {
        return Err(Error::InvalidParameter(
            "monthlyContribution must not be negative".to_owned(),
        ));
    }

    let monthly_rate = annual_return_pct / 100.0 / 12.0;
    let inflation_rate = annual_inflation_pct / 100.0;

    let mut capital = starting_capital;
    let mut points = Vec::with_capacity(horizon_years as usize + 1);

    for year_index in 0..=horizon_years {
        let nominal = capital.round();
        let real = (nominal / (1.0 + inflation_rate).powi(year_index as i32)).round();

        points.push(ProjectionPoint {
            year_index,
            nominal,
            real,
        });

        if year_index < horizon_years {
            for _ in 0..12 {
                capital = capital * (1.0 + monthly_rate) + monthly_contribution;
            }
        }
    }

    Ok(points)
}

/// Find the age at which the real value first reaches `target_real`.
///
/// Scans the trajectory in order and returns `starting_age + year_index`
/// for the first point whose real value is at least the target, so a value
/// exactly on the target counts as reached. Returns `None` if the target is
/// not reached within the horizon.
pub fn first_threshold_age(
    points: &[ProjectionPoint],
    starting_age: u32,
    target_real: f64,
) -> Option<u32> {
    points
        .iter()
        .find(|point| point.real >= target_real)
        .map(|point| starting_age + point.year_index)
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
