//! Net worth forecasting: projects the caller's current net worth forward
//! using their recurring contributions as the savings rate.
//!
//! This model compounds annually and is intentionally distinct from the
//! monthly-compounding growth projector in [crate::projection].

mod core;
mod get_endpoint;

pub use core::{ForecastPoint, forecast};
pub use get_endpoint::get_forecast_endpoint;
