//! The compound growth simulator.
//!
//! Projects a starting capital with monthly contributions over a horizon of
//! years, reporting both nominal and inflation-adjusted values, and answers
//! the product's headline question: at what age does the inflation-adjusted
//! value first reach one million?

mod core;
mod get_endpoint;

pub use core::{MILLIONAIRE_TARGET, first_threshold_age, project};
pub use get_endpoint::get_projection_endpoint;
