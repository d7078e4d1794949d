//! Saved simulator scenarios: named input sets for the compound growth
//! projection. Scenarios are immutable; re-saving creates a new record.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    Scenario, ScenarioData, create_scenario_table, delete_scenario, get_scenarios_by_user,
    insert_scenario,
};
pub use create_endpoint::create_scenario_endpoint;
pub use delete_endpoint::delete_scenario_endpoint;
pub use list_endpoint::list_scenarios_endpoint;

#[cfg(test)]
pub(crate) use core::test_scenario_data;
