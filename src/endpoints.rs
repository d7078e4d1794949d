//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/networth/{item_id}', use
//! [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to list and create net worth holdings.
pub const NETWORTH: &str = "/api/networth";
/// The route to replace or delete a single holding.
pub const NETWORTH_ITEM: &str = "/api/networth/{item_id}";
/// The route for asset/liability totals and the allocation breakdown.
pub const NETWORTH_SUMMARY: &str = "/api/networth/summary";
/// The route for the forward net worth forecast.
pub const NETWORTH_FORECAST: &str = "/api/networth/forecast";
/// The route to list net worth snapshots, ordered by date ascending.
pub const NETWORTH_HISTORY: &str = "/api/networth-history";
/// The route to list and create recurring contributions.
pub const RECURRING: &str = "/api/recurring";
/// The route to delete a single recurring contribution.
pub const RECURRING_ITEM: &str = "/api/recurring/{recurring_id}";
/// The route to list and save simulator scenarios.
pub const SCENARIOS: &str = "/api/scenarios";
/// The route to delete a single scenario.
pub const SCENARIO: &str = "/api/scenarios/{scenario_id}";
/// The route for the compound growth projection.
pub const PROJECTION: &str = "/api/projection";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/networth/{item_id}', '{item_id}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = endpoint_path.find('{');
    let param_end = endpoint_path.find('}');

    match (param_start, param_end) {
        (Some(start), Some(end)) if start < end => {
            let mut formatted = String::with_capacity(endpoint_path.len());
            formatted.push_str(&endpoint_path[..start]);
            formatted.push_str(&id.to_string());
            formatted.push_str(&endpoint_path[end + 1..]);
            formatted
        }
        _ => endpoint_path.to_owned(),
    }
}

#[cfg(test)]
mod format_endpoint_tests {
    use super::{NETWORTH_ITEM, RECURRING, format_endpoint};

    #[test]
    fn replaces_parameter_with_id() {
        assert_eq!(format_endpoint(NETWORTH_ITEM, 42), "/api/networth/42");
    }

    #[test]
    fn returns_path_unchanged_when_no_parameter() {
        assert_eq!(format_endpoint(RECURRING, 42), RECURRING);
    }
}
