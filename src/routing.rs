//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    forecast::get_forecast_endpoint,
    holding::{
        create_holding_endpoint, delete_holding_endpoint, get_summary_endpoint,
        list_holdings_endpoint, update_holding_endpoint,
    },
    projection::get_projection_endpoint,
    recurring::{create_recurring_endpoint, delete_recurring_endpoint, list_recurring_endpoint},
    scenario::{create_scenario_endpoint, delete_scenario_endpoint, list_scenarios_endpoint},
    snapshot::get_history_endpoint,
};

/// Return a router with all the app's routes.
///
/// The projection route is public; every other route requires the gateway
/// identity header and scopes its data to that user.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::PROJECTION, get(get_projection_endpoint))
        .route(
            endpoints::NETWORTH,
            get(list_holdings_endpoint).post(create_holding_endpoint),
        )
        .route(endpoints::NETWORTH_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::NETWORTH_FORECAST, get(get_forecast_endpoint))
        .route(
            endpoints::NETWORTH_ITEM,
            put(update_holding_endpoint).delete(delete_holding_endpoint),
        )
        .route(endpoints::NETWORTH_HISTORY, get(get_history_endpoint))
        .route(
            endpoints::RECURRING,
            get(list_recurring_endpoint).post(create_recurring_endpoint),
        )
        .route(endpoints::RECURRING_ITEM, delete(delete_recurring_endpoint))
        .route(
            endpoints::SCENARIOS,
            get(list_scenarios_endpoint).post(create_scenario_endpoint),
        )
        .route(endpoints::SCENARIO, delete(delete_scenario_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Json(json!({ "error": "I'm a teapot" }))).into_response()
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
