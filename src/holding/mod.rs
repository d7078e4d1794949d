//! Net worth holdings: the assets and liabilities a user tracks, the
//! endpoints for managing them, and the aggregation that turns them into
//! totals and an allocation breakdown.

pub mod aggregation;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod summary_endpoint;
mod update_endpoint;

pub use aggregation::{NetWorthSummary, aggregate_holdings};
pub use core::{
    HoldingItem, HoldingKind, NewHolding, create_holding_table, delete_holding,
    get_distinct_holding_owners, get_holdings_by_user, insert_holding, replace_holding,
};
pub use create_endpoint::{HoldingBody, create_holding_endpoint};
pub use delete_endpoint::delete_holding_endpoint;
pub use list_endpoint::list_holdings_endpoint;
pub use summary_endpoint::get_summary_endpoint;
pub use update_endpoint::update_holding_endpoint;

#[cfg(test)]
pub(crate) use core::test_holding;
