//! Net worth snapshots: one dated record of a user's totals per day,
//! written by the daily cycle and read back as the history chart.

mod core;
mod history_endpoint;

pub use core::{NetWorthSnapshot, create_snapshot_table, get_snapshots_by_user, upsert_snapshot};
pub use history_endpoint::get_history_endpoint;
