//! The daily cycle: materializes recurring contributions that are due and
//! records a net worth snapshot for every holding owner.
//!
//! The cycle is meant to be triggered once per calendar day by an external
//! timer running the `daily_cycle` binary. There is no guard against running
//! it twice on the same day: a second run materializes the day's
//! contributions again, though the snapshot upsert stays idempotent per
//! (owner, date).

use rusqlite::Connection;
use time::Date;
use tracing::{error, info};

use crate::{
    holding::{
        HoldingKind, NewHolding, aggregate_holdings, get_distinct_holding_owners,
        get_holdings_by_user, insert_holding,
    },
    recurring::{RecurringContribution, get_recurring_by_day_of_month},
    snapshot::upsert_snapshot,
};

/// What a daily cycle run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// How many due contributions were turned into holdings.
    pub contributions_materialized: usize,
    /// How many owners had a snapshot recorded for today.
    pub owners_snapshotted: usize,
}

/// Run the daily cycle for `today`.
///
/// First, every recurring contribution whose trigger day matches today's day
/// of the month is materialized as a new asset holding for its owner. Then a
/// net worth snapshot is taken for every owner in the holding store, whether
/// or not anything was materialized.
///
/// Failures are isolated: a record or owner that cannot be processed is
/// logged and skipped so the rest of the cycle still runs. The function
/// itself never fails.
pub fn run_daily_cycle(connection: &Connection, today: Date) -> CycleOutcome {
    let contributions_materialized = materialize_due_contributions(connection, today);
    let owners_snapshotted = snapshot_all_owners(connection, today);

    info!(
        contributions_materialized,
        owners_snapshotted, "daily cycle finished"
    );

    CycleOutcome {
        contributions_materialized,
        owners_snapshotted,
    }
}

fn materialize_due_contributions(connection: &Connection, today: Date) -> usize {
    let due = match get_recurring_by_day_of_month(connection, today.day()) {
        Ok(due) => due,
        Err(error) => {
            error!("could not fetch the contributions due today: {error}");
            return 0;
        }
    };

    let mut materialized = 0;

    for contribution in due {
        match insert_holding(connection, new_holding_for(&contribution)) {
            Ok(_) => materialized += 1,
            Err(error) => {
                error!(
                    recurring_id = contribution.id,
                    "could not materialize a contribution: {error}"
                );
            }
        }
    }

    materialized
}

fn new_holding_for(contribution: &RecurringContribution) -> NewHolding {
    NewHolding {
        user_id: contribution.user_id.clone(),
        name: contribution.asset_name.clone(),
        kind: HoldingKind::Asset,
        value: contribution.amount,
        tags: contribution.tags.clone(),
        isin: None,
        shares: None,
        price_per_share: None,
        recurring: true,
    }
}

fn snapshot_all_owners(connection: &Connection, today: Date) -> usize {
    let owners = match get_distinct_holding_owners(connection) {
        Ok(owners) => owners,
        Err(error) => {
            error!("could not enumerate holding owners: {error}");
            return 0;
        }
    };

    let mut snapshotted = 0;

    for owner in owners {
        let result = get_holdings_by_user(connection, &owner).and_then(|holdings| {
            let summary = aggregate_holdings(&holdings);
            upsert_snapshot(
                connection,
                &owner,
                today,
                summary.total_assets,
                summary.total_liabilities,
            )
        });

        match result {
            Ok(_) => snapshotted += 1,
            Err(error) => {
                error!(owner = owner.as_str(), "could not snapshot an owner: {error}");
            }
        }
    }

    snapshotted
}
