//! Database initialization for the application's domain models.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, holding::create_holding_table, recurring::create_recurring_contribution_table,
    scenario::create_scenario_table, snapshot::create_snapshot_table,
};

/// Create the tables for all of the application's domain models.
///
/// The tables are created within a single exclusive transaction so that a
/// partially initialized database is never observable.
///
/// # Errors
/// Returns an error if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_holding_table(&transaction)?;
    create_recurring_contribution_table(&transaction)?;
    create_snapshot_table(&transaction)?;
    create_scenario_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
