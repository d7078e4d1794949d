//! Recurring monthly investments: standing instructions to add a fixed
//! amount to a named holding on a chosen day of each month.
//!
//! Contributions are created and deleted, never edited. The daily cycle in
//! [crate::scheduler] materializes the ones due each day.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    NewRecurringContribution, RecurringContribution, create_recurring_contribution_table,
    delete_recurring_contribution, get_monthly_recurring_total, get_recurring_by_day_of_month,
    get_recurring_by_user, insert_recurring_contribution,
};
pub use create_endpoint::create_recurring_endpoint;
pub use delete_endpoint::delete_recurring_endpoint;
pub use list_endpoint::list_recurring_endpoint;

#[cfg(test)]
pub(crate) use core::test_contribution;
