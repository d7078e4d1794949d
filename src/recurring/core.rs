use rusqlite::{Connection, Row, params};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{Error, auth::UserId, database_id::DatabaseID};

/// The latest day of the month a contribution may trigger on.
///
/// Capped at 28 so the trigger exists in every month, February included.
pub const MAX_DAY_OF_MONTH: u8 = 28;

/// A standing instruction to add a fixed amount to a named holding monthly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringContribution {
    /// The ID of the recurring contribution.
    #[serde(rename = "recurringId")]
    pub id: DatabaseID,
    /// The user the contribution belongs to.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// The name of the holding the contribution is added to. Referential
    /// integrity with existing holdings is not enforced.
    pub asset_name: String,
    /// The amount added each month, in currency units.
    pub amount: f64,
    /// The day of the month (1-28) the contribution triggers on.
    pub day_of_month: u8,
    /// Tags copied onto the materialized holding.
    pub tags: String,
    /// When the contribution was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The data needed to create a recurring contribution.
#[derive(Debug, Clone)]
pub struct NewRecurringContribution {
    /// The user the contribution will belong to.
    pub user_id: UserId,
    /// The name of the holding the contribution is added to.
    pub asset_name: String,
    /// The amount added each month, in currency units.
    pub amount: f64,
    /// The day of the month (1-28) the contribution triggers on.
    pub day_of_month: u8,
    /// Tags copied onto the materialized holding.
    pub tags: String,
}

pub fn create_recurring_contribution_table(
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS recurring_contribution (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            asset_name TEXT NOT NULL,
            amount REAL NOT NULL,
            day_of_month INTEGER NOT NULL CHECK(day_of_month BETWEEN 1 AND 28),
            tags TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS recurring_contribution_user_id
            ON recurring_contribution(user_id)",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_recurring_contribution(
    row: &Row,
) -> Result<RecurringContribution, rusqlite::Error> {
    Ok(RecurringContribution {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        asset_name: row.get(2)?,
        amount: row.get(3)?,
        day_of_month: row.get(4)?,
        tags: row.get(5)?,
        created_at: row.get(6)?,
    })
}

const RECURRING_COLUMNS: &str = "id, user_id, asset_name, amount, day_of_month, tags, created_at";

/// Get all of a user's recurring contributions, ordered by insertion.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_recurring_by_user(
    connection: &Connection,
    user_id: &UserId,
) -> Result<Vec<RecurringContribution>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {RECURRING_COLUMNS} FROM recurring_contribution WHERE user_id = ?1 ORDER BY id"
    ))?;

    let contributions = statement
        .query_map(params![user_id.as_str()], map_row_to_recurring_contribution)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contributions)
}

/// Get every user's recurring contributions that trigger on `day_of_month`.
///
/// Used by the daily cycle, which runs across all owners.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_recurring_by_day_of_month(
    connection: &Connection,
    day_of_month: u8,
) -> Result<Vec<RecurringContribution>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {RECURRING_COLUMNS} FROM recurring_contribution WHERE day_of_month = ?1 ORDER BY id"
    ))?;

    let contributions = statement
        .query_map(params![day_of_month], map_row_to_recurring_contribution)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contributions)
}

/// Get the sum of a user's monthly contribution amounts.
///
/// This is the `recurring_monthly_total` input to the net worth forecast.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_monthly_recurring_total(connection: &Connection, user_id: &UserId) -> Result<f64, Error> {
    let total = connection.query_one(
        "SELECT COALESCE(SUM(amount), 0) FROM recurring_contribution WHERE user_id = ?1",
        params![user_id.as_str()],
        |row| row.get(0),
    )?;

    Ok(total)
}

/// Insert a new recurring contribution, assigning its ID and timestamping
/// it now.
///
/// # Errors
/// Returns [Error::InvalidParameter] if the trigger day is outside 1-28,
/// [Error::EmptyName] if the target holding name is blank, or [Error] if
/// the SQL execution fails.
pub fn insert_recurring_contribution(
    connection: &Connection,
    new_contribution: NewRecurringContribution,
) -> Result<RecurringContribution, Error> {
    if new_contribution.asset_name.trim().is_empty() {
        return Err(Error::EmptyName("asset name"));
    }

    if new_contribution.day_of_month < 1 || new_contribution.day_of_month > MAX_DAY_OF_MONTH {
        return Err(Error::InvalidParameter(format!(
            "dayOfMonth must be between 1 and {MAX_DAY_OF_MONTH}"
        )));
    }

    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO recurring_contribution (user_id, asset_name, amount, day_of_month, tags, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new_contribution.user_id.as_str(),
            new_contribution.asset_name,
            new_contribution.amount,
            new_contribution.day_of_month,
            new_contribution.tags,
            created_at,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(RecurringContribution {
        id,
        user_id: new_contribution.user_id,
        asset_name: new_contribution.asset_name,
        amount: new_contribution.amount,
        day_of_month: new_contribution.day_of_month,
        tags: new_contribution.tags,
        created_at,
    })
}

/// Delete a recurring contribution owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a contribution owned
/// by `user_id`, or [Error] if the SQL execution fails.
pub fn delete_recurring_contribution(
    connection: &Connection,
    user_id: &UserId,
    id: DatabaseID,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM recurring_contribution WHERE id = ?1 AND user_id = ?2",
        params![id, user_id.as_str()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_contribution(
    user_id: &str,
    asset_name: &str,
    amount: f64,
    day_of_month: u8,
) -> NewRecurringContribution {
    NewRecurringContribution {
        user_id: UserId::new(user_id),
        asset_name: asset_name.to_owned(),
        amount,
        day_of_month,
        tags: "stocks, retirement".to_owned(),
    }
}
