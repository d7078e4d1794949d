use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserId, database_id::DatabaseID};

/// The simulator inputs a scenario saves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioData {
    /// The user's age at the start of the projection.
    pub age: u32,
    /// The capital already invested, in currency units.
    pub starting_capital: f64,
    /// The amount invested each month, in currency units.
    pub monthly_contribution: f64,
    /// The expected annual return as a percentage.
    pub annual_return: f64,
    /// The expected annual inflation as a percentage.
    pub inflation: f64,
}

/// A named, saved set of simulator inputs.
///
/// Scenarios are never mutated in place; saving again creates a new record
/// with a new ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// The ID of the scenario.
    #[serde(rename = "scenarioId")]
    pub id: DatabaseID,
    /// The user the scenario belongs to.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// The display name the user saved the scenario under.
    pub name: String,
    /// The saved simulator inputs.
    pub data: ScenarioData,
    /// When the scenario was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub fn create_scenario_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS scenario (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            starting_capital REAL NOT NULL,
            monthly_contribution REAL NOT NULL,
            annual_return REAL NOT NULL,
            inflation REAL NOT NULL,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS scenario_user_id ON scenario(user_id)",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_scenario(row: &Row) -> Result<Scenario, rusqlite::Error> {
    Ok(Scenario {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        data: ScenarioData {
            age: row.get(3)?,
            starting_capital: row.get(4)?,
            monthly_contribution: row.get(5)?,
            annual_return: row.get(6)?,
            inflation: row.get(7)?,
        },
        created_at: row.get(8)?,
    })
}

/// Get all of a user's scenarios, ordered by insertion.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_scenarios_by_user(
    connection: &Connection,
    user_id: &UserId,
) -> Result<Vec<Scenario>, Error> {
    let mut statement = connection.prepare(
        "SELECT id, user_id, name, age, starting_capital, monthly_contribution,
            annual_return, inflation, created_at
        FROM scenario WHERE user_id = ?1 ORDER BY id",
    )?;

    let scenarios = statement
        .query_map(params![user_id.as_str()], map_row_to_scenario)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(scenarios)
}

/// Insert a new scenario, assigning its ID and timestamping it now.
///
/// # Errors
/// Returns [Error::EmptyName] if the scenario name is blank, or [Error] if
/// the SQL execution fails.
pub fn insert_scenario(
    connection: &Connection,
    user_id: UserId,
    name: String,
    data: ScenarioData,
) -> Result<Scenario, Error> {
    if name.trim().is_empty() {
        return Err(Error::EmptyName("scenario name"));
    }

    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO scenario (user_id, name, age, starting_capital, monthly_contribution,
            annual_return, inflation, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id.as_str(),
            name,
            data.age,
            data.starting_capital,
            data.monthly_contribution,
            data.annual_return,
            data.inflation,
            created_at,
        ],
    )?;

    Ok(Scenario {
        id: connection.last_insert_rowid(),
        user_id,
        name,
        data,
        created_at,
    })
}

/// Delete a scenario owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a scenario owned by
/// `user_id`, or [Error] if the SQL execution fails.
pub fn delete_scenario(
    connection: &Connection,
    user_id: &UserId,
    id: DatabaseID,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM scenario WHERE id = ?1 AND user_id = ?2",
        params![id, user_id.as_str()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_scenario_data() -> ScenarioData {
    ScenarioData {
        age: 30,
        starting_capital: 50_000.0,
        monthly_contribution: 1_000.0,
        annual_return: 7.0,
        inflation: 2.5,
    }
}
