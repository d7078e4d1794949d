use rusqlite::{Connection, Row, params};
use serde::Serialize;
use time::Date;

use crate::{Error, auth::UserId, database_id::DatabaseID};

/// A point-in-time record of a user's net worth totals.
///
/// At most one snapshot exists per user per calendar day; re-snapshotting
/// the same day overwrites the existing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    /// The ID of the snapshot.
    #[serde(skip_serializing)]
    pub id: DatabaseID,
    /// The user the snapshot belongs to.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// The calendar day the snapshot was taken.
    pub date: Date,
    /// The sum of all asset values on that day.
    pub assets: f64,
    /// The sum of all liability values on that day.
    pub liabilities: f64,
    /// Assets minus liabilities.
    pub net_worth: f64,
}

pub fn create_snapshot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS net_worth_snapshot (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,
            assets REAL NOT NULL,
            liabilities REAL NOT NULL,
            net_worth REAL NOT NULL,
            UNIQUE(user_id, date)
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_snapshot(row: &Row) -> Result<NetWorthSnapshot, rusqlite::Error> {
    Ok(NetWorthSnapshot {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        date: row.get(2)?,
        assets: row.get(3)?,
        liabilities: row.get(4)?,
        net_worth: row.get(5)?,
    })
}

/// Insert or overwrite the snapshot for `user_id` on `date`.
///
/// The stored net worth is always derived as `assets - liabilities`, so a
/// snapshot can never hold inconsistent totals. The upsert is atomic at the
/// row level, making the daily cycle safe to re-run for the same day.
///
/// # Errors
/// Returns [Error] if the SQL execution fails.
pub fn upsert_snapshot(
    connection: &Connection,
    user_id: &UserId,
    date: Date,
    assets: f64,
    liabilities: f64,
) -> Result<NetWorthSnapshot, Error> {
    let net_worth = assets - liabilities;

    connection.execute(
        "INSERT INTO net_worth_snapshot (user_id, date, assets, liabilities, net_worth)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(user_id, date) DO UPDATE SET
            assets = excluded.assets,
            liabilities = excluded.liabilities,
            net_worth = excluded.net_worth",
        params![user_id.as_str(), date, assets, liabilities, net_worth],
    )?;

    let id = connection.query_one(
        "SELECT id FROM net_worth_snapshot WHERE user_id = ?1 AND date = ?2",
        params![user_id.as_str(), date],
        |row| row.get(0),
    )?;

    Ok(NetWorthSnapshot {
        id,
        user_id: user_id.clone(),
        date,
        assets,
        liabilities,
        net_worth,
    })
}

/// Get all of a user's snapshots, ordered by date ascending.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_snapshots_by_user(
    connection: &Connection,
    user_id: &UserId,
) -> Result<Vec<NetWorthSnapshot>, Error> {
    let mut statement = connection.prepare(
        "SELECT id, user_id, date, assets, liabilities, net_worth
        FROM net_worth_snapshot WHERE user_id = ?1 ORDER BY date ASC",
    )?;

    let snapshots = statement
        .query_map(params![user_id.as_str()], map_row_to_snapshot)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(snapshots)
}

#[cfg(test)]
mod create_snapshot_table_tests {
    use rusqlite::Connection;

    use super::create_snapshot_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_snapshot_table(&connection));
    }
}

#[cfg(test)]
mod snapshot_store_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{auth::UserId, db::initialize};

    use super::{get_snapshots_by_user, upsert_snapshot};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn upsert_derives_net_worth_from_totals() {
        let connection = get_test_connection();

        let snapshot = upsert_snapshot(
            &connection,
            &UserId::new("user-1"),
            date!(2026 - 08 - 23),
            34_636.01,
            12_000.0,
        )
        .unwrap();

        assert_eq!(snapshot.net_worth, 34_636.01 - 12_000.0);
    }

    #[test]
    fn upsert_overwrites_the_same_day_instead_of_duplicating() {
        let connection = get_test_connection();
        let user_id = UserId::new("user-1");
        let day = date!(2026 - 08 - 23);

        upsert_snapshot(&connection, &user_id, day, 100.0, 50.0).unwrap();
        upsert_snapshot(&connection, &user_id, day, 200.0, 80.0).unwrap();

        let snapshots = get_snapshots_by_user(&connection, &user_id).unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].assets, 200.0);
        assert_eq!(snapshots[0].liabilities, 80.0);
        assert_eq!(snapshots[0].net_worth, 120.0);
    }

    #[test]
    fn snapshots_are_listed_in_date_order() {
        let connection = get_test_connection();
        let user_id = UserId::new("user-1");

        // Insert out of order to make sure the query sorts.
        upsert_snapshot(&connection, &user_id, date!(2026 - 03 - 01), 300.0, 0.0).unwrap();
        upsert_snapshot(&connection, &user_id, date!(2026 - 01 - 01), 100.0, 0.0).unwrap();
        upsert_snapshot(&connection, &user_id, date!(2026 - 02 - 01), 200.0, 0.0).unwrap();

        let snapshots = get_snapshots_by_user(&connection, &user_id).unwrap();

        let dates: Vec<_> = snapshots.iter().map(|snapshot| snapshot.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2026 - 01 - 01),
                date!(2026 - 02 - 01),
                date!(2026 - 03 - 01)
            ]
        );
    }

    #[test]
    fn snapshots_are_scoped_to_the_owner() {
        let connection = get_test_connection();

        upsert_snapshot(
            &connection,
            &UserId::new("user-1"),
            date!(2026 - 08 - 23),
            100.0,
            0.0,
        )
        .unwrap();

        let snapshots = get_snapshots_by_user(&connection, &UserId::new("user-2")).unwrap();

        assert!(snapshots.is_empty());
    }
}
