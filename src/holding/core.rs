use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserId, database_id::DatabaseID};

/// Whether a holding adds to or subtracts from the owner's net worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingKind {
    /// Something the owner owns, e.g. a savings account or an index fund.
    Asset,
    /// Something the owner owes, e.g. a mortgage or a student loan.
    Liability,
}

impl HoldingKind {
    /// The lowercase string stored in the database for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingKind::Asset => "asset",
            HoldingKind::Liability => "liability",
        }
    }

    fn from_column(text: &str) -> Result<Self, rusqlite::types::FromSqlError> {
        match text {
            "asset" => Ok(HoldingKind::Asset),
            "liability" => Ok(HoldingKind::Liability),
            _ => Err(rusqlite::types::FromSqlError::InvalidType),
        }
    }
}

/// One asset or liability line in a user's net worth.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingItem {
    /// The ID of the holding.
    #[serde(rename = "itemId")]
    pub id: DatabaseID,
    /// The user the holding belongs to.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// The display name, e.g. "Vanguard Global Stock".
    pub name: String,
    /// Whether this is an asset or a liability. Serialized as `type` to
    /// match the wire format clients already speak.
    #[serde(rename = "type")]
    pub kind: HoldingKind,
    /// The current value in currency units.
    pub value: f64,
    /// Free-text comma-separated tags. The first tag is used as the
    /// allocation category.
    pub tags: String,
    /// The instrument's ISIN, for investment-type holdings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    /// The number of units held, for investment-type holdings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,
    /// The price per unit, for investment-type holdings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_share: Option<f64>,
    /// Whether this holding was materialized from a recurring contribution
    /// rather than entered by hand.
    pub recurring: bool,
    /// When the holding was created or last replaced.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The data needed to create a holding.
///
/// The ID and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewHolding {
    /// The user the holding will belong to.
    pub user_id: UserId,
    /// The display name.
    pub name: String,
    /// Whether this is an asset or a liability.
    pub kind: HoldingKind,
    /// The current value in currency units.
    pub value: f64,
    /// Free-text comma-separated tags.
    pub tags: String,
    /// The instrument's ISIN.
    pub isin: Option<String>,
    /// The number of units held.
    pub shares: Option<f64>,
    /// The price per unit.
    pub price_per_share: Option<f64>,
    /// Whether the holding originates from a recurring contribution.
    pub recurring: bool,
}

pub fn create_holding_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS holding (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('asset', 'liability')),
            value REAL NOT NULL,
            tags TEXT NOT NULL DEFAULT '',
            isin TEXT,
            shares REAL,
            price_per_share REAL,
            recurring INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS holding_user_id ON holding(user_id)",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_holding(row: &Row) -> Result<HoldingItem, rusqlite::Error> {
    let kind: String = row.get(3)?;
    let kind_column_type = row.get_ref(3)?.data_type();

    Ok(HoldingItem {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        kind: HoldingKind::from_column(&kind).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(3, kind_column_type, Box::new(error))
        })?,
        value: row.get(4)?,
        tags: row.get(5)?,
        isin: row.get(6)?,
        shares: row.get(7)?,
        price_per_share: row.get(8)?,
        recurring: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

const HOLDING_COLUMNS: &str =
    "id, user_id, name, kind, value, tags, isin, shares, price_per_share, recurring, updated_at";

/// Get all of a user's holdings, ordered by insertion.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_holdings_by_user(
    connection: &Connection,
    user_id: &UserId,
) -> Result<Vec<HoldingItem>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {HOLDING_COLUMNS} FROM holding WHERE user_id = ?1 ORDER BY id"
    ))?;

    let holdings = statement
        .query_map(params![user_id.as_str()], map_row_to_holding)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(holdings)
}

/// Get the distinct set of users that own at least one holding.
///
/// This is a full scan of the holding table. It is only used by the daily
/// snapshot cycle, which runs at most once per day.
///
/// # Errors
/// Returns [Error] if the SQL query preparation or execution fails.
pub fn get_distinct_holding_owners(connection: &Connection) -> Result<Vec<UserId>, Error> {
    let mut statement =
        connection.prepare("SELECT DISTINCT user_id FROM holding ORDER BY user_id")?;

    let owners = statement
        .query_map([], |row| row.get::<_, String>(0))?
        .map(|user_id| user_id.map(UserId::new))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(owners)
}

/// Insert a new holding, assigning its ID and timestamping it now.
///
/// # Errors
/// Returns [Error::EmptyName] if the holding name is blank, or [Error] if
/// the SQL execution fails.
pub fn insert_holding(connection: &Connection, new_holding: NewHolding) -> Result<HoldingItem, Error> {
    if new_holding.name.trim().is_empty() {
        return Err(Error::EmptyName("holding name"));
    }

    let updated_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO holding (user_id, name, kind, value, tags, isin, shares, price_per_share, recurring, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            new_holding.user_id.as_str(),
            new_holding.name,
            new_holding.kind.as_str(),
            new_holding.value,
            new_holding.tags,
            new_holding.isin,
            new_holding.shares,
            new_holding.price_per_share,
            new_holding.recurring,
            updated_at,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(HoldingItem {
        id,
        user_id: new_holding.user_id,
        name: new_holding.name,
        kind: new_holding.kind,
        value: new_holding.value,
        tags: new_holding.tags,
        isin: new_holding.isin,
        shares: new_holding.shares,
        price_per_share: new_holding.price_per_share,
        recurring: new_holding.recurring,
        updated_at,
    })
}

/// Replace an existing holding in full. There are no partial updates.
///
/// The replacement keeps the holding's ID and refreshes its timestamp.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a holding owned by
/// `new_holding.user_id`, [Error::EmptyName] if the new name is blank, or
/// [Error] if the SQL execution fails.
pub fn replace_holding(
    connection: &Connection,
    id: DatabaseID,
    new_holding: NewHolding,
) -> Result<HoldingItem, Error> {
    if new_holding.name.trim().is_empty() {
        return Err(Error::EmptyName("holding name"));
    }

    let updated_at = OffsetDateTime::now_utc();

    let rows_updated = connection.execute(
        "UPDATE holding SET name = ?1, kind = ?2, value = ?3, tags = ?4, isin = ?5,
            shares = ?6, price_per_share = ?7, recurring = ?8, updated_at = ?9
        WHERE id = ?10 AND user_id = ?11",
        params![
            new_holding.name,
            new_holding.kind.as_str(),
            new_holding.value,
            new_holding.tags,
            new_holding.isin,
            new_holding.shares,
            new_holding.price_per_share,
            new_holding.recurring,
            updated_at,
            id,
            new_holding.user_id.as_str(),
        ],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(HoldingItem {
        id,
        user_id: new_holding.user_id,
        name: new_holding.name,
        kind: new_holding.kind,
        value: new_holding.value,
        tags: new_holding.tags,
        isin: new_holding.isin,
        shares: new_holding.shares,
        price_per_share: new_holding.price_per_share,
        recurring: new_holding.recurring,
        updated_at,
    })
}

/// Delete a holding owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a holding owned by
/// `user_id`, or [Error] if the SQL execution fails.
pub fn delete_holding(
    connection: &Connection,
    user_id: &UserId,
    id: DatabaseID,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM holding WHERE id = ?1 AND user_id = ?2",
        params![id, user_id.as_str()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_holding(user_id: &str, kind: HoldingKind, value: f64, tags: &str) -> NewHolding {
    NewHolding {
        user_id: UserId::new(user_id),
        name: "Test Holding".to_owned(),
        kind,
        value,
        tags: tags.to_owned(),
        isin: None,
        shares: None,
        price_per_share: None,
        recurring: false,
    }
}
