//! Persistent ordered string-to-bytes map over SQLite.
//!
//! # Responsibility
//! - Point lookup, upsert, removal and ordered enumeration over one table.
//! - Enforce the fixed key/value size bounds of the storage envelope.
//!
//! # Invariants
//! - Enumeration order is ascending key order.
//! - Insert on an existing key overwrites, never errors.
//! - Size bound violations are reported as distinct errors before any write.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum serialized key size accepted by the map.
pub const MAX_KEY_BYTES: usize = 44;
/// Maximum serialized value size accepted by the map.
pub const MAX_VALUE_BYTES: usize = 1024;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for map access and record decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    KeyTooLarge { len: usize },
    ValueTooLarge { len: usize },
    InvalidData(String),
    UninitializedConnection { expected_version: u32, actual_version: u32 },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn { table: &'static str, column: &'static str },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::KeyTooLarge { len } => {
                write!(f, "key of {len} bytes exceeds the {MAX_KEY_BYTES} byte limit")
            }
            Self::ValueTooLarge { len } => write!(
                f,
                "value of {len} bytes exceeds the {MAX_VALUE_BYTES} byte limit"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordered key-value map backed by the `messages` table.
pub struct StableMap<'conn> {
    conn: &'conn Connection,
}

impl<'conn> StableMap<'conn> {
    /// Constructs a map over a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM messages WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Writes `value` under `key`, overwriting any existing entry.
    pub fn insert(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        check_key(key)?;
        check_value(value)?;
        self.conn.execute(
            "INSERT INTO messages (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    /// Deletes the entry under `key` and returns its prior value, if any.
    pub fn remove(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let prior = self.get(key)?;
        if prior.is_some() {
            self.conn
                .execute("DELETE FROM messages WHERE key = ?1;", [key])?;
        }
        Ok(prior)
    }

    /// Returns all values in ascending key order.
    pub fn values(&self) -> StoreResult<Vec<Vec<u8>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM messages ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get::<_, Vec<u8>>(0)?);
        }
        Ok(values)
    }

    /// Returns whether an entry exists under `key`.
    pub fn contains_key(&self, key: &str) -> StoreResult<bool> {
        check_key(key)?;
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE key = ?1);",
            [key],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM messages;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Returns whether the map holds no entries.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    let len = key.len();
    if len > MAX_KEY_BYTES {
        return Err(StoreError::KeyTooLarge { len });
    }
    Ok(())
}

fn check_value(value: &[u8]) -> StoreResult<()> {
    let len = value.len();
    if len > MAX_VALUE_BYTES {
        return Err(StoreError::ValueTooLarge { len });
    }
    Ok(())
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "messages")? {
        return Err(StoreError::MissingRequiredTable("messages"));
    }

    for column in ["key", "value"] {
        if !table_has_column(conn, "messages", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "messages",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
