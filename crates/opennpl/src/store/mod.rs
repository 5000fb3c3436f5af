//! SQLite persistence for every entity table.
//!
//! [`Store`] owns one connection behind a mutex. The free functions take a
//! plain [`Connection`] so the loaders can run them inside a transaction.

mod sql;

use crate::schema::{Entity, Record};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Transaction};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode {table} record: {message}")]
    Encode {
        table: &'static str,
        message: String,
    },
    #[error("could not decode {table} row: {message}")]
    Decode {
        table: &'static str,
        message: String,
    },
    #[error("store connection poisoned")]
    Poisoned,
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if needed) the database file and its tables.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        debug!(path = %path.as_ref().display(), "opened database");
        Self::prepare(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        sql::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    pub fn insert<E: Entity>(&self, fields: &E) -> Result<Record<E>, StoreError> {
        let conn = self.connection()?;
        insert(&conn, fields)
    }

    pub fn get<E: Entity>(&self, id: i64) -> Result<Option<Record<E>>, StoreError> {
        let conn = self.connection()?;
        get(&conn, id)
    }

    pub fn list<E: Entity>(&self) -> Result<Vec<Record<E>>, StoreError> {
        let conn = self.connection()?;
        list(&conn)
    }

    /// Deletes one row; rows referencing it go with it.
    pub fn delete<E: Entity>(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connection()?;
        let removed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", E::TABLE), [id])?;
        Ok(removed > 0)
    }

    pub fn count<E: Entity>(&self) -> Result<usize, StoreError> {
        let conn = self.connection()?;
        count(&conn, E::TABLE)
    }

    pub fn exists(&self, table: &str, id: i64) -> Result<bool, StoreError> {
        let conn = self.connection()?;
        exists(&conn, table, id)
    }

    /// Runs `work` in one transaction, committing only when it succeeds.
    pub fn transaction<T, Err, F>(&self, work: F) -> Result<T, Err>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, Err>,
        Err: From<StoreError>,
    {
        let mut conn = self.connection()?;
        let tx = conn.transaction().map_err(StoreError::from)?;
        let value = work(&tx)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }
}

pub fn insert<E: Entity>(conn: &Connection, fields: &E) -> Result<Record<E>, StoreError> {
    let now = Utc::now().trunc_subsecs(6);
    let mut values = encode(fields)?;
    values.push(SqlValue::Text(timestamp(now)));
    values.push(SqlValue::Text(timestamp(now)));

    let mut statement = conn.prepare_cached(&sql::insert(E::TABLE, E::COLUMNS))?;
    statement.execute(params_from_iter(values))?;

    Ok(Record {
        id: conn.last_insert_rowid(),
        fields: fields.clone(),
        creation_date: now,
        last_change_date: now,
    })
}

/// Overwrites every column of an existing row. Returns false when the row is
/// missing.
pub fn update<E: Entity>(conn: &Connection, id: i64, fields: &E) -> Result<bool, StoreError> {
    let mut values = encode(fields)?;
    values.push(SqlValue::Text(timestamp(Utc::now().trunc_subsecs(6))));
    values.push(SqlValue::Integer(id));

    let mut statement = conn.prepare_cached(&sql::update(E::TABLE, E::COLUMNS))?;
    Ok(statement.execute(params_from_iter(values))? > 0)
}

pub fn get<E: Entity>(conn: &Connection, id: i64) -> Result<Option<Record<E>>, StoreError> {
    let query = format!("{} WHERE id = ?1", sql::select(E::TABLE, E::COLUMNS));
    let raw = conn
        .query_row(&query, params![id], read_row::<E>)
        .optional()?;
    raw.map(decode::<E>).transpose()
}

pub fn list<E: Entity>(conn: &Connection) -> Result<Vec<Record<E>>, StoreError> {
    let query = format!("{} ORDER BY id", sql::select(E::TABLE, E::COLUMNS));
    let mut statement = conn.prepare(&query)?;
    let rows = statement
        .query_map([], read_row::<E>)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(decode::<E>).collect()
}

pub fn count(conn: &Connection, table: &str) -> Result<usize, StoreError> {
    let total: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(usize::try_from(total).unwrap_or_default())
}

pub fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool, StoreError> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1"),
            [id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Removes every row of a table.
pub fn clear(conn: &Connection, table: &str) -> Result<usize, StoreError> {
    Ok(conn.execute(&format!("DELETE FROM {table}"), [])?)
}

struct RawRow {
    id: i64,
    creation_date: String,
    last_change_date: String,
    values: Vec<SqlValue>,
}

fn read_row<E: Entity>(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    let values = (0..E::COLUMNS.len())
        .map(|index| row.get::<_, SqlValue>(index + sql::META_COLUMNS))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(RawRow {
        id: row.get(0)?,
        creation_date: row.get(1)?,
        last_change_date: row.get(2)?,
        values,
    })
}

fn encode<E: Entity>(fields: &E) -> Result<Vec<SqlValue>, StoreError> {
    let encode_error = |message: String| StoreError::Encode {
        table: E::TABLE,
        message,
    };
    let value = serde_json::to_value(fields).map_err(|err| encode_error(err.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| encode_error("record is not a JSON object".to_string()))?;

    E::COLUMNS
        .iter()
        .map(|column| sql::to_sql(column, object.get(column.name)).map_err(encode_error))
        .collect()
}

fn decode<E: Entity>(raw: RawRow) -> Result<Record<E>, StoreError> {
    let decode_error = |message: String| StoreError::Decode {
        table: E::TABLE,
        message,
    };

    let mut object = Map::with_capacity(E::COLUMNS.len());
    for (column, value) in E::COLUMNS.iter().zip(raw.values) {
        object.insert(column.name.to_string(), sql::to_json(column, value));
    }
    let fields = serde_json::from_value::<E>(JsonValue::Object(object))
        .map_err(|err| decode_error(err.to_string()))?;

    Ok(Record {
        id: raw.id,
        fields,
        creation_date: parse_timestamp(&raw.creation_date).map_err(decode_error)?,
        last_change_date: parse_timestamp(&raw.last_change_date).map_err(decode_error)?,
    })
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("invalid timestamp '{value}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sflp::{
        choices::Channel, Counterparty, Enforcement, Forbearance, Loan, Portfolio,
        PropertyCollateral,
    };
    use crate::schema::{npl, Entity};
    use chrono::NaiveDate;

    fn store() -> Store {
        Store::in_memory().expect("in-memory store opens")
    }

    fn portfolio(store: &Store, name: &str) -> i64 {
        store
            .insert(&Portfolio {
                name: Some(name.to_string()),
                ..Portfolio::default()
            })
            .expect("portfolio inserted")
            .id
    }

    fn loan(store: &Store, portfolio_id: i64, identifier: &str) -> i64 {
        store
            .insert(&Loan {
                loan_identifier: Some(identifier.to_string()),
                portfolio_id: Some(portfolio_id),
                channel: Some(Channel::Broker),
                original_upb: Some(250_000.0),
                origination_date: NaiveDate::from_ymd_opt(2019, 3, 1),
                relocation_mortgage_indicator: Some(false),
                ..Loan::default()
            })
            .expect("loan inserted")
            .id
    }

    #[test]
    fn natural_key_round_trips() {
        let store = store();
        let created = store
            .insert(&npl::Loan {
                contract_identifier: Some("test".to_string()),
                ..npl::Loan::default()
            })
            .expect("insert");

        let fetched = store
            .get::<npl::Loan>(created.id)
            .expect("query")
            .expect("row present");
        assert_eq!(fetched.fields.natural_key(), Some("test"));
        assert_eq!(fetched, created);
    }

    #[test]
    fn typed_fields_survive_storage() {
        let store = store();
        let portfolio_id = portfolio(&store, "Pool A");
        let id = loan(&store, portfolio_id, "100001");

        let record = store.get::<Loan>(id).expect("query").expect("row present");
        assert_eq!(record.fields.channel, Some(Channel::Broker));
        assert_eq!(record.fields.original_upb, Some(250_000.0));
        assert_eq!(record.fields.relocation_mortgage_indicator, Some(false));
        assert_eq!(record.fields.origination_date, NaiveDate::from_ymd_opt(2019, 3, 1));
        assert_eq!(record.display_name(), "100001");
    }

    #[test]
    fn missing_rows_are_none() {
        let store = store();
        assert!(store.get::<Loan>(42).expect("query").is_none());
        assert!(!store.delete::<Loan>(42).expect("delete"));
        assert!(!store.exists(Loan::TABLE, 42).expect("exists"));
    }

    #[test]
    fn deleting_portfolio_cascades_to_loans_and_children() {
        let store = store();
        let kept = portfolio(&store, "Kept");
        let dropped = portfolio(&store, "Dropped");
        let kept_loan = loan(&store, kept, "1");
        let dropped_loan = loan(&store, dropped, "2");

        let collateral = store
            .insert(&PropertyCollateral {
                loan_id: Some(dropped_loan),
                ..PropertyCollateral::default()
            })
            .expect("collateral");
        store
            .insert(&Enforcement {
                loan_id: Some(dropped_loan),
                property_collateral_id: Some(collateral.id),
                ..Enforcement::default()
            })
            .expect("enforcement");
        store
            .insert(&Forbearance {
                loan_id: Some(dropped_loan),
                ..Forbearance::default()
            })
            .expect("forbearance");
        store
            .insert(&Counterparty {
                counterparty_identifier: Some("2".to_string()),
                loan_id: Some(kept_loan),
                ..Counterparty::default()
            })
            .expect("counterparty");

        assert!(store.delete::<Portfolio>(dropped).expect("delete"));

        assert_eq!(store.count::<Loan>().expect("count"), 1);
        assert_eq!(store.count::<PropertyCollateral>().expect("count"), 0);
        assert_eq!(store.count::<Enforcement>().expect("count"), 0);
        assert_eq!(store.count::<Forbearance>().expect("count"), 0);
        assert_eq!(store.count::<Counterparty>().expect("count"), 1);
        assert!(store.get::<Loan>(kept_loan).expect("query").is_some());
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let store = store();
        let err = store
            .insert(&Loan {
                loan_identifier: Some("orphan".to_string()),
                portfolio_id: Some(999),
                ..Loan::default()
            })
            .expect_err("dangling reference rejected");
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn failed_transactions_roll_back() {
        let store = store();
        let result: Result<(), StoreError> = store.transaction(|tx| {
            insert(
                tx,
                &Portfolio {
                    name: Some("temporary".to_string()),
                    ..Portfolio::default()
                },
            )?;
            Err(StoreError::Poisoned)
        });
        assert!(result.is_err());
        assert_eq!(store.count::<Portfolio>().expect("count"), 0);
    }

    #[test]
    fn update_overwrites_columns() {
        let store = store();
        let id = portfolio(&store, "Before");
        let changed = store
            .transaction(|tx| {
                update(
                    tx,
                    id,
                    &Portfolio {
                        name: Some("After".to_string()),
                        description: Some("renamed".to_string()),
                        ..Portfolio::default()
                    },
                )
            })
            .expect("update");
        assert!(changed);

        let record = store.get::<Portfolio>(id).expect("query").expect("row");
        assert_eq!(record.fields.name.as_deref(), Some("After"));
        assert!(record.last_change_date >= record.creation_date);
        assert_eq!(store.list::<Portfolio>().expect("list").len(), 1);
    }
}
