use crate::schema::{Column, ColumnKind, TableSpec};
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde_json::Value as JsonValue;

pub(super) const META_COLUMNS: usize = 3;

pub(super) fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    for table in crate::schema::all_tables() {
        conn.execute_batch(&create_table(&table))?;
        for column in table.columns {
            if matches!(column.kind, ColumnKind::ForeignKey(_)) {
                conn.execute_batch(&format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table} ({quoted});",
                    table = table.name,
                    column = column.name,
                    quoted = quote(column.name),
                ))?;
            }
        }
    }
    Ok(())
}

pub(super) fn create_table(spec: &TableSpec) -> String {
    let mut definitions = vec![
        "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
        "creation_date TEXT NOT NULL".to_string(),
        "last_change_date TEXT NOT NULL".to_string(),
    ];

    for column in spec.columns {
        let mut definition = format!("{} {}", quote(column.name), column.kind.sql_type());
        if column.required {
            definition.push_str(" NOT NULL");
        }
        match column.kind {
            ColumnKind::Bool => {
                definition.push_str(&format!(" CHECK ({} IN (0, 1))", quote(column.name)));
            }
            ColumnKind::Choice(set) => {
                let codes = set
                    .codes()
                    .map(|code| code.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                definition.push_str(&format!(" CHECK ({} IN ({codes}))", quote(column.name)));
            }
            ColumnKind::ForeignKey(target) => {
                definition.push_str(&format!(" REFERENCES {target} (id) ON DELETE CASCADE"));
            }
            ColumnKind::Text | ColumnKind::Real | ColumnKind::Integer | ColumnKind::Date => {}
        }
        definitions.push(definition);
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
        spec.name,
        definitions.join(",\n    ")
    )
}

/// Column names are quoted: some, like `index`, are SQL keywords.
fn quote(name: &str) -> String {
    format!("\"{name}\"")
}

pub(super) fn select(table: &str, columns: &[Column]) -> String {
    let names = columns
        .iter()
        .map(|column| quote(column.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT id, creation_date, last_change_date, {names} FROM {table}")
}

pub(super) fn insert(table: &str, columns: &[Column]) -> String {
    let names = columns
        .iter()
        .map(|column| quote(column.name))
        .chain(["creation_date".to_string(), "last_change_date".to_string()])
        .collect::<Vec<_>>();
    let placeholders = (1..=names.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        names.join(", ")
    )
}

pub(super) fn update(table: &str, columns: &[Column]) -> String {
    let assignments = columns
        .iter()
        .map(|column| quote(column.name))
        .chain(["last_change_date".to_string()])
        .enumerate()
        .map(|(index, name)| format!("{name} = ?{}", index + 1))
        .collect::<Vec<_>>();
    format!(
        "UPDATE {table} SET {} WHERE id = ?{}",
        assignments.join(", "),
        assignments.len() + 1
    )
}

pub(super) fn to_sql(column: &Column, value: Option<&JsonValue>) -> Result<SqlValue, String> {
    let value = match value {
        None | Some(JsonValue::Null) => return Ok(SqlValue::Null),
        Some(value) => value,
    };

    match (column.kind, value) {
        (ColumnKind::Text | ColumnKind::Date, JsonValue::String(text)) => {
            Ok(SqlValue::Text(text.clone()))
        }
        (ColumnKind::Real, JsonValue::Number(number)) => number
            .as_f64()
            .map(SqlValue::Real)
            .ok_or_else(|| format!("{number} is not a finite number")),
        (
            ColumnKind::Integer | ColumnKind::Choice(_) | ColumnKind::ForeignKey(_),
            JsonValue::Number(number),
        ) => number
            .as_i64()
            .map(SqlValue::Integer)
            .ok_or_else(|| format!("{number} is not an integer")),
        (ColumnKind::Bool, JsonValue::Bool(flag)) => Ok(SqlValue::Integer(i64::from(*flag))),
        (kind, other) => Err(format!(
            "cannot store {other} in {} column {}",
            kind.sql_type(),
            column.name
        )),
    }
}

pub(super) fn to_json(column: &Column, value: SqlValue) -> JsonValue {
    match (column.kind, value) {
        (_, SqlValue::Null) | (_, SqlValue::Blob(_)) => JsonValue::Null,
        (ColumnKind::Bool, SqlValue::Integer(flag)) => JsonValue::Bool(flag != 0),
        (ColumnKind::Real, SqlValue::Integer(number)) => JsonValue::from(number as f64),
        (_, SqlValue::Integer(number)) => JsonValue::from(number),
        (_, SqlValue::Real(number)) => serde_json::Number::from_f64(number)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        (_, SqlValue::Text(text)) => JsonValue::String(text),
    }
}
