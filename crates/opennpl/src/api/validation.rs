use super::ApiError;
use crate::loader::whole_number;
use crate::schema::{Column, ColumnKind, Entity};
use crate::store::{self, StoreError};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Messages per field name, the body of a 400 response.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const NON_FIELD: &str = "non_field_errors";

/// Checks a request body against `E`'s columns and builds the entity.
///
/// Unknown keys are ignored. Foreign keys must name an existing row.
pub(crate) fn validate<E: Entity>(conn: &Connection, body: JsonValue) -> Result<E, ApiError> {
    let object = match body {
        JsonValue::Object(object) => object,
        other => {
            let mut errors = FieldErrors::new();
            errors.insert(
                NON_FIELD.to_string(),
                vec![format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type(&other)
                )],
            );
            return Err(ApiError::Invalid(errors));
        }
    };

    let mut fields = Map::with_capacity(E::COLUMNS.len());
    let mut errors = FieldErrors::new();
    for column in E::COLUMNS {
        match check(conn, column, object.get(column.name))? {
            Ok(value) => {
                fields.insert(column.name.to_string(), value);
            }
            Err(message) => {
                errors.entry(column.name.to_string()).or_default().push(message);
            }
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Invalid(errors));
    }

    serde_json::from_value(JsonValue::Object(fields)).map_err(|err| {
        let mut errors = FieldErrors::new();
        errors.insert(NON_FIELD.to_string(), vec![err.to_string()]);
        ApiError::Invalid(errors)
    })
}

/// The outer error is a storage failure, the inner one a message for the field.
fn check(
    conn: &Connection,
    column: &Column,
    value: Option<&JsonValue>,
) -> Result<Result<JsonValue, String>, StoreError> {
    let value = match value {
        None if column.required => return Ok(Err("This field is required.".to_string())),
        Some(JsonValue::Null) if column.required => {
            return Ok(Err("This field may not be null.".to_string()))
        }
        None | Some(JsonValue::Null) => return Ok(Ok(JsonValue::Null)),
        Some(value) => value,
    };

    let checked = match column.kind {
        ColumnKind::Text => match value {
            JsonValue::String(text) if column.required && text.trim().is_empty() => {
                Err("This field may not be blank.".to_string())
            }
            JsonValue::String(text) => Ok(JsonValue::String(text.clone())),
            JsonValue::Number(number) => Ok(JsonValue::String(number.to_string())),
            _ => Err("Not a valid string.".to_string()),
        },
        ColumnKind::Real => real(value)
            .map(JsonValue::from)
            .ok_or_else(|| "A valid number is required.".to_string()),
        ColumnKind::Integer => integer(value)
            .map(JsonValue::from)
            .ok_or_else(|| "A valid integer is required.".to_string()),
        ColumnKind::Bool => flag(value)
            .map(JsonValue::Bool)
            .ok_or_else(|| "Must be a valid boolean.".to_string()),
        ColumnKind::Date => value
            .as_str()
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
            .map(|date| JsonValue::String(date.to_string()))
            .ok_or_else(|| {
                "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.".to_string()
            }),
        ColumnKind::Choice(set) => match integer(value) {
            Some(code) if set.contains(code) => Ok(JsonValue::from(code)),
            _ => Err(format!("\"{}\" is not a valid choice.", display(value))),
        },
        ColumnKind::ForeignKey(table) => match integer(value) {
            Some(id) if store::exists(conn, table, id)? => Ok(JsonValue::from(id)),
            Some(id) => Err(format!("Invalid pk \"{id}\" - object does not exist.")),
            None => Err(format!(
                "Incorrect type. Expected pk value, received {}.",
                json_type(value)
            )),
        },
    };
    Ok(checked)
}

fn real(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_number)),
        JsonValue::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn flag(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(flag) => Some(*flag),
        JsonValue::Number(number) => match number.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        JsonValue::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Some(true),
            "false" | "0" | "no" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "str",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "dict",
    }
}
