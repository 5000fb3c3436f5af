use crate::schema::{is_missing, ColumnKind};
use chrono::{Datelike, Months, NaiveDate};
use serde_json::Value as JsonValue;

/// Header names are matched without case, BOMs or stray spacing.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace('-', "_")
        .to_ascii_lowercase()
}

/// Converts one source token into the JSON value stored for a column.
pub(crate) fn value(kind: ColumnKind, token: &str) -> Result<JsonValue, String> {
    let token = token.trim();
    match kind {
        ColumnKind::Choice(set) => match set.resolve_token(token) {
            Some(code) => Ok(JsonValue::from(code)),
            None if is_missing(token) => Ok(JsonValue::Null),
            None => Err(format!("'{token}' is not a known {} code", set.name)),
        },
        _ if is_missing(token) => Ok(JsonValue::Null),
        ColumnKind::Text => Ok(JsonValue::String(token.to_string())),
        ColumnKind::Real => real(token).map(JsonValue::from),
        ColumnKind::Integer | ColumnKind::ForeignKey(_) => integer(token).map(JsonValue::from),
        ColumnKind::Bool => flag(token).map(JsonValue::Bool),
        ColumnKind::Date => date(token).map(|date| JsonValue::String(date.to_string())),
    }
}

fn real(token: &str) -> Result<f64, String> {
    token
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| format!("'{token}' is not a number"))
}

/// Accepts `12` as well as the `12.0` spreadsheet exports produce.
fn integer(token: &str) -> Result<i64, String> {
    if let Ok(number) = token.parse::<i64>() {
        return Ok(number);
    }
    token
        .parse::<f64>()
        .ok()
        .and_then(whole_number)
        .ok_or_else(|| format!("'{token}' is not a whole number"))
}

/// `None` for fractions and for values an `i64` cannot hold.
pub(crate) fn whole_number(number: f64) -> Option<i64> {
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&number);
    (in_range && number.fract() == 0.0).then_some(number as i64)
}

fn flag(token: &str) -> Result<bool, String> {
    match token.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        _ => Err(format!("'{token}' is not a Y/N flag")),
    }
}

/// Parses `MMYYYY`, `MM/YYYY` and ISO dates. Month-only values fall on the
/// first day of the month.
pub(crate) fn date(token: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("'{token}' is not a date (MMYYYY, MM/YYYY or YYYY-MM-DD)");

    if let Some(iso) = token.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    let (month, year) = match token.split_once('/') {
        Some((month, year)) => (month, year),
        None if (5..=6).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit()) => {
            token.split_at(token.len() - 4)
        }
        None => return Err(invalid()),
    };
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Last day of the month named by a reporting period.
pub(crate) fn period_end(period: &str) -> Option<NaiveDate> {
    let start = date(period.trim()).ok()?.with_day(1)?;
    start.checked_add_months(Months::new(1))?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sflp::choices::{Channel, MortgageInsuranceType, ZeroBalanceCode};
    use serde_json::json;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn headers_are_case_and_space_insensitive() {
        assert_eq!(normalize_header("\u{feff}Loan Identifier"), "loan_identifier");
        assert_eq!(normalize_header(" zero-balance_code "), "zero_balance_code");
    }

    #[test]
    fn dates_accept_source_formats() {
        assert_eq!(date("032019"), Ok(ymd(2019, 3, 1)));
        assert_eq!(date("32019"), Ok(ymd(2019, 3, 1)));
        assert_eq!(date("11/2020"), Ok(ymd(2020, 11, 1)));
        assert_eq!(date("2021-07-15"), Ok(ymd(2021, 7, 15)));
        assert_eq!(date("2021-07-15 00:00:00"), Ok(ymd(2021, 7, 15)));
        assert!(date("132019").is_err());
        assert!(date("soon").is_err());
    }

    #[test]
    fn period_end_is_last_day_of_month() {
        assert_eq!(period_end("022020"), Some(ymd(2020, 2, 29)));
        assert_eq!(period_end("122021"), Some(ymd(2021, 12, 31)));
        assert_eq!(period_end("garbage"), None);
    }

    #[test]
    fn missing_tokens_become_null() {
        for token in ["", "None", "NaN", "  "] {
            assert_eq!(value(ColumnKind::Real, token), Ok(JsonValue::Null));
            assert_eq!(value(ColumnKind::Bool, token), Ok(JsonValue::Null));
        }
    }

    #[test]
    fn scalar_tokens_convert() {
        assert_eq!(value(ColumnKind::Bool, "Y"), Ok(json!(true)));
        assert_eq!(value(ColumnKind::Bool, "N"), Ok(json!(false)));
        assert_eq!(value(ColumnKind::Integer, "360.0"), Ok(json!(360)));
        assert_eq!(value(ColumnKind::Real, "4.25"), Ok(json!(4.25)));
        assert_eq!(value(ColumnKind::Date, "012020"), Ok(json!("2020-01-01")));
        assert!(value(ColumnKind::Integer, "3.5").is_err());
        assert!(value(ColumnKind::Real, "n/a").is_err());
        assert!(value(ColumnKind::Bool, "maybe").is_err());
    }

    #[test]
    fn integers_beyond_i64_are_rejected() {
        assert!(value(ColumnKind::Integer, "1e19").is_err());
        assert!(value(ColumnKind::Integer, "-1e19").is_err());
        assert!(value(ColumnKind::Integer, "9223372036854775808").is_err());
        assert!(value(ColumnKind::ForeignKey("npl_loan"), "1e300").is_err());
        assert_eq!(value(ColumnKind::Integer, "1e3"), Ok(json!(1000)));
        assert_eq!(whole_number(-9.0e18), Some(-9_000_000_000_000_000_000));
        assert_eq!(whole_number(f64::NAN), None);
    }

    #[test]
    fn choice_tokens_resolve_through_their_set() {
        assert_eq!(
            value(ColumnKind::Choice(&Channel::SET), "B"),
            Ok(json!(Channel::Broker.code()))
        );
        assert_eq!(
            value(ColumnKind::Choice(&ZeroBalanceCode::SET), "1.0"),
            Ok(json!(ZeroBalanceCode::PrepaidOrMatured.code()))
        );
        assert_eq!(
            value(ColumnKind::Choice(&MortgageInsuranceType::SET), ""),
            Ok(json!(3))
        );
        assert_eq!(value(ColumnKind::Choice(&Channel::SET), ""), Ok(JsonValue::Null));

        let err = value(ColumnKind::Choice(&Channel::SET), "X").expect_err("unknown code");
        assert!(err.contains("Channel"));
    }
}
