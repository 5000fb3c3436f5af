//! Entity descriptors shared by the store, the bulk loaders and the HTTP API.
//!
//! Every entity is a plain struct of optional fields. Its [`Entity`] impl
//! carries the table name, the API collection it is served under and a static
//! column list; the column list is what the store turns into DDL, what the
//! loaders map delimited files onto and what the API validates request
//! bodies against.

mod choices;
pub mod npl;
pub mod sflp;

pub use choices::{ChoiceError, ChoiceOption, ChoiceSet};
pub(crate) use choices::{choice_set, is_missing};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The external data template an entity conforms to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// EBA non-performing loan template.
    Npl,
    /// US agency single-family loan performance template.
    Sflp,
}

impl Template {
    pub fn api_segment(self) -> &'static str {
        match self {
            Template::Npl => "npl_data",
            Template::Sflp => "sflp_data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Template::Npl => "NPL Template",
            Template::Sflp => "SFLP Template",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ColumnKind {
    Text,
    Real,
    Integer,
    Bool,
    Date,
    Choice(&'static ChoiceSet),
    /// Reference to the `id` of another table.
    ForeignKey(&'static str),
}

impl ColumnKind {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Text | ColumnKind::Date => "TEXT",
            ColumnKind::Real => "REAL",
            ColumnKind::Integer
            | ColumnKind::Bool
            | ColumnKind::Choice(_)
            | ColumnKind::ForeignKey(_) => "INTEGER",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

impl Column {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Real)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Integer)
    }

    pub const fn flag(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Bool)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Date)
    }

    pub const fn choice(name: &'static str, set: &'static ChoiceSet) -> Self {
        Self::new(name, ColumnKind::Choice(set))
    }

    pub const fn foreign_key(name: &'static str, table: &'static str) -> Self {
        Self::new(name, ColumnKind::ForeignKey(table))
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }
}

/// Descriptor implemented by every persisted record type.
pub trait Entity:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    const TABLE: &'static str;
    const TEMPLATE: Template;
    /// Path segment under `/api/<template>/`.
    const COLLECTION: &'static str;
    const LABEL: &'static str;
    /// Column holding the external identifier shown in list views.
    const NATURAL_KEY: Option<&'static str> = None;
    const COLUMNS: &'static [Column];

    fn natural_key(&self) -> Option<&str> {
        None
    }

    fn column(name: &str) -> Option<&'static Column> {
        Self::COLUMNS.iter().find(|column| column.name == name)
    }
}

/// A stored entity together with its primary key and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<E> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: E,
    pub creation_date: DateTime<Utc>,
    pub last_change_date: DateTime<Utc>,
}

impl<E: Entity> Record<E> {
    pub fn display_name(&self) -> String {
        match self.fields.natural_key() {
            Some(key) => key.to_string(),
            None => format!("{} {}", E::LABEL, self.id),
        }
    }
}

/// Table name plus columns, enough to create the table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSpec {
    pub fn of<E: Entity>() -> Self {
        Self {
            name: E::TABLE,
            columns: E::COLUMNS,
        }
    }
}

/// Every table of both templates, parents before children.
pub fn all_tables() -> Vec<TableSpec> {
    let mut tables = npl::tables();
    tables.extend(sflp::tables());
    tables
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Entity;
    use std::collections::BTreeSet;

    pub(crate) fn assert_columns_match_fields<E: Entity>() {
        let value = serde_json::to_value(E::default()).expect("entity serializes");
        let fields: BTreeSet<&str> = value
            .as_object()
            .expect("entity serializes to an object")
            .keys()
            .map(String::as_str)
            .collect();
        let columns: BTreeSet<&str> = E::COLUMNS.iter().map(|column| column.name).collect();
        assert_eq!(fields, columns, "column descriptors drifted for {}", E::TABLE);
        assert_eq!(
            columns.len(),
            E::COLUMNS.len(),
            "duplicate column in {}",
            E::TABLE
        );
        if let Some(key) = E::NATURAL_KEY {
            let column = E::column(key).expect("natural key is a column");
            assert!(column.required, "natural key of {} must be required", E::TABLE);
        }
    }
}
