use super::normalizer;
use super::parser::{DelimitedFile, Layout, Row};
use super::{LoadError, LoadOptions, LoadReport, RowError};
use crate::schema::{ColumnKind, Entity};
use crate::store;
use rusqlite::Connection;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub(crate) type LoadFn =
    fn(&mut LoadContext<'_>, &DelimitedFile, &FileSpec<'_>) -> Result<(), LoadError>;

/// How one delimited file maps onto an entity table.
pub(crate) struct FileSpec<'a> {
    pub(crate) file: &'a str,
    /// Headers whose absence aborts the load before anything is written.
    pub(crate) required: &'static [&'static str],
    pub(crate) links: &'static [Link],
    /// `(column, header)` pairs: when `column` has no token, read `header`.
    pub(crate) fallbacks: &'static [(&'static str, &'static str)],
    /// Registry the written row is recorded in, keyed by the token under the
    /// given header. Registered rows are upserted: the last row wins.
    pub(crate) register: Option<(&'static str, &'static str)>,
    /// Fills derived columns after the row has been mapped.
    pub(crate) complete: Option<fn(&mut Map<String, JsonValue>)>,
    /// Whether `LoadOptions::limit` caps the rows of this file.
    pub(crate) limited: bool,
    /// Column order applied when the file starts without a header row.
    pub(crate) layout: Option<Layout>,
    pub(crate) load: LoadFn,
}

/// A foreign key resolved through the natural identifier of its target.
pub(crate) struct Link {
    pub(crate) header: &'static str,
    pub(crate) column: &'static str,
    pub(crate) registry: &'static str,
    /// Unknown identifiers are row errors; otherwise the key stays empty.
    pub(crate) strict: bool,
}

impl Link {
    pub(crate) const fn new(
        header: &'static str,
        column: &'static str,
        registry: &'static str,
    ) -> Self {
        Self {
            header,
            column,
            registry,
            strict: true,
        }
    }

    pub(crate) const fn lenient(self) -> Self {
        Self {
            strict: false,
            ..self
        }
    }
}

#[derive(Default)]
struct Registry {
    ids: HashMap<String, i64>,
    /// Identifiers left out by the row limit; rows referencing them are dropped.
    excluded: HashSet<String>,
}

enum Lookup {
    Found(i64),
    Excluded,
    Unknown,
}

pub(crate) enum Outcome<E> {
    Ready(E),
    /// The row belongs to a parent left out by the row limit.
    Skip,
    Invalid(Vec<RowError>),
}

/// State shared by every file of one load, living inside its transaction.
pub(crate) struct LoadContext<'a> {
    pub(crate) conn: &'a Connection,
    pub(crate) options: &'a LoadOptions,
    registries: HashMap<&'static str, Registry>,
    report: LoadReport,
    errors: Vec<RowError>,
}

impl<'a> LoadContext<'a> {
    pub(crate) fn new(conn: &'a Connection, options: &'a LoadOptions) -> Self {
        Self {
            conn,
            options,
            registries: HashMap::new(),
            report: LoadReport::default(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn lookup_id(&self, registry: &str, key: &str) -> Option<i64> {
        self.registries.get(registry)?.ids.get(key).copied()
    }

    fn lookup(&self, registry: &str, key: &str) -> Lookup {
        match self.registries.get(registry) {
            Some(found) if found.excluded.contains(key) => Lookup::Excluded,
            Some(found) => found.ids.get(key).map_or(Lookup::Unknown, |id| Lookup::Found(*id)),
            None => Lookup::Unknown,
        }
    }

    pub(crate) fn registered(&self, registry: &str) -> usize {
        self.registries.get(registry).map_or(0, |found| found.ids.len())
    }

    pub(crate) fn exclude(&mut self, registry: &'static str, key: &str) {
        self.registries
            .entry(registry)
            .or_default()
            .excluded
            .insert(key.to_string());
    }

    /// Inserts a row, or overwrites the row already registered under `key`.
    pub(crate) fn upsert<E: Entity>(
        &mut self,
        registry: &'static str,
        key: &str,
        fields: &E,
    ) -> Result<i64, LoadError> {
        if let Some(id) = self.lookup_id(registry, key) {
            store::update(self.conn, id, fields)?;
            *self.report.updated.entry(E::TABLE).or_default() += 1;
            return Ok(id);
        }

        let id = self.insert(fields)?;
        self.registries
            .entry(registry)
            .or_default()
            .ids
            .insert(key.to_string(), id);
        Ok(id)
    }

    pub(crate) fn insert<E: Entity>(&mut self, fields: &E) -> Result<i64, LoadError> {
        let record = store::insert(self.conn, fields)?;
        *self.report.inserted.entry(E::TABLE).or_default() += 1;
        Ok(record.id)
    }

    /// Skips the rows in lenient mode and collects them otherwise.
    pub(crate) fn reject(&mut self, errors: Vec<RowError>) {
        if self.options.skip_invalid {
            for error in &errors {
                warn!(%error, "skipping invalid row");
            }
            self.report.skipped.extend(errors);
        } else {
            self.errors.extend(errors);
        }
    }

    /// Ends the load: collected row errors reject the whole transaction.
    pub(crate) fn finish(self) -> Result<LoadReport, LoadError> {
        if self.errors.is_empty() {
            Ok(self.report)
        } else {
            Err(LoadError::Rejected(self.errors))
        }
    }
}

pub(crate) fn row_error(
    row: &Row<'_>,
    column: Option<&str>,
    message: impl Into<String>,
) -> RowError {
    RowError {
        file: row.file_name().to_string(),
        line: row.line(),
        column: column.map(str::to_string),
        message: message.into(),
    }
}

/// Token for a column, consulting the file's fallback header when empty.
pub(crate) fn token<'r>(row: &Row<'r>, spec: &FileSpec, header: &str) -> Option<&'r str> {
    row.token(header).or_else(|| {
        spec.fallbacks
            .iter()
            .find(|(column, _)| *column == header)
            .and_then(|(_, fallback)| row.token(fallback))
    })
}

/// Maps one row onto `E`, resolving links against the registries.
pub(crate) fn build<E: Entity>(
    ctx: &LoadContext<'_>,
    row: &Row<'_>,
    spec: &FileSpec,
) -> Outcome<E> {
    let mut object = Map::with_capacity(E::COLUMNS.len());
    let mut errors = Vec::new();

    for column in E::COLUMNS {
        if matches!(column.kind, ColumnKind::ForeignKey(_)) {
            continue;
        }
        let raw = match row.get(column.name) {
            Some(raw) => token(row, spec, column.name).unwrap_or(raw),
            None => match token(row, spec, column.name) {
                Some(fallback) => fallback,
                None => continue,
            },
        };
        match normalizer::value(column.kind, raw) {
            Ok(value) => {
                object.insert(column.name.to_string(), value);
            }
            Err(message) => errors.push(row_error(row, Some(column.name), message)),
        }
    }

    for link in spec.links {
        let required = E::column(link.column).is_some_and(|column| column.required);
        match token(row, spec, link.header) {
            None if required => errors.push(row_error(
                row,
                Some(link.header),
                "a parent identifier is required",
            )),
            None => {}
            Some(key) => match ctx.lookup(link.registry, key) {
                Lookup::Found(id) => {
                    object.insert(link.column.to_string(), JsonValue::from(id));
                }
                Lookup::Excluded => return Outcome::Skip,
                Lookup::Unknown if link.strict => errors.push(row_error(
                    row,
                    Some(link.header),
                    format!("unknown {} '{key}'", link.header),
                )),
                Lookup::Unknown => {}
            },
        }
    }

    if let Some(complete) = spec.complete {
        complete(&mut object);
    }

    for column in E::COLUMNS {
        let present = object.get(column.name).is_some_and(|value| !value.is_null());
        if column.required && !present && !matches!(column.kind, ColumnKind::ForeignKey(_)) {
            errors.push(row_error(row, Some(column.name), "this field is required"));
        }
    }

    if !errors.is_empty() {
        return Outcome::Invalid(errors);
    }
    match serde_json::from_value::<E>(JsonValue::Object(object)) {
        Ok(fields) => Outcome::Ready(fields),
        Err(err) => Outcome::Invalid(vec![row_error(row, None, err.to_string())]),
    }
}

/// Loads every row of `file` into `E`'s table.
pub(crate) fn load_file<E: Entity>(
    ctx: &mut LoadContext<'_>,
    file: &DelimitedFile,
    spec: &FileSpec,
) -> Result<(), LoadError> {
    let limit = ctx.options.limit.filter(|_| spec.limited);
    let mut loaded = 0usize;

    for row in file.rows() {
        if let Some(message) = row.width_error() {
            ctx.reject(vec![row_error(&row, None, message)]);
            continue;
        }
        let key = spec
            .register
            .and_then(|(registry, header)| Some((registry, token(&row, spec, header)?)));

        if limit.is_some_and(|limit| loaded >= limit) {
            if let Some((registry, key)) = key {
                ctx.exclude(registry, key);
            }
            continue;
        }

        match build::<E>(ctx, &row, spec) {
            Outcome::Ready(fields) => {
                match key {
                    Some((registry, key)) => ctx.upsert(registry, key, &fields)?,
                    None => ctx.insert(&fields)?,
                };
                loaded += 1;
            }
            Outcome::Skip => {
                if let Some((registry, key)) = key {
                    ctx.exclude(registry, key);
                }
            }
            Outcome::Invalid(errors) => ctx.reject(errors),
        }
    }

    debug!(file = spec.file, rows = file.len(), loaded, "file processed");
    Ok(())
}

/// Whether any column of the record carries a value.
pub(crate) fn has_values<E: Entity>(fields: &E) -> bool {
    match serde_json::to_value(fields) {
        Ok(JsonValue::Object(object)) => object.values().any(|value| !value.is_null()),
        _ => false,
    }
}
