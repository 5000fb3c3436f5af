//! Bulk import of pipe-delimited portfolio files.
//!
//! Every load reads its files up front, checks their headers, then clears the
//! template's tables and writes all rows inside a single transaction. Row
//! problems are collected with file, line and column; a strict load rolls
//! back when any are found, a lenient one skips the offending rows.

mod mapping;
mod normalizer;
mod npl;
mod parser;
mod sflp;

pub use npl::load_npl;
pub use sflp::{load_core_sflp, load_full_sflp, load_sflp, load_static_sflp};
pub(crate) use normalizer::whole_number;

use crate::schema::TableSpec;
use crate::store::{self, Store, StoreError};
use mapping::{FileSpec, LoadContext};
use parser::DelimitedFile;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed delimited data in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("{file} has no '{column}' column")]
    MissingColumn { file: String, column: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{} invalid row(s), nothing was loaded{}", .0.len(), first_error(.0))]
    Rejected(Vec<RowError>),
}

fn first_error(errors: &[RowError]) -> String {
    errors
        .first()
        .map(|error| format!("; first: {error}"))
        .unwrap_or_default()
}

/// A problem with one row of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub file: String,
    pub line: u64,
    pub column: Option<String>,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(
                f,
                "{} line {}, {}: {}",
                self.file, self.line, column, self.message
            ),
            None => write!(f, "{} line {}: {}", self.file, self.line, self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Caps the number of loans read; rows of the loans left out are dropped.
    pub limit: Option<usize>,
    /// Skip invalid rows instead of rejecting the whole load.
    pub skip_invalid: bool,
}

/// Rows written per table, plus the rows skipped in lenient mode.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub inserted: BTreeMap<&'static str, usize>,
    pub updated: BTreeMap<&'static str, usize>,
    pub skipped: Vec<RowError>,
}

impl LoadReport {
    pub fn inserted(&self, table: &str) -> usize {
        self.inserted.get(table).copied().unwrap_or_default()
    }

    pub fn total_inserted(&self) -> usize {
        self.inserted.values().sum()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table, count) in &self.inserted {
            write!(f, "{table}: {count} inserted")?;
            if let Some(updated) = self.updated.get(table) {
                write!(f, ", {updated} updated")?;
            }
            writeln!(f)?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "{} row(s) skipped:", self.skipped.len())?;
            for error in &self.skipped {
                writeln!(f, "  {error}")?;
            }
        }
        Ok(())
    }
}

/// Where loaders find their input files.
pub trait FixtureSource {
    fn open(&self, file: &str) -> Result<Box<dyn Read + '_>, LoadError>;
}

/// Files under a directory on disk.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FixtureSource for FixtureDir {
    fn open(&self, file: &str) -> Result<Box<dyn Read + '_>, LoadError> {
        let path = self.root.join(file);
        match File::open(&path) {
            Ok(handle) => Ok(Box::new(handle)),
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

/// In-memory file contents by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryFixtures {
    files: HashMap<String, String>,
}

impl MemoryFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file: &str, contents: impl Into<String>) -> Self {
        self.files.insert(file.to_string(), contents.into());
        self
    }
}

impl FixtureSource for MemoryFixtures {
    fn open(&self, file: &str) -> Result<Box<dyn Read + '_>, LoadError> {
        match self.files.get(file) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.as_bytes()))),
            None => Err(LoadError::Io {
                path: PathBuf::from(file),
                source: io::Error::new(io::ErrorKind::NotFound, "no such fixture"),
            }),
        }
    }
}

/// Reads and header-checks every file, then replaces the contents of
/// `tables` with the rows of those files.
pub(crate) fn run(
    store: &Store,
    source: &dyn FixtureSource,
    specs: &[&FileSpec],
    tables: &[TableSpec],
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    let mut files: Vec<DelimitedFile> = Vec::with_capacity(specs.len());
    for spec in specs {
        let file = parser::read(spec.file, source.open(spec.file)?, spec.layout)?;
        file.require(spec.required)?;
        files.push(file);
    }

    let report = store.transaction(|tx| {
        for table in tables.iter().rev() {
            let removed = store::clear(tx, table.name)?;
            if removed > 0 {
                info!(table = table.name, removed, "cleared table");
            }
        }

        let mut ctx = LoadContext::new(tx, options);
        for (spec, file) in specs.iter().zip(&files) {
            (spec.load)(&mut ctx, file, spec)?;
            info!(file = spec.file, rows = file.len(), "loaded file");
        }
        ctx.finish()
    })?;

    info!(
        inserted = report.total_inserted(),
        skipped = report.skipped.len(),
        "load committed"
    );
    Ok(report)
}
