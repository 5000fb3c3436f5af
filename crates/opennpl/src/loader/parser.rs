use super::normalizer::normalize_header;
use super::LoadError;
use crate::schema::is_missing;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

/// A pipe-delimited file held in memory, with columns addressed by header.
#[derive(Debug)]
pub(crate) struct DelimitedFile {
    pub(crate) name: String,
    columns: HashMap<String, usize>,
    width: usize,
    lines: Vec<Line>,
}

#[derive(Debug)]
struct Line {
    number: u64,
    values: Vec<String>,
}

impl DelimitedFile {
    pub(crate) fn has_column(&self, header: &str) -> bool {
        self.columns.contains_key(header)
    }

    /// Fails on the first required header the file lacks.
    pub(crate) fn require(&self, headers: &[&'static str]) -> Result<(), LoadError> {
        match headers.iter().copied().find(|header| !self.has_column(header)) {
            Some(column) => Err(LoadError::MissingColumn {
                file: self.name.clone(),
                column,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.lines.iter().map(move |line| Row { file: self, line })
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Row<'a> {
    file: &'a DelimitedFile,
    line: &'a Line,
}

impl<'a> Row<'a> {
    pub(crate) fn file_name(&self) -> &'a str {
        &self.file.name
    }

    pub(crate) fn line(&self) -> u64 {
        self.line.number
    }

    /// Raw token under `header`; `None` when the file has no such column.
    pub(crate) fn get(&self, header: &str) -> Option<&'a str> {
        let index = *self.file.columns.get(header)?;
        Some(self.line.values.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Like [`Row::get`] but also `None` for blank, `None` and `NaN` tokens.
    pub(crate) fn token(&self, header: &str) -> Option<&'a str> {
        self.get(header).filter(|token| !is_missing(token))
    }

    /// Describes a row whose field count differs from the header.
    pub(crate) fn width_error(&self) -> Option<String> {
        let found = self.line.values.len();
        (found != self.file.width)
            .then(|| format!("expected {} columns, found {found}", self.file.width))
    }
}

/// Column names in file order, for sources that ship without a header row.
pub(crate) type Layout = &'static [&'static str];

/// Reads a whole file. When `layout` is given and the first row names none of
/// its columns, that row is data and the layout supplies the headers.
pub(crate) fn read<R: Read>(
    name: &str,
    mut reader: R,
    layout: Option<Layout>,
) -> Result<DelimitedFile, LoadError> {
    let mut contents = Vec::new();
    reader
        .read_to_end(&mut contents)
        .map_err(|source| LoadError::Io {
            path: PathBuf::from(name),
            source,
        })?;
    let csv_error = |source| LoadError::Csv {
        file: name.to_string(),
        source,
    };

    // Blank lines produce no record, so records are matched to the physical
    // lines that have content.
    let mut numbers = physical_lines(&contents);
    let mut records = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .trim(csv::Trim::All)
        .flexible(true)
        .has_headers(false)
        .quoting(false)
        .from_reader(contents.as_slice())
        .into_records()
        .filter_map(|record| {
            let number = numbers.next().unwrap_or_default();
            match record {
                Ok(record) if record.iter().all(str::is_empty) => None,
                Ok(record) => Some(Ok((number, record))),
                Err(source) => Some(Err(source)),
            }
        });

    let mut lines = Vec::new();
    let headers: Vec<String> = match records.next().transpose().map_err(csv_error)? {
        None => layout.map(owned).unwrap_or_default(),
        Some((number, first)) => match layout {
            Some(layout) if !names_any(&first, layout) => {
                lines.push(Line::new(number, &first));
                owned(layout)
            }
            _ => first.iter().map(normalize_header).collect(),
        },
    };
    for record in records {
        let (number, record) = record.map_err(csv_error)?;
        lines.push(Line::new(number, &record));
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(index, header)| (header.clone(), index))
        .collect::<HashMap<_, _>>();

    Ok(DelimitedFile {
        name: name.to_string(),
        columns,
        width: headers.len(),
        lines,
    })
}

impl Line {
    fn new(number: u64, record: &csv::StringRecord) -> Self {
        Self {
            number,
            values: record.iter().map(str::to_string).collect(),
        }
    }
}

fn owned(layout: Layout) -> Vec<String> {
    layout.iter().map(|column| column.to_string()).collect()
}

fn names_any(record: &csv::StringRecord, layout: Layout) -> bool {
    record
        .iter()
        .map(normalize_header)
        .any(|header| layout.contains(&header.as_str()))
}

/// One-based numbers of the lines that hold at least one byte besides the
/// line terminator.
fn physical_lines(contents: &[u8]) -> impl Iterator<Item = u64> + '_ {
    contents
        .split(|byte| *byte == b'\n')
        .zip(1u64..)
        .filter(|(line, _)| !matches!(line, [] | [b'\r']))
        .map(|(_, number)| number)
}
