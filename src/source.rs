//! CSV input rows addressed by column name.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Position, ReaderBuilder, StringRecord};
use hashbrown::HashMap;
use tracing::debug;

use crate::errors::{Error, Result};

/// Column positions keyed by header name.
///
/// When a header name repeats, the rightmost column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index the given header record.
    #[must_use]
    pub fn new(headers: &StringRecord) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            positions.insert(name.to_owned(), idx);
        }
        Self { positions }
    }

    /// Position of `column`, if the header declares it.
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the header row was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One input record viewed through the header index.
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    headers: &'a HeaderIndex,
    record: &'a StringRecord,
}

impl<'a> SourceRow<'a> {
    /// Build a row view from its parts.
    #[must_use]
    pub fn new(headers: &'a HeaderIndex, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Raw value of `column`.
    ///
    /// A record shorter than the header reads its missing trailing fields as
    /// empty strings.
    ///
    /// # Errors
    ///
    /// * `MissingColumn` - If the header does not declare `column`.
    pub fn get(&self, column: &'static str) -> Result<&'a str> {
        let idx = self
            .headers
            .position(column)
            .ok_or_else(|| Error::MissingColumn {
                column,
                line: self.line(),
            })?;
        Ok(self.record.get(idx).unwrap_or(""))
    }

    /// Line of the record in the input, or 0 when unknown.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.record.position().map_or(0, Position::line)
    }
}

/// A header-indexed CSV reader.
///
/// Rows are read into a single reused buffer, so each [`SourceRow`] borrows
/// the source until the next call to [`CsvSource::next_row`].
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    headers: HeaderIndex,
    record: StringRecord,
    rows_read: usize,
}

impl CsvSource<File> {
    /// Open the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// * `OpenInput` - If the file cannot be opened.
    /// * `Csv` - If the header row cannot be decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| Error::OpenInput {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Opened {}", path.display());
        Self::with_reader(reader)
    }
}

impl<R: Read> CsvSource<R> {
    /// Read CSV text from any reader.
    ///
    /// # Errors
    ///
    /// * `Csv` - If the header row cannot be decoded.
    pub fn from_reader(rdr: R) -> Result<Self> {
        Self::with_reader(ReaderBuilder::new().flexible(true).from_reader(rdr))
    }

    fn with_reader(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = HeaderIndex::new(reader.headers()?);
        debug!("Input declares {} columns", headers.len());
        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }

    /// Read the next row, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// * `Csv` - If the record cannot be read or is not valid UTF-8.
    pub fn next_row(&mut self) -> Result<Option<SourceRow<'_>>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.rows_read += 1;
        Ok(Some(SourceRow::new(&self.headers, &self.record)))
    }

    /// Number of rows read so far.
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}
