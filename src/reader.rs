//! CSV reading.
//!
//! This module provides the [`Reader`], a pull-based tokenizer that turns a
//! byte stream into records one at a time.
//!
//! ## Overview
//!
//! The reader is a four-state machine driven by one byte of lookahead:
//!
//! - **Normal**: outside quotes; the delimiter closes a field, a quote mark
//!   opens a quoted section, `\r` is held back until the next byte decides
//!   what it means
//! - **Quoted**: every byte is data, including delimiters and line breaks
//! - **QuoteSeen**: a quote mark was read inside quotes; a second quote mark is
//!   an escaped quote, anything else ends the quoted section
//! - **AfterCr**: a `\r` was read outside quotes; only a following `\n` turns it
//!   into a record terminator, otherwise it is kept as data
//!
//! Only `\r\n` terminates a record. A bare `\n` outside quotes is ordinary
//! field data.
//!
//! ## Usage
//!
//! ```rust
//! use quillcsv::Reader;
//!
//! let mut reader = Reader::new("name,note\r\nalice,\"says \"\"hi\"\"\"\r\n".as_bytes());
//!
//! let header = reader.read_record().unwrap().unwrap();
//! assert_eq!(header, vec!["name", "note"]);
//!
//! let row = reader.read_record().unwrap().unwrap();
//! assert_eq!(row, vec!["alice", "says \"hi\""]);
//!
//! assert!(!reader.has_next().unwrap());
//! ```
//!
//! The reader is also an iterator over `Result<Record>`:
//!
//! ```rust
//! use quillcsv::{Config, Reader};
//!
//! let config = Config::new().with_comment_enabled(true);
//! let input = "# header comment\r\na,b\r\nc,d\r\n";
//! let records: Vec<_> = Reader::with_config(input.as_bytes(), config)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::Record;
use log::{debug, trace};
use std::io::{self, BufReader, Bytes, Read};
use std::mem;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Normal,
    Quoted,
    QuoteSeen,
    AfterCr,
}

/// The next unconsumed byte of the source.
enum Lookahead {
    Byte(u8),
    End,
    Failed(io::Error),
}

/// A streaming CSV reader.
///
/// Created via [`Reader::new`] or [`Reader::with_config`]. The source is
/// buffered internally and one byte is read ahead on construction.
///
/// A `Reader` owns its parse state and must not be shared between threads
/// without external synchronization.
pub struct Reader<R> {
    bytes: Bytes<BufReader<R>>,
    config: Config,
    lookahead: Lookahead,
    record_count: u64,
    exhausted: bool,
}

impl<R: Read> Reader<R> {
    /// Creates a reader with the default [`Config`].
    pub fn new(source: R) -> Self {
        Self::with_config(source, Config::DEFAULT)
    }

    /// Creates a reader that uses a snapshot of `config`.
    pub fn with_config(source: R, config: Config) -> Self {
        let mut reader = Reader {
            bytes: BufReader::new(source).bytes(),
            config,
            lookahead: Lookahead::End,
            record_count: 0,
            exhausted: false,
        };
        reader.advance();
        reader
    }

    /// Returns the configuration this reader was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of records returned so far.
    ///
    /// This is also the zero-based index of the record currently being parsed,
    /// as reported in errors.
    pub fn records_read(&self) -> u64 {
        self.record_count
    }

    /// Returns `true` unless the source has reached end of input.
    ///
    /// A `true` result does not guarantee another record: the remaining input
    /// may consist only of comment lines, in which case
    /// [`read_record`](Reader::read_record) returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamFailure`] if the source reported an I/O error.
    /// The reader is exhausted afterwards.
    pub fn has_next(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_some())
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` when no record is left. An empty line yields
    /// `Ok(Some(vec![]))`, which is distinct from no record.
    ///
    /// # Errors
    ///
    /// - [`Error::UnmatchedQuote`] if input ends inside a quoted field
    /// - [`Error::FieldSizeExceeded`] / [`Error::RecordSizeExceeded`] when a
    ///   configured limit would be crossed
    /// - [`Error::InvalidUtf8`] if a field is not valid UTF-8
    /// - [`Error::StreamFailure`] if the source fails
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if !self.skip_comment_lines()? {
            return Ok(None);
        }

        let delimiter = self.config.delimiter_byte();
        let quote = self.config.quote_byte();
        let mut builder = RecordBuilder::new(&self.config, self.record_count);
        let mut state = State::Normal;

        while let Some(byte) = self.peek()? {
            state = match (state, byte) {
                (State::Normal, b) if b == delimiter => {
                    builder.end_field()?;
                    State::Normal
                }
                (State::Normal, CR) => State::AfterCr,
                (State::Normal, b) if Some(b) == quote => {
                    builder.open_quote();
                    State::Quoted
                }
                (State::Normal, b) => {
                    builder.push(b)?;
                    State::Normal
                }

                (State::AfterCr, b) if b == delimiter => {
                    builder.push(CR)?;
                    builder.end_field()?;
                    State::Normal
                }
                (State::AfterCr, CR) => {
                    builder.push(CR)?;
                    State::AfterCr
                }
                (State::AfterCr, LF) => {
                    self.advance();
                    return self.complete(builder).map(Some);
                }
                (State::AfterCr, b) if Some(b) == quote => {
                    builder.push(CR)?;
                    builder.open_quote();
                    State::Quoted
                }
                (State::AfterCr, b) => {
                    builder.push(CR)?;
                    builder.push(b)?;
                    State::Normal
                }

                (State::Quoted, b) if Some(b) == quote => State::QuoteSeen,
                (State::Quoted, b) => {
                    builder.push(b)?;
                    State::Quoted
                }

                (State::QuoteSeen, b) if Some(b) == quote => {
                    builder.push(b)?;
                    State::Quoted
                }
                (State::QuoteSeen, b) if b == delimiter => {
                    builder.end_field()?;
                    State::Normal
                }
                (State::QuoteSeen, CR) => State::AfterCr,
                // Trailing data after a closing quote is kept, not rejected.
                (State::QuoteSeen, b) => {
                    builder.push(b)?;
                    State::Normal
                }
            };
            self.advance();
        }

        match state {
            State::Quoted => {
                return Err(Error::UnmatchedQuote {
                    record: self.record_count,
                })
            }
            State::AfterCr => builder.push(CR)?,
            State::Normal | State::QuoteSeen => {}
        }
        self.complete(builder).map(Some)
    }

    fn complete(&mut self, builder: RecordBuilder) -> Result<Record> {
        let record = builder.finish()?;
        self.record_count += 1;
        if matches!(self.lookahead, Lookahead::End) {
            debug!("reached end of input after {} records", self.record_count);
        }
        Ok(record)
    }

    /// Skips comment lines at the start of a record.
    ///
    /// Returns `false` if end of input was reached.
    fn skip_comment_lines(&mut self) -> Result<bool> {
        let Some(comment) = self.config.comment_byte() else {
            return self.has_next();
        };

        loop {
            match self.peek()? {
                None => return Ok(false),
                Some(b) if b == comment => self.skip_line()?,
                Some(_) => return Ok(true),
            }
        }
    }

    fn skip_line(&mut self) -> Result<()> {
        let mut skipped = 0usize;
        while let Some(byte) = self.peek()? {
            self.advance();
            skipped += 1;
            if byte == LF {
                break;
            }
        }
        trace!(
            "skipped comment line of {} bytes before record {}",
            skipped,
            self.record_count
        );
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        match mem::replace(&mut self.lookahead, Lookahead::End) {
            Lookahead::Byte(b) => {
                self.lookahead = Lookahead::Byte(b);
                Ok(Some(b))
            }
            Lookahead::End => Ok(None),
            Lookahead::Failed(source) => Err(Error::stream(self.record_count, source)),
        }
    }

    fn advance(&mut self) {
        self.lookahead = match self.bytes.next() {
            Some(Ok(b)) => Lookahead::Byte(b),
            Some(Err(e)) => Lookahead::Failed(e),
            None => Lookahead::End,
        };
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Record>;

    /// Yields records until end of input; stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

/// Accumulates the fields of one record and enforces the size limits.
struct RecordBuilder {
    fields: Record,
    field: Vec<u8>,
    quoted: bool,
    max_field_size: usize,
    max_record_size: usize,
    index: u64,
}

impl RecordBuilder {
    fn new(config: &Config, index: u64) -> Self {
        RecordBuilder {
            fields: Record::new(),
            field: Vec::new(),
            quoted: false,
            max_field_size: config.max_field_size(),
            max_record_size: config.max_record_size(),
            index,
        }
    }

    fn open_quote(&mut self) {
        self.quoted = true;
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        if self.max_field_size > 0 && self.field.len() >= self.max_field_size {
            return Err(Error::FieldSizeExceeded {
                limit: self.max_field_size,
                record: self.index,
            });
        }
        self.field.push(byte);
        Ok(())
    }

    fn end_field(&mut self) -> Result<()> {
        if self.max_record_size > 0 && self.fields.len() >= self.max_record_size {
            return Err(Error::RecordSizeExceeded {
                limit: self.max_record_size,
                record: self.index,
            });
        }
        let bytes = mem::take(&mut self.field);
        self.quoted = false;
        let field = String::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 {
            record: self.index,
            field: self.fields.len(),
            source,
        })?;
        self.fields.push(field);
        Ok(())
    }

    // An untouched trailing field only counts when something precedes it
    // or it was opened with a quote.
    fn finish(mut self) -> Result<Record> {
        if !self.field.is_empty() || !self.fields.is_empty() || self.quoted {
            self.end_field()?;
        }
        Ok(self.fields)
    }
}
