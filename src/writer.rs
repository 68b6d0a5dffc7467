//! CSV writing.
//!
//! This module provides the [`Writer`], which serializes one record per call.
//!
//! ## Overview
//!
//! - Fields are separated by the configured delimiter
//! - With quoting enabled, every field is wrapped in the quote mark and each
//!   quote mark inside it is doubled, so any content survives a round trip
//! - With quoting disabled, fields are written verbatim; keeping delimiters and
//!   line breaks out of the data is then up to the caller
//! - Every record ends with `\r\n`, on every platform
//!
//! ## Usage
//!
//! ```rust
//! use quillcsv::Writer;
//!
//! let mut writer = Writer::new(Vec::new());
//! writer.write_record(["id", "comment"]).unwrap();
//! writer.write_record(["1", "say \"hi\""]).unwrap();
//!
//! let output = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(output, "\"id\",\"comment\"\r\n\"1\",\"say \"\"hi\"\"\"\r\n");
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use std::io::Write;

const TERMINATOR: &[u8] = b"\r\n";

/// A CSV writer over any [`Write`] sink.
///
/// Each record is assembled in an internal buffer and handed to the sink with
/// a single `write_all`. Wrap unbuffered sinks such as files in a
/// [`BufWriter`](std::io::BufWriter).
pub struct Writer<W: Write> {
    sink: W,
    config: Config,
    line: Vec<u8>,
    record_count: u64,
}

impl<W: Write> Writer<W> {
    /// Creates a writer with the default [`Config`].
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, Config::DEFAULT)
    }

    /// Creates a writer that uses a snapshot of `config`.
    pub fn with_config(sink: W, config: Config) -> Self {
        Writer {
            sink,
            config,
            line: Vec::with_capacity(256),
            record_count: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.record_count
    }

    /// Writes one record followed by `\r\n`.
    ///
    /// An empty record produces an empty line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamFailure`] if the sink fails.
    pub fn write_record<I, T>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.line.clear();
        for (i, field) in record.into_iter().enumerate() {
            if i > 0 {
                self.line.push(self.config.delimiter_byte());
            }
            self.encode_field(field.as_ref());
        }
        self.line.extend_from_slice(TERMINATOR);

        self.sink
            .write_all(&self.line)
            .map_err(|e| Error::stream(self.record_count, e))?;
        self.record_count += 1;
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink
            .flush()
            .map_err(|e| Error::stream(self.record_count, e))
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Returns the sink. Does not flush.
    pub fn into_inner(self) -> W {
        self.sink
    }

    #[inline]
    fn encode_field(&mut self, field: &str) {
        let Some(quote) = self.config.quote_byte() else {
            self.line.extend_from_slice(field.as_bytes());
            return;
        };

        self.line.push(quote);
        for &byte in field.as_bytes() {
            if byte == quote {
                self.line.push(quote);
            }
            self.line.push(byte);
        }
        self.line.push(quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn render(config: Config, records: &[Vec<&str>]) -> String {
        let mut writer = Writer::with_config(Vec::new(), config);
        for record in records {
            writer.write_record(record).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_quote_doubling() {
        let output = render(Config::new(), &[vec!["hello\"world"]]);
        assert_eq!(output, "\"hello\"\"world\"\r\n");
    }

    #[test]
    fn test_empty_record_is_empty_line() {
        let output = render(Config::new(), &[vec![]]);
        assert_eq!(output, "\r\n");
    }

    #[test]
    fn test_custom_quote_mark() {
        let config = Config::new().with_quote_mark('\'').unwrap();
        let output = render(config, &[vec!["it's", "\""]]);
        assert_eq!(output, "'it''s','\"'\r\n");
    }

    #[test]
    fn test_records_written_counter() {
        let mut writer = Writer::new(Vec::new());
        writer.write_record(["a"]).unwrap();
        writer.write_record(vec!["b".to_string()]).unwrap();
        assert_eq!(writer.records_written(), 2);
        assert_eq!(writer.get_ref().as_slice(), b"\"a\"\r\n\"b\"\r\n");
    }

    struct FullSink;

    impl Write for FullSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure() {
        let mut writer = Writer::new(FullSink);
        match writer.write_record(["a"]) {
            Err(Error::StreamFailure { record, source }) => {
                assert_eq!(record, 0);
                assert_eq!(source.kind(), io::ErrorKind::WriteZero);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(writer.records_written(), 0);
    }
}
