//! Configuration for CSV reading and writing.
//!
//! A [`Config`] holds the three mark characters (delimiter, quote, comment),
//! the switches that enable quoting and comment lines, and three optional
//! limits that bound memory use on untrusted input.
//!
//! The marks are validated on construction and on every setter: they must be
//! pairwise distinct, ASCII, and never `\r` or `\n`.
//!
//! ## Examples
//!
//! ```rust
//! use quillcsv::Config;
//!
//! // Semicolon separated, with comment lines enabled
//! let config = Config::new()
//!     .with_delimiter(';')
//!     .unwrap()
//!     .with_comment_enabled(true)
//!     .with_max_field_size(1024);
//!
//! assert_eq!(config.delimiter(), ';');
//! assert!(config.with_comment_mark(';').is_err());
//! ```
//!
//! A `Config` is `Copy`. Readers and writers take their own snapshot when they
//! are created, so changing a `Config` afterwards never affects a session that
//! is already running.

use crate::error::{Error, Mark, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_QUOTE_ENABLED: bool = true;
pub const DEFAULT_QUOTE_MARK: char = '"';
pub const DEFAULT_COMMENT_ENABLED: bool = false;
pub const DEFAULT_COMMENT_MARK: char = '#';

/// Settings shared by [`Reader`](crate::Reader) and [`Writer`](crate::Writer).
///
/// A limit of `0` means unlimited.
///
/// # Examples
///
/// ```rust
/// use quillcsv::Config;
///
/// let config = Config::new();
/// assert_eq!(config.delimiter(), ',');
/// assert!(config.quote_enabled());
/// assert!(!config.comment_enabled());
/// assert_eq!(config.max_records(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct Config {
    delimiter: char,
    quote_enabled: bool,
    quote_mark: char,
    comment_enabled: bool,
    comment_mark: char,
    max_field_size: usize,
    max_record_size: usize,
    max_records: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}

impl Config {
    /// Comma delimiter, `"` quoting enabled, `#` comments disabled, no limits.
    pub const DEFAULT: Config = Config {
        delimiter: DEFAULT_DELIMITER,
        quote_enabled: DEFAULT_QUOTE_ENABLED,
        quote_mark: DEFAULT_QUOTE_MARK,
        comment_enabled: DEFAULT_COMMENT_ENABLED,
        comment_mark: DEFAULT_COMMENT_MARK,
        max_field_size: 0,
        max_record_size: 0,
        max_records: 0,
    };

    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Config::DEFAULT
    }

    /// Creates a configuration with every mark given explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any mark is `\r`, `\n`,
    /// non-ASCII, or equal to another mark.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quillcsv::{Config, Error};
    ///
    /// let config = Config::from_marks('\t', true, '\'', true, ';').unwrap();
    /// assert_eq!(config.quote_mark(), '\'');
    ///
    /// let err = Config::from_marks('\'', true, '\'', false, '#').unwrap_err();
    /// assert!(matches!(err, Error::InvalidConfiguration { .. }));
    /// ```
    pub fn from_marks(
        delimiter: char,
        quote_enabled: bool,
        quote_mark: char,
        comment_enabled: bool,
        comment_mark: char,
    ) -> Result<Self> {
        let config = Config {
            delimiter,
            quote_enabled,
            quote_mark,
            comment_enabled,
            comment_mark,
            ..Config::DEFAULT
        };
        config.validate()?;
        Ok(config)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn quote_enabled(&self) -> bool {
        self.quote_enabled
    }

    pub fn quote_mark(&self) -> char {
        self.quote_mark
    }

    pub fn comment_enabled(&self) -> bool {
        self.comment_enabled
    }

    pub fn comment_mark(&self) -> char {
        self.comment_mark
    }

    /// Maximum number of bytes in one field.
    pub fn max_field_size(&self) -> usize {
        self.max_field_size
    }

    /// Maximum number of fields in one record.
    pub fn max_record_size(&self) -> usize {
        self.max_record_size
    }

    /// Maximum number of records loaded into one table.
    pub fn max_records(&self) -> u64 {
        self.max_records
    }

    /// Sets the delimiter, leaving `self` untouched on error.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.replace_mark(Mark::Delimiter, delimiter)
    }

    pub fn set_quote_enabled(&mut self, enabled: bool) {
        self.quote_enabled = enabled;
    }

    /// Sets the quote mark, leaving `self` untouched on error.
    pub fn set_quote_mark(&mut self, quote_mark: char) -> Result<()> {
        self.replace_mark(Mark::Quote, quote_mark)
    }

    pub fn set_comment_enabled(&mut self, enabled: bool) {
        self.comment_enabled = enabled;
    }

    /// Sets the comment mark, leaving `self` untouched on error.
    pub fn set_comment_mark(&mut self, comment_mark: char) -> Result<()> {
        self.replace_mark(Mark::Comment, comment_mark)
    }

    pub fn set_max_field_size(&mut self, limit: usize) {
        self.max_field_size = limit;
    }

    pub fn set_max_record_size(&mut self, limit: usize) {
        self.max_record_size = limit;
    }

    pub fn set_max_records(&mut self, limit: u64) {
        self.max_records = limit;
    }

    /// Builder form of [`Config::set_delimiter`].
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        self.set_delimiter(delimiter)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_quote_enabled(mut self, enabled: bool) -> Self {
        self.quote_enabled = enabled;
        self
    }

    /// Builder form of [`Config::set_quote_mark`].
    pub fn with_quote_mark(mut self, quote_mark: char) -> Result<Self> {
        self.set_quote_mark(quote_mark)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_comment_enabled(mut self, enabled: bool) -> Self {
        self.comment_enabled = enabled;
        self
    }

    /// Builder form of [`Config::set_comment_mark`].
    pub fn with_comment_mark(mut self, comment_mark: char) -> Result<Self> {
        self.set_comment_mark(comment_mark)?;
        Ok(self)
    }

    /// Sets the maximum field size in bytes (`0` = unlimited).
    #[must_use]
    pub fn with_max_field_size(mut self, limit: usize) -> Self {
        self.max_field_size = limit;
        self
    }

    /// Sets the maximum number of fields per record (`0` = unlimited).
    #[must_use]
    pub fn with_max_record_size(mut self, limit: usize) -> Self {
        self.max_record_size = limit;
        self
    }

    /// Sets the maximum number of records per table (`0` = unlimited).
    #[must_use]
    pub fn with_max_records(mut self, limit: u64) -> Self {
        self.max_records = limit;
        self
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub(crate) fn quote_byte(&self) -> Option<u8> {
        self.quote_enabled.then_some(self.quote_mark as u8)
    }

    pub(crate) fn comment_byte(&self) -> Option<u8> {
        self.comment_enabled.then_some(self.comment_mark as u8)
    }

    fn mark(&self, mark: Mark) -> char {
        match mark {
            Mark::Delimiter => self.delimiter,
            Mark::Quote => self.quote_mark,
            Mark::Comment => self.comment_mark,
        }
    }

    fn replace_mark(&mut self, mark: Mark, value: char) -> Result<()> {
        let mut candidate = *self;
        match mark {
            Mark::Delimiter => candidate.delimiter = value,
            Mark::Quote => candidate.quote_mark = value,
            Mark::Comment => candidate.comment_mark = value,
        }
        candidate.check_mark(mark)?;
        *self = candidate;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for mark in [Mark::Delimiter, Mark::Quote, Mark::Comment] {
            self.check_mark(mark)?;
        }
        Ok(())
    }

    // Distinctness holds even for disabled marks so that toggling a switch
    // never produces an ambiguous grammar.
    fn check_mark(&self, mark: Mark) -> Result<()> {
        let value = self.mark(mark);

        if value == '\r' || value == '\n' {
            return Err(Error::invalid_configuration(
                mark,
                value,
                "must not be a line terminator",
            ));
        }
        if !value.is_ascii() {
            return Err(Error::invalid_configuration(
                mark,
                value,
                "must be an ASCII character",
            ));
        }

        for other in [Mark::Delimiter, Mark::Quote, Mark::Comment] {
            if other != mark && self.mark(other) == value {
                return Err(Error::invalid_configuration(
                    mark,
                    value,
                    &format!("collides with the {} mark", other),
                ));
            }
        }
        Ok(())
    }
}

/// Deserialized form of [`Config`], validated before it becomes one.
#[derive(Deserialize)]
#[serde(default)]
struct ConfigFields {
    delimiter: char,
    quote_enabled: bool,
    quote_mark: char,
    comment_enabled: bool,
    comment_mark: char,
    max_field_size: usize,
    max_record_size: usize,
    max_records: u64,
}

impl Default for ConfigFields {
    fn default() -> Self {
        let config = Config::DEFAULT;
        ConfigFields {
            delimiter: config.delimiter,
            quote_enabled: config.quote_enabled,
            quote_mark: config.quote_mark,
            comment_enabled: config.comment_enabled,
            comment_mark: config.comment_mark,
            max_field_size: config.max_field_size,
            max_record_size: config.max_record_size,
            max_records: config.max_records,
        }
    }
}

impl TryFrom<ConfigFields> for Config {
    type Error = Error;

    fn try_from(fields: ConfigFields) -> Result<Self> {
        let config = Config::from_marks(
            fields.delimiter,
            fields.quote_enabled,
            fields.quote_mark,
            fields.comment_enabled,
            fields.comment_mark,
        )?;
        Ok(config
            .with_max_field_size(fields.max_field_size)
            .with_max_record_size(fields.max_record_size)
            .with_max_records(fields.max_records))
    }
}
