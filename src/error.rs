//! Error types for CSV reading and writing.
//!
//! Every failure the crate can report is a variant of [`Error`], so callers can
//! match on the kind of failure instead of inspecting message text.
//!
//! ## Error Categories
//!
//! - **Configuration**: an invalid combination of mark characters
//! - **Grammar**: a quoted field left open at end of input
//! - **Limits**: a field, record or table grew beyond its configured bound
//! - **Encoding**: a field that is not valid UTF-8
//! - **I/O**: the underlying stream or file failed
//!
//! Limit and grammar errors carry the zero-based index of the record that was
//! being parsed when the failure happened.
//!
//! ## Examples
//!
//! ```rust
//! use quillcsv::{from_str_with_config, Config, Error};
//!
//! let config = Config::new().with_max_field_size(3);
//! let result = from_str_with_config("abcdef\r\n", config);
//!
//! match result {
//!     Err(Error::FieldSizeExceeded { limit, record }) => {
//!         assert_eq!(limit, 3);
//!         assert_eq!(record, 0);
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// One of the three configurable mark characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Delimiter,
    Quote,
    Comment,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mark::Delimiter => "delimiter",
            Mark::Quote => "quote",
            Mark::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// Direction a file was opened in when [`Error::FileAccess`] is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => f.write_str("reading"),
            AccessMode::Write => f.write_str("writing"),
        }
    }
}

/// Represents all possible errors that can occur while reading or writing CSV.
#[derive(Debug, Error)]
pub enum Error {
    /// A mark character collides with another mark or with CR/LF
    #[error("Invalid {mark} mark {value:?}: {reason}")]
    InvalidConfiguration {
        mark: Mark,
        value: char,
        reason: String,
    },

    /// End of input was reached inside a quoted field
    #[error("Unmatched quote in record {record}")]
    UnmatchedQuote { record: u64 },

    /// A field grew beyond `max_field_size` bytes
    #[error("Field size exceeds limit ({limit}) at record {record}")]
    FieldSizeExceeded { limit: usize, record: u64 },

    /// A record grew beyond `max_record_size` fields
    #[error("Record size exceeds limit ({limit}) at record {record}")]
    RecordSizeExceeded { limit: usize, record: u64 },

    /// A table grew beyond `max_records` records
    #[error("Record count exceeds limit ({limit}) at record {record}")]
    RecordCountExceeded { limit: u64, record: u64 },

    /// A completed field is not valid UTF-8
    #[error("Invalid UTF-8 in field {field} of record {record}")]
    InvalidUtf8 {
        record: u64,
        field: usize,
        #[source]
        source: FromUtf8Error,
    },

    /// The underlying source or sink reported an error
    #[error("Stream failure at record {record}: {source}")]
    StreamFailure {
        record: u64,
        #[source]
        source: io::Error,
    },

    /// A file could not be opened
    #[error("Failed to open file for {mode}: {}", .path.display())]
    FileAccess {
        path: PathBuf,
        mode: AccessMode,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Creates a configuration error for the given mark.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quillcsv::{Error, Mark};
    ///
    /// let err = Error::invalid_configuration(Mark::Quote, '\n', "must not be a line terminator");
    /// assert!(err.to_string().contains("quote"));
    /// ```
    pub fn invalid_configuration(mark: Mark, value: char, reason: &str) -> Self {
        Error::InvalidConfiguration {
            mark,
            value,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn stream(record: u64, source: io::Error) -> Self {
        Error::StreamFailure { record, source }
    }

    /// Returns `true` for the three limit violations.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            Error::FieldSizeExceeded { .. }
                | Error::RecordSizeExceeded { .. }
                | Error::RecordCountExceeded { .. }
        )
    }

    /// Index of the record the error refers to, when there is one.
    pub fn record(&self) -> Option<u64> {
        match self {
            Error::UnmatchedQuote { record }
            | Error::FieldSizeExceeded { record, .. }
            | Error::RecordSizeExceeded { record, .. }
            | Error::RecordCountExceeded { record, .. }
            | Error::InvalidUtf8 { record, .. }
            | Error::StreamFailure { record, .. } => Some(*record),
            Error::InvalidConfiguration { .. } | Error::FileAccess { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
