//! # quillcsv
//!
//! Streaming, configurable CSV reading and writing over any byte stream.
//!
//! ## Key Features
//!
//! - **Streaming**: records are pulled from an [`std::io::Read`] one at a time
//!   and pushed to an [`std::io::Write`] one at a time
//! - **RFC 4180 quoting**: quoted fields may hold delimiters, line breaks and
//!   doubled quote marks; quoting can be switched off
//! - **Comment lines**: optionally skip lines starting with a comment mark
//! - **Bounded memory**: optional limits on field size, record size and
//!   number of records
//! - **Typed errors**: every failure is a distinct [`Error`] variant
//!
//! ## Quick Start
//!
//! ```rust
//! use quillcsv::{from_str, to_string};
//!
//! let table = vec![
//!     vec!["name".to_string(), "quote".to_string()],
//!     vec!["Ada".to_string(), "a \"first\",\r\nof many".to_string()],
//! ];
//!
//! let text = to_string(&table).unwrap();
//! let table_back = from_str(&text).unwrap();
//! assert_eq!(table, table_back);
//! ```
//!
//! ### Reading record by record
//!
//! ```rust
//! use quillcsv::{Config, Reader};
//!
//! let config = Config::new()
//!     .with_delimiter(';')
//!     .unwrap()
//!     .with_comment_enabled(true);
//!
//! let input = "# exported data\r\n1;2;3\r\n4;5;6\r\n";
//! let mut reader = Reader::with_config(input.as_bytes(), config);
//!
//! let mut sum = 0;
//! while let Some(record) = reader.read_record().unwrap() {
//!     sum += record.iter().map(|f| f.parse::<i32>().unwrap()).sum::<i32>();
//! }
//! assert_eq!(sum, 21);
//! ```
//!
//! ## Grammar
//!
//! - Records end with `\r\n`. A `\r` that is not followed by `\n` is data, and
//!   so is a bare `\n` outside quotes
//! - The writer always terminates records with `\r\n`
//! - Inside quotes every byte is data; a doubled quote mark stands for one quote
//! - Data after a closing quote is appended to the field rather than rejected
//! - With comments enabled, a line whose first byte is the comment mark is
//!   skipped entirely
//!
//! ## Thread Safety
//!
//! [`Reader`] and [`Writer`] own mutable cursor state and are meant for one
//! thread at a time. [`Config`] is `Copy`; each reader and writer keeps its own
//! snapshot, so a config can be handed to any number of sessions.

pub mod config;
pub mod error;
pub mod reader;
pub mod util;
pub mod writer;

pub use config::Config;
pub use error::{AccessMode, Error, Mark, Result};
pub use reader::Reader;
pub use util::{
    from_str, from_str_with_config, load, load_path, load_path_with_config, load_with_config,
    save, save_path, save_path_with_config, save_with_config, to_string, to_string_with_config,
};
pub use writer::Writer;

/// One row: an ordered sequence of fields.
pub type Record = Vec<String>;

/// An ordered sequence of records.
pub type Table = Vec<Record>;

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_roundtrip_awkward_fields() {
        let original = table(&[
            &["plain", "with,comma", "with\"quote"],
            &["\r", "\n", "\r\n"],
            &["", "", ""],
            &[],
            &["\"\"", ",,", "\r\r\n\n"],
        ]);

        let text = to_string(&original).unwrap();
        assert_eq!(from_str(&text).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_single_empty_field() {
        let original = table(&[&[""]]);
        let text = to_string(&original).unwrap();
        assert_eq!(text, "\"\"\r\n");
        assert_eq!(from_str(&text).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_custom_marks() {
        let config = Config::from_marks('|', true, '\'', true, '%').unwrap();
        let original = table(&[&["%not a comment", "it's", "a|b"]]);

        let text = to_string_with_config(&original, config).unwrap();
        assert_eq!(text, "'%not a comment'|'it''s'|'a|b'\r\n");
        assert_eq!(from_str_with_config(&text, config).unwrap(), original);
    }
}
