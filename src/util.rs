//! Whole-table helpers.
//!
//! These functions compose [`Reader`] and [`Writer`] to load or save an entire
//! [`Table`] from a stream, a file path, or a string. They are also where
//! [`Config::max_records`] is enforced.
//!
//! Files are opened in binary mode and closed when the function returns, on
//! success and on error alike.

use crate::config::Config;
use crate::error::{AccessMode, Error, Result};
use crate::reader::Reader;
use crate::writer::Writer;
use crate::Table;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Reads every record from `source` using the default [`Config`].
///
/// # Errors
///
/// Returns any error raised by the [`Reader`].
pub fn load<R: Read>(source: R) -> Result<Table> {
    load_with_config(source, Config::DEFAULT)
}

/// Reads every record from `source`.
///
/// # Errors
///
/// Returns [`Error::RecordCountExceeded`] as soon as a record beyond
/// `config.max_records()` is read, plus any error raised by the [`Reader`].
///
/// # Examples
///
/// ```rust
/// use quillcsv::{load_with_config, Config, Error};
///
/// let config = Config::new().with_max_records(1);
/// let err = load_with_config("a\r\nb\r\n".as_bytes(), config).unwrap_err();
/// assert!(matches!(err, Error::RecordCountExceeded { limit: 1, record: 1 }));
/// ```
pub fn load_with_config<R: Read>(source: R, config: Config) -> Result<Table> {
    let limit = config.max_records();
    let mut reader = Reader::with_config(source, config);
    let mut table = Table::new();

    while reader.has_next()? {
        let Some(record) = reader.read_record()? else {
            break;
        };
        if limit > 0 && table.len() as u64 >= limit {
            return Err(Error::RecordCountExceeded {
                limit,
                record: table.len() as u64,
            });
        }
        table.push(record);
    }

    debug!("loaded {} records", table.len());
    Ok(table)
}

/// Opens `path` and reads every record using the default [`Config`].
///
/// # Errors
///
/// Returns [`Error::FileAccess`] if the file cannot be opened.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    load_path_with_config(path, Config::DEFAULT)
}

/// Opens `path` and reads every record.
///
/// # Errors
///
/// Returns [`Error::FileAccess`] if the file cannot be opened, plus everything
/// [`load_with_config`] can return.
pub fn load_path_with_config<P: AsRef<Path>>(path: P, config: Config) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        mode: AccessMode::Read,
        source,
    })?;
    debug!("opened {} for reading", path.display());
    load_with_config(file, config)
}

/// Writes every record of `table` to `sink` using the default [`Config`].
pub fn save<W, T>(sink: W, table: &[T]) -> Result<()>
where
    W: Write,
    T: AsRef<[String]>,
{
    save_with_config(sink, Config::DEFAULT, table)
}

/// Writes every record of `table` to `sink`, in order.
///
/// The sink is flushed before returning.
///
/// # Errors
///
/// Returns [`Error::StreamFailure`] if the sink fails.
pub fn save_with_config<W, T>(sink: W, config: Config, table: &[T]) -> Result<()>
where
    W: Write,
    T: AsRef<[String]>,
{
    let mut writer = Writer::with_config(sink, config);
    for record in table {
        writer.write_record(record.as_ref())?;
    }
    writer.flush()?;
    debug!("saved {} records", writer.records_written());
    Ok(())
}

/// Creates (or truncates) `path` and writes `table` using the default [`Config`].
///
/// # Errors
///
/// Returns [`Error::FileAccess`] if the file cannot be created.
pub fn save_path<P, T>(path: P, table: &[T]) -> Result<()>
where
    P: AsRef<Path>,
    T: AsRef<[String]>,
{
    save_path_with_config(path, Config::DEFAULT, table)
}

/// Creates (or truncates) `path` and writes `table`.
///
/// # Errors
///
/// Returns [`Error::FileAccess`] if the file cannot be created, and
/// [`Error::StreamFailure`] if writing or the final flush fails.
pub fn save_path_with_config<P, T>(path: P, config: Config, table: &[T]) -> Result<()>
where
    P: AsRef<Path>,
    T: AsRef<[String]>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        mode: AccessMode::Write,
        source,
    })?;
    debug!("opened {} for writing", path.display());
    save_with_config(BufWriter::new(file), config, table)
}

/// Parses a whole table from a string using the default [`Config`].
///
/// # Examples
///
/// ```rust
/// let table = quillcsv::from_str("a,b\r\nc,d\r\n").unwrap();
/// assert_eq!(table, vec![vec!["a", "b"], vec!["c", "d"]]);
/// ```
pub fn from_str(input: &str) -> Result<Table> {
    from_str_with_config(input, Config::DEFAULT)
}

/// Parses a whole table from a string.
pub fn from_str_with_config(input: &str, config: Config) -> Result<Table> {
    load_with_config(input.as_bytes(), config)
}

/// Serializes a table to a string using the default [`Config`].
///
/// # Examples
///
/// ```rust
/// let table = vec![vec!["a".to_string(), "b,c".to_string()]];
/// assert_eq!(quillcsv::to_string(&table).unwrap(), "\"a\",\"b,c\"\r\n");
/// ```
pub fn to_string<T: AsRef<[String]>>(table: &[T]) -> Result<String> {
    to_string_with_config(table, Config::DEFAULT)
}

/// Serializes a table to a string.
///
/// # Errors
///
/// Cannot fail on I/O; the `Result` mirrors the stream API.
pub fn to_string_with_config<T: AsRef<[String]>>(table: &[T], config: Config) -> Result<String> {
    let mut buffer = Vec::with_capacity(table.len() * 32);
    save_with_config(&mut buffer, config, table)?;
    // Fields are UTF-8 and marks are ASCII, so nothing is replaced here.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
