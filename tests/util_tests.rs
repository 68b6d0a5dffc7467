use quillcsv::{
    load, load_path, load_path_with_config, save, save_path, save_path_with_config, AccessMode,
    Config, Error, Table,
};
use std::fs;
use tempfile::tempdir;

fn sample() -> Table {
    vec![
        vec!["id".into(), "name".into(), "note".into()],
        vec!["1".into(), "Ada".into(), "line one\r\nline two".into()],
        vec!["2".into(), "Grace".into(), "said \"hi\", left".into()],
        vec![],
    ]
}

#[test]
fn test_load_and_save_stream() {
    let mut buffer = Vec::new();
    save(&mut buffer, &sample()).unwrap();
    let table = load(buffer.as_slice()).unwrap();
    assert_eq!(table, sample());
}

#[test]
fn test_load_empty_stream() {
    let table = load("".as_bytes()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_save_and_load_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");

    save_path(&path, &sample()).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.ends_with(b"\r\n\r\n"));

    assert_eq!(load_path(&path).unwrap(), sample());
}

#[test]
fn test_path_roundtrip_with_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pipes.csv");
    let config = Config::from_marks('|', true, '\'', true, '%').unwrap();

    save_path_with_config(&path, config, &sample()).unwrap();
    assert_eq!(load_path_with_config(&path, config).unwrap(), sample());
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    match load_path(&path) {
        Err(Error::FileAccess {
            path: reported,
            mode,
            source,
        }) => {
            assert_eq!(reported, path);
            assert_eq!(mode, AccessMode::Read);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.csv");
    let table: Table = vec![vec!["a".into()]];

    assert!(matches!(
        save_path(&path, &table),
        Err(Error::FileAccess {
            mode: AccessMode::Write,
            ..
        })
    ));
}

#[test]
fn test_load_path_propagates_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "a,b\r\n\"open").unwrap();

    assert!(matches!(
        load_path(&path),
        Err(Error::UnmatchedQuote { record: 1 })
    ));
    // The handle is closed again, so the file can be replaced.
    fs::write(&path, "a\r\n").unwrap();
    assert_eq!(load_path(&path).unwrap(), vec![vec!["a"]]);
}

#[test]
fn test_load_path_enforces_max_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("many.csv");
    fs::write(&path, "1\r\n2\r\n3\r\n").unwrap();

    let config = Config::new().with_max_records(2);
    assert!(matches!(
        load_path_with_config(&path, config),
        Err(Error::RecordCountExceeded { limit: 2, record: 2 })
    ));
}
