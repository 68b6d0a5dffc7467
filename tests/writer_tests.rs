use quillcsv::{Config, Reader, Writer};

fn write_all(config: Config, records: &[&[&str]]) -> String {
    let mut writer = Writer::with_config(Vec::new(), config);
    for record in records {
        writer.write_record(*record).unwrap();
    }
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_write_quote_enabled() {
    let output = write_all(
        Config::new(),
        &[
            &["aaa", "bbb", "ccc"],
            &["aaa", "bbb,bbb", "ccc\"", "\r\n"],
            &["\r", "aaa", "\r", "\r", "\rbbb", "\r\r"],
        ],
    );

    assert_eq!(
        output,
        concat!(
            "\"aaa\",\"bbb\",\"ccc\"\r\n",
            "\"aaa\",\"bbb,bbb\",\"ccc\"\"\",\"\r\n\"\r\n",
            "\"\r\",\"aaa\",\"\r\",\"\r\",\"\rbbb\",\"\r\r\"\r\n"
        )
    );
}

#[test]
fn test_write_quote_disabled() {
    let config = Config::new().with_quote_enabled(false);
    let output = write_all(config, &[&["aaa", "bbb", "ccc"], &["a\"b", "c"]]);
    assert_eq!(output, "aaa,bbb,ccc\r\na\"b,c\r\n");
}

#[test]
fn test_write_custom_delimiter() {
    let config = Config::new().with_delimiter(';').unwrap();
    let output = write_all(config, &[&["1", "2;3"]]);
    assert_eq!(output, "\"1\";\"2;3\"\r\n");
}

#[test]
fn test_hello_world_quote_escape() {
    let output = write_all(Config::new(), &[&["hello\"world"]]);
    assert_eq!(output, "\"hello\"\"world\"\r\n");

    let mut reader = Reader::new(output.as_bytes());
    assert_eq!(
        reader.read_record().unwrap(),
        Some(vec!["hello\"world".to_string()])
    );
}

#[test]
fn test_comment_mark_in_first_field_is_quoted() {
    let config = Config::new().with_comment_enabled(true);
    let output = write_all(config, &[&["#not a comment", "x"]]);

    let records: Vec<_> = Reader::with_config(output.as_bytes(), config)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records, vec![vec!["#not a comment", "x"]]);
}

#[test]
fn test_write_owned_strings() {
    let mut writer = Writer::new(Vec::new());
    let record: Vec<String> = vec!["x".into(), "y".into()];
    writer.write_record(&record).unwrap();
    writer.write_record(record).unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.get_ref().as_slice(), b"\"x\",\"y\"\r\n\"x\",\"y\"\r\n");
}
