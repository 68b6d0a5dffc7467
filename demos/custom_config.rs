//! Custom marks, and loading a Config from JSON.
//!
//! Run with: cargo run --example custom_config

use quillcsv::{save_with_config, Config, Reader};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Tab separated, single-quote quoting, ';' comments.
    let config = Config::from_marks('\t', true, '\'', true, ';')?;

    let table = vec![
        vec!["name".to_string(), "remark".to_string()],
        vec!["O'Brien".to_string(), "tab\tinside".to_string()],
    ];

    let mut buffer = Vec::new();
    save_with_config(&mut buffer, config, &table)?;
    println!("{}", String::from_utf8_lossy(&buffer));

    let json = r#"{ "delimiter": "\t", "quote_mark": "'", "comment_enabled": true, "comment_mark": ";" }"#;
    let from_json: Config = serde_json::from_str(json)?;
    assert_eq!(from_json, config);

    for record in Reader::with_config(buffer.as_slice(), from_json) {
        println!("{:?}", record?);
    }

    // A colliding mark is refused.
    if let Err(e) = config.with_delimiter('\'') {
        println!("rejected: {}", e);
    }

    Ok(())
}
