//! Writing a table and reading it back.
//!
//! Run with: cargo run --example simple

use quillcsv::{from_str, to_string, Table};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let table: Table = vec![
        vec!["city".into(), "motto".into()],
        vec!["Lisbon".into(), "Mui nobre, sempre leal".into()],
        vec!["Quoteville".into(), "say \"cheese\"".into()],
    ];

    let text = to_string(&table)?;
    println!("Written CSV:\n{}", text.replace("\r\n", "\\r\\n\n"));

    let back = from_str(&text)?;
    println!("Read back {} records", back.len());
    for record in &back {
        println!("  {:?}", record);
    }
    assert_eq!(table, back);

    Ok(())
}
