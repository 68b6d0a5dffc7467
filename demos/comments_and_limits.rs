//! Skipping comment lines and bounding memory on untrusted input.
//!
//! Run with: cargo run --example comments_and_limits

use quillcsv::{load_with_config, Config, Error, Reader};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let input = "# exported 2024-01-01\r\nid,value\r\n1,10\r\n# trailing note\r\n2,20\r\n";
    let config = Config::new().with_comment_enabled(true);

    let mut reader = Reader::with_config(input.as_bytes(), config);
    while let Some(record) = reader.read_record()? {
        println!("{:?}", record);
    }

    // Each limit turns oversized input into a typed error.
    let limited = config
        .with_max_field_size(4)
        .with_max_record_size(2)
        .with_max_records(2);

    for sample in ["12345\r\n", "a,b,c\r\n", "a\r\nb\r\nc\r\n"] {
        match load_with_config(sample.as_bytes(), limited) {
            Ok(table) => println!("{:?} -> {:?}", sample, table),
            Err(e) if e.is_limit_exceeded() => println!("{:?} -> rejected: {}", sample, e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
