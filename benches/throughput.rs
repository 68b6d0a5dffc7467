use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quillcsv::{from_str, from_str_with_config, to_string, Config, Reader, Table};

fn make_table(rows: usize) -> Table {
    (0..rows)
        .map(|i| {
            vec![
                i.to_string(),
                format!("user{}@example.com", i),
                "plain text field".to_string(),
                format!("quoted, \"tricky\"\r\nfield {}", i),
            ]
        })
        .collect()
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for rows in [10, 100, 1000].iter() {
        let table = make_table(*rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| to_string(black_box(table)))
        });
    }

    group.finish();
}

fn benchmark_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    for rows in [10, 100, 1000].iter() {
        let text = to_string(&make_table(*rows)).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_read_unquoted(c: &mut Criterion) {
    let config = Config::new().with_quote_enabled(false);
    let text: String = (0..1000)
        .map(|i| format!("{},{},{},{}\r\n", i, i * 2, i * 3, i * 4))
        .collect();

    c.bench_function("read_unquoted_1000", |b| {
        b.iter(|| from_str_with_config(black_box(&text), config))
    });
}

fn benchmark_read_streaming(c: &mut Criterion) {
    let text = to_string(&make_table(1000)).unwrap();

    c.bench_function("read_streaming_1000", |b| {
        b.iter(|| {
            let mut fields = 0usize;
            let mut reader = Reader::new(black_box(text.as_bytes()));
            while let Ok(Some(record)) = reader.read_record() {
                fields += record.len();
            }
            fields
        })
    });
}

criterion_group!(
    benches,
    benchmark_write,
    benchmark_read,
    benchmark_read_unquoted,
    benchmark_read_streaming
);
criterion_main!(benches);
