use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uhv::utils::standard_messages;
use uhv::{HashHistory, DEFAULT_SECRET};

fn filled_history() -> HashHistory {
    let mut history = HashHistory::new();
    for _ in 0..16 {
        for message in standard_messages() {
            history.record(&message, DEFAULT_SECRET);
        }
    }
    history
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    group.bench_function("record_standard_set", |b| {
        let messages = standard_messages();
        b.iter(|| {
            let mut history = HashHistory::new();
            for message in &messages {
                history.record(message, DEFAULT_SECRET);
            }
            black_box(history.len())
        });
    });

    let history = filled_history();
    group.bench_function("validate_integrity_96", |b| {
        b.iter(|| black_box(history.validate_integrity()))
    });

    let exported_at = Utc::now();
    group.bench_function("export_json_96", |b| {
        b.iter(|| black_box(history.export_json(exported_at, None).expect("export")))
    });

    group.finish();
}

criterion_group!(benches, bench_history);
criterion_main!(benches);
