//! Criterion benchmarks for gelf_exporter

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gelf_exporter::core::dump::dump;
use gelf_exporter::prelude::*;
use gelf_exporter::transports::udp::chunk_payload;
use serde_json::json;

// ============================================================================
// Normalization Benchmarks
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    let normalizer = Normalizer::new("bench-app").with_extra("environment", "bench");

    let text = LogRecord::new("plain text message", Severity::Info, "bench");
    group.bench_function("text_payload", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&text))));
    });

    let error = LogRecord::new(
        ErrorPayload::new("BenchError", "it went wrong").with_location("bench.rs", 42),
        Severity::Error,
        "bench",
    )
    .with_trace(vec![
        TraceFrame::new("caller.rs", 10),
        TraceFrame::new("main.rs", 3),
    ]);
    group.bench_function("error_payload", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&error))));
    });

    let map = match json!({"short": "S", "detail": {"a": 1}, "add": {"k": "v"}}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let structured = LogRecord::new(Payload::Map(map), Severity::Warning, "bench");
    group.bench_function("structured_payload", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&structured))));
    });

    group.finish();
}

// ============================================================================
// Serialization & Chunking Benchmarks
// ============================================================================

fn bench_wire_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_encoding");
    group.throughput(Throughput::Elements(1));

    let normalizer = Normalizer::new("bench-app");
    let event = normalizer.normalize(&LogRecord::new(
        "a reasonably sized log message for encoding",
        Severity::Info,
        "bench",
    ));

    group.bench_function("to_bytes", |b| {
        b.iter(|| black_box(event.to_bytes(black_box("bench-host")).unwrap()));
    });

    let payload = vec![0x55u8; 16 * 1024];
    group.bench_function("chunk_16k", |b| {
        b.iter(|| black_box(chunk_payload(black_box(&payload), 1420, [9; 8]).unwrap()));
    });

    group.finish();
}

fn bench_dump(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump");
    group.throughput(Throughput::Elements(1));

    let value = json!({"user": {"id": 42, "name": "alice"}, "items": [1, 2, 3], "ok": true});
    group.bench_function("nested_value", |b| {
        b.iter(|| black_box(dump(black_box(&value))));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_wire_encoding, bench_dump);
criterion_main!(benches);
