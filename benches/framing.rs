//! Framing and Dispatch Benchmark for hftpd
//!
//! This benchmark measures the per-connection engine: line framing over
//! byte deliveries plus command dispatch, for the request shapes a client
//! actually sends.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hftpd::commands::CommandHandler;
use hftpd::connection::ConnectionEngine;
use hftpd::storage::FileStore;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

fn handler_with_fixture() -> (TempDir, CommandHandler) {
    let dir = TempDir::new().unwrap();
    let mut f = File::create(dir.path().join("payload.bin")).unwrap();
    f.write_all(&vec![0xABu8; 64 * 1024]).unwrap();
    for i in 0..32 {
        File::create(dir.path().join(format!("file-{i:02}.txt"))).unwrap();
    }
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    (dir, CommandHandler::new(store))
}

/// Benchmark whole-line requests delivered in one feed
fn bench_dispatch(c: &mut Criterion) {
    let (_dir, handler) = handler_with_fixture();

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_metadata", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        b.iter(|| {
            black_box(engine.feed(b"get_metadata payload.bin\r\n"));
        });
    });

    group.bench_function("get_file_listing", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        b.iter(|| {
            black_box(engine.feed(b"get_file_listing\r\n"));
        });
    });

    group.bench_function("get_slice_4k", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        b.iter(|| {
            black_box(engine.feed(b"get_slice payload.bin 0 4096\r\n"));
        });
    });

    group.bench_function("get_slice_64k", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        b.iter(|| {
            black_box(engine.feed(b"get_slice payload.bin 0 65536\r\n"));
        });
    });

    group.finish();
}

/// Benchmark framing with fragmented and pipelined deliveries
fn bench_framing(c: &mut Criterion) {
    let (_dir, handler) = handler_with_fixture();

    let mut group = c.benchmark_group("framing");

    group.throughput(Throughput::Elements(1));
    group.bench_function("split_delivery", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        b.iter(|| {
            black_box(engine.feed(b"get_metadata "));
            black_box(engine.feed(b"payload.bin"));
            black_box(engine.feed(b"\r\n"));
        });
    });

    group.throughput(Throughput::Elements(16));
    group.bench_function("pipelined_16", |b| {
        let mut engine = ConnectionEngine::new(handler.clone());
        let batch = b"get_metadata payload.bin\r\n".repeat(16);
        b.iter(|| {
            black_box(engine.feed(&batch));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_framing);
criterion_main!(benches);
