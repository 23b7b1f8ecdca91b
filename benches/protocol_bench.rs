//! Benchmarks for memtap protocol operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memtap::protocol::{encode_command, reply_complete, Command};

fn protocol_benchmarks(c: &mut Criterion) {
    c.bench_function("encode_set_64b", |b| {
        let command = Command::Set {
            key: "bench:key".to_string(),
            value: vec![0xAB; 64],
            exptime: 3600,
        };
        b.iter(|| encode_command(black_box(&command)));
    });

    c.bench_function("encode_get", |b| {
        let command = Command::Get {
            key: "bench:key".to_string(),
        };
        b.iter(|| encode_command(black_box(&command)));
    });

    c.bench_function("reply_complete_retrieval_1k", |b| {
        let mut reply = b"VALUE bench:key 0 1024\r\n".to_vec();
        reply.extend(std::iter::repeat(b'x').take(1024));
        reply.extend_from_slice(b"\r\nEND\r\n");
        b.iter(|| reply_complete(black_box(&reply)));
    });

    c.bench_function("reply_complete_stored", |b| {
        let reply = b"STORED\r\n";
        b.iter(|| reply_complete(black_box(reply)));
    });
}

criterion_group!(benches, protocol_benchmarks);
criterion_main!(benches);
