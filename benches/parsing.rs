//! Benchmarks for protocol line parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coirc::{Line, Source};

/// Simple PING message
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Message with prefix
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// Numeric response
const NUMERIC_RESPONSE: &str = ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";

/// Longer message with many middles
const MANY_PARAMS: &str = ":irc.server.net 353 nickname = #channel :alice bob carol dave erin frank";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Parsing");

    group.bench_function("simple_ping", |b| {
        b.iter(|| {
            let line = Line::parse(black_box(SIMPLE_MESSAGE)).unwrap();
            black_box(line)
        })
    });

    group.bench_function("with_prefix", |b| {
        b.iter(|| {
            let line = Line::parse(black_box(PREFIX_MESSAGE)).unwrap();
            black_box(line)
        })
    });

    group.bench_function("numeric_response", |b| {
        b.iter(|| {
            let line = Line::parse(black_box(NUMERIC_RESPONSE)).unwrap();
            black_box(line)
        })
    });

    group.bench_function("many_params", |b| {
        b.iter(|| {
            let line = Line::parse(black_box(MANY_PARAMS)).unwrap();
            black_box(line)
        })
    });

    group.finish();
}

fn benchmark_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("Source Decomposition");

    group.bench_function("user_prefix", |b| {
        b.iter(|| black_box(Source::parse(black_box("nick!user@host.example.com"))))
    });

    group.bench_function("server_prefix", |b| {
        b.iter(|| black_box(Source::parse(black_box("irc.server.net"))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_source);
criterion_main!(benches);
