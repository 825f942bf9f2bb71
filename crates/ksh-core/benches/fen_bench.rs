use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ksh_core::board::Board;
use ksh_core::constants::START_POSITION;
use ksh_core::fen::{encode_fen, parse_fen};

fn fen_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");
    group.sample_size(100);

    group.bench_function("parse_piece_plane", |b| {
        b.iter(|| parse_fen(black_box(START_POSITION)))
    });

    let full = encode_fen(&Board::new());
    group.bench_function("parse_all_planes", |b| {
        b.iter(|| parse_fen(black_box(&full)))
    });

    let board = Board::new();
    group.bench_function("encode_start_position", |b| {
        b.iter(|| encode_fen(black_box(&board)))
    });

    group.finish();
}

criterion_group!(benches, fen_benchmarks);
criterion_main!(benches);
