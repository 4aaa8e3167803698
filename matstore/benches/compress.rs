//! Compress/uncompress and lookup throughput for the coordinate form

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use matstore::{CoordMatrix, MatrixStorage, StorageOrder};

fn banded_matrix(n: usize, band: usize) -> CoordMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut m = CoordMatrix::new(StorageOrder::RowMajor, 0);
    m.set_extent(n, n).unwrap();
    for i in 0..n {
        for j in i.saturating_sub(band)..(i + band + 1).min(n) {
            m.set(i, j, rng.gen_range(-1.0..1.0)).unwrap();
        }
    }
    m
}

fn bench_compress(c: &mut Criterion) {
    let source = banded_matrix(1000, 3);

    c.bench_function("compress_1000x1000_band3", |b| {
        b.iter(|| {
            let mut m = source.clone();
            m.compress();
            black_box(m.nnz())
        })
    });

    c.bench_function("round_trip_1000x1000_band3", |b| {
        b.iter(|| {
            let mut m = source.clone();
            m.compress();
            m.uncompress();
            black_box(m.nnz())
        })
    });

    let mut compressed = source.clone();
    compressed.compress();
    c.bench_function("compressed_reads", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let i = rng.gen_range(0..1000);
            let j = rng.gen_range(0..1000);
            black_box(compressed.at(i, j))
        })
    });

    c.bench_function("augment_symmetry_triangular", |b| {
        let mut upper = CoordMatrix::<f64>::new(StorageOrder::RowMajor, 0);
        upper.set_extent(1000, 1000).unwrap();
        for i in 0..1000 {
            for j in i..(i + 4).min(1000) {
                upper.set(i, j, 1.0).unwrap();
            }
        }
        b.iter(|| {
            let mut m = upper.clone();
            m.augment_symmetry();
            black_box(m.nnz())
        })
    });
}

criterion_group!(benches, bench_compress);
criterion_main!(benches);
