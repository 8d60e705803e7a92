#![allow(non_snake_case)]

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use edwards25519::constants;
use edwards25519::edwards::{self, EdwardsPoint};
use edwards25519::scalar::Scalar;

fn test_scalar(seed: u8) -> Scalar {
    let mut bytes = [0u8; 64];
    bytes.iter_mut().enumerate().for_each(|(i, b)| {
        *b = seed.wrapping_add(i as u8).wrapping_mul(251);
    });
    Scalar::from_uniform_bytes(&bytes).unwrap()
}

fn edwards_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("edwards");

    let B = &constants::ED25519_BASEPOINT_POINT;
    let s = test_scalar(1);
    let aB = EdwardsPoint::mul_base(&test_scalar(2));

    group.bench_function("compress", |b| b.iter(|| aB.compress()));
    group.bench_function("decompress", |b| {
        let compressed = aB.compress();
        b.iter(|| compressed.decompress().unwrap())
    });
    group.bench_function("add", |b| b.iter(|| &aB + B));
    group.bench_function("scalar mul", |b| b.iter(|| &aB * &s));
    group.bench_function("basepoint mul", |b| b.iter(|| EdwardsPoint::mul_base(&s)));
    group.bench_function("vartime double-base mul", |b| {
        b.iter(|| edwards::vartime::double_scalar_mul_basepoint(&s, &aB, &test_scalar(3)))
    });
    group.bench_function("mul by cofactor", |b| b.iter(|| aB.mul_by_cofactor()));
    group.bench_function("mul by order", |b| b.iter(|| aB.mul_by_order()));

    group.finish();
}

fn multiscalar_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiscalar");

    for n in [2usize, 4, 8] {
        let scalars: Vec<Scalar> = (0..n).map(|i| test_scalar(i as u8)).collect();
        let points: Vec<EdwardsPoint> =
            (0..n).map(|i| EdwardsPoint::mul_base(&test_scalar(100 + i as u8))).collect();

        group.bench_function(format!("constant-time, size {}", n), |b| {
            b.iter_batched(
                || (scalars.clone(), points.clone()),
                |(s, p)| edwards::multiscalar_mul(&s, &p),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("variable-time, size {}", n), |b| {
            b.iter_batched(
                || (scalars.clone(), points.clone()),
                |(s, p)| edwards::vartime::multiscalar_mul(&s, &p),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn scalar_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");

    let s = test_scalar(4);
    let t = test_scalar(5);

    group.bench_function("mul", |b| b.iter(|| &s * &t));
    group.bench_function("invert", |b| b.iter(|| s.invert()));
    group.bench_function("from uniform bytes", |b| {
        b.iter(|| Scalar::from_uniform_bytes(&[0xab; 64]).unwrap())
    });

    group.finish();
}

criterion_group!(benches, edwards_benches, multiscalar_benches, scalar_benches);
criterion_main!(benches);
