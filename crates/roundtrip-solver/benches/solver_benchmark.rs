// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use roundtrip_model::matrix::DistanceMatrix;
use roundtrip_solver::bnb::BnbSolver;
use roundtrip_solver::brute_force::BruteForceSolver;
use roundtrip_solver::held_karp::HeldKarpSolver;
use roundtrip_solver::monitor::NoOpMonitor;
use std::hint::black_box;

/// Seeded instances so every run benchmarks the same matrices.
fn random_instance(seed: u64, n: usize) -> DistanceMatrix<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows: Vec<Vec<i64>> = (0..n)
        .map(|from| {
            (0..n)
                .map(|to| if from == to { 0 } else { rng.random_range(1..=100) })
                .collect()
        })
        .collect();
    DistanceMatrix::from_rows(rows).unwrap()
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_solvers");

    for n in [6usize, 8, 10] {
        let matrix = random_instance(0xbe9c_0000 + n as u64, n);

        group.bench_with_input(
            BenchmarkId::new("brute_force", n),
            &matrix,
            |b, matrix| {
                let solver = BruteForceSolver::new();
                b.iter(|| black_box(solver.solve(black_box(matrix))));
            },
        );

        group.bench_with_input(BenchmarkId::new("held_karp", n), &matrix, |b, matrix| {
            let solver = HeldKarpSolver::new();
            b.iter(|| black_box(solver.solve(black_box(matrix)).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("branch_and_bound", n),
            &matrix,
            |b, matrix| {
                let mut solver = BnbSolver::preallocated(1024);
                b.iter(|| {
                    let mut monitor = NoOpMonitor::new();
                    black_box(solver.solve(black_box(matrix), &mut monitor).unwrap())
                });
            },
        );
    }

    // Sizes beyond the factorial wall, for the two solvers that survive it.
    for n in [12usize, 14] {
        let matrix = random_instance(0xbe9c_0000 + n as u64, n);

        group.bench_with_input(BenchmarkId::new("held_karp", n), &matrix, |b, matrix| {
            let solver = HeldKarpSolver::new();
            b.iter(|| black_box(solver.solve(black_box(matrix)).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("branch_and_bound", n),
            &matrix,
            |b, matrix| {
                let mut solver = BnbSolver::preallocated(4096);
                b.iter(|| {
                    let mut monitor = NoOpMonitor::new();
                    black_box(solver.solve(black_box(matrix), &mut monitor).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
