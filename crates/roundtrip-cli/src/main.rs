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

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng, rngs::StdRng};
use roundtrip_model::{
    index::VertexIndex,
    loading::InstanceLoader,
    matrix::DistanceMatrix,
    tour::Tour,
};
use roundtrip_solver::{
    bnb::BnbSolver,
    brute_force::BruteForceSolver,
    held_karp::HeldKarpSolver,
    monitor::{CompositeMonitor, LogMonitor, NoOpMonitor, NodeLimitMonitor, TimeLimitMonitor},
    result::{SolveResult, TerminationReason},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Brute force becomes pointless long before it becomes impossible; the
/// `solve` command refuses instances above this size.
const BRUTE_FORCE_MAX_VERTICES: usize = 20;

/// The `bench` command skips brute force above this size so a run finishes
/// the same day it starts.
const BENCH_BRUTE_FORCE_MAX_VERTICES: usize = 14;

#[derive(Parser)]
#[command(name = "roundtrip")]
#[command(about = "Exact solvers for the Asymmetric Traveling Salesman Problem", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Algorithm {
    /// Run every applicable solver on the instance.
    All,
    /// Exhaustive permutation search.
    BruteForce,
    /// Bitmask dynamic programming.
    HeldKarp,
    /// Best-first branch-and-bound.
    BranchAndBound,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance file
    Solve {
        /// Instance file: a vertex count followed by the row-major matrix
        instance: PathBuf,
        /// Which solver to run
        #[arg(long, value_enum, default_value_t = Algorithm::All)]
        algorithm: Algorithm,
        /// Abort branch-and-bound after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,
        /// Abort branch-and-bound after this many node expansions
        #[arg(long)]
        node_limit: Option<u64>,
        /// Print a progress table while branch-and-bound runs
        #[arg(long)]
        progress: bool,
        /// Treat edge costs at or above this value as absent
        #[arg(long)]
        forbid_at_least: Option<i64>,
    },
    /// Print a loaded instance
    Print {
        /// Instance file
        instance: PathBuf,
    },
    /// Repeatedly time all solvers, perturbing the instance between runs
    Bench {
        /// Instance file
        instance: PathBuf,
        /// Number of timed iterations
        #[arg(long, default_value_t = 100)]
        iterations: u32,
        /// Seed for the perturbation
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            instance,
            algorithm,
            time_limit,
            node_limit,
            progress,
            forbid_at_least,
        } => {
            let matrix = load_instance(&instance, forbid_at_least)?;
            solve(&matrix, algorithm, time_limit, node_limit, progress)
        }
        Commands::Print { instance } => {
            let matrix = load_instance(&instance, None)?;
            print_instance(&matrix);
            Ok(())
        }
        Commands::Bench {
            instance,
            iterations,
            seed,
        } => {
            let matrix = load_instance(&instance, None)?;
            bench(&matrix, iterations, seed)
        }
    }
}

fn load_instance(path: &PathBuf, forbid_at_least: Option<i64>) -> Result<DistanceMatrix<i64>> {
    let mut loader = InstanceLoader::<i64>::new();
    if let Some(limit) = forbid_at_least {
        loader = loader.forbid_at_least(limit);
    }

    let matrix = loader
        .from_path(path)
        .with_context(|| format!("failed to load instance from {}", path.display()))?;

    log::info!(
        "loaded instance with {} vertices ({} possible tours)",
        matrix.num_vertices(),
        matrix.complexity()
    );
    Ok(matrix)
}

fn solve(
    matrix: &DistanceMatrix<i64>,
    algorithm: Algorithm,
    time_limit: Option<u64>,
    node_limit: Option<u64>,
    progress: bool,
) -> Result<()> {
    let n = matrix.num_vertices();

    if matches!(algorithm, Algorithm::All | Algorithm::BruteForce) {
        if n <= BRUTE_FORCE_MAX_VERTICES {
            run_brute_force(matrix);
        } else if algorithm == Algorithm::BruteForce {
            anyhow::bail!(
                "brute force is limited to {} vertices, the instance has {}",
                BRUTE_FORCE_MAX_VERTICES,
                n
            );
        } else {
            log::warn!(
                "skipping brute force: {} vertices exceed the limit of {}",
                n,
                BRUTE_FORCE_MAX_VERTICES
            );
        }
    }

    if matches!(algorithm, Algorithm::All | Algorithm::HeldKarp) {
        run_held_karp(matrix)?;
    }

    if matches!(algorithm, Algorithm::All | Algorithm::BranchAndBound) {
        run_branch_and_bound(matrix, time_limit, node_limit, progress)?;
    }

    Ok(())
}

fn run_brute_force(matrix: &DistanceMatrix<i64>) {
    println!("------------ BRUTE FORCE ------------");

    let start = Instant::now();
    let outcome = BruteForceSolver::new().solve(matrix);
    let elapsed = start.elapsed();

    report_result(outcome.result(), elapsed);
}

fn run_held_karp(matrix: &DistanceMatrix<i64>) -> Result<()> {
    println!("------------ HELD-KARP ------------");

    let start = Instant::now();
    let outcome = HeldKarpSolver::new()
        .solve(matrix)
        .context("held-karp cannot solve this instance")?;
    let elapsed = start.elapsed();

    report_result(outcome.result(), elapsed);
    Ok(())
}

fn run_branch_and_bound(
    matrix: &DistanceMatrix<i64>,
    time_limit: Option<u64>,
    node_limit: Option<u64>,
    progress: bool,
) -> Result<()> {
    println!("------------ BRANCH AND BOUND ------------");

    let mut monitor = CompositeMonitor::<i64>::new();
    if let Some(seconds) = time_limit {
        monitor.add_monitor(TimeLimitMonitor::new(Duration::from_secs(seconds)));
    }
    if let Some(max_nodes) = node_limit {
        monitor.add_monitor(NodeLimitMonitor::new(max_nodes));
    }
    if progress {
        monitor.add_monitor(LogMonitor::<i64>::default());
    }

    let start = Instant::now();
    let outcome = BnbSolver::new()
        .solve(matrix, &mut monitor)
        .context("branch and bound cannot solve this instance")?;
    let elapsed = start.elapsed();

    if let TerminationReason::Aborted(reason) = outcome.termination_reason() {
        println!("Search aborted: {}", reason);
    }
    report_result(outcome.result(), elapsed);
    log::debug!("{}", outcome.statistics());
    Ok(())
}

fn report_result(result: &SolveResult<i64>, elapsed: Duration) {
    match result {
        SolveResult::Optimal(tour) => {
            print_tour(tour, elapsed);
        }
        SolveResult::Feasible(tour) => {
            println!("Best tour found so far (optimality not proven):");
            print_tour(tour, elapsed);
        }
        SolveResult::Infeasible => {
            println!("No tour exists for this instance.");
            println!("Calculating time: {:.3} ms", elapsed.as_secs_f64() * 1e3);
        }
    }
}

fn print_tour(tour: &Tour<i64>, elapsed: Duration) {
    println!("Optimal path: {}", tour);
    println!("Calculating time: {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("Minimal path cost: {}", tour.total_cost());
}

fn print_instance(matrix: &DistanceMatrix<i64>) {
    let n = matrix.num_vertices();
    println!("Number of vertices: {}", n);
    println!("Tour space: {} tours", matrix.complexity());

    for from in 0..n {
        for to in 0..n {
            let value = matrix
                .cost(VertexIndex::new(from), VertexIndex::new(to))
                .unwrap_or(-1);
            print!("{} ", value);
        }
        println!();
    }
}

/// Timed averages over perturbed copies of the instance, in the spirit of
/// an averaged micro-benchmark: solve, re-cost a handful of random edges,
/// repeat.
fn bench(matrix: &DistanceMatrix<i64>, iterations: u32, seed: u64) -> Result<()> {
    let n = matrix.num_vertices();
    let run_brute = n < BENCH_BRUTE_FORCE_MAX_VERTICES;
    if !run_brute {
        log::warn!(
            "benchmarking without brute force: {} vertices exceed the limit of {}",
            n,
            BENCH_BRUTE_FORCE_MAX_VERTICES
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = matrix_rows(matrix);
    let perturbations_per_round = (n / 5).max(1);

    let mut total_brute = 0.0f64;
    let mut total_held_karp = 0.0f64;
    let mut total_bnb = 0.0f64;

    for iteration in 0..iterations {
        let matrix = DistanceMatrix::from_rows(rows.clone())
            .expect("perturbation preserves the matrix shape");

        if run_brute {
            let start = Instant::now();
            let _ = BruteForceSolver::new().solve(&matrix);
            total_brute += start.elapsed().as_secs_f64() * 1e3;
        }

        let start = Instant::now();
        let _ = HeldKarpSolver::new()
            .solve(&matrix)
            .context("held-karp cannot solve this instance")?;
        total_held_karp += start.elapsed().as_secs_f64() * 1e3;

        let start = Instant::now();
        let mut monitor = NoOpMonitor::new();
        let _ = BnbSolver::new()
            .solve(&matrix, &mut monitor)
            .context("branch and bound cannot solve this instance")?;
        total_bnb += start.elapsed().as_secs_f64() * 1e3;

        // Re-cost a few random edges so the next round sees a slightly
        // different instance.
        for _ in 0..perturbations_per_round {
            let from = rng.random_range(0..n);
            let to = rng.random_range(0..n);
            if from != to {
                rows[from][to] = rng.random_range(1..=100);
            }
        }

        let runs = (iteration + 1) as f64;
        if run_brute {
            print!("No. {} Brute force avg: {:.3} ms ", iteration, total_brute / runs);
        } else {
            print!("No. {} ", iteration);
        }
        println!(
            "Held-Karp avg: {:.3} ms Branch and bound avg: {:.3} ms",
            total_held_karp / runs,
            total_bnb / runs
        );
    }

    let runs = iterations.max(1) as f64;
    println!("--------------------------------------------------");
    if run_brute {
        println!("Brute force average: {:.3} ms", total_brute / runs);
    }
    println!("Held-Karp average: {:.3} ms", total_held_karp / runs);
    println!("Branch and bound average: {:.3} ms", total_bnb / runs);
    Ok(())
}

/// Recovers the raw row representation of a matrix, with `-1` standing in
/// for absent edges.
fn matrix_rows(matrix: &DistanceMatrix<i64>) -> Vec<Vec<i64>> {
    let n = matrix.num_vertices();
    (0..n)
        .map(|from| {
            (0..n)
                .map(|to| {
                    matrix
                        .cost(VertexIndex::new(from), VertexIndex::new(to))
                        .unwrap_or(-1)
                })
                .collect()
        })
        .collect()
}
