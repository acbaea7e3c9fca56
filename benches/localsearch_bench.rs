//! Criterion benchmarks for u-localsearch.
//!
//! Uses a synthetic single-machine weighted completion time instance to
//! measure neighbourhood enumeration and search overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use u_localsearch::improvement::{FirstImprovement, Improvement};
use u_localsearch::neighbourhood::{MoveKind, MoveNeighbourhood, Neighbourhood};
use u_localsearch::permutation::{Instance, Permutation};
use u_localsearch::search::{SearchConfig, SearchRunner, VndConfig, VndRunner};
use u_localsearch::tabu::{TabuConfig, TabuImprovement};

// ===========================================================================
// Single machine total weighted completion time
// ===========================================================================

struct SingleMachine {
    durations: Vec<i64>,
    weights: Vec<i64>,
}

impl SingleMachine {
    /// Deterministic pseudo-random instance of `n` jobs.
    fn generate(n: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let durations = (0..n).map(|_| rng.random_range(1..=50)).collect();
        let weights = (0..n).map(|_| rng.random_range(1..=10)).collect();
        Self { durations, weights }
    }
}

impl Instance for SingleMachine {
    fn size(&self) -> usize {
        self.durations.len()
    }

    fn evaluate(&self, order: &[usize]) -> i64 {
        let mut t = 0;
        order
            .iter()
            .map(|&j| {
                t += self.durations[j];
                t * self.weights[j]
            })
            .sum()
    }

    fn seed(&self) -> u64 {
        self.durations.iter().chain(&self.weights).sum::<i64>() as u64
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_neighbourhoods(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbourhood_scan");
    for n in [20, 50] {
        let instance = SingleMachine::generate(n);
        let p = Permutation::identity(&instance);
        for kind in MoveKind::ALL {
            let nb = MoveNeighbourhood::new(kind, &instance);
            group.bench_with_input(BenchmarkId::new(kind.to_string(), n), &n, |b, _| {
                b.iter(|| {
                    let dyn_nb: &dyn Neighbourhood = &nb;
                    black_box(dyn_nb.neighbours(&p).map(|q| q.score()).min())
                })
            });
        }
    }
    group.finish();
}

fn bench_tabu_step(c: &mut Criterion) {
    let instance = SingleMachine::generate(30);
    let nb = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
    let start = Permutation::identity(&instance);

    c.bench_function("tabu_100_steps_n30", |b| {
        b.iter(|| {
            let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();
            let mut current = start.clone();
            for _ in 0..100 {
                current = tabu.improve(&current, &nb).unwrap();
            }
            black_box(current.score())
        })
    });
}

fn bench_drivers(c: &mut Criterion) {
    let instance = SingleMachine::generate(25);
    let start = Permutation::identity(&instance);

    c.bench_function("search_runner_tabu_n25", |b| {
        let nb = MoveNeighbourhood::new(MoveKind::Insert, &instance);
        let config = SearchConfig::default().with_max_iterations(200);
        b.iter(|| {
            let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();
            let result = SearchRunner::run(&mut tabu, start.clone(), &nb, &config).unwrap();
            black_box(result.best_score)
        })
    });

    c.bench_function("vnd_first_improvement_n25", |b| {
        let neighbourhoods = MoveNeighbourhood::all(&instance);
        b.iter(|| {
            let result = VndRunner::run(
                &mut FirstImprovement,
                start.clone(),
                &neighbourhoods,
                &VndConfig::default(),
            )
            .unwrap();
            black_box(result.search.best_score)
        })
    });
}

criterion_group!(benches, bench_neighbourhoods, bench_tabu_step, bench_drivers);
criterion_main!(benches);
