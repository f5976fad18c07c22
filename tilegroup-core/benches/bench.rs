use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal};
use tilegroup_core::{Category, Collector};

/// Generate `n` summary lines shaped like a projectivity run, with log-normally
/// distributed execution times.
fn gen_summary(n: usize) -> Vec<String> {
  let mut rng = SmallRng::seed_from_u64(64);
  let stat = LogNormal::new(4.0, 1.0).unwrap();
  (0..n)
    .map(|_| {
      format!(
        "{} {} {:.1} {:.1} {} {} 0 0 0 1000 0 0 0 0 1 {:.3}",
        rng.gen_range(0..3),
        rng.gen_range(1..=3),
        rng.gen_range(1..=5) as f64 / 5.0,
        rng.gen_range(1..=5) as f64 / 5.0,
        [50, 200][rng.gen_range(0..2)],
        ["0", "0.5"][rng.gen_range(0..2)],
        stat.sample(&mut rng),
      )
    })
    .collect()
}

/// Pure decode cost versus decode plus appending to the CSV tree.
fn bench_collect(criterion: &mut Criterion) {
  for n in [1000, 10000] {
    let lines = gen_summary(n);
    let mut group = criterion.benchmark_group(format!("Collect projectivity, lines={}", n));

    group.bench_with_input(BenchmarkId::new("Pivot only", n), &lines, |b, lines| {
      let collector = Collector::new(Category::Projectivity, "/results/projectivity");
      b.iter(|| {
        for (idx, line) in lines.iter().enumerate() {
          collector.pivot(idx + 1, line).unwrap();
        }
      })
    });

    group.bench_with_input(BenchmarkId::new("Pivot and append", n), &lines, |b, lines| {
      b.iter_batched(
        || tempfile::tempdir().unwrap(),
        |scratch| {
          Collector::new(Category::Projectivity, scratch.path())
            .collect_lines(lines)
            .unwrap();
          scratch
        },
        BatchSize::PerIteration,
      )
    });

    group.finish();
  }
}

criterion_group!(benches, bench_collect);
criterion_main!(benches);
