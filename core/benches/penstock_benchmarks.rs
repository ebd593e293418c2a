use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use penstock::{PipeRef, Pipeline};
use tokio::runtime::Runtime; // To run awaited chains within Criterion

// --- Helper: minimal function pipe ---
fn increment_pipe() -> PipeRef<u64, Vec<u64>> {
  PipeRef::function(|values: Vec<u64>, next, _params| {
    next.call(values.into_iter().map(|v| v.wrapping_add(1)).collect())
  })
}

fn immediate_pipeline(num_pipes: usize) -> Pipeline<u64, Vec<u64>, penstock::Immediate> {
  Pipeline::<u64>::new()
    .send([0])
    .through((0..num_pipes).map(|_| increment_pipe()))
    .sync()
}

fn awaited_pipeline(num_pipes: usize) -> Pipeline<u64> {
  Pipeline::<u64>::new()
    .send([0])
    .through((0..num_pipes).map(|_| increment_pipe()))
}

// --- Benchmark Functions ---

fn bench_immediate_chain(c: &mut Criterion) {
  let mut group = c.benchmark_group("immediate_chain");
  for num_pipes in [1usize, 8, 64] {
    group.throughput(Throughput::Elements(num_pipes as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_pipes), &num_pipes, |b, &n| {
      let pipeline = immediate_pipeline(n);
      b.iter(|| pipeline.then_return().unwrap());
    });
  }
  group.finish();
}

fn bench_awaited_chain(c: &mut Criterion) {
  let rt = Runtime::new().expect("Failed to create Tokio runtime");
  let mut group = c.benchmark_group("awaited_chain");
  for num_pipes in [1usize, 8, 64] {
    group.throughput(Throughput::Elements(num_pipes as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_pipes), &num_pipes, |b, &n| {
      let pipeline = awaited_pipeline(n);
      b.to_async(&rt)
        .iter(|| async { pipeline.then_return().await.unwrap() });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_immediate_chain, bench_awaited_chain);
criterion_main!(benches);
