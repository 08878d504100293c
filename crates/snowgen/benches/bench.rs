use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowgen::{
    DISCORD_EPOCH, IdGenStatus, SnowflakeGenerator, SnowflakeId, TimeSource, TimestampMode,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn elapsed_millis(&self) -> i64 {
        self.millis
    }

    fn reference_unix_millis(&self) -> i64 {
        DISCORD_EPOCH
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). One full sequence, so a fixed clock never runs dry.
const TOTAL_IDS: usize = 4096;

/// Benchmarks the hot path where every poll is `Ready`.
fn bench_poll_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll/fixed");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = SnowflakeGenerator::with_time(
                    0,
                    DISCORD_EPOCH,
                    TimestampMode::Epoch,
                    FixedMockTime { millis: 1 },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll() {
                        Ok(IdGenStatus::Ready { id }) => {
                            black_box(id);
                        }
                        _ => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks `generate` against the real monotonic clock, including waits on
/// sequence exhaustion.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/mono");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = SnowflakeGenerator::new(0, DISCORD_EPOCH).unwrap();
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks contended `generate` with one shared generator per iteration.
fn bench_generate_threaded(c: &mut Criterion) {
    let threads = num_cpus::get().max(2);
    let mut group = c.benchmark_group(format!("generate/mono/threads/{threads}"));
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS * threads), |b| {
        b.iter_custom(|iters| {
            let mut total = core::time::Duration::ZERO;
            for _ in 0..iters {
                let generator = SnowflakeGenerator::new(0, DISCORD_EPOCH).unwrap();
                let barrier = Arc::new(Barrier::new(threads + 1));
                let start = scope(|s| {
                    for _ in 0..threads {
                        let barrier = Arc::clone(&barrier);
                        let generator = &generator;
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.generate().unwrap());
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                total += start.elapsed();
            }
            total
        });
    });

    group.finish();
}

fn bench_decimal(c: &mut Criterion) {
    let id = SnowflakeId::from_components(123_456_789, 7, 42);
    let text = id.to_string();

    let mut group = c.benchmark_group("decimal");
    group.bench_function("to_string", |b| b.iter(|| black_box(id).to_string()));
    group.bench_function("parse", |b| {
        b.iter(|| black_box(text.as_str()).parse::<SnowflakeId>().unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_poll_fixed,
    bench_generate,
    bench_generate_threaded,
    bench_decimal
);
criterion_main!(benches);
