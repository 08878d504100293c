use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use snowgen::{DISCORD_EPOCH, SnowflakeGenerator, SnowflakeId};

const COUNT: usize = 10_000;
const THREADS: usize = 100;

#[test]
fn concurrent_generate_is_collision_free() {
    let generator = Arc::new(SnowflakeGenerator::new(4, DISCORD_EPOCH).unwrap());
    let seen = Arc::new(Mutex::new(HashSet::with_capacity(COUNT)));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                for _ in 0..COUNT / THREADS {
                    let id = generator.must_generate();
                    assert_eq!(id.node_id(), 4);
                    assert!(id.is_valid());
                    assert!(seen.lock().unwrap().insert(id), "duplicate id {id}");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(seen.lock().unwrap().len(), COUNT);
}

#[test]
fn shared_reference_across_scoped_threads() {
    const SCOPED_THREADS: usize = 16;
    const PER_THREAD: usize = COUNT / SCOPED_THREADS;

    let generator = SnowflakeGenerator::new(1022, DISCORD_EPOCH).unwrap();
    let batches: Vec<Vec<SnowflakeId>> = thread::scope(|s| {
        let handles: Vec<_> = (0..SCOPED_THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..PER_THREAD)
                        .map(|_| generator.generate().unwrap())
                        .collect::<Vec<SnowflakeId>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut all: Vec<_> = batches.into_iter().flatten().collect();
    let total = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), total);
    assert!(all.iter().all(|id| id.node_id() == 1022));
}
