//! Counter allocation invariant tests.
//!
//! - Sequences start at the floor and increase contiguously
//! - Distinct names never affect each other's sequences
//! - No two concurrent callers observe the same value for one name
//! - Counter seeding applies only while a counter sits at its floor

use std::sync::{Arc, Mutex};
use std::thread;

use feedsdb::store::{CounterAllocator, OrderedStore, DEFAULT_FLOOR};
use tempfile::TempDir;

fn open_allocator() -> (TempDir, Arc<CounterAllocator>) {
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(OrderedStore::open(dir.path()).expect("open store"));
    (dir, Arc::new(CounterAllocator::new(store)))
}

// =============================================================================
// Sequence shape
// =============================================================================

#[test]
fn test_increment_returns_contiguous_sequence_from_floor() {
    let (_dir, counters) = open_allocator();

    for i in 0..10_000u64 {
        assert_eq!(counters.increment("/loop").unwrap(), DEFAULT_FLOOR + i);
    }

    // read() reports one past the last allocated value.
    assert_eq!(counters.read("/loop").unwrap(), DEFAULT_FLOOR + 10_000);
}

#[test]
fn test_interleaved_names_keep_independent_sequences() {
    let (_dir, counters) = open_allocator();

    assert_eq!(counters.increment("/users").unwrap(), 10_000);
    assert_eq!(counters.increment("/users").unwrap(), 10_001);

    assert_eq!(counters.increment("/feeds").unwrap(), 10_000);
    assert_eq!(counters.increment("/feeds").unwrap(), 10_001);

    assert_eq!(counters.increment("/users").unwrap(), 10_002);
    assert_eq!(counters.increment("/feeds").unwrap(), 10_002);
}

// =============================================================================
// Concurrency: exactly-once allocation per value
// =============================================================================

#[test]
fn test_concurrent_increments_never_repeat_a_value() {
    let (_dir, counters) = open_allocator();

    const THREADS: usize = 8;
    const PER_THREAD: usize = 100;

    let seen = Arc::new(Mutex::new(Vec::with_capacity(THREADS * PER_THREAD)));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counters = counters.clone();
            let seen = seen.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    let value = counters.increment("/contended").unwrap();
                    seen.lock().unwrap().push(value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut values = seen.lock().unwrap().clone();
    values.sort_unstable();

    // All distinct and contiguous from the floor: any duplicate or gap
    // would break this exact sequence.
    let expected: Vec<u64> = (0..(THREADS * PER_THREAD) as u64)
        .map(|i| DEFAULT_FLOOR + i)
        .collect();
    assert_eq!(values, expected);
}

#[test]
fn test_concurrent_increments_on_distinct_names_stay_isolated() {
    let (_dir, counters) = open_allocator();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let counters = counters.clone();
            thread::spawn(move || {
                let name = format!("/isolated/{}", n);
                for i in 0..200u64 {
                    assert_eq!(counters.increment(&name).unwrap(), DEFAULT_FLOOR + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

// =============================================================================
// Listing and seeding
// =============================================================================

#[test]
fn test_list_all_snapshots_every_counter() {
    let (_dir, counters) = open_allocator();

    counters.increment("/first").unwrap();
    counters.increment("/first").unwrap();
    counters.increment("/second").unwrap();
    for _ in 0..100 {
        counters.increment("/popular").unwrap();
    }

    let all = counters.list_all().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all["/first"], 10_002);
    assert_eq!(all["/second"], 10_001);
    assert_eq!(all["/popular"], 10_100);
}

#[test]
fn test_seed_is_ignored_once_counter_advanced() {
    let (_dir, counters) = open_allocator();

    counters.seed("/feeds", 20_000).unwrap();
    assert_eq!(counters.increment("/feeds").unwrap(), 20_000);

    // Re-seeding (as a process restart would) must not rewind.
    counters.seed("/feeds", 20_000).unwrap();
    assert_eq!(counters.increment("/feeds").unwrap(), 20_001);
}

#[test]
fn test_counters_survive_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = Arc::new(OrderedStore::open(dir.path()).unwrap());
        let counters = CounterAllocator::new(store);
        for _ in 0..5 {
            counters.increment("/persistent").unwrap();
        }
    }

    let store = Arc::new(OrderedStore::open(dir.path()).unwrap());
    let counters = CounterAllocator::new(store);
    assert_eq!(counters.increment("/persistent").unwrap(), DEFAULT_FLOOR + 5);
}
