//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU invariants and laws over arbitrary operation
//! sequences, plus a brute-force linearizability check of concurrent histories.

use proptest::prelude::*;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use crate::cache::{ConcurrentLruCache, LruStore};

// == Strategies ==
/// Small key space so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Write { key: String, value: u32 },
    Read { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Write { key, value }),
        key_strategy().prop_map(|key| CacheOp::Read { key }),
    ]
}

fn new_store(capacity: usize) -> LruStore<String, u32> {
    LruStore::new(NonZeroUsize::new(capacity).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any operation sequence the size bound, key-set equality and
    // no-duplicate invariants hold after every step.
    #[test]
    fn prop_invariants_hold(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut store = new_store(capacity);

        for op in ops {
            match op {
                CacheOp::Write { key, value } => {
                    store.write(key, value);
                }
                CacheOp::Read { key } => {
                    store.try_read(&key);
                }
            }
            store.assert_invariants();
            prop_assert!(store.len() <= capacity);
        }
    }

    // Inserting a new key into a full store evicts exactly the previous LRU key.
    #[test]
    fn prop_eviction_removes_lru(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 0..60),
        new_value in any::<u32>()
    ) {
        let mut store = new_store(capacity);
        for op in ops {
            match op {
                CacheOp::Write { key, value } => { store.write(key, value); }
                CacheOp::Read { key } => { store.try_read(&key); }
            }
        }

        let new_key = "zz".to_string();
        let before = store.keys();
        let was_full = store.len() == capacity;

        let evicted = store.write(new_key.clone(), new_value);

        if was_full {
            let (evicted_key, _) = evicted.unwrap();
            prop_assert_eq!(Some(&evicted_key), before.last());
            let mut expected = vec![new_key];
            expected.extend(before[..before.len() - 1].iter().cloned());
            prop_assert_eq!(store.keys(), expected);
        } else {
            prop_assert!(evicted.is_none());
            prop_assert_eq!(store.len(), before.len() + 1);
        }
    }

    // A found read makes the key MRU; a miss changes nothing.
    #[test]
    fn prop_read_promotes_or_is_noop(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 0..60),
        probe in key_strategy()
    ) {
        let mut store = new_store(capacity);
        for op in ops {
            if let CacheOp::Write { key, value } = op {
                store.write(key, value);
            }
        }

        let before = store.keys();
        let expected_value = store.peek(&probe).copied();

        let found = store.try_read(&probe).copied();
        prop_assert_eq!(found, expected_value);

        if found.is_some() {
            let keys = store.keys();
            prop_assert_eq!(keys.first(), Some(&probe));
            prop_assert_eq!(store.len(), before.len());
        } else {
            prop_assert_eq!(store.keys(), before);
        }
    }

    // Writing an existing key updates it, promotes it, and keeps the size.
    #[test]
    fn prop_update_semantics(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
        value in any::<u32>()
    ) {
        let mut store = new_store(capacity);
        for op in ops {
            if let CacheOp::Write { key, value } = op {
                store.write(key, value);
            }
        }
        prop_assume!(!store.is_empty());
        let target = store.peek_lru().cloned().unwrap();
        let size = store.len();

        prop_assert!(store.write(target.clone(), value).is_none());

        prop_assert_eq!(store.len(), size);
        prop_assert_eq!(store.peek(&target), Some(&value));
        let keys = store.keys();
        prop_assert_eq!(keys.first(), Some(&target));
    }
}

// == Linearizability ==

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Written,
    Read(Option<u32>),
}

#[derive(Debug, Clone)]
struct Event {
    op: CacheOp,
    outcome: Outcome,
    invoked: u64,
    returned: u64,
}

// Runs each thread's ops concurrently, stamping invoke/return on a shared clock.
fn run_history(
    cache: &Arc<ConcurrentLruCache<String, u32>>,
    per_thread: Vec<Vec<CacheOp>>,
) -> Vec<Event> {
    let clock = Arc::new(AtomicU64::new(0));
    let barrier = Arc::new(Barrier::new(per_thread.len()));

    let handles: Vec<_> = per_thread
        .into_iter()
        .map(|ops| {
            let cache = cache.clone();
            let clock = clock.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                ops.into_iter()
                    .map(|op| {
                        let invoked = clock.fetch_add(1, Ordering::SeqCst);
                        let outcome = match &op {
                            CacheOp::Write { key, value } => {
                                cache.write(key.clone(), *value);
                                Outcome::Written
                            }
                            CacheOp::Read { key } => Outcome::Read(cache.try_read(key)),
                        };
                        let returned = clock.fetch_add(1, Ordering::SeqCst);
                        Event { op, outcome, invoked, returned }
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect()
}

fn apply(model: &mut LruStore<String, u32>, op: &CacheOp) -> Outcome {
    match op {
        CacheOp::Write { key, value } => {
            model.write(key.clone(), *value);
            Outcome::Written
        }
        CacheOp::Read { key } => Outcome::Read(model.try_read(key).copied()),
    }
}

// Depth-first search for a sequential order that respects real time,
// reproduces every observed outcome and ends in the observed final state.
fn linearizable(
    model: &LruStore<String, u32>,
    events: &[Event],
    done: &mut [bool],
    final_state: &[(String, u32)],
) -> bool {
    if done.iter().all(|d| *d) {
        let state: Vec<(String, u32)> = model
            .keys()
            .into_iter()
            .map(|k| {
                let v = *model.peek(&k).unwrap();
                (k, v)
            })
            .collect();
        return state == final_state;
    }

    for i in 0..events.len() {
        if done[i] {
            continue;
        }
        // Some pending op finished before this one started: it must go first.
        let blocked = events
            .iter()
            .enumerate()
            .any(|(j, other)| !done[j] && j != i && other.returned < events[i].invoked);
        if blocked {
            continue;
        }

        let mut next = model.clone();
        if apply(&mut next, &events[i].op) != events[i].outcome {
            continue;
        }
        done[i] = true;
        if linearizable(&next, events, done, final_state) {
            return true;
        }
        done[i] = false;
    }
    false
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Concurrent histories are explained by some sequential execution of a
    // single-threaded reference store.
    #[test]
    fn prop_concurrent_history_is_linearizable(
        capacity in 1usize..4,
        per_thread in prop::collection::vec(
            prop::collection::vec(cache_op_strategy(), 1..4),
            2..4
        )
    ) {
        let cache = Arc::new(ConcurrentLruCache::new(capacity).unwrap());
        let events = run_history(&cache, per_thread);

        cache.assert_invariants();
        let final_state: Vec<(String, u32)> = cache
            .keys()
            .into_iter()
            .map(|k| {
                let v = cache.inner_peek(&k).unwrap();
                (k, v)
            })
            .collect();

        let mut done = vec![false; events.len()];
        prop_assert!(
            linearizable(&new_store(capacity), &events, &mut done, &final_state),
            "no sequential order explains history {:?} ending in {:?}",
            events,
            final_state
        );
    }
}

// Heavier stress run without the history search
#[test]
fn stress_concurrent_invariants() {
    let cache = Arc::new(ConcurrentLruCache::<String, u32>::new(5).unwrap());
    let keys: Vec<String> = (0..12).map(|i| format!("k{}", i)).collect();

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let cache = cache.clone();
            let keys = keys.clone();
            thread::spawn(move || {
                for i in 0..2_000u32 {
                    let key = &keys[((i * 31 + t * 7) as usize) % keys.len()];
                    if (i + t) % 2 == 0 {
                        cache.write(key.clone(), t * 10_000 + i);
                    } else {
                        cache.try_read(key.as_str());
                    }
                    if i % 250 == 0 {
                        cache.assert_invariants();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    cache.assert_invariants();
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 8_000);
    assert_eq!(stats.insertions - stats.evictions, cache.len() as u64);
    let distinct: HashSet<String> = cache.keys().into_iter().collect();
    assert_eq!(distinct.len(), cache.len());
}
