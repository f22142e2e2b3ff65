//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

/// Simple problem with no dependencies for testing
struct NoDeps;

impl DpProblem<usize, i32> for NoDeps {
    fn deps(&self, _n: &usize) -> Vec<usize> {
        vec![]
    }

    fn compute(&self, n: &usize, _deps: Vec<i32>) -> i32 {
        (*n as i32) * 2
    }
}

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

/// Steps for n to reach 1 under the Collatz map
struct Collatz;

impl DpProblem<u64, u64> for Collatz {
    fn deps(&self, n: &u64) -> Vec<u64> {
        match *n {
            0 | 1 => vec![],
            n if n % 2 == 0 => vec![n / 2],
            n => vec![3 * n + 1],
        }
    }

    fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
        deps.first().map_or(0, |d| d + 1)
    }
}

#[test]
fn test_basic_cache_creation_and_single_value() {
    let cache = DpCache::with_problem(VecBackend::new(), NoDeps);

    assert_eq!(cache.get(&5), 10);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&100), 200);
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&2), 1);
    assert_eq!(cache.get(&5), 5);
    assert_eq!(cache.get(&20), 6765);
    assert_eq!(cache.get(&90), 2880067194370816120);
}

#[test]
fn test_diamond_dependency_memoization() {
    // A(0) depends on B(1) and C(2), both depend on D(3)
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let compute_count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            count: compute_count.clone(),
        },
    );

    assert_eq!(cache.get(&0), 50);
    assert_eq!(compute_count.get(), 4);

    assert_eq!(cache.get(&0), 50);
    assert_eq!(compute_count.get(), 4);
}

#[test]
fn test_vec_backend_insert_and_get() {
    let mut backend: VecBackend<i32> = VecBackend::new();

    assert_eq!(backend.get(&5), None);
    backend.insert(5, 42);
    assert_eq!(backend.get(&5), Some(&42));

    // growing leaves earlier slots alone
    backend.insert(10, 100);
    assert_eq!(backend.get(&5), Some(&42));
    assert_eq!(backend.get(&7), None);
    assert_eq!(backend.get(&10), Some(&100));
}

#[test]
fn test_hashmap_backend_insert_and_get() {
    let mut backend: HashMapBackend<String, i32> = HashMapBackend::new();
    assert!(backend.is_empty());

    backend.insert("key1".to_string(), 42);
    assert_eq!(backend.get(&"key1".to_string()), Some(&42));
    assert_eq!(backend.get(&"key2".to_string()), None);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_hashmap_backend_with_composite_key() {
    // binomial coefficients keyed by (n, k)
    let cache = DpCache::new(
        HashMapBackend::new(),
        |&(n, k): &(u64, u64)| {
            if k == 0 || k == n {
                vec![]
            } else {
                vec![(n - 1, k - 1), (n - 1, k)]
            }
        },
        |_: &(u64, u64), deps: Vec<u64>| deps.iter().sum::<u64>().max(1),
    );

    assert_eq!(cache.get(&(4, 2)), 6);
    assert_eq!(cache.get(&(30, 15)), 155117520);

    let backend = cache.into_backend();
    assert!(backend.get(&(29, 14)).is_some());
    assert!(backend.get(&(31, 0)).is_none());
}

#[test]
fn test_collatz_known_values() {
    let cache = DpCache::with_problem(HashMapBackend::new(), Collatz);

    assert_eq!(cache.get(&1), 0);
    assert_eq!(cache.get(&16), 4);
    assert_eq!(cache.get(&27), 111);
    assert_eq!(cache.get(&97), 118);
}

#[test]
fn test_trait_based_matches_closure_based() {
    let by_trait = DpCache::with_problem(VecBackend::new(), Fibonacci);
    let by_closure = DpCache::new(
        VecBackend::new(),
        |n: &usize| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
        |n: &usize, deps: Vec<u64>| if *n <= 1 { *n as u64 } else { deps[0] + deps[1] },
    );

    for n in 0..60 {
        assert_eq!(by_trait.get(&n), by_closure.get(&n));
    }
}

proptest! {
    #[test]
    fn prop_cached_values_match_fresh_cache(queries in prop::collection::vec(0usize..80, 1..20)) {
        let shared = DpCache::with_problem(VecBackend::new(), Fibonacci);
        for n in queries {
            let fresh = DpCache::with_problem(VecBackend::new(), Fibonacci);
            prop_assert_eq!(shared.get(&n), fresh.get(&n));
        }
    }

    #[test]
    fn prop_collatz_steps_follow_recurrence(n in 2u64..10_000) {
        let cache = DpCache::with_problem(HashMapBackend::new(), Collatz);
        let next = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
        prop_assert_eq!(cache.get(&n), cache.get(&next) + 1);
    }
}
