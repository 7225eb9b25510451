extern crate rand;
extern crate skip_list;

use rand::{Rng, SeedableRng, XorShiftRng};
use skip_list::skiplist::SkipList;
use std::collections::BTreeSet;

#[test]
fn test_random_inserts_match_sorted_distinct_keys() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut list = SkipList::new();
    let mut expected = Vec::new();

    for _ in 0..10_000 {
        let key = rng.gen::<u32>() % 4096;
        let (_, inserted) = list.insert(key);
        assert_eq!(inserted, !expected.contains(&key));
        expected.push(key);
    }

    expected.sort();
    expected.dedup();

    assert_eq!(list.len(), expected.len());

    let actual = list.iter().collect::<Vec<&u32>>();
    assert_eq!(actual.len(), expected.len());
    for i in 0..expected.len() {
        assert_eq!(actual[i], &expected[i]);
    }
}

#[test]
fn test_bounds_match_btree_set() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 2, 2, 2]);
    let mut list = SkipList::new();
    let mut set = BTreeSet::new();

    for _ in 0..1000 {
        let key = rng.gen::<u32>() % 512;
        list.insert(key);
        set.insert(key);
    }

    for probe in 0..513 {
        assert_eq!(list.find(&probe).get(), set.get(&probe));
        assert_eq!(list.count(&probe), if set.contains(&probe) { 1 } else { 0 });
        assert_eq!(list.lower_bound(&probe).get(), set.range(probe..).next());
        assert_eq!(
            list.upper_bound(&probe).get(),
            set.range(probe + 1..).next(),
        );
    }
}

#[test]
fn test_equality_across_insertion_orders() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([3, 3, 3, 3]);
    let mut keys = Vec::new();
    for _ in 0..500 {
        keys.push(rng.gen::<u32>() % 256);
    }

    let forward = keys.iter().cloned().collect::<SkipList<u32>>();
    let backward = keys.iter().rev().cloned().collect::<SkipList<u32>>();

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), backward.len());
}

#[test]
fn test_clear_then_reuse() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([4, 4, 4, 4]);
    let mut list = SkipList::new();

    for _ in 0..1000 {
        list.insert(rng.gen::<u32>());
    }
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.begin(), list.end());

    let mut expected = Vec::new();
    for _ in 0..1000 {
        let key = rng.gen::<u32>();
        list.insert(key);
        expected.push(key);
    }

    expected.sort();
    expected.dedup();
    assert_eq!(list.len(), expected.len());
    assert_eq!(
        list.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
}
