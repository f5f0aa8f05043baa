use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(u16, u32),
    Search(u16),
    Remove(u16),
}

fn tree_ops() -> impl Strategy<Value = Vec<TreeOp>> {
    // Small key space so searches and removes actually hit
    let op = prop_oneof![
        4 => (0u16..64, any::<u32>()).prop_map(|(k, v)| TreeOp::Insert(k, v)),
        3 => (0u16..64).prop_map(TreeOp::Search),
        1 => (0u16..64).prop_map(TreeOp::Remove),
    ];
    prop::collection::vec(op, 0..400)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put(u8, u32),
    Get(u8),
}

fn cache_ops() -> impl Strategy<Value = Vec<CacheOp>> {
    let op = prop_oneof![
        (0u8..32, any::<u32>()).prop_map(|(k, v)| CacheOp::Put(k, v)),
        (0u8..32).prop_map(CacheOp::Get),
    ];
    prop::collection::vec(op, 0..400)
}

/// Recency list kept the slow way: front is least recently used
struct NaiveLru {
    entries: VecDeque<(u8, u32)>,
    capacity: usize,
}

impl NaiveLru {
    fn touch(&mut self, key: u8) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos)?;
        self.entries.push_back(entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if self.touch(key).is_some() {
            if let Some(last) = self.entries.back_mut() {
                last.1 = value;
            }
            return None;
        }
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back((key, value));
        evicted
    }
}

fn in_order_keys(tree: &SplayTree<u16, u32>) -> Vec<u16> {
    tree.iter().map(|(k, _)| *k).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_tree_matches_btreemap(ops in tree_ops()) {
        let mut tree = SplayTree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                TreeOp::Insert(k, v) => {
                    prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                    prop_assert_eq!(tree.root_key(), Some(&k));
                }
                TreeOp::Search(k) => {
                    prop_assert_eq!(tree.search(&k).copied(), model.get(&k).copied());
                    if model.contains_key(&k) {
                        prop_assert_eq!(tree.root_key(), Some(&k));
                    } else if !model.is_empty() {
                        let pred = model.range(..k).next_back().map(|(key, _)| key);
                        let succ = model.range(k..).next().map(|(key, _)| key);
                        let root = tree.root_key();
                        prop_assert!(
                            root == pred || root == succ,
                            "root {:?} is neither neighbour of {} ({:?}, {:?})",
                            root, k, pred, succ
                        );
                    }
                }
                TreeOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), model.remove(&k));
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        let pairs: Vec<(u16, u32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = model.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn prop_inorder_strictly_increasing(keys in prop::collection::vec(any::<u16>(), 0..300)) {
        let mut tree = SplayTree::new();
        for k in keys {
            tree.insert(k, 0u32);
            let order = in_order_keys(&tree);
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn prop_search_splays_to_root(
        keys in prop::collection::vec(0u16..1000, 1..200),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: SplayTree<u16, u32> = keys.iter().map(|&k| (k, k as u32)).collect();
        let target = keys[pick.index(keys.len())];

        prop_assert_eq!(tree.search(&target), Some(&(target as u32)));
        prop_assert_eq!(tree.root_key(), Some(&target));
    }

    #[test]
    fn prop_cache_never_exceeds_capacity(capacity in 1usize..16, ops in cache_ops()) {
        let mut cache = BoundedMemoCache::with_capacity(capacity).unwrap();
        for op in ops {
            match op {
                CacheOp::Put(k, v) => { cache.put(k, v); }
                CacheOp::Get(k) => { cache.get(&k); }
            }
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn prop_cache_matches_naive_lru(capacity in 1usize..8, ops in cache_ops()) {
        let mut cache = BoundedMemoCache::with_capacity(capacity).unwrap();
        let mut model = NaiveLru { entries: VecDeque::new(), capacity };

        for op in ops {
            match op {
                CacheOp::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v));
                }
                CacheOp::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.touch(k));
                }
            }
            prop_assert_eq!(cache.len(), model.entries.len());
        }
    }

    #[test]
    fn prop_backends_agree_on_fibonacci(n in 0u64..=186, capacity in 3usize..32) {
        let mut tree = SplayTree::new();
        let mut lru = BoundedMemoCache::with_capacity(capacity).unwrap();

        let a: u128 = compute(n, &mut tree);
        let b: u128 = compute(n, &mut lru);
        prop_assert_eq!(a, b);
    }
}
