//! Property tests: `ChainTable` against a `HashMap` oracle.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::ChainTable;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u64),
    Remove(u16),
    Delete(u16),
    Get(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Keys from a small space so sequences revisit them.
    prop_oneof![
        (0..64u16, any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        (0..64u16).prop_map(Op::Remove),
        (0..64u16).prop_map(Op::Delete),
        (0..64u16).prop_map(Op::Get),
    ]
}

proptest! {
    #[test]
    fn matches_hashmap_oracle(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut table: ChainTable<u16, u64> = ChainTable::new();
        let mut oracle: HashMap<u16, u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(table.insert(k, v), oracle.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(table.remove(&k), oracle.remove(&k));
                }
                Op::Delete(k) => {
                    prop_assert_eq!(table.delete(&k), oracle.remove(&k).is_some());
                }
                Op::Get(k) => {
                    prop_assert_eq!(table.get(&k), oracle.get(&k));
                }
            }
            prop_assert_eq!(table.len(), oracle.len());
        }

        for (k, v) in &oracle {
            prop_assert_eq!(table.get(k), Some(v));
        }
    }

    #[test]
    fn growth_keeps_every_key(keys in proptest::collection::hash_set(any::<u64>(), 1..2_000)) {
        // A tight bound forces several growth steps.
        let mut table: ChainTable<u64, u64> = ChainTable::with_load_factor(1, 2);

        for &k in &keys {
            table.insert(k, k ^ 0xa5a5);
        }
        prop_assert_eq!(table.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(table.get(&k), Some(&(k ^ 0xa5a5)));
        }
    }
}
