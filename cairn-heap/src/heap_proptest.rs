//! Property tests: heap behavior against a map model.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::Heap;

#[derive(Debug, Clone)]
enum Op {
    Push(u16, u64),
    Update(u16, u64),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..48u16, any::<u64>()).prop_map(|(e, p)| Op::Push(e, p)),
        (0..48u16, any::<u64>()).prop_map(|(e, p)| Op::Update(e, p)),
        Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn matches_map_model(ops in proptest::collection::vec(op_strategy(), 1..300)) {
        let mut heap: Heap<u64, u16> = Heap::with_capacity(1);
        let mut model: HashMap<u16, u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Push(elt, pty) => {
                    // Pushing a present element is a contract violation;
                    // the model filters those out.
                    if !model.contains_key(&elt) {
                        heap.push(pty, elt);
                        model.insert(elt, pty);
                    }
                }
                Op::Update(elt, pty) => {
                    if model.contains_key(&elt) {
                        heap.update(pty, &elt);
                        model.insert(elt, pty);
                    }
                }
                Op::Pop => {
                    match heap.pop() {
                        Some((pty, elt)) => {
                            prop_assert_eq!(model.remove(&elt), Some(pty));
                        }
                        None => prop_assert!(model.is_empty()),
                    }
                }
            }
            heap.assert_invariants();
            prop_assert_eq!(heap.len(), model.len());
        }

        // Every surviving element reads back its model priority, and the
        // drain is non-decreasing.
        for (elt, pty) in &model {
            prop_assert_eq!(heap.get(elt), Some(pty));
        }
        let mut prev: Option<u64> = None;
        while let Some((pty, elt)) = heap.pop() {
            if let Some(prev) = prev {
                prop_assert!(pty >= prev);
            }
            prop_assert_eq!(model.remove(&elt), Some(pty));
            prev = Some(pty);
        }
        prop_assert!(model.is_empty());
    }
}
