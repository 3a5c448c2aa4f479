use arena_stack::{Arena, Stack};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Push(i32),
    Pop,
    Clear,
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            4 => any::<i32>().prop_map(Operation::Push),
            3 => Just(Operation::Pop),
            1 => Just(Operation::Clear),
        ],
        1..200,
    )
}

proptest! {
    #[test]
    fn test_stack_matches_vec_model(ops in operations()) {
        let arena = Arena::new(64 * 1024).unwrap();
        let mut stack = Stack::new(&arena);
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Operation::Push(v) => {
                    stack.push(v).unwrap();
                    model.push(v);
                    prop_assert_eq!(stack.top(), Some(&v));
                }
                Operation::Pop => {
                    prop_assert_eq!(stack.pop(), model.pop());
                }
                Operation::Clear => {
                    stack.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(stack.len(), model.len());
            prop_assert_eq!(stack.is_empty(), model.is_empty());
            prop_assert_eq!(arena.live_blocks(), model.len());
        }

        let traversed: Vec<i32> = stack.iter().copied().collect();
        let expected: Vec<i32> = model.iter().rev().copied().collect();
        prop_assert_eq!(traversed, expected);
    }

    #[test]
    fn test_cursor_never_moves_back(ops in operations()) {
        let arena = Arena::new(64 * 1024).unwrap();
        let mut stack = Stack::new(&arena);
        let mut pushes = 0usize;
        let mut last_used = 0;

        for op in ops {
            match op {
                Operation::Push(v) => {
                    stack.push(v).unwrap();
                    pushes += 1;
                }
                Operation::Pop => {
                    stack.pop();
                }
                Operation::Clear => stack.clear(),
            }
            prop_assert!(arena.used() >= last_used);
            last_used = arena.used();
        }

        prop_assert_eq!(arena.used(), pushes * Stack::<'_, i32>::node_layout().size());
    }

    #[test]
    fn test_failed_push_leaves_stack_unchanged(capacity in 0usize..512, extra in 1usize..16) {
        let arena = Arena::new(capacity).unwrap();
        let mut stack = Stack::new(&arena);
        let fits = capacity / Stack::<'_, u32>::node_layout().size();

        for i in 0..fits {
            prop_assert!(stack.push(i as u32).is_ok());
        }
        for _ in 0..extra {
            let before = stack.len();
            prop_assert!(stack.push(0).unwrap_err().is_out_of_memory());
            prop_assert_eq!(stack.len(), before);
        }
        prop_assert_eq!(stack.len(), fits);
    }
}
