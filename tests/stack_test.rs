use arena_stack::{AllocError, Arena, HeapResource, Stack};

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn test_int_stack_scenario() {
    let arena = Arena::new(1024).unwrap();
    let mut stack = Stack::new(&arena);

    for v in [10, 20, 30, 40, 50] {
        stack.push(v).unwrap();
    }
    assert_eq!(stack.len(), 5);
    assert_eq!(stack.top(), Some(&50));
    assert_eq!(
        stack.iter().copied().collect::<Vec<_>>(),
        vec![50, 40, 30, 20, 10]
    );

    let mut popped = Vec::new();
    while let Some(v) = stack.pop() {
        popped.push(v);
    }
    assert_eq!(popped, vec![50, 40, 30, 20, 10]);
    assert_eq!(stack.len(), 0);
    assert!(stack.is_empty());
}

#[test]
fn test_struct_stack() {
    let arena = Arena::new(2048).unwrap();
    let mut stack = Stack::new(&arena);

    stack.push(Point { x: 1, y: 2 }).unwrap();
    stack.push(Point { x: 3, y: 4 }).unwrap();
    assert_eq!(stack.top().map(|p| (p.x, p.y)), Some((3, 4)));

    stack.pop();
    assert_eq!(stack.top().map(|p| (p.x, p.y)), Some((1, 2)));
}

#[test]
fn test_range_based_for() {
    let arena = Arena::new(1024).unwrap();
    let mut stack = Stack::new(&arena);
    for i in 1..=3 {
        stack.push(i * 10).unwrap();
    }

    let mut actual = Vec::new();
    for item in &stack {
        actual.push(*item);
    }
    assert_eq!(actual, vec![30, 20, 10]);

    for item in &mut stack {
        *item += 1;
    }
    assert_eq!(stack.into_iter().collect::<Vec<_>>(), vec![31, 21, 11]);
}

#[test]
fn test_traversal_is_restartable() {
    let arena = Arena::new(1024).unwrap();
    let mut stack = Stack::new(&arena);
    for i in 1..=5 {
        stack.push(i).unwrap();
    }
    let first: Vec<_> = stack.iter().collect();
    let second: Vec<_> = stack.iter().collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![&5, &4, &3, &2, &1]);
}

#[test]
fn test_clear() {
    let arena = Arena::new(1024).unwrap();
    let mut stack = Stack::new(&arena);
    for i in 0..10 {
        stack.push(i).unwrap();
    }
    assert_eq!(stack.len(), 10);

    stack.clear();
    assert!(stack.is_empty());
    assert_eq!(stack.len(), 0);
    assert_eq!(stack.iter().count(), 0);

    // Clearing twice is fine.
    stack.clear();
    assert!(stack.is_empty());
}

#[test]
fn test_move() {
    let arena = Arena::new(1024).unwrap();
    let mut stack1 = Stack::new(&arena);
    stack1.push(100).unwrap();
    stack1.push(200).unwrap();
    stack1.push(300).unwrap();
    assert_eq!(stack1.len(), 3);

    let stack2 = stack1.take();
    assert_eq!(stack1.len(), 0);
    assert!(stack1.is_empty());
    assert_eq!(stack2.len(), 3);
    assert_eq!(stack2.top(), Some(&300));

    // A plain Rust move carries the nodes along as well.
    let stack3 = stack2;
    assert_eq!(stack3.iter().copied().collect::<Vec<_>>(), vec![300, 200, 100]);
}

#[test]
fn test_move_assignment() {
    let arena = Arena::new(1024).unwrap();
    let mut dst = Stack::new(&arena);
    dst.push(1).unwrap();
    let mut src = Stack::new(&arena);
    src.push(2).unwrap();
    src.push(3).unwrap();

    dst = src.take();
    assert_eq!(dst.len(), 2);
    assert_eq!(dst.top(), Some(&3));
    assert!(src.is_empty());
    // The old destination node went back to the ledger.
    assert_eq!(arena.live_blocks(), 2);
}

#[test]
fn test_exhaustion_after_floor_capacity_pushes() {
    const CAPACITY: usize = 256;
    let node = Stack::<'_, u64>::node_layout();
    let arena = Arena::new(CAPACITY).unwrap();
    let mut stack = Stack::new(&arena);

    let fits = CAPACITY / node.size();
    for i in 0..fits {
        stack.push(i as u64).unwrap();
    }
    let err = stack.push(0).unwrap_err();
    assert!(matches!(err, AllocError::OutOfMemory { .. }));
    assert_eq!(stack.len(), fits);
    assert_eq!(stack.top(), Some(&(fits as u64 - 1)));
}

#[test]
fn test_allocation_failure_small_arena() {
    let arena = Arena::new(64).unwrap();
    let mut stack = Stack::new(&arena);

    stack.push(1).unwrap();
    let mut succeeded = 1;
    let mut failed = false;
    for i in 0..100 {
        match stack.push(i) {
            Ok(()) => succeeded += 1,
            Err(e) => {
                assert!(e.is_out_of_memory());
                failed = true;
                break;
            }
        }
    }
    assert!(failed);
    assert_eq!(stack.len(), succeeded);

    // Still usable after the failure.
    assert!(stack.pop().is_some());
    assert_eq!(stack.len(), succeeded - 1);
}

#[test]
fn test_memory_reuse_across_lifetimes() {
    let arena = Arena::new(512).unwrap();
    let node = Stack::<'_, i32>::node_layout().size();

    {
        let mut stack1 = Stack::new(&arena);
        stack1.push(1).unwrap();
        stack1.push(2).unwrap();
        stack1.push(3).unwrap();
    }
    assert_eq!(arena.live_blocks(), 0);
    assert_eq!(arena.used(), 3 * node);

    {
        let mut stack2 = Stack::new(&arena);
        stack2.push(10).unwrap();
        stack2.push(20).unwrap();
        assert_eq!(stack2.top(), Some(&20));
    }
    assert_eq!(arena.used(), 5 * node);
}

#[test]
fn test_released_space_is_never_reclaimed() {
    let node = Stack::<'_, i32>::node_layout().size();
    let arena = Arena::new(4 * node).unwrap();

    {
        let mut first = Stack::new(&arena);
        for i in 0..3 {
            first.push(i).unwrap();
        }
    }

    let mut second = Stack::new(&arena);
    second.push(7).unwrap();
    // Only the untouched tail counts, not the three released nodes.
    assert!(second.push(8).unwrap_err().is_out_of_memory());
    assert_eq!(second.len(), 1);
}

#[test]
fn test_mixed_types_share_one_arena() {
    let arena = Arena::new(2048).unwrap();
    let mut ints = Stack::new(&arena);
    let mut points = Stack::new(&arena);
    let mut floats = Stack::new(&arena);

    for i in 0..5 {
        ints.push(i).unwrap();
        points.push(Point { x: i, y: -i }).unwrap();
        floats.push(f64::from(i) * 0.5).unwrap();
    }

    assert!(ints.shares_resource_with(&points));
    assert!(points.shares_resource_with(&floats));
    assert_eq!(arena.live_blocks(), 15);
    assert_eq!(floats.top(), Some(&2.0));
    assert_eq!(points.top(), Some(&Point { x: 4, y: -4 }));

    floats.clear();
    assert_eq!(arena.live_blocks(), 10);
}

#[test]
fn test_distinct_arenas_are_not_shared() {
    let a = Arena::new(128).unwrap();
    let b = Arena::new(128).unwrap();
    let sa: Stack<'_, u8> = Stack::new(&a);
    let sb: Stack<'_, u8> = Stack::new(&b);
    assert!(!sa.shares_resource_with(&sb));
    assert!(sa.resource().is_same(&a));
}

#[test]
fn test_stack_over_external_buffer() {
    let mut buf = [0u8; 256];
    let arena = Arena::from_buffer(&mut buf);
    let mut stack = Stack::new(&arena);
    stack.push(String::from("borrowed")).unwrap();
    stack.push(String::from("buffer")).unwrap();
    assert_eq!(
        stack.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["buffer", "borrowed"]
    );
}

#[test]
fn test_heap_backed_stack_never_exhausts() {
    let heap = HeapResource::new();
    let mut stack = Stack::new_in(&heap);
    for i in 0..10_000 {
        stack.push(i).unwrap();
    }
    assert_eq!(stack.len(), 10_000);
    assert_eq!(stack.top(), Some(&9_999));
}
