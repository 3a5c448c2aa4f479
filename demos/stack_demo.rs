//! Arena-backed stack walkthrough
//!
//! One arena backs stacks of several element types. Set `RUST_LOG=trace` to
//! watch every allocation and release, and `ARENA_CAPACITY` to change the
//! arena size.

use anyhow::{Context, Result};
use arena_stack::{Arena, Stack};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Record {
    id: u32,
    value: f64,
    name: String,
}

impl Record {
    fn new(id: u32, value: f64, name: &str) -> Self {
        // Names are capped at 19 characters.
        let name = name.chars().take(19).collect();
        Self { id, value, name }
    }
}

fn capacity_from_env() -> Result<usize> {
    match std::env::var("ARENA_CAPACITY") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("ARENA_CAPACITY is not a byte count: {raw:?}")),
        Err(_) => Ok(2048),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Arena-Backed Stack Example");
    println!("==========================");

    let arena = Arena::new(capacity_from_env()?)?;

    println!("\nIntegers:");
    let mut ints = Stack::new(&arena);
    for i in 1..=5 {
        ints.push(i * 10)?;
        println!("  pushed {}", i * 10);
    }
    println!("  size: {}", ints.len());
    if let Some(top) = ints.top() {
        println!("  top: {top}");
    }
    let traversal: Vec<String> = ints.iter().map(ToString::to_string).collect();
    println!("  top to bottom: {}", traversal.join(" "));
    let popped: Vec<String> = ints.into_iter().map(|v| v.to_string()).collect();
    println!("  popped (LIFO): {}", popped.join(" "));

    println!("\nRecords:");
    let mut records = Stack::new(&arena);
    records.push(Record::new(1, 1.5, "first"))?;
    records.push(Record::new(2, 2.25, "second"))?;
    records.push(Record::new(3, 0.75, "third"))?;
    println!("  size: {}", records.len());
    for r in &records {
        println!("  id={} value={} name={}", r.id, r.value, r.name);
    }
    while let Some(r) = records.pop() {
        println!("  popped id={} name={}", r.id, r.name);
    }

    println!("\nMoving a stack:");
    let mut first = Stack::new(&arena);
    for v in [100, 200, 300] {
        first.push(v)?;
    }
    println!("  first size before move: {}", first.len());
    let second = first.take();
    println!("  first size after move: {} (expected 0)", first.len());
    println!("  second size after move: {} (expected 3)", second.len());
    println!("  second: {second:?}");

    println!("\nFloats:");
    let mut floats = Stack::new(&arena);
    for i in 0..5 {
        floats.push(f64::from(i) * 0.5)?;
    }
    if let Some(top) = floats.top() {
        println!("  top: {top}");
    }
    floats.clear();
    println!("  size after clear: {}", floats.len());

    println!("\nArena state:");
    println!("  {}", serde_json::to_string_pretty(&arena.stats())?);

    Ok(())
}
