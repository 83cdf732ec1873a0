//! Quick single-run timing for development iteration.
//!
//! Usage: cargo run --release --features bench --bin edit_quick

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use edit_tree::EditTree;

fn main() {
    // Simulate typing 100k characters one at a time at the end
    let mut tree = EditTree::new();
    let start = Instant::now();
    for i in 0..100_000u32 {
        tree.push(b'a' + (i % 26) as u8);
    }
    let elapsed = start.elapsed();
    println!("100k sequential appends: {:?}", elapsed);
    println!("  per append: {:?}", elapsed / 100_000);
    println!("  height: {}, rotations: {}", tree.height(), tree.total_rotation_count());

    // Random position inserts
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = EditTree::new();
    let start = Instant::now();
    for _ in 0..100_000 {
        let pos = rng.gen_range(0..=tree.len());
        tree.insert(pos, b'x').unwrap();
    }
    let elapsed = start.elapsed();
    println!("\n100k random inserts: {:?}", elapsed);
    println!("  per insert: {:?}", elapsed / 100_000);
    println!("  height: {}, rotations: {}", tree.height(), tree.total_rotation_count());

    // Build directly from a sequence
    let data: Vec<u8> = (0..1_000_000u32).map(|i| b'a' + (i % 26) as u8).collect();
    let start = Instant::now();
    let mut tree = EditTree::from(data);
    println!("\nBuild 1M from sequence: {:?}", start.elapsed());
    println!("  height: {}", tree.height());

    // Cut and paste large ranges
    let rounds = 10_000;
    let start = Instant::now();
    for _ in 0..rounds {
        let len = tree.len();
        let pos = rng.gen_range(0..len);
        let length = rng.gen_range(0..=len - pos);
        let mut cut = match tree.delete_range(pos, length) {
            Ok(cut) => cut,
            Err(err) => panic!("{}", err),
        };
        cut.concatenate(&mut tree);
        tree = cut;
    }
    let elapsed = start.elapsed();
    println!("\n{} cut-and-paste rounds on 1M: {:?}", rounds, elapsed);
    println!("  per round: {:?}", elapsed / rounds);
    println!("  height: {}, rotations: {}", tree.height(), tree.total_rotation_count());

    // Random deletes down to empty
    let start = Instant::now();
    let mut deleted = 0u32;
    while !tree.is_empty() && deleted < 100_000 {
        let pos = rng.gen_range(0..tree.len());
        tree.delete(pos).unwrap();
        deleted += 1;
    }
    let elapsed = start.elapsed();
    println!("\n{} random deletes: {:?}", deleted, elapsed);
    println!("  per delete: {:?}", elapsed / deleted.max(1));
}
