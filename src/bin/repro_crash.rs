//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --bin repro_crash -- <crash_file>

use std::fs;
use edit_tree::EditTree;

const NUM_TREES: usize = 2;

#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Insert { tree: u8, pos_frac: u8, ch: u8 },
    Delete { tree: u8, pos_frac: u8 },
    DeleteRange { tree: u8, pos_frac: u8, len: u8 },
    Rotate { tree: u8, pos_frac: u8 },
    Concat { from: u8, to: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 3 => {
                let op = FuzzOp::Insert {
                    tree: rest[0] % NUM_TREES as u8,
                    pos_frac: rest[1],
                    ch: b'a' + rest[2] % 26,
                };
                Some((op, &rest[3..]))
            }
            1 if rest.len() >= 2 => {
                let op = FuzzOp::Delete {
                    tree: rest[0] % NUM_TREES as u8,
                    pos_frac: rest[1],
                };
                Some((op, &rest[2..]))
            }
            2 if rest.len() >= 3 => {
                let op = FuzzOp::DeleteRange {
                    tree: rest[0] % NUM_TREES as u8,
                    pos_frac: rest[1],
                    len: rest[2] % 32,
                };
                Some((op, &rest[3..]))
            }
            3 if rest.len() >= 2 => {
                let op = FuzzOp::Rotate {
                    tree: rest[0] % NUM_TREES as u8,
                    pos_frac: rest[1],
                };
                Some((op, &rest[2..]))
            }
            4 if rest.len() >= 2 => {
                let op = FuzzOp::Concat {
                    from: rest[0] % NUM_TREES as u8,
                    to: rest[1] % NUM_TREES as u8,
                };
                Some((op, &rest[2..]))
            }
            _ => None,
        }
    }
}

/// Scale a fuzz byte to a position in `0..=len`.
fn position(pos_frac: u8, len: usize) -> usize {
    return (pos_frac as usize * len / 255).min(len);
}

fn check(tree: &EditTree<u8>, model: &[u8]) {
    if let Err(err) = tree.validate() {
        panic!("{} in {}", err, tree.to_debug_string());
    }
    assert_eq!(tree.len(), model.len(), "Length mismatch");
    assert!(tree.iter().eq(model.iter()), "Content mismatch");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }
    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            std::process::exit(1);
        }
    };

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let mut trees: Vec<EditTree<u8>> = (0..NUM_TREES).map(|_| EditTree::new()).collect();
    let mut models: Vec<Vec<u8>> = vec![Vec::new(); NUM_TREES];
    let mut remaining = data.as_slice();
    let mut op_num = 0;

    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;
        op_num += 1;

        match op {
            FuzzOp::Insert { tree, pos_frac, ch } => {
                let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                let pos = position(pos_frac, m.len());
                eprintln!("Op {}: T{} inserts {:?} at pos={}", op_num, tree, ch as char, pos);
                t.insert(pos, ch).unwrap();
                m.insert(pos, ch);
            }

            FuzzOp::Delete { tree, pos_frac } => {
                let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                if m.is_empty() {
                    eprintln!("Op {}: T{} delete (skipped, empty)", op_num, tree);
                    assert!(t.delete(0).is_err());
                } else {
                    let pos = position(pos_frac, m.len() - 1);
                    eprintln!("Op {}: T{} deletes pos={}", op_num, tree, pos);
                    assert_eq!(t.delete(pos).unwrap(), m.remove(pos));
                }
            }

            FuzzOp::DeleteRange { tree, pos_frac, len } => {
                let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                let pos = position(pos_frac, m.len());
                let len = (len as usize).min(m.len() - pos);
                eprintln!("Op {}: T{} deletes range pos={} len={}", op_num, tree, pos, len);
                let cut = t.delete_range(pos, len).unwrap();
                let expected: Vec<u8> = m.drain(pos..pos + len).collect();
                check(&cut, &expected);
            }

            FuzzOp::Rotate { tree, pos_frac } => {
                let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                let pos = position(pos_frac, m.len());
                eprintln!("Op {}: T{} rotates at pos={}", op_num, tree, pos);
                let mut tail = t.split(pos).unwrap();
                eprintln!("  Split: {} | {}", t.to_debug_string(), tail.to_debug_string());
                check(&tail, &m[pos..]);
                tail.concatenate(t);
                assert!(t.is_empty(), "Donor not emptied");
                *t = tail;
                m.rotate_left(pos);
            }

            FuzzOp::Concat { from, to } => {
                eprintln!("Op {}: T{} -> T{}", op_num, from, to);
                if from != to {
                    let mut source = std::mem::take(&mut trees[from as usize]);
                    trees[to as usize].concatenate(&mut source);
                    assert!(source.is_empty(), "Donor not emptied");
                    let moved = std::mem::take(&mut models[from as usize]);
                    models[to as usize].extend(moved);
                } else {
                    eprintln!("  (self-concatenate, skipped)");
                }
            }
        }

        for (i, (tree, model)) in trees.iter().zip(&models).enumerate() {
            eprintln!("  T{}: len={} {}", i, tree.len(), tree.to_debug_string());
            check(tree, model);
        }
    }

    eprintln!("\nFinal state:");
    for (i, tree) in trees.iter().enumerate() {
        eprintln!(
            "  T{}: len={} height={} rotations={}",
            i,
            tree.len(),
            tree.height(),
            tree.total_rotation_count()
        );
    }

    eprintln!("\nAll checks passed!");
}
