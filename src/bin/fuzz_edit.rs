//! AFL Fuzz harness for the edit tree
//!
//! Drives two trees with random edits, mirroring every edit on a `Vec`, and
//! checks after each step that:
//! 1. Contents: each tree holds exactly what its `Vec` model holds
//! 2. Shape: every rank, size, height and balance code is consistent and
//!    every node is height-balanced
//! 3. Ownership: a concatenated or split-off tree is left empty

use afl::fuzz;
use edit_tree::EditTree;

const NUM_TREES: usize = 2;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert one symbol
    Insert { tree: u8, pos_frac: u8, ch: u8 },
    /// Delete one symbol
    Delete { tree: u8, pos_frac: u8 },
    /// Delete a range through split + split + concatenate
    DeleteRange { tree: u8, pos_frac: u8, len: u8 },
    /// Split and rejoin with the halves swapped
    Rotate { tree: u8, pos_frac: u8 },
    /// Move all of one tree onto the end of the other
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
    fuzz!(|data: &[u8]| {
        let mut trees: Vec<EditTree<u8>> = (0..NUM_TREES).map(|_| EditTree::new()).collect();
        let mut models: Vec<Vec<u8>> = vec![Vec::new(); NUM_TREES];
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Insert { tree, pos_frac, ch } => {
                    let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                    let pos = position(pos_frac, m.len());
                    t.insert(pos, ch).unwrap();
                    m.insert(pos, ch);
                }

                FuzzOp::Delete { tree, pos_frac } => {
                    let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                    if m.is_empty() {
                        assert!(t.delete(0).is_err());
                    } else {
                        let pos = position(pos_frac, m.len() - 1);
                        assert_eq!(t.delete(pos).unwrap(), m.remove(pos));
                    }
                }

                FuzzOp::DeleteRange { tree, pos_frac, len } => {
                    let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                    let pos = position(pos_frac, m.len());
                    let len = (len as usize).min(m.len() - pos);
                    let cut = t.delete_range(pos, len).unwrap();
                    let expected: Vec<u8> = m.drain(pos..pos + len).collect();
                    check(&cut, &expected);
                }

                FuzzOp::Rotate { tree, pos_frac } => {
                    let (t, m) = (&mut trees[tree as usize], &mut models[tree as usize]);
                    let pos = position(pos_frac, m.len());
                    let mut tail = t.split(pos).unwrap();
                    check(&tail, &m[pos..]);
                    tail.concatenate(t);
                    assert!(t.is_empty(), "Donor not emptied");
                    *t = tail;
                    m.rotate_left(pos);
                }

                FuzzOp::Concat { from, to } => {
                    if from != to {
                        let mut source = std::mem::take(&mut trees[from as usize]);
                        trees[to as usize].concatenate(&mut source);
                        assert!(source.is_empty(), "Donor not emptied");
                        let moved = std::mem::take(&mut models[from as usize]);
                        models[to as usize].extend(moved);
                    }
                }
            }

            for (tree, model) in trees.iter().zip(&models) {
                check(tree, model);
            }
        }
    });
}
