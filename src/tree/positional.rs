//! Positional search and mutation.
//!
//! All positions are 0-based inorder indexes relative to the subtree being
//! visited. At each node the target is compared against `rank`: smaller goes
//! left, larger goes right with `rank + 1` subtracted, equal is this node.
//!
//! Mutations descend through `&mut Link` slots and rebalance each slot on
//! the way back up. Nothing is changed until the bottom of the descent is
//! reached, so a position that falls off the tree returns `None` with the
//! tree untouched.

use std::cmp::Ordering;

use super::balance::Balancer;
use super::node::{Link, Node};

/// The symbol at `index`, or `None` past the end.
pub fn get<T>(mut link: &Link<T>, mut index: usize) -> Option<&T> {
    while let Some(node) = link {
        match index.cmp(&node.rank) {
            Ordering::Less => link = &node.left,
            Ordering::Equal => return Some(&node.value),
            Ordering::Greater => {
                index -= node.rank + 1;
                link = &node.right;
            }
        }
    }
    return None;
}

pub fn get_mut<T>(mut link: &mut Link<T>, mut index: usize) -> Option<&mut T> {
    while let Some(node) = link {
        match index.cmp(&node.rank) {
            Ordering::Less => link = &mut node.left,
            Ordering::Equal => return Some(&mut node.value),
            Ordering::Greater => {
                index -= node.rank + 1;
                link = &mut node.right;
            }
        }
    }
    return None;
}

/// Insert `value` so that it ends up at `index`. `index` may equal the
/// subtree size. Returns `false` (and changes nothing) if it is larger.
pub fn insert<T>(slot: &mut Link<T>, index: usize, value: T, balancer: &mut Balancer) -> bool {
    let Some(node) = slot.as_mut() else {
        if index != 0 {
            return false;
        }
        *slot = Some(Node::leaf(value));
        return true;
    };

    let inserted = if index <= node.rank {
        insert(&mut node.left, index, value, balancer)
    } else {
        insert(&mut node.right, index - node.rank - 1, value, balancer)
    };

    if inserted {
        balancer.rebalance_slot(slot);
    }
    return inserted;
}

/// Append `value` after the last element, walking only the right spine.
pub fn push<T>(slot: &mut Link<T>, value: T, balancer: &mut Balancer) {
    match slot.as_mut() {
        None => *slot = Some(Node::leaf(value)),
        Some(node) => {
            push(&mut node.right, value, balancer);
            balancer.rebalance_slot(slot);
        }
    }
}

/// Remove and return the symbol at `index`.
///
/// A node with two children keeps its place: it takes the value of its
/// inorder successor, and the successor's node is unlinked from the right
/// subtree instead.
pub fn remove<T>(slot: &mut Link<T>, index: usize, balancer: &mut Balancer) -> Option<T> {
    let node = slot.as_mut()?;

    let removed = match index.cmp(&node.rank) {
        Ordering::Less => remove(&mut node.left, index, balancer)?,
        Ordering::Greater => remove(&mut node.right, index - node.rank - 1, balancer)?,
        Ordering::Equal => {
            let mut target = slot.take()?;
            let removed = match target.detach() {
                (None, None) => target.value,
                (Some(child), None) | (None, Some(child)) => {
                    *slot = Some(child);
                    target.value
                }
                (left, Some(right)) => {
                    let (rest, mut successor) = pop_first(right, balancer);
                    std::mem::swap(&mut target.value, &mut successor.value);
                    target.attach(left, rest);
                    *slot = Some(balancer.rebalance(target));
                    successor.value
                }
            };
            return Some(removed);
        }
    };

    balancer.rebalance_slot(slot);
    return Some(removed);
}

/// Unlink the leftmost node of a non-empty subtree.
///
/// Returns what is left of the subtree (rebalanced) and the detached node,
/// which comes back as a childless leaf.
pub fn pop_first<T>(mut node: Box<Node<T>>, balancer: &mut Balancer) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => {
            let (_, rest) = node.detach();
            return (rest, node);
        }
        Some(left) => {
            let (rest, first) = pop_first(left, balancer);
            node.left = rest;
            return (Some(balancer.rebalance(node)), first);
        }
    }
}

/// Unlink the rightmost node of a non-empty subtree.
pub fn pop_last<T>(mut node: Box<Node<T>>, balancer: &mut Balancer) -> (Link<T>, Box<Node<T>>) {
    match node.right.take() {
        None => {
            let (rest, _) = node.detach();
            return (rest, node);
        }
        Some(right) => {
            let (rest, last) = pop_last(right, balancer);
            node.right = rest;
            return (Some(balancer.rebalance(node)), last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{size, Balance};

    fn build(text: &str, balancer: &mut Balancer) -> Link<char> {
        let mut root = None;
        for ch in text.chars() {
            push(&mut root, ch, balancer);
        }
        root
    }

    fn collect(link: &Link<char>) -> String {
        (0..size(link)).map(|i| *get(link, i).unwrap()).collect()
    }

    #[test]
    fn push_three_rebalances_once() {
        let mut balancer = Balancer::new();
        let root = build("abc", &mut balancer);
        let node = root.as_ref().unwrap();
        assert_eq!(node.value, 'b');
        assert_eq!(node.rank, 1);
        assert_eq!(node.balance, Balance::Same);
        assert_eq!(balancer.rotations(), 1);
    }

    #[test]
    fn get_walks_by_rank() {
        let mut balancer = Balancer::new();
        let root = build("abcdefg", &mut balancer);
        assert_eq!(collect(&root), "abcdefg");
        assert_eq!(get(&root, 7), None);
    }

    #[test]
    fn get_mut_replaces_in_place() {
        let mut balancer = Balancer::new();
        let mut root = build("abc", &mut balancer);
        *get_mut(&mut root, 2).unwrap() = 'z';
        assert_eq!(collect(&root), "abz");
    }

    #[test]
    fn insert_in_front_and_middle() {
        let mut balancer = Balancer::new();
        let mut root = build("ace", &mut balancer);
        assert!(insert(&mut root, 0, '_', &mut balancer));
        assert!(insert(&mut root, 2, 'b', &mut balancer));
        assert!(insert(&mut root, 4, 'd', &mut balancer));
        assert!(insert(&mut root, 6, '!', &mut balancer));
        assert_eq!(collect(&root), "_abcde!");
    }

    #[test]
    fn insert_past_end_changes_nothing() {
        let mut balancer = Balancer::new();
        let mut root = build("ab", &mut balancer);
        assert!(!insert(&mut root, 3, 'x', &mut balancer));
        assert_eq!(collect(&root), "ab");

        let mut empty: Link<char> = None;
        assert!(!insert(&mut empty, 1, 'x', &mut balancer));
        assert!(empty.is_none());
    }

    #[test]
    fn remove_leaf_keeps_root() {
        let mut balancer = Balancer::new();
        let mut root = build("abc", &mut balancer);
        assert_eq!(remove(&mut root, 2, &mut balancer), Some('c'));
        let node = root.as_ref().unwrap();
        assert_eq!(node.value, 'b');
        assert_eq!(node.rank, 1);
        assert_eq!(node.balance, Balance::Left);
        assert_eq!(collect(&root), "ab");
    }

    #[test]
    fn remove_two_children_uses_successor() {
        let mut balancer = Balancer::new();
        let mut root = build("abc", &mut balancer);
        assert_eq!(remove(&mut root, 1, &mut balancer), Some('b'));
        let node = root.as_ref().unwrap();
        assert_eq!(node.value, 'c');
        assert_eq!(node.rank, 1);
        assert_eq!(collect(&root), "ac");
    }

    #[test]
    fn remove_out_of_range() {
        let mut balancer = Balancer::new();
        let mut root = build("ab", &mut balancer);
        assert_eq!(remove(&mut root, 2, &mut balancer), None);
        assert_eq!(collect(&root), "ab");
    }

    #[test]
    fn remove_everything() {
        let mut balancer = Balancer::new();
        let mut root = build("abcdefghij", &mut balancer);
        for expected in "abcdefghij".chars() {
            assert_eq!(remove(&mut root, 0, &mut balancer), Some(expected));
        }
        assert!(root.is_none());
    }

    #[test]
    fn pop_ends() {
        let mut balancer = Balancer::new();
        let root = build("abcde", &mut balancer).unwrap();
        let (rest, first) = pop_first(root, &mut balancer);
        assert_eq!(first.value, 'a');
        assert_eq!(first.size, 1);
        let (rest, last) = pop_last(rest.unwrap(), &mut balancer);
        assert_eq!(last.value, 'e');
        assert_eq!(collect(&rest), "bcd");
    }
}
