//! Traversals.
//!
//! - [`Iter`]: inorder, borrowing. Can start at any position in O(log n).
//! - [`IntoIter`]: inorder, owning.
//! - [`DebugIter`]: preorder, exposing each node's rank and balance code.
//!
//! All three keep an explicit stack instead of recursing. The stack holds at
//! most one entry per level, so it stays inline for any realistic tree.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Balance, Link, Node};

/// Inline capacity of traversal stacks; an AVL tree this tall has more
/// nodes than fit in memory.
pub const STACK_INLINE: usize = 64;

type Stack<'a, T> = SmallVec<[&'a Node<T>; STACK_INLINE]>;

/// Inorder iterator over the symbols of an edit tree.
pub struct Iter<'a, T> {
    stack: Stack<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>) -> Iter<'a, T> {
        let mut iter = Iter {
            stack: Stack::new(),
            remaining: root.as_ref().map_or(0, |node| node.size),
        };
        iter.push_left(root);
        return iter;
    }

    /// Position the iterator so the first item yielded is at `start`.
    pub(crate) fn starting_at(root: &'a Link<T>, start: usize) -> Iter<'a, T> {
        let total = root.as_ref().map_or(0, |node| node.size);
        let mut index = start;
        let mut stack = Stack::new();
        let mut link = root;

        // Every node we step left of is still ahead of us; nodes we step
        // right of are behind and never pushed.
        while let Some(node) = link {
            match index.cmp(&node.rank) {
                Ordering::Less => {
                    stack.push(&**node);
                    link = &node.left;
                }
                Ordering::Equal => {
                    stack.push(&**node);
                    break;
                }
                Ordering::Greater => {
                    index -= node.rank + 1;
                    link = &node.right;
                }
            }
        }

        return Iter {
            stack,
            remaining: total.saturating_sub(start),
        };
    }

    fn push_left(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        self.remaining = self.remaining.saturating_sub(1);
        return Some(&node.value);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning inorder iterator.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>) -> IntoIter<T> {
        let remaining = root.as_ref().map_or(0, |node| node.size);
        let mut iter = IntoIter { stack: Vec::new(), remaining };
        iter.push_left(root);
        return iter;
    }

    fn push_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        self.remaining -= 1;
        return Some(node.value);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// One node as seen by [`DebugIter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugEntry<'a, T> {
    pub value: &'a T,
    pub rank: usize,
    pub balance: Balance,
}

/// Preorder iterator over `(symbol, rank, balance)` for every node.
pub struct DebugIter<'a, T> {
    stack: Stack<'a, T>,
}

impl<'a, T> DebugIter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>) -> DebugIter<'a, T> {
        let mut stack = Stack::new();
        if let Some(node) = root {
            stack.push(&**node);
        }
        return DebugIter { stack };
    }
}

impl<'a, T> Iterator for DebugIter<'a, T> {
    type Item = DebugEntry<'a, T>;

    fn next(&mut self) -> Option<DebugEntry<'a, T>> {
        let node = self.stack.pop()?;
        if let Some(right) = &node.right {
            self.stack.push(&**right);
        }
        if let Some(left) = &node.left {
            self.stack.push(&**left);
        }
        return Some(DebugEntry {
            value: &node.value,
            rank: node.rank,
            balance: node.balance,
        });
    }
}

impl<T> FusedIterator for DebugIter<'_, T> {}
