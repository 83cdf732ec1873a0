//! Edit Tree
//!
//! A sequence of symbols stored in a height-balanced binary tree ordered by
//! position. Every node caches its rank (the size of its left subtree), so
//! indexed access, insertion and deletion are O(log n), and two trees can be
//! joined or one split in two in time bounded by their height.
//!
//! # Complexity
//!
//! | operation                  | cost                     |
//! |----------------------------|--------------------------|
//! | `get`, `insert`, `delete`  | O(log n)                 |
//! | `push`                     | O(log n), right spine    |
//! | `concatenate`              | O(log max(n, m))         |
//! | `split`, `delete_range`    | O(log² n)                |
//! | `get_range(pos, k)`        | O(log n + k)             |
//! | `find(pattern)`            | O(n · m)                 |
//! | build from a sequence      | O(n), no rotations       |

mod balance;
mod iter;
mod node;
mod positional;
mod splice;

use std::fmt;

use log::debug;

use crate::error::{EditError, InvariantError};

use balance::Balancer;
pub use iter::{DebugEntry, DebugIter, IntoIter, Iter, STACK_INLINE};
pub use node::{Balance, Node};
use node::Link;

/// A positional sequence container backed by a rank-augmented AVL tree.
pub struct EditTree<T = char> {
    root: Link<T>,
    balancer: Balancer,
}

impl<T> EditTree<T> {
    /// An empty tree.
    pub fn new() -> EditTree<T> {
        return EditTree {
            root: None,
            balancer: Balancer::new(),
        };
    }

    /// A tree holding a single symbol.
    pub fn single(value: T) -> EditTree<T> {
        return EditTree {
            root: Some(Node::leaf(value)),
            balancer: Balancer::new(),
        };
    }

    fn from_root(root: Link<T>) -> EditTree<T> {
        return EditTree {
            root,
            balancer: Balancer::new(),
        };
    }

    /// Build a balanced tree from `len` items in O(len), without rotations.
    fn build_exact<I>(items: I, len: usize) -> EditTree<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter();
        let tree = EditTree::from_root(splice::build(&mut items, len));
        debug!("built tree of {} from sequence, height {}", tree.len(), tree.height());
        return tree;
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        return node::size(&self.root);
    }

    pub fn is_empty(&self) -> bool {
        return self.root.is_none();
    }

    /// Height of the tree; an empty tree is -1 tall and a single node is 0.
    pub fn height(&self) -> i32 {
        return node::height(&self.root);
    }

    /// Rotations done in this tree since it was created. A double rotation
    /// counts as two.
    pub fn total_rotation_count(&self) -> usize {
        return self.balancer.rotations();
    }

    /// The root node, for inspecting shape in diagnostics.
    pub fn root(&self) -> Option<&Node<T>> {
        return self.root.as_deref();
    }

    pub fn get(&self, pos: usize) -> Result<&T, EditError> {
        let len = self.len();
        return positional::get(&self.root, pos).ok_or(EditError::OutOfRange { pos, len });
    }

    pub fn get_mut(&mut self, pos: usize) -> Result<&mut T, EditError> {
        let len = self.len();
        return positional::get_mut(&mut self.root, pos).ok_or(EditError::OutOfRange { pos, len });
    }

    pub fn first(&self) -> Option<&T> {
        return positional::get(&self.root, 0);
    }

    pub fn last(&self) -> Option<&T> {
        return positional::get(&self.root, self.len().checked_sub(1)?);
    }

    /// Clones of the `length` symbols starting at `pos`.
    ///
    /// The whole range is checked before anything is read.
    pub fn get_range(&self, pos: usize, length: usize) -> Result<Vec<T>, EditError>
    where
        T: Clone,
    {
        self.check_range(pos, length)?;
        return Ok(self.iter_from(pos).take(length).cloned().collect());
    }

    /// Append a symbol.
    pub fn push(&mut self, value: T) {
        positional::push(&mut self.root, value, &mut self.balancer);
    }

    /// Insert `value` so that it lands at `pos`; `pos == len()` appends.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<(), EditError> {
        let len = self.len();
        if pos > len {
            return Err(EditError::OutOfRange { pos, len });
        }
        let inserted = positional::insert(&mut self.root, pos, value, &mut self.balancer);
        debug_assert!(inserted);
        return Ok(());
    }

    /// Remove and return the symbol at `pos`.
    pub fn delete(&mut self, pos: usize) -> Result<T, EditError> {
        let len = self.len();
        return positional::remove(&mut self.root, pos, &mut self.balancer)
            .ok_or(EditError::OutOfRange { pos, len });
    }

    /// Remove `length` symbols starting at `pos` and return them as a tree.
    ///
    /// Done as two splits and a concatenation, so the cost is bounded by the
    /// height of the tree, not by `length`.
    pub fn delete_range(&mut self, pos: usize, length: usize) -> Result<EditTree<T>, EditError> {
        self.check_range(pos, length)?;
        let (head, rest) = splice::split(self.root.take(), pos, &mut self.balancer);
        let (middle, tail) = splice::split(rest, length, &mut self.balancer);
        self.root = splice::concat(head, tail, &mut self.balancer);
        debug!("deleted {} at {}, {} left", length, pos, self.len());
        return Ok(EditTree::from_root(middle));
    }

    /// Move every symbol of `other` onto the end of this tree, leaving
    /// `other` empty.
    pub fn concatenate(&mut self, other: &mut EditTree<T>) {
        let (left_height, right_height) = (self.height(), other.height());
        let right = other.root.take();
        self.root = splice::concat(self.root.take(), right, &mut self.balancer);
        debug!(
            "concatenated trees of height {} and {} into height {}",
            left_height,
            right_height,
            self.height()
        );
    }

    /// Keep positions `[0, pos)` in this tree and return the rest as a new
    /// tree. `pos == len()` returns an empty tree.
    pub fn split(&mut self, pos: usize) -> Result<EditTree<T>, EditError> {
        let len = self.len();
        if pos > len {
            return Err(EditError::OutOfRange { pos, len });
        }
        return Ok(self.split_saturating(pos));
    }

    /// [`split`](EditTree::split) without the bounds check: a `pos` past the
    /// end keeps everything here and returns an empty tree.
    pub(crate) fn split_saturating(&mut self, pos: usize) -> EditTree<T> {
        let len = self.len();
        let (lower, upper) = splice::split(self.root.take(), pos, &mut self.balancer);
        self.root = lower;
        let upper = EditTree::from_root(upper);
        debug!("split {} at {} into {} and {}", len, pos, self.len(), upper.len());
        return upper;
    }

    /// Drop every symbol. The rotation count is kept.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Position of the first occurrence of `pattern`.
    pub fn find(&self, pattern: &[T]) -> Option<usize>
    where
        T: PartialEq,
    {
        return self.find_from(pattern, 0);
    }

    /// Position of the first occurrence of `pattern` starting at or after
    /// `from`. An empty pattern matches at `from`.
    pub fn find_from(&self, pattern: &[T], from: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        let len = self.len();
        if from > len || pattern.len() > len - from {
            return None;
        }
        let last_start = len - pattern.len();
        return (from..=last_start).find(|&start| {
            self.iter_from(start).zip(pattern).all(|(have, want)| have == want)
        });
    }

    /// Inorder iterator over every symbol.
    pub fn iter(&self) -> Iter<'_, T> {
        return Iter::new(&self.root);
    }

    /// Inorder iterator starting at `pos`. Empty if `pos >= len()`.
    pub fn iter_from(&self, pos: usize) -> Iter<'_, T> {
        return Iter::starting_at(&self.root, pos);
    }

    /// Preorder `(symbol, rank, balance)` for every node.
    pub fn debug_iter(&self) -> DebugIter<'_, T> {
        return DebugIter::new(&self.root);
    }

    /// Preorder listing of every node as symbol, rank and balance code,
    /// e.g. `[b1=, a0=, c0=]`.
    pub fn to_debug_string(&self) -> String
    where
        T: fmt::Display,
    {
        let entries: Vec<String> = self
            .debug_iter()
            .map(|entry| format!("{}{}{}", entry.value, entry.rank, entry.balance))
            .collect();
        return format!("[{}]", entries.join(", "));
    }

    /// The symbols in order, cloned into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        return self.iter().cloned().collect();
    }

    /// Recompute every cached field from scratch and report the first one
    /// that disagrees with the tree's shape.
    pub fn validate(&self) -> Result<(), EditError> {
        check(&self.root, 0)?;
        return Ok(());
    }

    fn check_range(&self, pos: usize, length: usize) -> Result<(), EditError> {
        let len = self.len();
        match pos.checked_add(length) {
            Some(end) if end <= len => Ok(()),
            _ => Err(EditError::RangeOutOfRange { pos, length, len }),
        }
    }
}

/// Returns `(size, height)` of a subtree whose leftmost node sits at
/// `offset`, or the first invariant it breaks.
fn check<T>(link: &Link<T>, offset: usize) -> Result<(usize, i32), InvariantError> {
    let Some(node) = link else {
        return Ok((0, -1));
    };
    let (left_size, left_height) = check(&node.left, offset)?;
    let pos = offset + left_size;
    let (right_size, right_height) = check(&node.right, pos + 1)?;

    let size = left_size + right_size + 1;
    let height = 1 + left_height.max(right_height);
    let balance = Balance::from_skew(right_height - left_height);

    if node.rank != left_size {
        return Err(InvariantError::RankMismatch { pos, rank: node.rank, actual: left_size });
    }
    if node.size != size {
        return Err(InvariantError::SizeMismatch { pos, size: node.size, actual: size });
    }
    if node.height != height {
        return Err(InvariantError::HeightMismatch { pos, height: node.height, actual: height });
    }
    if (right_height - left_height).abs() > 1 {
        return Err(InvariantError::Unbalanced { pos, left: left_height, right: right_height });
    }
    if node.balance != balance {
        return Err(InvariantError::BalanceMismatch { pos, cached: node.balance, actual: balance });
    }
    return Ok((size, height));
}

impl EditTree<char> {
    /// The `length` characters starting at `pos` as a string.
    pub fn substring(&self, pos: usize, length: usize) -> Result<String, EditError> {
        self.check_range(pos, length)?;
        return Ok(self.iter_from(pos).take(length).collect());
    }

    pub fn find_str(&self, pattern: &str) -> Option<usize> {
        return self.find_str_from(pattern, 0);
    }

    pub fn find_str_from(&self, pattern: &str, from: usize) -> Option<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        return self.find_from(&pattern, from);
    }
}

impl<T> Default for EditTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A copy with all new nodes in the same shape. The copy's rotation count
/// starts at zero.
impl<T: Clone> Clone for EditTree<T> {
    fn clone(&self) -> Self {
        EditTree::from_root(self.root.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for EditTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for EditTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<T: PartialEq> PartialEq for EditTree<T> {
    /// Trees are equal when they hold the same sequence, whatever the shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for EditTree<T> {}

impl<T> From<Vec<T>> for EditTree<T> {
    fn from(items: Vec<T>) -> Self {
        let len = items.len();
        EditTree::build_exact(items, len)
    }
}

impl From<&str> for EditTree<char> {
    fn from(text: &str) -> Self {
        EditTree::build_exact(text.chars(), text.chars().count())
    }
}

impl<T> FromIterator<T> for EditTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        EditTree::from(items)
    }
}

impl<T> Extend<T> for EditTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let mut tail: EditTree<T> = items.into_iter().collect();
        self.concatenate(&mut tail);
    }
}

impl<T> IntoIterator for EditTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.root)
    }
}

impl<'a, T> IntoIterator for &'a EditTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
