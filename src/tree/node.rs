//! Rank Tree Node
//!
//! One stored symbol plus the cached data that makes positional lookup
//! logarithmic. Subtrees are owned outright: a child slot is a [`Link`],
//! which is `None` for the empty subtree.
//!
//! Cached fields, all recomputed by [`Node::update`] from the two children:
//! - `rank`: number of nodes in `left`, i.e. the node's inorder position
//!   within its own subtree
//! - `height`: 1 + max child height, with the empty subtree at -1
//! - `size`: nodes in the subtree, `size(left) + size(right) + 1`
//! - `balance`: sign of `height(right) - height(left)`

use std::fmt;

/// An owned, possibly empty subtree.
pub type Link<T> = Option<Box<Node<T>>>;

/// Which side of a node is taller, if either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    /// The left subtree is one taller.
    Left,
    /// Both subtrees have the same height.
    Same,
    /// The right subtree is one taller.
    Right,
}

impl Balance {
    pub(crate) fn from_skew(skew: i32) -> Balance {
        return match skew {
            s if s < 0 => Balance::Left,
            0 => Balance::Same,
            _ => Balance::Right,
        };
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Balance::Left => "/",
            Balance::Same => "=",
            Balance::Right => "\\",
        };
        return f.write_str(code);
    }
}

/// A node of the rank tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) rank: usize,
    pub(crate) height: i32,
    pub(crate) size: usize,
    pub(crate) balance: Balance,
}

/// Height of a subtree; the empty subtree is -1 tall.
#[inline(always)]
pub fn height<T>(link: &Link<T>) -> i32 {
    return link.as_ref().map_or(-1, |node| node.height);
}

/// Number of nodes in a subtree.
#[inline(always)]
pub fn size<T>(link: &Link<T>) -> usize {
    return link.as_ref().map_or(0, |node| node.size);
}

impl<T> Node<T> {
    /// A detached node with no children.
    pub fn leaf(value: T) -> Box<Node<T>> {
        return Box::new(Node {
            value,
            left: None,
            right: None,
            rank: 0,
            height: 0,
            size: 1,
            balance: Balance::Same,
        });
    }

    /// The stored symbol.
    pub fn value(&self) -> &T {
        return &self.value;
    }

    /// Inorder position of this node within its own subtree.
    pub fn rank(&self) -> usize {
        return self.rank;
    }

    /// Which side is taller, as cached at the last update.
    pub fn balance(&self) -> Balance {
        return self.balance;
    }

    /// Height of this node's subtree; a leaf is 0.
    pub fn height(&self) -> i32 {
        return self.height;
    }

    /// Number of nodes in this node's subtree, itself included.
    pub fn size(&self) -> usize {
        return self.size;
    }

    /// Root of the left subtree, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        return self.left.as_deref();
    }

    /// Root of the right subtree, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        return self.right.as_deref();
    }

    /// `height(right) - height(left)`.
    #[inline(always)]
    pub(crate) fn skew(&self) -> i32 {
        return height(&self.right) - height(&self.left);
    }

    /// Recompute every cached field from the children.
    #[inline]
    pub(crate) fn update(&mut self) {
        let left_size = size(&self.left);
        self.rank = left_size;
        self.size = left_size + size(&self.right) + 1;
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.balance = Balance::from_skew(self.skew());
    }

    /// Take both children, leaving a leaf ready to be used as a connector.
    pub(crate) fn detach(&mut self) -> (Link<T>, Link<T>) {
        let left = self.left.take();
        let right = self.right.take();
        self.update();
        return (left, right);
    }

    /// Hang `left` and `right` under this node and refresh the cached data.
    /// Does not rebalance.
    pub(crate) fn attach(&mut self, left: Link<T>, right: Link<T>) {
        self.left = left;
        self.right = right;
        self.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: char, left: Link<char>, right: Link<char>) -> Link<char> {
        let mut node = Node::leaf(value);
        node.attach(left, right);
        Some(node)
    }

    #[test]
    fn leaf_fields() {
        let leaf = Node::leaf('x');
        assert_eq!(leaf.rank(), 0);
        assert_eq!(leaf.size(), 1);
        assert_eq!(leaf.height(), 0);
        assert_eq!(leaf.balance(), Balance::Same);
    }

    #[test]
    fn empty_link_conventions() {
        let empty: Link<char> = None;
        assert_eq!(height(&empty), -1);
        assert_eq!(size(&empty), 0);
    }

    #[test]
    fn attach_recomputes_cached_fields() {
        let a = node('a', None, None);
        let c = node('c', None, None);
        let d = node('d', c, None);
        let b = node('b', a, d).unwrap();

        assert_eq!(b.rank(), 1);
        assert_eq!(b.size(), 4);
        assert_eq!(b.height(), 2);
        assert_eq!(b.balance(), Balance::Right);
        assert_eq!(b.right().unwrap().balance(), Balance::Left);
    }

    #[test]
    fn detach_resets_to_leaf() {
        let a = node('a', None, None);
        let mut b = node('b', a, None).unwrap();
        let (left, right) = b.detach();
        assert!(left.is_some());
        assert!(right.is_none());
        assert_eq!(b.size(), 1);
        assert_eq!(b.height(), 0);
        assert_eq!(b.rank(), 0);
    }

    #[test]
    fn balance_codes() {
        assert_eq!(Balance::Left.to_string(), "/");
        assert_eq!(Balance::Same.to_string(), "=");
        assert_eq!(Balance::Right.to_string(), "\\");
    }
}
