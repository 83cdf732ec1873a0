//! Rotation machinery.
//!
//! Every function here takes a subtree by value and hands back the new
//! subtree root, so the caller re-attaches whatever node ended up on top.
//! The [`Balancer`] carries the per-tree rotation counter; a double rotation
//! is two single rotations and counts as two.

use log::trace;

use super::node::{Balance, Link, Node};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balancer {
    rotations: usize,
}

impl Balancer {
    pub fn new() -> Balancer {
        return Balancer { rotations: 0 };
    }

    /// Rotations performed since this balancer was created.
    pub fn rotations(&self) -> usize {
        return self.rotations;
    }

    /// The right child becomes the subtree root.
    pub fn rotate_left<T>(&mut self, mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        node.right = pivot.left.take();
        node.update();
        pivot.left = Some(node);
        pivot.update();
        self.rotations += 1;
        trace!("rotate left, new subtree size {}", pivot.size);
        return pivot;
    }

    /// The left child becomes the subtree root.
    pub fn rotate_right<T>(&mut self, mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        node.left = pivot.right.take();
        node.update();
        pivot.right = Some(node);
        pivot.update();
        self.rotations += 1;
        trace!("rotate right, new subtree size {}", pivot.size);
        return pivot;
    }

    /// Refresh `node` from its children and repair a height difference of two
    /// with a single or double rotation.
    ///
    /// Both children must already be valid AVL trees whose heights differ by
    /// at most two.
    pub fn rebalance<T>(&mut self, mut node: Box<Node<T>>) -> Box<Node<T>> {
        node.update();
        let skew = node.skew();

        let root = if skew > 1 {
            if let Some(right) = node.right.take() {
                node.right = Some(if right.balance == Balance::Left {
                    self.rotate_right(right)
                } else {
                    right
                });
            }
            self.rotate_left(node)
        } else if skew < -1 {
            if let Some(left) = node.left.take() {
                node.left = Some(if left.balance == Balance::Right {
                    self.rotate_left(left)
                } else {
                    left
                });
            }
            self.rotate_right(node)
        } else {
            node
        };

        debug_assert!(root.skew().abs() <= 1, "rebalance left skew {}", root.skew());
        return root;
    }

    /// Rebalance whatever subtree sits in `slot`, in place.
    pub fn rebalance_slot<T>(&mut self, slot: &mut Link<T>) {
        if let Some(node) = slot.take() {
            *slot = Some(self.rebalance(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_right(values: &[char]) -> Box<Node<char>> {
        let mut link: Link<char> = None;
        for &value in values.iter().rev() {
            let mut node = Node::leaf(value);
            node.attach(None, link);
            link = Some(node);
        }
        link.unwrap()
    }

    fn chain_left(values: &[char]) -> Box<Node<char>> {
        let mut link: Link<char> = None;
        for &value in values {
            let mut node = Node::leaf(value);
            node.attach(link, None);
            link = Some(node);
        }
        link.unwrap()
    }

    #[test]
    fn single_left_rotation() {
        let mut balancer = Balancer::new();
        let root = balancer.rebalance(chain_right(&['a', 'b', 'c']));
        assert_eq!(root.value, 'b');
        assert_eq!(root.rank, 1);
        assert_eq!(root.balance, Balance::Same);
        assert_eq!(root.left().unwrap().value, 'a');
        assert_eq!(root.right().unwrap().value, 'c');
        assert_eq!(balancer.rotations(), 1);
    }

    #[test]
    fn single_right_rotation() {
        let mut balancer = Balancer::new();
        let root = balancer.rebalance(chain_left(&['c', 'b', 'a']));
        assert_eq!(root.value, 'b');
        assert_eq!(root.height, 1);
        assert_eq!(balancer.rotations(), 1);
    }

    #[test]
    fn double_right_left_rotation() {
        // a
        //  \
        //   c
        //  /
        // b
        let mut c = Node::leaf('c');
        c.attach(Some(Node::leaf('b')), None);
        let mut a = Node::leaf('a');
        a.attach(None, Some(c));

        let mut balancer = Balancer::new();
        let root = balancer.rebalance(a);
        assert_eq!(root.value, 'b');
        assert_eq!(root.rank, 1);
        assert_eq!(root.left().unwrap().value, 'a');
        assert_eq!(root.right().unwrap().value, 'c');
        assert_eq!(balancer.rotations(), 2);
    }

    #[test]
    fn double_left_right_rotation() {
        let mut a = Node::leaf('a');
        a.attach(None, Some(Node::leaf('b')));
        let mut c = Node::leaf('c');
        c.attach(Some(a), None);

        let mut balancer = Balancer::new();
        let root = balancer.rebalance(c);
        assert_eq!(root.value, 'b');
        assert_eq!(root.balance, Balance::Same);
        assert_eq!(balancer.rotations(), 2);
    }

    #[test]
    fn balanced_node_is_left_alone() {
        let mut b = Node::leaf('b');
        b.attach(Some(Node::leaf('a')), None);
        let mut balancer = Balancer::new();
        let root = balancer.rebalance(b);
        assert_eq!(root.value, 'b');
        assert_eq!(root.balance, Balance::Left);
        assert_eq!(balancer.rotations(), 0);
    }

    #[test]
    fn rotation_without_pivot_is_noop() {
        let mut balancer = Balancer::new();
        let leaf = balancer.rotate_left(Node::leaf('x'));
        assert_eq!(leaf.value, 'x');
        assert_eq!(balancer.rotations(), 0);
    }
}
