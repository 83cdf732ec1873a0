//! Structural joins and splits.
//!
//! `join(left, connector, right)` is the primitive: it builds a balanced tree
//! holding `left`, then the connector, then `right`, by walking down the
//! spine of the taller side until the heights are within one, hanging the
//! shorter side and the connector there, and rebalancing on the way back up.
//! Cost is proportional to the height difference.
//!
//! - `concat` borrows a boundary node from one side to use as the connector.
//! - `split` walks towards the split position and re-joins the pieces it
//!   leaves behind on each side, using each visited node as the connector.
//! - `build` makes a perfectly balanced tree from a sequence without any
//!   rotations, taking the middle element of every range as its root.

use super::balance::Balancer;
use super::node::{height, Link, Node};
use super::positional::{pop_first, pop_last};

/// Join `left ++ [connector] ++ right`. `connector` must be detached.
pub fn join<T>(
    left: Link<T>,
    mut connector: Box<Node<T>>,
    right: Link<T>,
    balancer: &mut Balancer,
) -> Box<Node<T>> {
    let left_height = height(&left);
    let right_height = height(&right);

    match (left, right) {
        (Some(mut tall), right) if left_height > right_height + 1 => {
            let spine = tall.right.take();
            tall.right = Some(join(spine, connector, right, balancer));
            return balancer.rebalance(tall);
        }
        (left, Some(mut tall)) if right_height > left_height + 1 => {
            let spine = tall.left.take();
            tall.left = Some(join(left, connector, spine, balancer));
            return balancer.rebalance(tall);
        }
        (left, right) => {
            connector.attach(left, right);
            return connector;
        }
    }
}

/// Everything in `left` followed by everything in `right`.
pub fn concat<T>(left: Link<T>, right: Link<T>, balancer: &mut Balancer) -> Link<T> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => {
            let joined = if left.height < right.height {
                let (rest, connector) = pop_last(left, balancer);
                join(rest, connector, Some(right), balancer)
            } else {
                let (rest, connector) = pop_first(right, balancer);
                join(Some(left), connector, rest, balancer)
            };
            Some(joined)
        }
    }
}

/// Split into positions `[0, index)` and `[index, size)`.
///
/// An `index` past the end puts everything on the left.
pub fn split<T>(link: Link<T>, index: usize, balancer: &mut Balancer) -> (Link<T>, Link<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let rank = node.rank;
    let (left, right) = node.detach();

    if index <= rank {
        let (lower, upper) = split(left, index, balancer);
        (lower, Some(join(upper, node, right, balancer)))
    } else {
        let (lower, upper) = split(right, index - rank - 1, balancer);
        (Some(join(left, node, lower, balancer)), upper)
    }
}

/// Build a balanced tree holding the next `len` items of `items`, in order.
///
/// Returns `None` early if the iterator runs dry.
pub fn build<T, I>(items: &mut I, len: usize) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }
    let left_len = len / 2;
    let left = build(items, left_len);
    let mut root = Node::leaf(items.next()?);
    let right = build(items, len - left_len - 1);
    root.attach(left, right);
    Some(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::positional::get;
    use crate::tree::node::size;

    fn from_str(text: &str) -> Link<char> {
        let mut chars = text.chars();
        build(&mut chars, text.chars().count())
    }

    fn collect(link: &Link<char>) -> String {
        (0..size(link)).map(|i| *get(link, i).unwrap()).collect()
    }

    #[test]
    fn build_picks_middle_roots() {
        let root = from_str("editor");
        let node = root.as_ref().unwrap();
        assert_eq!(node.value, 't');
        assert_eq!(node.height, 2);
        assert_eq!(collect(&root), "editor");
    }

    #[test]
    fn build_short_iterator() {
        let mut chars = "ab".chars();
        let root = build(&mut chars, 5);
        assert!(size(&root) <= 2);
    }

    #[test]
    fn join_equal_heights() {
        let mut balancer = Balancer::new();
        let root = join(from_str("ab"), Node::leaf('c'), from_str("de"), &mut balancer);
        assert_eq!(root.value, 'c');
        assert_eq!(collect(&Some(root)), "abcde");
        assert_eq!(balancer.rotations(), 0);
    }

    #[test]
    fn join_descends_taller_side() {
        let mut balancer = Balancer::new();
        let tall = from_str("abcdefghijklmnopqrstuvwxyz");
        let root = join(tall, Node::leaf('!'), from_str("?"), &mut balancer);
        assert!(root.skew().abs() <= 1);
        assert_eq!(collect(&Some(root)), "abcdefghijklmnopqrstuvwxyz!?");

        let tall = from_str("abcdefghijklmnopqrstuvwxyz");
        let root = join(None, Node::leaf('!'), tall, &mut balancer);
        assert_eq!(collect(&Some(root)), "!abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn concat_either_side_taller() {
        let mut balancer = Balancer::new();
        let joined = concat(from_str("a"), from_str("bcdefghijk"), &mut balancer);
        assert_eq!(collect(&joined), "abcdefghijk");

        let joined = concat(from_str("abcdefghij"), from_str("k"), &mut balancer);
        assert_eq!(collect(&joined), "abcdefghijk");

        let joined = concat(None, from_str("xy"), &mut balancer);
        assert_eq!(collect(&joined), "xy");
        assert!(concat::<char>(None, None, &mut balancer).is_none());
    }

    #[test]
    fn split_every_position() {
        let text = "the quick brown fox";
        for index in 0..=text.len() {
            let mut balancer = Balancer::new();
            let (lower, upper) = split(from_str(text), index, &mut balancer);
            assert_eq!(collect(&lower), &text[..index]);
            assert_eq!(collect(&upper), &text[index..]);
        }
    }
}
