//! Sequences that can be cut in two and glued back together.
//!
//! Lets property tests and benchmarks drive an [`EditTree`] and a plain
//! `Vec` model through the same cuts and pastes and compare the results.
//! The method names stay clear of the inherent `split`/`append` and the slice
//! `split_at`, so a `use` of this trait never changes which one a call
//! resolves to.

use crate::tree::EditTree;

pub trait Collection: Sized {
    /// Number of elements.
    fn count(&self) -> usize;

    /// Positions `[0, index)` and `[index, count)`. An `index` past the end
    /// leaves the second half empty.
    fn cut_at(self, index: usize) -> (Self, Self);

    /// Move every element of `other` onto the end.
    fn append_all(&mut self, other: Self);
}

impl<T> Collection for Vec<T> {
    fn count(&self) -> usize {
        return self.len();
    }

    fn cut_at(mut self, index: usize) -> (Self, Self) {
        let back = self.split_off(index.min(self.len()));
        return (self, back);
    }

    fn append_all(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl<T> Collection for EditTree<T> {
    fn count(&self) -> usize {
        return self.len();
    }

    fn cut_at(mut self, index: usize) -> (Self, Self) {
        let back = self.split_saturating(index);
        return (self, back);
    }

    fn append_all(&mut self, mut other: Self) {
        self.concatenate(&mut other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut_and_rejoin<C: Collection>(items: C, index: usize) -> (usize, usize, C) {
        let (mut front, back) = items.cut_at(index);
        let sizes = (front.count(), back.count());
        front.append_all(back);
        return (sizes.0, sizes.1, front);
    }

    #[test]
    fn tree_matches_vec() {
        let text: Vec<char> = "positional".chars().collect();
        for index in 0..=text.len() + 2 {
            let (vf, vb, vec) = cut_and_rejoin(text.clone(), index);
            let (tf, tb, tree) = cut_and_rejoin(EditTree::from(text.clone()), index);
            assert_eq!((vf, vb), (tf, tb));
            assert_eq!(vec, tree.to_vec());
            assert!(tree.validate().is_ok());
        }
    }

    #[test]
    fn tree_split_past_end() {
        let (front, back) = EditTree::from("ab").cut_at(9);
        assert_eq!(front.to_string(), "ab");
        assert!(back.is_empty());
        assert!(front.validate().is_ok());
    }

    #[test]
    fn trait_in_scope_keeps_inherent_split() {
        let mut tree = EditTree::from("abcd");
        let tail = tree.split(1).unwrap();
        assert_eq!(tree.to_string(), "a");
        assert_eq!(tail.to_string(), "bcd");
        assert!(tree.split(5).is_err());
    }
}
