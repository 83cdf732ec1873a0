//! Edit Tree - a position-ordered balanced tree for text editing.
//!
//! Stores a sequence of symbols in an AVL tree whose nodes are ordered by
//! position instead of by key. Each node caches its rank, so every edit at
//! an arbitrary offset is O(log n), and whole sequences can be split apart
//! or joined together in time bounded by tree height.
//!
//! # Quick Start
//!
//! ```
//! use edit_tree::EditTree;
//!
//! let mut doc = EditTree::from("Hello World!");
//! doc.insert(5, ',').unwrap();
//! assert_eq!(doc.to_string(), "Hello, World!");
//!
//! // Cut a range out and paste it back at the front.
//! let mut cut = doc.delete_range(7, 6).unwrap();
//! assert_eq!(cut.to_string(), "World!");
//! cut.push(' ');
//! cut.concatenate(&mut doc);
//! assert_eq!(cut.to_string(), "World! Hello, ");
//! assert!(doc.is_empty());
//! ```

pub mod collection;
pub mod error;
pub mod tree;

pub use error::{EditError, InvariantError};
pub use tree::{Balance, EditTree};
