//! Position-based tree abstractions and an arithmetic expression tokenizer.
//!
//! - [`domain::Tree`]: general rooted tree contract with preorder, postorder and
//!   level-order traversals, depth and height.
//! - [`domain::BinaryTree`]: left/right refinement with in-order traversal.
//! - [`domain::ArenaTree`], [`domain::LinkedBinaryTree`]: arena-backed storages.
//! - [`domain::tokenizer`]: splits expressions like `(1 + 2) * (a - 12)` into tokens.

pub mod config;
pub mod domain;
pub mod util;

pub use domain::{
    is_numeric, parse, tokenize, ArenaTree, BinaryTree, DomainError, LinkedBinaryTree, Position,
    Token, TokenKind, Tree, TreeResult,
};
