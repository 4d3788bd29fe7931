//! Domain layer: tree contracts, storages, and the expression tokenizer
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod binary_tree;
pub mod error;
pub mod linked;
pub mod position;
pub mod tokenizer;
pub mod tree;

pub use arena::ArenaTree;
pub use binary_tree::BinaryTree;
pub use error::{DomainError, TreeResult};
pub use linked::LinkedBinaryTree;
pub use position::{Position, TreeId};
pub use tokenizer::{is_numeric, parse, tokenize, Token, TokenKind, OPERATORS};
pub use tree::Tree;
