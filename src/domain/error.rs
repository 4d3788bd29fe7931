//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the tree contracts or malformed expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown character '{character}' at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("tree is empty")]
    EmptyTree,
}

/// Result type for tree and tokenizer operations.
pub type TreeResult<T> = Result<T, DomainError>;
