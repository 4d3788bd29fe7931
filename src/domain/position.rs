//! Opaque node handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use generational_arena::{Arena, Index};
use uuid::Uuid;

use crate::domain::error::{DomainError, TreeResult};

/// Identity of the tree instance that issued a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(Uuid);

impl TreeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TreeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a node slot holding a `T`.
///
/// A position carries no ownership. It is only meaningful against the tree that
/// issued it; storages reject positions from other trees and positions whose
/// node has since been removed.
pub struct Position<T> {
    tree: TreeId,
    index: Index,
    _element: PhantomData<fn() -> T>,
}

impl<T> Position<T> {
    pub fn new(tree: TreeId, index: Index) -> Self {
        Self {
            tree,
            index,
            _element: PhantomData,
        }
    }

    pub fn tree(&self) -> TreeId {
        self.tree
    }

    pub fn index(&self) -> Index {
        self.index
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree && self.index == other.index
    }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "Position({slot}@{generation})")
    }
}

fn check_owner<T>(owner: TreeId, position: Position<T>) -> TreeResult<()> {
    if position.tree != owner {
        return Err(DomainError::InvalidPosition(format!(
            "{position:?} belongs to another tree"
        )));
    }
    Ok(())
}

fn stale<T>(position: Position<T>) -> DomainError {
    DomainError::InvalidPosition(format!("{position:?} refers to a removed node"))
}

/// Looks up the node behind `position` in the arena of the tree `owner`.
pub(crate) fn resolve<N, T>(
    owner: TreeId,
    arena: &Arena<N>,
    position: Position<T>,
) -> TreeResult<&N> {
    check_owner(owner, position)?;
    arena.get(position.index).ok_or_else(|| stale(position))
}

pub(crate) fn resolve_mut<N, T>(
    owner: TreeId,
    arena: &mut Arena<N>,
    position: Position<T>,
) -> TreeResult<&mut N> {
    check_owner(owner, position)?;
    arena.get_mut(position.index).ok_or_else(|| stale(position))
}
