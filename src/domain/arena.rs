use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::position::{resolve, resolve_mut, Position, TreeId};
use crate::domain::tree::Tree;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
struct TreeNode<T> {
    /// Element stored at this node
    element: T,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    children: Vec<Index>,
}

/// Arena-based general tree.
///
/// Uses a generational arena so positions stay valid handles for the lifetime
/// of their node and are reported as invalid afterwards. Nodes are only
/// reachable through positions:
///
/// ```compile_fail
/// use exprtree::domain::arena::TreeNode;
/// ```
#[derive(Debug)]
pub struct ArenaTree<T> {
    id: TreeId,
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for ArenaTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArenaTree<T> {
    pub fn new() -> Self {
        Self {
            id: TreeId::new(),
            arena: Arena::new(),
            root: None,
        }
    }

    fn position(&self, index: Index) -> Position<T> {
        Position::new(self.id, index)
    }

    fn insert_node(&mut self, element: T, parent: Option<Index>) -> Index {
        let node = TreeNode {
            element,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Appends a new child after the existing children of `position`.
    #[instrument(level = "trace", skip(self, element))]
    pub fn add_child(&mut self, position: Position<T>, element: T) -> TreeResult<Position<T>> {
        resolve(self.id, &self.arena, position)?;
        let child_idx = self.insert_node(element, Some(position.index()));
        Ok(self.position(child_idx))
    }

    pub fn element_mut(&mut self, position: Position<T>) -> TreeResult<&mut T> {
        Ok(&mut resolve_mut(self.id, &mut self.arena, position)?.element)
    }

    /// Replaces the element at `position`, returning the previous one.
    pub fn replace(&mut self, position: Position<T>, element: T) -> TreeResult<T> {
        Ok(std::mem::replace(self.element_mut(position)?, element))
    }
}

impl<T> Tree<T> for ArenaTree<T> {
    fn root(&self) -> Option<Position<T>> {
        self.root.map(|idx| self.position(idx))
    }

    fn parent(&self, position: Position<T>) -> TreeResult<Option<Position<T>>> {
        let node = resolve(self.id, &self.arena, position)?;
        Ok(node.parent.map(|idx| self.position(idx)))
    }

    fn children(&self, position: Position<T>) -> TreeResult<Vec<Position<T>>> {
        let node = resolve(self.id, &self.arena, position)?;
        Ok(node.children.iter().map(|&idx| self.position(idx)).collect())
    }

    fn num_children(&self, position: Position<T>) -> TreeResult<usize> {
        Ok(resolve(self.id, &self.arena, position)?.children.len())
    }

    fn size(&self) -> usize {
        self.arena.len()
    }

    fn element(&self, position: Position<T>) -> TreeResult<&T> {
        Ok(&resolve(self.id, &self.arena, position)?.element)
    }

    #[instrument(level = "trace", skip(self, element))]
    fn add_root(&mut self, element: T) -> TreeResult<Position<T>> {
        if !self.is_empty() {
            return Err(DomainError::IllegalState("tree already has a root".to_string()));
        }
        let root_idx = self.insert_node(element, None);
        debug!("added root");
        Ok(self.position(root_idx))
    }
}
