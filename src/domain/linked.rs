//! Arena-backed binary tree storage.

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::binary_tree::BinaryTree;
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::position::{resolve, resolve_mut, Position, TreeId};
use crate::domain::tree::Tree;

#[derive(Debug)]
struct BinaryNode<T> {
    element: T,
    parent: Option<Index>,
    left: Option<Index>,
    right: Option<Index>,
}

impl<T> BinaryNode<T> {
    fn new(element: T, parent: Option<Index>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Binary tree whose nodes live in a generational arena.
///
/// The generic child view is derived from the left/right links on every call,
/// and `positions()` yields the in-order sequence.
#[derive(Debug)]
pub struct LinkedBinaryTree<T> {
    id: TreeId,
    arena: Arena<BinaryNode<T>>,
    root: Option<Index>,
}

impl<T> Default for LinkedBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedBinaryTree<T> {
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

    fn node(&self, position: Position<T>) -> TreeResult<&BinaryNode<T>> {
        resolve(self.id, &self.arena, position)
    }

    fn attach(&mut self, position: Position<T>, side: Side, element: T) -> TreeResult<Position<T>> {
        let node = self.node(position)?;
        let occupied = match side {
            Side::Left => node.left.is_some(),
            Side::Right => node.right.is_some(),
        };
        if occupied {
            return Err(DomainError::IllegalState(format!(
                "{position:?} already has a {side:?} child"
            )));
        }

        let child_idx = self
            .arena
            .insert(BinaryNode::new(element, Some(position.index())));
        let parent = resolve_mut(self.id, &mut self.arena, position)?;
        match side {
            Side::Left => parent.left = Some(child_idx),
            Side::Right => parent.right = Some(child_idx),
        }
        Ok(self.position(child_idx))
    }

    /// Creates a left child of `position`. Fails if one already exists.
    #[instrument(level = "trace", skip(self, element))]
    pub fn add_left(&mut self, position: Position<T>, element: T) -> TreeResult<Position<T>> {
        self.attach(position, Side::Left, element)
    }

    /// Creates a right child of `position`. Fails if one already exists.
    #[instrument(level = "trace", skip(self, element))]
    pub fn add_right(&mut self, position: Position<T>, element: T) -> TreeResult<Position<T>> {
        self.attach(position, Side::Right, element)
    }

    pub fn element_mut(&mut self, position: Position<T>) -> TreeResult<&mut T> {
        Ok(&mut resolve_mut(self.id, &mut self.arena, position)?.element)
    }

    /// Replaces the element at `position`, returning the previous one.
    pub fn replace(&mut self, position: Position<T>, element: T) -> TreeResult<T> {
        Ok(std::mem::replace(self.element_mut(position)?, element))
    }

    /// Removes a node with at most one child and returns its element.
    ///
    /// The child, if any, takes the removed node's place. The removed position
    /// is invalid afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, position: Position<T>) -> TreeResult<T> {
        let node = self.node(position)?;
        if node.left.is_some() && node.right.is_some() {
            return Err(DomainError::IllegalState(format!(
                "{position:?} has two children"
            )));
        }
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child_idx) = child {
            if let Some(child_node) = self.arena.get_mut(child_idx) {
                child_node.parent = parent;
            }
        }
        match parent {
            None => self.root = child,
            Some(parent_idx) => {
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    if parent_node.left == Some(position.index()) {
                        parent_node.left = child;
                    } else {
                        parent_node.right = child;
                    }
                }
            }
        }

        let removed = self
            .arena
            .remove(position.index())
            .ok_or_else(|| DomainError::InvalidPosition(format!("{position:?} vanished")))?;
        debug!(size = self.arena.len(), "removed node");
        Ok(removed.element)
    }
}

crate::binary_tree_impl! {
    impl<T> Tree for LinkedBinaryTree<T> {
        fn root(&self) -> Option<Position<T>> {
            self.root.map(|idx| self.position(idx))
        }

        fn parent(&self, position: Position<T>) -> TreeResult<Option<Position<T>>> {
            Ok(self.node(position)?.parent.map(|idx| self.position(idx)))
        }

        fn size(&self) -> usize {
            self.arena.len()
        }

        fn element(&self, position: Position<T>) -> TreeResult<&T> {
            Ok(&self.node(position)?.element)
        }

        #[instrument(level = "trace", skip(self, element))]
        fn add_root(&mut self, element: T) -> TreeResult<Position<T>> {
            if !self.is_empty() {
                return Err(DomainError::IllegalState("tree already has a root".to_string()));
            }
            let root_idx = self.arena.insert(BinaryNode::new(element, None));
            self.root = Some(root_idx);
            Ok(self.position(root_idx))
        }
    }
}

impl<T> BinaryTree<T> for LinkedBinaryTree<T> {
    fn left(&self, position: Position<T>) -> TreeResult<Option<Position<T>>> {
        Ok(self.node(position)?.left.map(|idx| self.position(idx)))
    }

    fn right(&self, position: Position<T>) -> TreeResult<Option<Position<T>>> {
        Ok(self.node(position)?.right.map(|idx| self.position(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn given_occupied_left_slot_when_adding_left_then_illegal_state() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(1).unwrap();
        tree.add_left(root, 2).unwrap();

        let result = tree.add_left(root, 3);
        assert!(matches!(result, Err(DomainError::IllegalState(_))));
        assert_eq!(tree.size(), 2);
    }

    #[rstest]
    fn given_leaf_when_removing_then_parent_loses_child() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root('r').unwrap();
        let left = tree.add_left(root, 'l').unwrap();
        let right = tree.add_right(root, 'x').unwrap();

        assert_eq!(tree.remove(left).unwrap(), 'l');
        assert_eq!(tree.left(root).unwrap(), None);
        assert_eq!(tree.children(root).unwrap(), vec![right]);
        assert_eq!(tree.size(), 2);
        assert!(matches!(
            tree.element(left),
            Err(DomainError::InvalidPosition(_))
        ));
    }

    #[rstest]
    fn given_node_with_one_child_when_removing_then_child_is_promoted() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root("root").unwrap();
        let middle = tree.add_right(root, "middle").unwrap();
        let bottom = tree.add_left(middle, "bottom").unwrap();

        tree.remove(middle).unwrap();

        assert_eq!(tree.right(root).unwrap(), Some(bottom));
        assert_eq!(tree.parent(bottom).unwrap(), Some(root));
        assert!(tree.is_right_child(bottom).unwrap());
        assert_eq!(tree.depth(bottom).unwrap(), 1);
    }

    #[rstest]
    fn given_root_with_one_child_when_removing_root_then_child_becomes_root() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(0).unwrap();
        let child = tree.add_left(root, 1).unwrap();

        assert_eq!(tree.remove(root).unwrap(), 0);
        assert_eq!(tree.root(), Some(child));
        assert_eq!(tree.parent(child).unwrap(), None);
        assert!(!tree.is_left_child(child).unwrap());
    }

    #[rstest]
    fn given_node_with_two_children_when_removing_then_illegal_state() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(0).unwrap();
        tree.add_left(root, 1).unwrap();
        tree.add_right(root, 2).unwrap();

        assert!(matches!(tree.remove(root), Err(DomainError::IllegalState(_))));
        assert_eq!(tree.size(), 3);
    }

    #[rstest]
    fn given_last_node_removed_when_adding_root_then_succeeds() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(0).unwrap();
        tree.remove(root).unwrap();

        assert!(tree.is_empty());
        assert!(tree.add_root(1).is_ok());
    }

    #[rstest]
    fn given_element_when_mutating_then_change_is_visible() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(String::from("1")).unwrap();
        tree.element_mut(root).unwrap().push('2');
        assert_eq!(tree.replace(root, String::from("3")).unwrap(), "12");
        assert_eq!(tree.element(root).unwrap(), "3");
    }
}
