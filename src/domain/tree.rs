//! General rooted tree contract.
//!
//! Storages implement a handful of primitives (`root`, `parent`, `children`,
//! `size`, `element`, `add_root`); every measurement and traversal below is a
//! default method written only against those primitives.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::position::Position;

pub trait Tree<T> {
    /// Root position, `None` for an empty tree.
    fn root(&self) -> Option<Position<T>>;

    /// Parent of `position`, `None` for the root.
    fn parent(&self, position: Position<T>) -> TreeResult<Option<Position<T>>>;

    /// Children of `position`, in a stable order.
    fn children(&self, position: Position<T>) -> TreeResult<Vec<Position<T>>>;

    /// Number of positions in the tree.
    fn size(&self) -> usize;

    /// Element stored at `position`.
    fn element(&self, position: Position<T>) -> TreeResult<&T>;

    /// Inserts the first node. Fails with `IllegalState` on a non-empty tree.
    fn add_root(&mut self, element: T) -> TreeResult<Position<T>>;

    fn num_children(&self, position: Position<T>) -> TreeResult<usize> {
        Ok(self.children(position)?.len())
    }

    fn is_internal(&self, position: Position<T>) -> TreeResult<bool> {
        Ok(self.num_children(position)? > 0)
    }

    fn is_external(&self, position: Position<T>) -> TreeResult<bool> {
        Ok(self.num_children(position)? == 0)
    }

    fn is_root(&self, position: Position<T>) -> bool {
        self.root() == Some(position)
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// All positions in the default order for this tree (level-order).
    fn positions(&self) -> TreeResult<Vec<Position<T>>> {
        self.level_order()
    }

    /// Number of ancestors of `position`; 0 for the root.
    #[instrument(level = "trace", skip(self))]
    fn depth(&self, position: Position<T>) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = position;
        while let Some(parent) = self.parent(current)? {
            depth += 1;
            if depth > self.size() {
                return Err(DomainError::IllegalState(format!(
                    "parent chain of {position:?} does not reach the root"
                )));
            }
            current = parent;
        }
        Ok(depth)
    }

    /// Height of the subtree rooted at `position`; 0 for a leaf.
    #[instrument(level = "trace", skip(self))]
    fn height(&self, position: Position<T>) -> TreeResult<usize> {
        let mut height = 0;
        let mut stack = vec![(position, 0usize)];
        while let Some((current, level)) = stack.pop() {
            height = height.max(level);
            for child in self.children(current)? {
                stack.push((child, level + 1));
            }
        }
        Ok(height)
    }

    /// Height of the whole tree. An empty tree has no height: `EmptyTree`.
    fn tree_height(&self) -> TreeResult<usize> {
        let root = self.root().ok_or(DomainError::EmptyTree)?;
        self.height(root)
    }

    /// Depth of the whole tree, i.e. the depth of its deepest position.
    fn tree_depth(&self) -> TreeResult<usize> {
        self.tree_height()
    }

    #[instrument(level = "debug", skip(self))]
    fn pre_order(&self) -> TreeResult<Vec<Position<T>>> {
        let mut snapshot = Vec::with_capacity(self.size());
        if let Some(root) = self.root() {
            self.pre_order_from(root, &mut snapshot)?;
        }
        Ok(snapshot)
    }

    /// Appends the subtree rooted at `position` to `snapshot` in preorder.
    fn pre_order_from(
        &self,
        position: Position<T>,
        snapshot: &mut Vec<Position<T>>,
    ) -> TreeResult<()> {
        let mut stack = vec![position];
        while let Some(current) = stack.pop() {
            snapshot.push(current);
            // Push children in reverse order for left-to-right traversal
            for child in self.children(current)?.into_iter().rev() {
                stack.push(child);
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn post_order(&self) -> TreeResult<Vec<Position<T>>> {
        let mut snapshot = Vec::with_capacity(self.size());
        if let Some(root) = self.root() {
            self.post_order_from(root, &mut snapshot)?;
        }
        Ok(snapshot)
    }

    /// Appends the subtree rooted at `position` to `snapshot` in postorder.
    fn post_order_from(
        &self,
        position: Position<T>,
        snapshot: &mut Vec<Position<T>>,
    ) -> TreeResult<()> {
        let mut stack = vec![(position, false)];
        while let Some((current, visited)) = stack.pop() {
            if visited {
                snapshot.push(current);
            } else {
                stack.push((current, true));
                for child in self.children(current)?.into_iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn level_order(&self) -> TreeResult<Vec<Position<T>>> {
        let mut snapshot = Vec::with_capacity(self.size());
        if let Some(root) = self.root() {
            let mut queue = VecDeque::from([root]);
            while let Some(current) = queue.pop_front() {
                snapshot.push(current);
                queue.extend(self.children(current)?);
            }
        }
        Ok(snapshot)
    }

    /// External positions, in preorder.
    fn leaves(&self) -> TreeResult<Vec<Position<T>>> {
        let mut leaves = Vec::new();
        for position in self.pre_order()? {
            if self.is_external(position)? {
                leaves.push(position);
            }
        }
        Ok(leaves)
    }

    /// Renders the tree for display, one line per position.
    fn to_tree_string(&self) -> TreeResult<TermTree<String>>
    where
        T: fmt::Display,
    {
        let Some(root) = self.root() else {
            return Ok(TermTree::new("Empty tree".to_string()));
        };

        // Postorder guarantees every child is rendered before its parent
        let mut rendered: HashMap<Position<T>, TermTree<String>> = HashMap::new();
        for position in self.post_order()? {
            let mut node = TermTree::new(self.element(position)?.to_string());
            for child in self.children(position)? {
                let leaf = rendered.remove(&child).ok_or_else(|| {
                    DomainError::IllegalState(format!("{child:?} was not visited before its parent"))
                })?;
                node.push(leaf);
            }
            rendered.insert(position, node);
        }

        rendered
            .remove(&root)
            .ok_or_else(|| DomainError::IllegalState(format!("{root:?} was not rendered")))
    }
}
