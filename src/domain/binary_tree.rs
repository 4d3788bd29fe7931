//! Binary refinement of [`Tree`].

use tracing::instrument;

use crate::domain::error::TreeResult;
use crate::domain::position::Position;
use crate::domain::tree::Tree;

#[doc(hidden)]
pub mod __private {
    /// Implemented by [`binary_tree_impl!`](crate::binary_tree_impl) alongside
    /// the derived child view.
    pub trait DerivedChildren<T> {}
}

/// Implements [`Tree`] for a binary storage from its remaining primitives
/// (`root`, `parent`, `size`, `element`, `add_root`).
///
/// `children`, `num_children` and `positions` are generated from
/// [`BinaryTree::binary_children`], [`BinaryTree::binary_num_children`] and
/// [`BinaryTree::in_order`]; defining any of them in the body is a duplicate
/// definition. [`BinaryTree`] can only be implemented for storages wired this way.
#[macro_export]
macro_rules! binary_tree_impl {
    (impl<$t:ident> Tree for $storage:ty { $($body:tt)* }) => {
        impl<$t> $crate::domain::binary_tree::__private::DerivedChildren<$t> for $storage {}

        impl<$t> $crate::domain::Tree<$t> for $storage {
            $($body)*

            fn children(
                &self,
                position: $crate::domain::Position<$t>,
            ) -> $crate::domain::TreeResult<Vec<$crate::domain::Position<$t>>> {
                $crate::domain::BinaryTree::binary_children(self, position)
            }

            fn num_children(
                &self,
                position: $crate::domain::Position<$t>,
            ) -> $crate::domain::TreeResult<usize> {
                $crate::domain::BinaryTree::binary_num_children(self, position)
            }

            fn positions(&self) -> $crate::domain::TreeResult<Vec<$crate::domain::Position<$t>>> {
                $crate::domain::BinaryTree::in_order(self)
            }
        }
    };
}

/// A tree whose positions have at most a left and a right child.
///
/// Storages implement `left` and `right` and get their [`Tree`] impl from
/// [`binary_tree_impl!`](crate::binary_tree_impl), so the generic child view
/// always agrees with the binary one.
pub trait BinaryTree<T>: Tree<T> + __private::DerivedChildren<T> {
    fn left(&self, position: Position<T>) -> TreeResult<Option<Position<T>>>;

    fn right(&self, position: Position<T>) -> TreeResult<Option<Position<T>>>;

    /// `[left]`, `[right]`, `[left, right]` or `[]`.
    fn binary_children(&self, position: Position<T>) -> TreeResult<Vec<Position<T>>> {
        let mut snapshot = Vec::with_capacity(2);
        if let Some(left) = self.left(position)? {
            snapshot.push(left);
        }
        if let Some(right) = self.right(position)? {
            snapshot.push(right);
        }
        Ok(snapshot)
    }

    fn binary_num_children(&self, position: Position<T>) -> TreeResult<usize> {
        let left = usize::from(self.has_left(position)?);
        let right = usize::from(self.has_right(position)?);
        Ok(left + right)
    }

    /// The other child of `position`'s parent. `None` for the root or a missing sibling.
    fn sibling(&self, position: Position<T>) -> TreeResult<Option<Position<T>>> {
        let Some(parent) = self.parent(position)? else {
            return Ok(None);
        };
        if self.left(parent)? == Some(position) {
            self.right(parent)
        } else {
            self.left(parent)
        }
    }

    fn has_left(&self, position: Position<T>) -> TreeResult<bool> {
        Ok(self.left(position)?.is_some())
    }

    fn has_right(&self, position: Position<T>) -> TreeResult<bool> {
        Ok(self.right(position)?.is_some())
    }

    fn is_left_child(&self, position: Position<T>) -> TreeResult<bool> {
        match self.parent(position)? {
            Some(parent) => Ok(self.left(parent)? == Some(position)),
            None => Ok(false),
        }
    }

    fn is_right_child(&self, position: Position<T>) -> TreeResult<bool> {
        match self.parent(position)? {
            Some(parent) => Ok(self.right(parent)? == Some(position)),
            None => Ok(false),
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn in_order(&self) -> TreeResult<Vec<Position<T>>> {
        let mut snapshot = Vec::with_capacity(self.size());
        if let Some(root) = self.root() {
            self.in_order_from(root, &mut snapshot)?;
        }
        Ok(snapshot)
    }

    /// Appends the subtree rooted at `position` to `snapshot`: left subtree,
    /// then the position, then the right subtree.
    fn in_order_from(
        &self,
        position: Position<T>,
        snapshot: &mut Vec<Position<T>>,
    ) -> TreeResult<()> {
        let mut stack = Vec::new();
        let mut current = Some(position);
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.left(node)?;
            }
            let Some(node) = stack.pop() else {
                break;
            };
            snapshot.push(node);
            current = self.right(node)?;
        }
        Ok(())
    }
}
