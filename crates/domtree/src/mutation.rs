//! Structural mutation
//!
//! Every operation here is infallible from the caller's point of view:
//! a non-container receiver, an unknown id, an out-of-range position or a
//! reference node that is not a direct child all leave the tree untouched.
//! Those cases are reported as `trace` events and nothing else.

use crate::arena::DomArena;
use crate::types::NodeId;
use smallvec::SmallVec;
use tracing::trace;

impl DomArena {
    fn child_list_mut(&mut self, node: NodeId) -> Option<&mut SmallVec<[NodeId; 4]>> {
        self.node_mut(node)?.children_ids.as_mut()
    }

    fn is_container(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.is_container())
    }

    /// Returns the previous parent link
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Option<NodeId> {
        let n = self.node_mut(node)?;
        std::mem::replace(&mut n.parent_id, parent)
    }

    /// Remove the first occurrence of `node` from `parent`'s child list
    fn remove_first(&mut self, parent: NodeId, node: NodeId) -> bool {
        let Some(children) = self.child_list_mut(parent) else {
            return false;
        };
        match children.iter().position(|&c| c == node) {
            Some(idx) => {
                children.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.child_nodes(node).len()
    }

    /// Detach every child of `node`
    pub fn empty(&mut self, node: NodeId) {
        let Some(children) = self.child_list_mut(node) else {
            trace!(node, "empty: not a container");
            return;
        };
        let detached = std::mem::take(children);
        for child in detached {
            self.set_parent(child, None);
        }
    }

    /// Append `node` as the last child of `parent`, moving it if it already
    /// has a parent (including `parent` itself).
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) {
        if !self.is_container(parent) {
            trace!(parent, node, "append_child: parent is not a container");
            return;
        }
        if !self.exists(node) {
            trace!(parent, node, "append_child: unknown node");
            return;
        }

        if self.parent_node(node) == Some(parent) {
            self.remove_first(parent, node);
            self.set_parent(node, None);
        }

        let end = self.child_count(parent);
        self.insert_children(parent, end, node);
    }

    /// Insert `node` at `position` in `parent`'s children.
    ///
    /// The node is inserted into the new list *before* it is removed from
    /// its previous parent, and that removal takes the first occurrence. When
    /// the previous parent is `parent` itself this decides which copy
    /// survives: moving a node to an index at or before its current one
    /// leaves the list unchanged, moving it further right lands it one slot
    /// before `position`.
    pub fn insert_children(&mut self, parent: NodeId, position: usize, node: NodeId) {
        if !self.exists(node) {
            trace!(parent, node, "insert_children: unknown node");
            return;
        }
        let Some(children) = self.child_list_mut(parent) else {
            trace!(parent, node, "insert_children: parent is not a container");
            return;
        };
        if position > children.len() {
            trace!(parent, node, position, "insert_children: position out of range");
            return;
        }

        children.insert(position, node);
        if let Some(previous) = self.set_parent(node, Some(parent)) {
            self.remove_first(previous, node);
        }
    }

    /// Insert `to_insert` right before `before`, which must be a direct
    /// child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, to_insert: NodeId, before: NodeId) {
        match self.child_nodes(parent).iter().position(|&c| c == before) {
            Some(idx) => self.insert_children(parent, idx, to_insert),
            None => trace!(parent, before, "insert_before: reference is not a child"),
        }
    }

    /// Put `new_node` in the slot held by `old_child` and detach `old_child`.
    ///
    /// After the slot is overwritten the first occurrence of `new_node` is
    /// removed from its previous parent, so replacing a child with itself
    /// detaches it.
    pub fn replace_child(&mut self, parent: NodeId, new_node: NodeId, old_child: NodeId) {
        if !self.exists(new_node) {
            trace!(parent, new_node, "replace_child: unknown node");
            return;
        }
        let Some(children) = self.child_list_mut(parent) else {
            trace!(parent, "replace_child: parent is not a container");
            return;
        };
        let Some(idx) = children.iter().position(|&c| c == old_child) else {
            trace!(parent, old_child, "replace_child: old node is not a child");
            return;
        };

        children[idx] = new_node;
        if let Some(previous) = self.set_parent(new_node, Some(parent)) {
            self.remove_first(previous, new_node);
        }
        self.set_parent(old_child, None);
    }

    pub fn remove_child(&mut self, parent: NodeId, node: NodeId) {
        if self.remove_first(parent, node) {
            self.set_parent(node, None);
        } else {
            trace!(parent, node, "remove_child: not a child");
        }
    }
}
