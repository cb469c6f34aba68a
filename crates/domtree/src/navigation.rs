//! Read-only navigation
//!
//! Sibling lookups search the parent's child list by identity, so they are
//! O(k) in the number of siblings.

use crate::arena::DomArena;
use crate::types::{NodeId, NodeType};

impl DomArena {
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent_id
    }

    /// Child ids in tree order. Empty for leaf kinds and unknown ids.
    pub fn child_nodes(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.node(node).map(|n| n.node_type())
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.node_name())
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.node_type(node) == Some(NodeType::Element)
    }

    pub fn has_child_nodes(&self, node: NodeId) -> bool {
        !self.child_nodes(node).is_empty()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.child_nodes(node).first().copied()
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.child_nodes(node).last().copied()
    }

    pub fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.child_nodes(node)
            .iter()
            .copied()
            .find(|&c| self.is_element(c))
    }

    pub fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.child_nodes(node)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.is_element(c))
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.child_nodes(self.parent_node(node)?);
        let idx = siblings.iter().position(|&c| c == node)?;
        idx.checked_sub(1).map(|prev| siblings[prev])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.child_nodes(self.parent_node(node)?);
        let idx = siblings.iter().position(|&c| c == node)?;
        siblings.get(idx + 1).copied()
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.previous_sibling(node);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.previous_sibling(sibling);
        }
        None
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(node);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// div -> [text, b, comment, i, text]
    fn fixture() -> (DomArena, NodeId, [NodeId; 5]) {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        let kids = [
            arena.create_text("one"),
            arena.create_element("b"),
            arena.create_comment("two"),
            arena.create_element("i"),
            arena.create_text("three"),
        ];
        for &k in &kids {
            arena.append_child(div, k);
        }
        (arena, div, kids)
    }

    #[test]
    fn test_first_last() {
        let (arena, div, kids) = fixture();
        assert_eq!(arena.first_child(div), Some(kids[0]));
        assert_eq!(arena.last_child(div), Some(kids[4]));
        assert_eq!(arena.first_element_child(div), Some(kids[1]));
        assert_eq!(arena.last_element_child(div), Some(kids[3]));
        assert!(arena.has_child_nodes(div));
        assert!(!arena.has_child_nodes(kids[0]));
        assert_eq!(arena.first_child(kids[1]), None);
        assert_eq!(arena.first_element_child(kids[1]), None);
    }

    #[test]
    fn test_siblings() {
        let (arena, div, kids) = fixture();
        assert_eq!(arena.previous_sibling(kids[0]), None);
        assert_eq!(arena.next_sibling(kids[0]), Some(kids[1]));
        assert_eq!(arena.previous_sibling(kids[4]), Some(kids[3]));
        assert_eq!(arena.next_sibling(kids[4]), None);
        assert_eq!(arena.next_sibling(div), None);
        assert_eq!(arena.previous_sibling(div), None);
    }

    #[test]
    fn test_element_siblings() {
        let (arena, _, kids) = fixture();
        assert_eq!(arena.next_element_sibling(kids[0]), Some(kids[1]));
        assert_eq!(arena.next_element_sibling(kids[1]), Some(kids[3]));
        assert_eq!(arena.next_element_sibling(kids[3]), None);
        assert_eq!(arena.previous_element_sibling(kids[4]), Some(kids[3]));
        assert_eq!(arena.previous_element_sibling(kids[3]), Some(kids[1]));
        assert_eq!(arena.previous_element_sibling(kids[1]), None);
    }

    #[test]
    fn test_unknown_ids_are_empty() {
        let (arena, _, _) = fixture();
        assert!(arena.child_nodes(999).is_empty());
        assert_eq!(arena.parent_node(999), None);
        assert_eq!(arena.node_type(999), None);
        assert_eq!(arena.next_sibling(999), None);
    }
}
