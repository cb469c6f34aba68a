//! Arena-based node storage
//!
//! Every node of a tree lives in one `Vec<DomNode>` and is addressed by a
//! 4-byte `NodeId`. Parent links are plain indices, so there is no Rc/Arc,
//! no reference cycles, and dropping the arena frees everything at once.
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```
//!
//! Nodes are created detached. Detached nodes are never reclaimed
//! individually; they stay addressable until the arena is dropped.

use crate::error::{DomError, Result};
use crate::types::{DomNode, ElementData, NodeData, NodeId, NAMESPACE_HTML};
use ahash::AHashSet;

/// Arena allocator for tree nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    nodes: Vec<DomNode>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1024), // Pre-allocate for typical page
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn add_node(&mut self, data: NodeData) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(DomNode::new(node_id, data));
        node_id
    }

    pub fn create_document(&mut self) -> NodeId {
        self.add_node(NodeData::Document)
    }

    pub fn create_document_type(
        &mut self,
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> NodeId {
        self.add_node(NodeData::DocumentType {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        })
    }

    /// Create an element in the HTML namespace
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.create_element_ns(name, NAMESPACE_HTML)
    }

    pub fn create_element_ns(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> NodeId {
        self.add_node(NodeData::Element(ElementData::new(name, namespace)))
    }

    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.add_node(NodeData::Text(data.into()))
    }

    pub fn create_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.add_node(NodeData::Comment(data.into()))
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    ///
    /// Only payload data is reachable through this; links are owned by the
    /// mutation operations.
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    #[inline]
    pub(crate) fn node(&self, node_id: NodeId) -> Option<&DomNode> {
        self.nodes.get(node_id as usize)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Option<&mut DomNode> {
        self.nodes.get_mut(node_id as usize)
    }

    /// Drop every node created after the arena held `len` nodes. Only valid
    /// when no older node links to the dropped ones.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Whether `node_id` refers to a node of this arena
    pub fn exists(&self, node_id: NodeId) -> bool {
        (node_id as usize) < self.nodes.len()
    }

    /// Total number of nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Iterator over all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| i as NodeId)
    }

    /// Verify the parent/child links of every node in the arena.
    ///
    /// Checks that no child list holds a node twice, that no node is held by
    /// two lists, and that each parent link points at the list holding it.
    pub fn check_structure(&self) -> Result<()> {
        let mut owned: AHashSet<NodeId> = AHashSet::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if node.children_ids.is_some() != node.data.is_container() {
                return Err(DomError::BrokenInvariant(format!(
                    "node {} has a child list that does not match its kind",
                    node.node_id
                )));
            }

            for &child_id in node.children() {
                let child = self.get(child_id)?;
                if !owned.insert(child_id) {
                    return Err(DomError::BrokenInvariant(format!(
                        "node {} appears in more than one child position",
                        child_id
                    )));
                }
                if child.parent_id != Some(node.node_id) {
                    return Err(DomError::BrokenInvariant(format!(
                        "node {} is a child of {} but its parent is {:?}",
                        child_id, node.node_id, child.parent_id
                    )));
                }
            }
        }

        for node in &self.nodes {
            if node.parent_id.is_some() && !owned.contains(&node.node_id) {
                return Err(DomError::BrokenInvariant(format!(
                    "node {} has parent {:?} but no child list holds it",
                    node.node_id, node.parent_id
                )));
            }
        }

        Ok(())
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeType;

    #[test]
    fn test_arena_basic() {
        let mut arena = DomArena::new();

        let id = arena.create_element("div");
        assert_eq!(id, 0);

        let retrieved = arena.get(id).unwrap();
        assert_eq!(retrieved.node_id(), id);
        assert_eq!(retrieved.node_name(), "div");
        assert_eq!(retrieved.node_type(), NodeType::Element);
        assert_eq!(retrieved.as_element().unwrap().namespace, NAMESPACE_HTML);
        assert_eq!(retrieved.parent_id(), None);
    }

    #[test]
    fn test_unknown_node() {
        let arena = DomArena::new();
        assert!(matches!(arena.get(7), Err(DomError::NodeNotFound(7))));
        assert!(!arena.exists(7));
    }

    #[test]
    fn test_payload_edit() {
        let mut arena = DomArena::new();
        let text = arena.create_text("a");
        arena
            .get_mut(text)
            .unwrap()
            .character_data_mut()
            .unwrap()
            .push('b');
        assert_eq!(arena.get(text).unwrap().character_data(), Some("ab"));

        let el = arena.create_element_ns("svg", crate::types::NAMESPACE_SVG);
        arena
            .get_mut(el)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("width", "10");
        assert_eq!(arena.get(el).unwrap().attr("width"), Some("10"));
    }

    #[test]
    fn test_check_structure_detects_broken_links() {
        let mut arena = DomArena::new();
        let parent = arena.create_element("div");
        let child = arena.create_element("span");
        arena.append_child(parent, child);
        assert!(arena.check_structure().is_ok());

        arena.node_mut(child).unwrap().parent_id = None;
        assert!(matches!(
            arena.check_structure(),
            Err(DomError::BrokenInvariant(_))
        ));

        arena.node_mut(child).unwrap().parent_id = Some(parent);
        arena
            .node_mut(parent)
            .unwrap()
            .children_ids
            .as_mut()
            .unwrap()
            .push(child);
        assert!(arena.check_structure().is_err());
    }
}
