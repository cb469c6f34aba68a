//! Queries built on the matcher contract
//!
//! Every query is a [`MatchCollector`] run by [`DomArena::traverse`], so
//! results come back in tree order and the root itself is never part of
//! them.

use crate::arena::DomArena;
use crate::matcher::{
    ElementHasTagName, HasAttribute, MatchCollector, NodeHasType, NodeIsEqualReference, NodeMatcher,
};
use crate::types::{NodeId, NodeType};

impl DomArena {
    /// All descendants of `root` accepted by `matcher`, in tree order. With
    /// `only_first` the walk stops at the first match.
    pub fn get_all_nodes_matching<M: NodeMatcher + ?Sized>(
        &self,
        root: NodeId,
        matcher: &M,
        only_first: bool,
    ) -> Vec<NodeId> {
        let mut collector = MatchCollector::new(matcher, only_first);
        self.traverse(root, &mut collector);
        collector.into_matches()
    }

    /// Case-sensitive tag name lookup, any namespace
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.get_all_nodes_matching(root, &ElementHasTagName::new(name), false)
    }

    pub fn get_elements_by_tag_name_ns(
        &self,
        root: NodeId,
        name: &str,
        namespace: &str,
    ) -> Vec<NodeId> {
        let matcher = ElementHasTagName::with_namespace(name, namespace);
        self.get_all_nodes_matching(root, &matcher, false)
    }

    /// First element in tree order whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.get_all_nodes_matching(root, &HasAttribute::equals("id", id), true)
            .into_iter()
            .next()
    }

    /// Whether `node` is a descendant of `root`. A node does not contain
    /// itself.
    pub fn contains(&self, root: NodeId, node: NodeId) -> bool {
        !self
            .get_all_nodes_matching(root, &NodeIsEqualReference(node), true)
            .is_empty()
    }

    /// Concatenated data of all descendant text nodes, in tree order
    pub fn get_text_content(&self, root: NodeId) -> String {
        let mut text = String::new();
        for id in self.get_all_nodes_matching(root, &NodeHasType(NodeType::Text), false) {
            if let Some(data) = self.node(id).and_then(|n| n.character_data()) {
                text.push_str(data);
            }
        }
        text
    }
}
