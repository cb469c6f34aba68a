//! Core type definitions for the node tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Container-ness is a property of the variant, not a shared empty list
//! 3. Use SmallVec for child and attribute lists (most are short)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
pub type NodeId = u32;

pub const NAMESPACE_HTML: &str = "http://www.w3.org/1999/xhtml";
pub const NAMESPACE_SVG: &str = "http://www.w3.org/2000/svg";
pub const NAMESPACE_MATHML: &str = "http://www.w3.org/1998/Math/MathML";
pub const NAMESPACE_XMLNS: &str = "http://www.w3.org/2000/xmlns/";
pub const NAMESPACE_XML: &str = "http://www.w3.org/XML/1998/namespace";
pub const NAMESPACE_XLINK: &str = "http://www.w3.org/1999/xlink";

/// Node type matching DOM specification numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Element attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
            prefix: None,
        }
    }
}

/// Element payload: tag name, namespace, attributes in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementData {
    pub name: String,
    pub namespace: String,
    pub attributes: SmallVec<[Attribute; 4]>,
}

impl ElementData {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            attributes: SmallVec::new(),
        }
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, overwriting in place if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(idx).value)
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeData {
    Document,
    DocumentType {
        name: String,
        public_id: String,
        system_id: String,
    },
    Element(ElementData),
    Text(String),
    Comment(String),
}

impl NodeData {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Document => NodeType::Document,
            NodeData::DocumentType { .. } => NodeType::DocumentType,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    pub fn node_name(&self) -> &str {
        match self {
            NodeData::Document => "#document",
            NodeData::DocumentType { name, .. } => name,
            NodeData::Element(e) => &e.name,
            NodeData::Text(_) => "#text",
            NodeData::Comment(_) => "#comment",
        }
    }

    /// Only elements and documents own a child sequence
    pub fn is_container(&self) -> bool {
        matches!(self, NodeData::Element(_) | NodeData::Document)
    }
}

/// A node stored in the arena
///
/// Ids and links are only written by the arena and the mutation layer so
/// the single-parent invariant can't be broken from outside the crate.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub(crate) node_id: NodeId,

    // Navigation indices
    pub(crate) parent_id: Option<NodeId>,
    /// `None` for leaf kinds (text, comment, doctype)
    pub(crate) children_ids: Option<SmallVec<[NodeId; 4]>>,

    pub(crate) data: NodeData,
}

impl DomNode {
    pub(crate) fn new(node_id: NodeId, data: NodeData) -> Self {
        let children_ids = data.is_container().then(SmallVec::new);
        Self {
            node_id,
            parent_id: None,
            children_ids,
            data,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn node_type(&self) -> NodeType {
        self.data.node_type()
    }

    pub fn node_name(&self) -> &str {
        self.data.node_name()
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    /// Child ids in tree order; empty for leaf kinds
    pub fn children(&self) -> &[NodeId] {
        self.children_ids.as_deref().unwrap_or(&[])
    }

    /// Whether this node owns a mutable child sequence
    pub fn is_container(&self) -> bool {
        self.children_ids.is_some()
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.attr(name))
    }

    /// Character data of text and comment nodes
    pub fn character_data(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(s) | NodeData::Comment(s) => Some(s),
            _ => None,
        }
    }

    pub fn character_data_mut(&mut self) -> Option<&mut String> {
        match &mut self.data {
            NodeData::Text(s) | NodeData::Comment(s) => Some(s),
            _ => None,
        }
    }
}
