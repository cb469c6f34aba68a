//! JSON tree import
//!
//! Builds a detached subtree from a nested node description, the way a
//! tree builder would, using only the public constructors and
//! `append_child`.
//!
//! Input format:
//! ```json
//! {
//!   "nodeType": 1,
//!   "nodeName": "div",
//!   "namespaceURI": "http://www.w3.org/1999/xhtml",
//!   "attributes": ["id", "main", "class", "wide"],
//!   "children": [{ "nodeType": 3, "nodeValue": "hi" }]
//! }
//! ```

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{NodeId, NodeType, NAMESPACE_HTML};
use serde_json::Value;

impl DomArena {
    /// Parse `json` and import it, see [`DomArena::import_json`]
    pub fn import_json_str(&mut self, json: &str) -> Result<NodeId> {
        let value: Value = serde_json::from_str(json)?;
        self.import_json(&value)
    }

    /// Import a node description and return the id of its (detached) root.
    ///
    /// On error the arena is left exactly as it was.
    pub fn import_json(&mut self, value: &Value) -> Result<NodeId> {
        let before = self.len();
        match self.import_node(value) {
            Ok(root) => {
                tracing::debug!(root, nodes = self.len() - before, "imported JSON tree");
                Ok(root)
            }
            Err(err) => {
                // Nodes created so far only link to each other.
                self.truncate(before);
                tracing::debug!(error = %err, "JSON import failed");
                Err(err)
            }
        }
    }

    fn import_node(&mut self, value: &Value) -> Result<NodeId> {
        let node_type_val = value["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::ImportError("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_val)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "one of 1, 3, 8, 9, 10".to_string(),
                actual: node_type_val.to_string(),
            })?;

        let text = |key: &str| value[key].as_str().unwrap_or("").to_string();

        let node_id = match node_type {
            NodeType::Element => {
                let name = value["nodeName"]
                    .as_str()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| DomError::ImportError("Element without nodeName".to_string()))?;
                let namespace = value["namespaceURI"].as_str().unwrap_or(NAMESPACE_HTML);
                let id = self.create_element_ns(name, namespace);
                self.import_attributes(id, &value["attributes"])?;
                id
            }
            NodeType::Text => self.create_text(text("nodeValue")),
            NodeType::Comment => self.create_comment(text("nodeValue")),
            NodeType::Document => self.create_document(),
            NodeType::DocumentType => {
                self.create_document_type(text("nodeName"), text("publicId"), text("systemId"))
            }
        };

        if let Some(children) = value["children"].as_array() {
            let is_container = self.get(node_id)?.is_container();
            if !is_container && !children.is_empty() {
                return Err(DomError::ImportError(format!(
                    "{:?} node cannot have children",
                    node_type
                )));
            }
            for child in children {
                let child_id = self.import_node(child)?;
                self.append_child(node_id, child_id);
            }
        }

        Ok(node_id)
    }

    /// Attributes come as a flat `[name, value, name, value, ...]` list
    fn import_attributes(&mut self, node_id: NodeId, attrs: &Value) -> Result<()> {
        let Some(attrs) = attrs.as_array() else {
            return Ok(());
        };
        if attrs.len() % 2 != 0 {
            return Err(DomError::ImportError(
                "attributes must be name/value pairs".to_string(),
            ));
        }

        let element = self
            .get_mut(node_id)?
            .as_element_mut()
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "Element".to_string(),
                actual: "non-element".to_string(),
            })?;
        for pair in attrs.chunks(2) {
            if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                element.set_attr(key, value);
            }
        }
        Ok(())
    }
}
