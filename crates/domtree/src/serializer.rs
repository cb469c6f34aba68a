//! Markup serialization
//!
//! The serializer is just another [`NodesVisitor`]: inner HTML is the
//! root-exclusive walk, outer HTML the root-inclusive one. Other output
//! formats implement `NodesVisitor` themselves and drive
//! [`DomArena::traverse`] the same way.

use crate::arena::DomArena;
use crate::error::Result;
use crate::traversal::NodesVisitor;
use crate::types::{Attribute, ElementData, NodeData, NodeId, NAMESPACE_HTML};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named serialization switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializeOption {
    /// Print `disabled` instead of `disabled=""`
    HideEmptyAttributeValue,
    SkipComments,
}

/// Serializer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    pub options: HashSet<SerializeOption>,
}

impl SerializerConfig {
    /// Load from JSON, e.g. `{"options": ["skip_comments"]}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_option(mut self, option: SerializeOption) -> Self {
        self.options.insert(option);
        self
    }

    pub fn has(&self, option: SerializeOption) -> bool {
        self.options.contains(&option)
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Children of these are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

fn is_html(element: &ElementData, names: &[&str]) -> bool {
    element.namespace == NAMESPACE_HTML && names.contains(&element.name.as_str())
}

/// Visitor that writes HTML markup
pub struct HtmlSerializer<'c> {
    config: &'c SerializerConfig,
    output: String,
}

impl<'c> HtmlSerializer<'c> {
    pub fn new(config: &'c SerializerConfig) -> Self {
        Self {
            config,
            output: String::with_capacity(4096),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write_attribute(&mut self, attr: &Attribute) {
        self.output.push(' ');
        if let Some(prefix) = &attr.prefix {
            self.output.push_str(prefix);
            self.output.push(':');
        }
        self.output.push_str(&attr.name);
        if attr.value.is_empty() && self.config.has(SerializeOption::HideEmptyAttributeValue) {
            return;
        }
        self.output.push_str("=\"");
        escape_into(&mut self.output, &attr.value, true);
        self.output.push('"');
    }
}

fn escape_into(out: &mut String, text: &str, attribute_mode: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

impl NodesVisitor for HtmlSerializer<'_> {
    fn start(&mut self, arena: &DomArena, node: NodeId) {
        let Some(dom_node) = arena.node(node) else {
            return;
        };
        match dom_node.data() {
            NodeData::Element(element) => {
                self.output.push('<');
                self.output.push_str(&element.name);
                for attr in &element.attributes {
                    self.write_attribute(attr);
                }
                self.output.push('>');
            }
            NodeData::Text(data) => {
                let raw = arena
                    .parent_node(node)
                    .and_then(|p| arena.node(p))
                    .and_then(|p| p.as_element())
                    .is_some_and(|p| is_html(p, RAW_TEXT_ELEMENTS));
                if raw {
                    self.output.push_str(data);
                } else {
                    escape_into(&mut self.output, data, false);
                }
            }
            NodeData::Comment(data) => {
                if !self.config.has(SerializeOption::SkipComments) {
                    self.output.push_str("<!--");
                    self.output.push_str(data);
                    self.output.push_str("-->");
                }
            }
            NodeData::DocumentType { name, .. } => {
                self.output.push_str("<!DOCTYPE ");
                self.output.push_str(name);
                self.output.push('>');
            }
            NodeData::Document => {}
        }
    }

    fn end(&mut self, arena: &DomArena, node: NodeId) {
        if let Some(element) = arena.node(node).and_then(|n| n.as_element()) {
            if !is_html(element, VOID_ELEMENTS) {
                self.output.push_str("</");
                self.output.push_str(&element.name);
                self.output.push('>');
            }
        }
    }
}

impl DomArena {
    /// Markup of the children of `node`
    pub fn get_inner_html(&self, node: NodeId) -> String {
        self.get_inner_html_with(node, &SerializerConfig::default())
    }

    pub fn get_inner_html_with(&self, node: NodeId, config: &SerializerConfig) -> String {
        let mut serializer = HtmlSerializer::new(config);
        self.traverse(node, &mut serializer);
        serializer.finish()
    }

    /// Markup of `node` and its children
    pub fn get_outer_html(&self, node: NodeId) -> String {
        self.get_outer_html_with(node, &SerializerConfig::default())
    }

    pub fn get_outer_html_with(&self, node: NodeId, config: &SerializerConfig) -> String {
        let mut serializer = HtmlSerializer::new(config);
        self.traverse_with_current_node(node, &mut serializer);
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NAMESPACE_SVG;

    fn set_attr(arena: &mut DomArena, node: NodeId, name: &str, value: &str) {
        arena
            .get_mut(node)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr(name, value);
    }

    #[test]
    fn test_inner_and_outer() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        let b = arena.create_element("b");
        let text = arena.create_text("a < b & c");
        let br = arena.create_element("br");
        arena.append_child(div, b);
        arena.append_child(b, text);
        arena.append_child(div, br);
        set_attr(&mut arena, div, "title", "say \"hi\"");

        assert_eq!(arena.get_inner_html(div), "<b>a &lt; b &amp; c</b><br>");
        assert_eq!(
            arena.get_outer_html(div),
            "<div title=\"say &quot;hi&quot;\"><b>a &lt; b &amp; c</b><br></div>"
        );
    }

    #[test]
    fn test_document_with_doctype_and_comment() {
        let mut arena = DomArena::new();
        let doc = arena.create_document();
        let doctype = arena.create_document_type("html", "", "");
        let comment = arena.create_comment(" note ");
        let html = arena.create_element("html");
        arena.append_child(doc, doctype);
        arena.append_child(doc, comment);
        arena.append_child(doc, html);

        assert_eq!(arena.get_outer_html(doc), "<!DOCTYPE html><!-- note --><html></html>");

        let config = SerializerConfig::default().with_option(SerializeOption::SkipComments);
        assert_eq!(arena.get_inner_html_with(doc, &config), "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn test_raw_text_and_foreign_void_names() {
        let mut arena = DomArena::new();
        let script = arena.create_element("script");
        let code = arena.create_text("if (a < b && c) {}");
        arena.append_child(script, code);
        assert_eq!(arena.get_outer_html(script), "<script>if (a < b && c) {}</script>");

        let svg_img = arena.create_element_ns("img", NAMESPACE_SVG);
        assert_eq!(arena.get_outer_html(svg_img), "<img></img>");
    }

    #[test]
    fn test_empty_attribute_values() {
        let mut arena = DomArena::new();
        let input = arena.create_element("input");
        set_attr(&mut arena, input, "disabled", "");
        assert_eq!(arena.get_outer_html(input), "<input disabled=\"\">");

        let config =
            SerializerConfig::default().with_option(SerializeOption::HideEmptyAttributeValue);
        assert_eq!(arena.get_outer_html_with(input, &config), "<input disabled>");
    }

    #[test]
    fn test_config_from_json() {
        let config = SerializerConfig::from_json(r#"{"options": ["skip_comments"]}"#).unwrap();
        assert!(config.has(SerializeOption::SkipComments));
        assert!(!config.has(SerializeOption::HideEmptyAttributeValue));

        assert_eq!(SerializerConfig::from_json("{}").unwrap(), SerializerConfig::default());
        assert!(SerializerConfig::from_json(r#"{"options": ["bogus"]}"#).is_err());
    }
}
