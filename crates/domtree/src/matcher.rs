//! Node matchers
//!
//! A matcher is a predicate over a single node. Queries drive the traversal
//! engine with a [`MatchCollector`], which tests every visited node and
//! keeps the matches in tree order. Selector engines plug in by implementing
//! [`NodeMatcher`] (or passing a closure).

use crate::arena::DomArena;
use crate::traversal::NodesVisitor;
use crate::types::{NodeId, NodeType};

pub trait NodeMatcher {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool;
}

impl<F> NodeMatcher for F
where
    F: Fn(&DomArena, NodeId) -> bool,
{
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        self(arena, node)
    }
}

/// Exact node type equality
#[derive(Debug, Clone, Copy)]
pub struct NodeHasType(pub NodeType);

impl NodeMatcher for NodeHasType {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        arena.node_type(node) == Some(self.0)
    }
}

/// Element tag name equality, case sensitive, optionally restricted to a
/// namespace
#[derive(Debug, Clone)]
pub struct ElementHasTagName {
    name: String,
    namespace: Option<String>,
}

impl ElementHasTagName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}

impl NodeMatcher for ElementHasTagName {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        let Some(element) = arena.node(node).and_then(|n| n.as_element()) else {
            return false;
        };
        element.name == self.name
            && self
                .namespace
                .as_deref()
                .map_or(true, |ns| element.namespace == ns)
    }
}

/// Element attribute test: presence, or exact value equality
#[derive(Debug, Clone)]
pub struct HasAttribute {
    name: String,
    value: Option<String>,
}

impl HasAttribute {
    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl NodeMatcher for HasAttribute {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        match (arena.node(node).and_then(|n| n.attr(&self.name)), &self.value) {
            (Some(actual), Some(expected)) => actual == expected.as_str(),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Identity with a specific node
#[derive(Debug, Clone, Copy)]
pub struct NodeIsEqualReference(pub NodeId);

impl NodeMatcher for NodeIsEqualReference {
    fn matches(&self, _arena: &DomArena, node: NodeId) -> bool {
        node == self.0
    }
}

#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<A: NodeMatcher, B: NodeMatcher> NodeMatcher for And<A, B> {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        self.0.matches(arena, node) && self.1.matches(arena, node)
    }
}

#[derive(Debug, Clone)]
pub struct Or<A, B>(pub A, pub B);

impl<A: NodeMatcher, B: NodeMatcher> NodeMatcher for Or<A, B> {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        self.0.matches(arena, node) || self.1.matches(arena, node)
    }
}

#[derive(Debug, Clone)]
pub struct Not<M>(pub M);

impl<M: NodeMatcher> NodeMatcher for Not<M> {
    fn matches(&self, arena: &DomArena, node: NodeId) -> bool {
        !self.0.matches(arena, node)
    }
}

/// Visitor that collects matching nodes in tree order
pub struct MatchCollector<'m, M: ?Sized> {
    matcher: &'m M,
    matches: Vec<NodeId>,
    only_first: bool,
    done: bool,
}

impl<'m, M: NodeMatcher + ?Sized> MatchCollector<'m, M> {
    pub fn new(matcher: &'m M, only_first: bool) -> Self {
        Self {
            matcher,
            matches: Vec::new(),
            only_first,
            done: false,
        }
    }

    pub fn into_matches(self) -> Vec<NodeId> {
        self.matches
    }
}

impl<M: NodeMatcher + ?Sized> NodesVisitor for MatchCollector<'_, M> {
    fn start(&mut self, arena: &DomArena, node: NodeId) {
        if self.matcher.matches(arena, node) {
            self.matches.push(node);
            self.done = self.only_first;
        }
    }

    fn complete(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NAMESPACE_SVG;

    #[test]
    fn test_builtin_matchers() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        let svg = arena.create_element_ns("svg", NAMESPACE_SVG);
        let text = arena.create_text("div");
        arena
            .get_mut(div)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("id", "x");

        assert!(NodeHasType(NodeType::Text).matches(&arena, text));
        assert!(!NodeHasType(NodeType::Text).matches(&arena, div));

        assert!(ElementHasTagName::new("div").matches(&arena, div));
        assert!(!ElementHasTagName::new("DIV").matches(&arena, div));
        assert!(!ElementHasTagName::new("div").matches(&arena, text));
        assert!(ElementHasTagName::new("svg").matches(&arena, svg));
        assert!(ElementHasTagName::with_namespace("svg", NAMESPACE_SVG).matches(&arena, svg));
        assert!(!ElementHasTagName::with_namespace("div", NAMESPACE_SVG).matches(&arena, div));

        assert!(HasAttribute::equals("id", "x").matches(&arena, div));
        assert!(!HasAttribute::equals("id", "y").matches(&arena, div));
        assert!(HasAttribute::present("id").matches(&arena, div));
        assert!(!HasAttribute::present("id").matches(&arena, svg));
        assert!(!HasAttribute::present("id").matches(&arena, text));

        assert!(NodeIsEqualReference(svg).matches(&arena, svg));
        assert!(!NodeIsEqualReference(svg).matches(&arena, div));
    }

    #[test]
    fn test_combinators_and_closures() {
        let mut arena = DomArena::new();
        let a = arena.create_element("a");
        let b = arena.create_element("b");
        arena
            .get_mut(b)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("href", "#");

        let link = And(ElementHasTagName::new("b"), HasAttribute::present("href"));
        assert!(link.matches(&arena, b));
        assert!(!link.matches(&arena, a));

        let either = Or(ElementHasTagName::new("a"), ElementHasTagName::new("b"));
        assert!(either.matches(&arena, a) && either.matches(&arena, b));
        assert!(!Not(either).matches(&arena, a));

        let is_a = |arena: &DomArena, node: NodeId| arena.node_name(node) == Some("a");
        assert!(is_a.matches(&arena, a));
        assert!(!is_a.matches(&arena, b));
    }
}
