//! Tree-order traversal
//!
//! The walk follows parent and sibling links only: no explicit stack and
//! no recursion, so arbitrarily deep trees are walked in constant extra
//! space. Visitors get `&DomArena`, which rules out mutating the tree while
//! a traversal is running.

use crate::arena::DomArena;
use crate::types::NodeId;
use std::ops::ControlFlow;

/// Callbacks driven by [`DomArena::traverse`].
///
/// `start` fires when a node is first reached, `end` once all of its
/// descendants have been visited. `complete` is polled after every callback;
/// returning `true` stops the walk with no further callbacks.
pub trait NodesVisitor {
    fn start(&mut self, arena: &DomArena, node: NodeId);

    fn end(&mut self, _arena: &DomArena, _node: NodeId) {}

    fn complete(&self) -> bool {
        false
    }
}

impl DomArena {
    /// Visit the descendants of `root` in tree order. `root` itself is not
    /// visited.
    pub fn traverse<V: NodesVisitor + ?Sized>(&self, root: NodeId, visitor: &mut V) {
        let mut current = self.first_child(root);

        while let Some(mut node) = current {
            visitor.start(self, node);
            if visitor.complete() {
                return;
            }

            if self.has_child_nodes(node) {
                current = self.first_child(node);
                continue;
            }

            while node != root && self.next_sibling(node).is_none() {
                visitor.end(self, node);
                if visitor.complete() {
                    return;
                }
                match self.parent_node(node) {
                    Some(parent) => node = parent,
                    None => return,
                }
            }

            if node == root {
                break;
            }
            visitor.end(self, node);
            if visitor.complete() {
                return;
            }

            current = self.next_sibling(node);
        }
    }

    /// Visit `root` and then its descendants in tree order.
    pub fn traverse_with_current_node<V: NodesVisitor + ?Sized>(
        &self,
        root: NodeId,
        visitor: &mut V,
    ) {
        visitor.start(self, root);
        if visitor.complete() {
            return;
        }
        self.traverse(root, visitor);
        if visitor.complete() {
            return;
        }
        visitor.end(self, root);
    }
}

type Callback = fn(&DomArena, NodeId) -> ControlFlow<()>;

/// Visitor built from a pair of closures; `ControlFlow::Break` ends the walk.
pub struct FnVisitor<S, E> {
    on_start: S,
    on_end: E,
    done: bool,
}

impl<S, E> FnVisitor<S, E>
where
    S: FnMut(&DomArena, NodeId) -> ControlFlow<()>,
    E: FnMut(&DomArena, NodeId) -> ControlFlow<()>,
{
    pub fn new(on_start: S, on_end: E) -> Self {
        Self {
            on_start,
            on_end,
            done: false,
        }
    }
}

impl<S> FnVisitor<S, Callback>
where
    S: FnMut(&DomArena, NodeId) -> ControlFlow<()>,
{
    pub fn on_start(on_start: S) -> Self {
        Self {
            on_start,
            on_end: |_, _| ControlFlow::Continue(()),
            done: false,
        }
    }
}

impl<S, E> FnVisitor<S, E> {
    /// Whether a callback asked to stop
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<S, E> NodesVisitor for FnVisitor<S, E>
where
    S: FnMut(&DomArena, NodeId) -> ControlFlow<()>,
    E: FnMut(&DomArena, NodeId) -> ControlFlow<()>,
{
    fn start(&mut self, arena: &DomArena, node: NodeId) {
        self.done = (self.on_start)(arena, node).is_break();
    }

    fn end(&mut self, arena: &DomArena, node: NodeId) {
        self.done = (self.on_end)(arena, node).is_break();
    }

    fn complete(&self) -> bool {
        self.done
    }
}
