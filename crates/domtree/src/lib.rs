//! HTML/XML node tree
//!
//! Arena-backed document tree with structural mutation, tree-order
//! traversal and matcher-driven queries.
//!
//! ## Core Design
//!
//! ```text
//! create_* → DomArena (owned nodes) → mutation (append/insert/replace/remove)
//!                 ↓
//!            traverse(visitor) → queries / text content / serialization
//! ```
//!
//! - Nodes are addressed by `NodeId` (u32 index); parent links are indices,
//!   never ownership.
//! - Element and Document own a child list; Text, Comment and DocumentType
//!   don't, and mutating them as a parent is a silent no-op.
//! - Every read feature is a visitor driven by one stack-free walk.
//!
//! Misusing the mutation API never fails loudly: it leaves the tree as it
//! was. Check navigation results instead of expecting errors.

pub mod arena;
pub mod error;
pub mod import;
pub mod matcher;
pub mod mutation;
pub mod navigation;
pub mod query;
pub mod serializer;
pub mod traversal;
pub mod types;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use matcher::{
    And, ElementHasTagName, HasAttribute, MatchCollector, NodeHasType, NodeIsEqualReference,
    NodeMatcher, Not, Or,
};
pub use serializer::{HtmlSerializer, SerializeOption, SerializerConfig};
pub use traversal::{FnVisitor, NodesVisitor};
pub use types::*;
