//! Cursor capabilities the query engine consumes.
//!
//! The engine never owns a tree. It only moves cursors around through
//! [`NodeCursor`], so any document model (arena, DOM, UI tree) can be queried
//! by implementing this trait for its position handle.

use core::cmp::Ordering;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
    pub ns_uri: Option<String>,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self { prefix: None, local: local.into(), ns_uri: None }
    }

    pub fn with_namespace(prefix: Option<&str>, local: impl Into<String>, ns_uri: impl Into<String>) -> Self {
        Self { prefix: prefix.map(str::to_string), local: local.into(), ns_uri: Some(ns_uri.into()) }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix.as_deref() {
            Some(p) if !p.is_empty() => write!(f, "{p}:{}", self.local),
            _ => f.write_str(&self.local),
        }
    }
}

/// A movable position in a tree.
///
/// Cloning yields an independent cursor at the same position. Evaluators
/// clone a cursor before moving it; cursors received from an upstream stage
/// are never moved in place.
pub trait NodeCursor: Clone + fmt::Debug {
    /// Moves to the parent node. Returns `false` (and stays put) at a root.
    fn move_to_parent(&mut self) -> bool;

    /// Repositions onto `other`. Returns `false` when the move is not possible
    /// without a fresh clone, e.g. because `other` lives in a different tree.
    fn move_to(&mut self, other: &Self) -> bool;

    /// Identity test: both cursors point at the same node.
    fn is_same_position(&self, other: &Self) -> bool;

    fn node_kind(&self) -> NodeKind;

    fn name(&self) -> Option<QName>;

    /// Relative document order of two positions, if the cursor can tell.
    ///
    /// `None` means "unknown" (no ordering support, or the nodes belong to
    /// different trees). Output buffers then fall back to insertion order.
    fn compare_position(&self, _other: &Self) -> Option<Ordering> {
        None
    }
}
