//! Arena-backed tree and cursor for tests, docs and benchmarks.
//!
//! Nodes are stored in document order (element, its attributes, then its
//! children), so a node's arena index doubles as its document-order key.
//! Every successful `move_to_parent` bumps a tree-wide counter, which lets
//! tests observe how much walking an axis evaluation did.
//!
//! ```
//! use xpath_axes::simple::{elem, attr, text};
//! use xpath_axes::NodeCursor;
//!
//! // <root id="r"><a><b>hi</b></a></root>
//! let root = elem("root")
//!     .attr(attr("id", "r"))
//!     .child(elem("a").child(elem("b").child(text("hi"))))
//!     .build();
//! let mut b = root.find("b").unwrap();
//! assert!(b.move_to_parent());
//! assert_eq!(b.local_name(), Some("a"));
//! assert_eq!(root.parent_moves(), 1);
//! ```

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use crate::model::{NodeCursor, NodeKind, QName};

#[derive(Debug)]
struct NodeRec {
    kind: NodeKind,
    name: Option<QName>,
    value: String,
    parent: Option<usize>,
    attrs: Vec<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct SimpleTree {
    nodes: Vec<NodeRec>,
    parent_moves: AtomicUsize,
}

/// Cursor over a [`SimpleTree`]. Equality is node identity.
#[derive(Clone)]
pub struct SimpleCursor {
    tree: Arc<SimpleTree>,
    idx: usize,
}

impl PartialEq for SimpleCursor {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_position(other)
    }
}
impl Eq for SimpleCursor {}

impl fmt::Debug for SimpleCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = self.rec();
        let mut s = f.debug_struct("SimpleCursor");
        s.field("idx", &self.idx).field("kind", &rec.kind);
        if let Some(name) = &rec.name {
            s.field("name", &name.to_string());
        }
        s.finish()
    }
}

impl SimpleCursor {
    fn rec(&self) -> &NodeRec {
        &self.tree.nodes[self.idx]
    }

    fn at(&self, idx: usize) -> SimpleCursor {
        SimpleCursor { tree: Arc::clone(&self.tree), idx }
    }

    /// Position in document order.
    pub fn index(&self) -> usize {
        self.idx
    }

    pub fn local_name(&self) -> Option<&str> {
        self.rec().name.as_ref().map(|n| n.local.as_str())
    }

    pub fn value(&self) -> &str {
        &self.rec().value
    }

    pub fn root(&self) -> SimpleCursor {
        self.at(0)
    }

    pub fn children(&self) -> Vec<SimpleCursor> {
        self.rec().children.iter().map(|&i| self.at(i)).collect()
    }

    pub fn attributes(&self) -> Vec<SimpleCursor> {
        self.rec().attrs.iter().map(|&i| self.at(i)).collect()
    }

    /// First element at or below this node (document order) with the given
    /// local name.
    pub fn find(&self, local: &str) -> Option<SimpleCursor> {
        let end = self.subtree_end();
        (self.idx..end)
            .find(|&i| {
                let rec = &self.tree.nodes[i];
                rec.kind == NodeKind::Element && rec.name.as_ref().is_some_and(|n| n.local == local)
            })
            .map(|i| self.at(i))
    }

    // Arena index one past the last node of this subtree.
    fn subtree_end(&self) -> usize {
        let mut cur = self.idx;
        loop {
            let rec = &self.tree.nodes[cur];
            match rec.children.last().or(rec.attrs.last()) {
                Some(&last) => cur = last,
                None => return cur + 1,
            }
        }
    }

    /// Successful `move_to_parent` calls on any cursor of this tree.
    pub fn parent_moves(&self) -> usize {
        self.tree.parent_moves.load(AtomicOrdering::Relaxed)
    }

    pub fn reset_parent_moves(&self) {
        self.tree.parent_moves.store(0, AtomicOrdering::Relaxed);
    }
}

impl NodeCursor for SimpleCursor {
    fn move_to_parent(&mut self) -> bool {
        match self.rec().parent {
            Some(parent) => {
                self.idx = parent;
                self.tree.parent_moves.fetch_add(1, AtomicOrdering::Relaxed);
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.tree, &other.tree) {
            return false;
        }
        self.idx = other.idx;
        true
    }

    fn is_same_position(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.idx == other.idx
    }

    fn node_kind(&self) -> NodeKind {
        self.rec().kind
    }

    fn name(&self) -> Option<QName> {
        self.rec().name.clone()
    }

    fn compare_position(&self, other: &Self) -> Option<Ordering> {
        Arc::ptr_eq(&self.tree, &other.tree).then(|| self.idx.cmp(&other.idx))
    }
}

pub struct SimpleNodeBuilder {
    kind: NodeKind,
    name: Option<QName>,
    value: String,
    attrs: Vec<SimpleNodeBuilder>,
    children: Vec<SimpleNodeBuilder>,
}

impl SimpleNodeBuilder {
    fn new(kind: NodeKind, name: Option<QName>, value: &str) -> Self {
        Self { kind, name, value: value.to_string(), attrs: Vec::new(), children: Vec::new() }
    }

    pub fn child(mut self, child: SimpleNodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I: IntoIterator<Item = SimpleNodeBuilder>>(mut self, it: I) -> Self {
        self.children.extend(it);
        self
    }

    pub fn attr(mut self, attr: SimpleNodeBuilder) -> Self {
        debug_assert!(attr.kind == NodeKind::Attribute);
        self.attrs.push(attr);
        self
    }

    /// Puts this node's name into `uri`.
    pub fn ns(mut self, uri: &str) -> Self {
        if let Some(name) = self.name.as_mut() {
            name.ns_uri = Some(uri.to_string());
        }
        self
    }

    /// Flattens the builder into a fresh tree and returns a cursor at its root.
    pub fn build(self) -> SimpleCursor {
        let mut tree = SimpleTree::default();
        self.flatten(&mut tree, None);
        SimpleCursor { tree: Arc::new(tree), idx: 0 }
    }

    fn flatten(self, tree: &mut SimpleTree, parent: Option<usize>) -> usize {
        let idx = tree.nodes.len();
        tree.nodes.push(NodeRec {
            kind: self.kind,
            name: self.name,
            value: self.value,
            parent,
            attrs: Vec::new(),
            children: Vec::new(),
        });
        for attr in self.attrs {
            let a = attr.flatten(tree, Some(idx));
            tree.nodes[idx].attrs.push(a);
        }
        for child in self.children {
            let c = child.flatten(tree, Some(idx));
            tree.nodes[idx].children.push(c);
        }
        idx
    }
}

fn qname(lexical: &str) -> QName {
    match lexical.split_once(':') {
        Some((prefix, local)) => QName { prefix: Some(prefix.to_string()), local: local.to_string(), ns_uri: None },
        None => QName::new(lexical),
    }
}

pub fn doc() -> SimpleNodeBuilder {
    SimpleNodeBuilder::new(NodeKind::Document, None, "")
}

/// Element builder; `p:local` sets a prefix, combine with [`SimpleNodeBuilder::ns`].
pub fn elem(name: &str) -> SimpleNodeBuilder {
    SimpleNodeBuilder::new(NodeKind::Element, Some(qname(name)), "")
}

pub fn attr(name: &str, value: &str) -> SimpleNodeBuilder {
    SimpleNodeBuilder::new(NodeKind::Attribute, Some(qname(name)), value)
}

pub fn text(value: &str) -> SimpleNodeBuilder {
    SimpleNodeBuilder::new(NodeKind::Text, None, value)
}

pub fn comment(value: &str) -> SimpleNodeBuilder {
    SimpleNodeBuilder::new(NodeKind::Comment, None, value)
}
