//! Output buffer shared by the caching axis stages.
//!
//! An axis that is generated in a different order than it is consumed (or
//! that may reach the same node from several context nodes) collects its
//! results here first. The buffer is a duplicate-free set keyed by node
//! identity; `insert` reporting `false` is the signal axis walks use to stop
//! early.

use core::cmp::Ordering;

use crate::context::BufferOrdering;
use crate::model::NodeCursor;
use crate::query::{NodeSequence, QueryProps};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Document order: earlier nodes first.
    Forward,
    /// Reverse document order: later nodes first.
    Reverse,
}

#[derive(Debug, Clone)]
pub struct OutputBuffer<C> {
    nodes: Vec<C>,
    direction: Direction,
    // Cleared for good once two nodes could not be ordered.
    sorted: bool,
}

impl<C: NodeCursor> OutputBuffer<C> {
    pub fn new(ordering: BufferOrdering, direction: Direction) -> Self {
        Self { nodes: Vec::new(), direction, sorted: ordering == BufferOrdering::Document }
    }

    /// Adds a clone of `node` unless a node at the same position is present.
    /// Returns whether the node was newly added.
    pub fn insert(&mut self, node: &C) -> bool {
        if self.sorted {
            match self.search(node) {
                Some(Ok(_)) => return false,
                Some(Err(idx)) => {
                    self.nodes.insert(idx, node.clone());
                    return true;
                }
                None => self.sorted = false,
            }
        }
        if self.contains(node) {
            return false;
        }
        self.nodes.push(node.clone());
        true
    }

    pub fn contains(&self, node: &C) -> bool {
        self.nodes.iter().any(|n| n.is_same_position(node))
    }

    /// Whether the buffer is still sorted by document order in its direction.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    // Binary search in output order. `None` when some comparison is undecidable.
    fn search(&self, node: &C) -> Option<Result<usize, usize>> {
        let (mut lo, mut hi) = (0, self.nodes.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let ord = self.nodes[mid].compare_position(node)?;
            let ord = match self.direction {
                Direction::Forward => ord,
                Direction::Reverse => ord.reverse(),
            };
            match ord {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(Ok(mid)),
            }
        }
        Some(Err(lo))
    }
}

impl<C> OutputBuffer<C> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&C> {
        self.nodes.get(idx)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, C> {
        self.nodes.iter()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Read-out over a completed [`OutputBuffer`].
///
/// For reverse buffers the position of the n-th advanced node is
/// `len - n + 1`: the first result reports the total count, the last one
/// reports 1. The count-down holds for every reverse buffer; the nodes are in
/// reverse document order only while [`OutputBuffer::is_sorted`] is true.
/// After the fallback to insertion order they come out in discovery order.
#[derive(Debug)]
pub struct CachedSequence<C> {
    buffer: OutputBuffer<C>,
    emitted: usize,
}

impl<C> CachedSequence<C> {
    pub fn new(buffer: OutputBuffer<C>) -> Self {
        Self { buffer, emitted: 0 }
    }

    pub fn buffer(&self) -> &OutputBuffer<C> {
        &self.buffer
    }
}

impl<C: Clone> NodeSequence<C> for CachedSequence<C> {
    fn advance(&mut self) -> Option<C> {
        let node = self.buffer.get(self.emitted)?.clone();
        self.emitted += 1;
        Some(node)
    }

    fn current(&self) -> Option<&C> {
        self.emitted.checked_sub(1).and_then(|idx| self.buffer.get(idx))
    }

    fn current_position(&self) -> usize {
        if self.emitted == 0 {
            return 0;
        }
        match self.buffer.direction() {
            Direction::Forward => self.emitted,
            Direction::Reverse => self.buffer.len() - self.emitted + 1,
        }
    }

    fn properties(&self) -> QueryProps {
        match self.buffer.direction() {
            Direction::Forward => QueryProps::CACHED | QueryProps::COUNT,
            Direction::Reverse => QueryProps::CACHED | QueryProps::REVERSE | QueryProps::COUNT,
        }
    }

    fn count(&self) -> Option<usize> {
        Some(self.buffer.len())
    }
}
