//! Query plans and the pull-based sequence protocol.
//!
//! A [`Query`] is an immutable plan: a chain of stages rooted at the outer
//! context. [`Query::evaluate`] turns the plan into a fresh [`NodeSequence`]
//! that owns every piece of per-pass state (output buffers, counters, reused
//! cursors). Evaluating the same plan twice, or evaluating a clone, never
//! shares state between the resulting sequences.

use bitflags::bitflags;
use tracing::trace;

use crate::axes::{evaluate_ancestors, evaluate_parents, evaluate_self};
use crate::context::EvalContext;
use crate::error::Result;
use crate::model::NodeCursor;
use crate::node_test::NodeTest;

bitflags! {
    /// Static metadata consumers use for position-sensitive logic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct QueryProps: u8 {
        /// Results are fully materialised before the first `advance`.
        const CACHED = 1 << 0;
        /// Positions count down from the total: the first result reports
        /// `count()`, the last reports 1. Results are in reverse document
        /// order as long as the stage could order its nodes (see
        /// [`OutputBuffer::is_sorted`](crate::cache::OutputBuffer::is_sorted)).
        const REVERSE = 1 << 1;
        /// `count()` is known before the first `advance`.
        const COUNT = 1 << 2;
    }
}

/// Pull iterator shared by every stage of a pipeline.
pub trait NodeSequence<C> {
    /// Next result, or `None` once the sequence is exhausted. Calling again
    /// after exhaustion keeps returning `None`.
    fn advance(&mut self) -> Option<C>;

    /// The most recently advanced node.
    fn current(&self) -> Option<&C>;

    /// 1-based rank of [`current`](Self::current); 0 before the first advance.
    fn current_position(&self) -> usize;

    fn properties(&self) -> QueryProps;

    /// Total result count when it is known without advancing.
    fn count(&self) -> Option<usize> {
        None
    }

    /// Drains the remaining results.
    fn collect_nodes(&mut self) -> Vec<C> {
        let mut out = Vec::new();
        while let Some(node) = self.advance() {
            out.push(node);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Ancestor,
    AncestorOrSelf,
    Parent,
    SelfAxis,
}

impl Axis {
    pub fn match_self(self) -> bool {
        matches!(self, Axis::AncestorOrSelf | Axis::SelfAxis)
    }

    pub fn properties(self) -> QueryProps {
        match self {
            Axis::Ancestor | Axis::AncestorOrSelf => QueryProps::CACHED | QueryProps::REVERSE | QueryProps::COUNT,
            Axis::Parent => QueryProps::CACHED | QueryProps::COUNT,
            Axis::SelfAxis => QueryProps::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisQuery {
    pub input: Query,
    pub axis: Axis,
    pub test: NodeTest,
}

impl AxisQuery {
    pub fn new(input: Query, axis: Axis, test: NodeTest) -> Self {
        Self { input, axis, test }
    }

    /// `ancestor::test` or, with `match_self`, `ancestor-or-self::test`.
    pub fn ancestor(input: Query, test: NodeTest, match_self: bool) -> Self {
        let axis = if match_self { Axis::AncestorOrSelf } else { Axis::Ancestor };
        Self::new(input, axis, test)
    }
}

/// Closed set of pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Leaf: yields the outer context items in the order given.
    Context,
    Axis(Box<AxisQuery>),
}

impl Query {
    pub fn context() -> Self {
        Query::Context
    }

    pub fn axis(self, axis: Axis, test: NodeTest) -> Self {
        Query::Axis(Box::new(AxisQuery::new(self, axis, test)))
    }

    pub fn ancestor(self, test: NodeTest) -> Self {
        self.axis(Axis::Ancestor, test)
    }

    pub fn ancestor_or_self(self, test: NodeTest) -> Self {
        self.axis(Axis::AncestorOrSelf, test)
    }

    pub fn parent(self, test: NodeTest) -> Self {
        self.axis(Axis::Parent, test)
    }

    pub fn self_axis(self, test: NodeTest) -> Self {
        self.axis(Axis::SelfAxis, test)
    }

    pub fn input(&self) -> Option<&Query> {
        match self {
            Query::Context => None,
            Query::Axis(step) => Some(&step.input),
        }
    }

    /// Static properties of the sequence [`evaluate`](Self::evaluate) returns.
    pub fn properties(&self) -> QueryProps {
        match self {
            Query::Context => QueryProps::COUNT,
            Query::Axis(step) if step.axis == Axis::SelfAxis => {
                let input = step.input.properties();
                if input.contains(QueryProps::REVERSE) {
                    QueryProps::CACHED | QueryProps::REVERSE | QueryProps::COUNT
                } else {
                    input - QueryProps::COUNT
                }
            }
            Query::Axis(step) => step.axis.properties(),
        }
    }

    /// Starts a fresh evaluation pass over `context`.
    ///
    /// Caching stages consume their whole input here; streaming stages pull
    /// lazily on `advance`. Fails only when a name test uses a prefix the
    /// context does not bind.
    pub fn evaluate<C>(&self, ctx: &EvalContext, context: impl IntoIterator<Item = C>) -> Result<Box<dyn NodeSequence<C>>>
    where
        C: NodeCursor + 'static,
    {
        self.build(ctx, context.into_iter().collect())
    }

    fn build<C>(&self, ctx: &EvalContext, context: Vec<C>) -> Result<Box<dyn NodeSequence<C>>>
    where
        C: NodeCursor + 'static,
    {
        match self {
            Query::Context => Ok(Box::new(ContextSequence::new(context))),
            Query::Axis(step) => {
                let test = step.test.resolve(ctx)?;
                let mut input = step.input.build(ctx, context)?;
                trace!(axis = ?step.axis, "evaluating axis stage");
                let seq: Box<dyn NodeSequence<C>> = match step.axis {
                    Axis::Ancestor | Axis::AncestorOrSelf => {
                        Box::new(evaluate_ancestors(input.as_mut(), &test, step.axis.match_self(), &ctx.options))
                    }
                    Axis::Parent => Box::new(evaluate_parents(input.as_mut(), &test, &ctx.options)),
                    Axis::SelfAxis => evaluate_self(input, test, &ctx.options),
                };
                Ok(seq)
            }
        }
    }
}

/// Yields the outer context items unchanged.
#[derive(Debug)]
pub(crate) struct ContextSequence<C> {
    items: Vec<C>,
    next: usize,
}

impl<C> ContextSequence<C> {
    pub(crate) fn new(items: Vec<C>) -> Self {
        Self { items, next: 0 }
    }
}

impl<C: Clone> NodeSequence<C> for ContextSequence<C> {
    fn advance(&mut self) -> Option<C> {
        let item = self.items.get(self.next)?.clone();
        self.next += 1;
        Some(item)
    }

    fn current(&self) -> Option<&C> {
        self.next.checked_sub(1).and_then(|idx| self.items.get(idx))
    }

    fn current_position(&self) -> usize {
        self.next
    }

    fn properties(&self) -> QueryProps {
        QueryProps::COUNT
    }

    fn count(&self) -> Option<usize> {
        Some(self.items.len())
    }
}
