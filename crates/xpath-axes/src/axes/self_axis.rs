use crate::cache::{CachedSequence, Direction, OutputBuffer};
use crate::context::EvalOptions;
use crate::model::NodeCursor;
use crate::node_test::ResolvedTest;
use crate::query::{NodeSequence, QueryProps};

/// Builds the `self::test` stage over `input`.
///
/// A reverse input is drained into a reverse buffer so positions keep
/// counting down from the filtered total. Any other input is filtered lazily.
pub(crate) fn evaluate_self<C>(
    mut input: Box<dyn NodeSequence<C>>,
    test: ResolvedTest,
    options: &EvalOptions,
) -> Box<dyn NodeSequence<C>>
where
    C: NodeCursor + 'static,
{
    if !input.properties().contains(QueryProps::REVERSE) {
        return Box::new(SelfSequence::new(input, test));
    }
    let mut buffer = OutputBuffer::new(options.ordering, Direction::Reverse);
    while let Some(node) = input.advance() {
        if test.matches(&node) {
            buffer.insert(&node);
        }
    }
    Box::new(CachedSequence::new(buffer))
}

/// Streaming `self::test` over a forward input: passes through the nodes
/// that match in input order.
pub(crate) struct SelfSequence<C> {
    input: Box<dyn NodeSequence<C>>,
    test: ResolvedTest,
    current: Option<C>,
    position: usize,
    done: bool,
}

impl<C> SelfSequence<C> {
    pub(crate) fn new(input: Box<dyn NodeSequence<C>>, test: ResolvedTest) -> Self {
        Self { input, test, current: None, position: 0, done: false }
    }
}

impl<C: NodeCursor> NodeSequence<C> for SelfSequence<C> {
    fn advance(&mut self) -> Option<C> {
        if self.done {
            return None;
        }
        loop {
            let Some(node) = self.input.advance() else {
                self.done = true;
                return None;
            };
            if self.test.matches(&node) {
                self.position += 1;
                self.current = Some(node.clone());
                return Some(node);
            }
        }
    }

    fn current(&self) -> Option<&C> {
        self.current.as_ref()
    }

    fn current_position(&self) -> usize {
        self.position
    }

    // Filtering keeps order but makes the total unknown until drained.
    fn properties(&self) -> QueryProps {
        self.input.properties() - QueryProps::COUNT
    }
}
