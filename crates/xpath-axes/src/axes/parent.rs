use tracing::debug;

use crate::cache::{CachedSequence, Direction, OutputBuffer};
use crate::context::EvalOptions;
use crate::model::NodeCursor;
use crate::node_test::ResolvedTest;
use crate::query::NodeSequence;

/// Collects the distinct matching parents of every node `input` yields, in
/// document order when the cursor can tell.
pub(crate) fn evaluate_parents<C: NodeCursor>(
    input: &mut dyn NodeSequence<C>,
    test: &ResolvedTest,
    options: &EvalOptions,
) -> CachedSequence<C> {
    let mut buffer = OutputBuffer::new(options.ordering, Direction::Forward);
    let mut contexts = 0usize;
    while let Some(mut node) = input.advance() {
        contexts += 1;
        if node.move_to_parent() && test.matches(&node) {
            buffer.insert(&node);
        }
    }
    debug!(contexts, results = buffer.len(), "parent axis materialised");
    CachedSequence::new(buffer)
}
