use tracing::{debug, trace};

use crate::cache::{CachedSequence, Direction, OutputBuffer};
use crate::context::EvalOptions;
use crate::model::NodeCursor;
use crate::node_test::ResolvedTest;
use crate::query::NodeSequence;

#[derive(Debug, Default)]
struct WalkStats {
    contexts: usize,
    parent_moves: usize,
    short_circuits: usize,
    clones: usize,
}

/// Collects `ancestor::test` (or `ancestor-or-self::test` with `match_self`)
/// for every node `input` yields.
///
/// Ancestors are recorded bottom-up, so whenever a node is already in the
/// buffer every matching node above it is as well. A chain therefore stops at
/// its first duplicate, and a context node that is itself a duplicate skips
/// its chain entirely.
pub(crate) fn evaluate_ancestors<C: NodeCursor>(
    input: &mut dyn NodeSequence<C>,
    test: &ResolvedTest,
    match_self: bool,
    options: &EvalOptions,
) -> CachedSequence<C> {
    let mut buffer = OutputBuffer::new(options.ordering, Direction::Reverse);
    let mut stats = WalkStats::default();
    let mut ancestor: Option<C> = None;

    while let Some(node) = input.advance() {
        stats.contexts += 1;
        if match_self && test.matches(&node) && !buffer.insert(&node) {
            trace!(?node, "context node already recorded, skipping its ancestors");
            stats.short_circuits += 1;
            continue;
        }

        let reused = options.reuse_cursor && ancestor.as_mut().is_some_and(|cursor| cursor.move_to(&node));
        if !reused {
            stats.clones += 1;
            ancestor = Some(node.clone());
        }
        let Some(cursor) = ancestor.as_mut() else {
            continue;
        };

        while cursor.move_to_parent() {
            stats.parent_moves += 1;
            if test.matches(&*cursor) && !buffer.insert(&*cursor) {
                trace!(?cursor, "ancestor already recorded, chain done");
                stats.short_circuits += 1;
                break;
            }
        }
    }

    debug!(
        contexts = stats.contexts,
        results = buffer.len(),
        parent_moves = stats.parent_moves,
        short_circuits = stats.short_circuits,
        clones = stats.clones,
        match_self,
        "ancestor axis materialised"
    );
    CachedSequence::new(buffer)
}
