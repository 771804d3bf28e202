//! Axis evaluators.
//!
//! Caching axes (`ancestor`, `ancestor-or-self`, `parent`) drain their input
//! into an [`OutputBuffer`](crate::cache::OutputBuffer) and are read back
//! through [`CachedSequence`](crate::cache::CachedSequence). `self` filters its
//! input lazily.

mod ancestor;
mod parent;
mod self_axis;

pub(crate) use ancestor::evaluate_ancestors;
pub(crate) use parent::evaluate_parents;
pub(crate) use self_axis::evaluate_self;
