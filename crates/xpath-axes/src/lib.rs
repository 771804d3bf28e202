//! Caching XPath axis queries over abstract, navigable trees.
//!
//! A [`Query`] plan is a chain of stages over the outer context. Evaluating it
//! yields a [`NodeSequence`] that is pulled with `advance()`. The `ancestor`
//! and `ancestor-or-self` stages materialise their results into a
//! duplicate-free [`OutputBuffer`] and are read back in reverse document order,
//! which they announce through [`QueryProps::REVERSE`].
//!
//! ```
//! use xpath_axes::simple::elem;
//! use xpath_axes::{EvalContext, NodeTest, Query};
//!
//! let root = elem("root").child(elem("a").child(elem("b").child(elem("c")))).build();
//! let c = root.find("c").unwrap();
//! let b = root.find("b").unwrap();
//!
//! let query = Query::context().ancestor(NodeTest::element());
//! let mut seq = query.evaluate(&EvalContext::default(), [c, b]).unwrap();
//! let names: Vec<_> = seq
//!     .collect_nodes()
//!     .iter()
//!     .map(|n| n.local_name().unwrap().to_string())
//!     .collect();
//! assert_eq!(names, ["b", "a", "root"]);
//! ```

mod axes;
pub mod cache;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod query;
pub mod simple;

pub use cache::{CachedSequence, Direction, OutputBuffer};
pub use context::{BufferOrdering, EvalContext, EvalContextBuilder, EvalOptions, NamespaceBindings};
pub use diagnostics::PrintOptions;
pub use error::{Error, Result};
pub use model::{NodeCursor, NodeKind, QName};
pub use node_test::{KindTest, NameTest, NodeTest};
pub use query::{Axis, AxisQuery, NodeSequence, Query, QueryProps};
