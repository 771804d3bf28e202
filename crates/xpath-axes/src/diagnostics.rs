//! XML rendering of query plans for debugging and tooling.
//!
//! ```
//! use xpath_axes::{NodeTest, PrintOptions, Query};
//!
//! let q = Query::context().ancestor_or_self(NodeTest::parse("p:item"));
//! assert_eq!(
//!     q.render(&PrintOptions::default()).unwrap(),
//!     r#"<AncestorQuery self="yes" name="p:item"><ContextQuery/></AncestorQuery>"#
//! );
//! ```
//!
//! The output is a debugging aid, not a stable format.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::io::Write;

use crate::error::Result;
use crate::node_test::KindTest;
use crate::query::{Axis, AxisQuery, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl PrintOptions {
    pub fn pretty() -> Self {
        Self { indent: Some(2) }
    }
}

impl Query {
    /// Writes this stage and, nested inside it, its input chain.
    pub fn print_query<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            Query::Context => {
                w.write_event(Event::Empty(BytesStart::new("ContextQuery")))?;
            }
            Query::Axis(step) => print_axis(step, w)?,
        }
        Ok(())
    }

    pub fn render(&self, options: &PrintOptions) -> Result<String> {
        let mut writer = match options.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };
        self.print_query(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn element_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Ancestor | Axis::AncestorOrSelf => "AncestorQuery",
        Axis::Parent => "ParentQuery",
        Axis::SelfAxis => "SelfQuery",
    }
}

fn print_axis<W: Write>(step: &AxisQuery, w: &mut Writer<W>) -> Result<()> {
    let tag = element_name(step.axis);
    let mut start = BytesStart::new(tag);
    if step.axis == Axis::AncestorOrSelf {
        start.push_attribute(("self", "yes"));
    }
    if let Some(name) = &step.test.name {
        let name = name.to_string();
        start.push_attribute(("name", name.as_str()));
    }
    if step.test.kind != KindTest::Element {
        start.push_attribute(("nodeType", step.test.kind.as_str()));
    }
    w.write_event(Event::Start(start))?;
    step.input.print_query(w)?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
