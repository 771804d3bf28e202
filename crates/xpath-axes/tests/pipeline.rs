use rstest::{fixture, rstest};
use xpath_axes::simple::{SimpleCursor, elem};
use xpath_axes::{Axis, AxisQuery, EvalContext, KindTest, NodeSequence, NodeTest, Query, QueryProps};

fn names(nodes: &[SimpleCursor]) -> Vec<String> {
    nodes.iter().map(|n| n.local_name().unwrap_or("#").to_string()).collect()
}

/// <html><body><div><p/><p/></div><section><p/></section></body></html>
#[fixture]
fn page() -> SimpleCursor {
    elem("html")
        .child(
            elem("body")
                .child(elem("div").child(elem("p")).child(elem("p")))
                .child(elem("section").child(elem("p"))),
        )
        .build()
}

fn paragraphs(page: &SimpleCursor) -> Vec<SimpleCursor> {
    let div = page.find("div").unwrap();
    let section = page.find("section").unwrap();
    let mut out = div.children();
    out.extend(section.children());
    out
}

#[rstest]
fn cloned_plans_evaluate_independently(page: SimpleCursor) {
    let plan = Query::context().ancestor(NodeTest::element());
    let copy = plan.clone();
    let ctx = EvalContext::default();
    let [first, _, last]: [SimpleCursor; 3] = paragraphs(&page).try_into().unwrap();

    let alone_first = plan.evaluate(&ctx, [first.clone()]).unwrap().collect_nodes();
    let alone_last = copy.evaluate(&ctx, [last.clone()]).unwrap().collect_nodes();

    // interleave two live passes over the plan and its clone
    let mut a = plan.evaluate(&ctx, [first]).unwrap();
    let mut b = copy.evaluate(&ctx, [last]).unwrap();
    let (mut from_a, mut from_b) = (Vec::new(), Vec::new());
    loop {
        let na = a.advance();
        let nb = b.advance();
        if na.is_none() && nb.is_none() {
            break;
        }
        from_a.extend(na);
        from_b.extend(nb);
    }
    assert_eq!(from_a, alone_first);
    assert_eq!(from_b, alone_last);
    assert_eq!(names(&from_a), ["div", "body", "html"]);
    assert_eq!(names(&from_b), ["section", "body", "html"]);
}

#[rstest]
fn repeated_evaluation_starts_from_an_empty_buffer(page: SimpleCursor) {
    let plan = Query::context().ancestor_or_self(NodeTest::element());
    let ctx = EvalContext::default();
    let div = page.find("div").unwrap();
    let section = page.find("section").unwrap();

    let first = plan.evaluate(&ctx, [div]).unwrap().collect_nodes();
    let second = plan.evaluate(&ctx, [section]).unwrap().collect_nodes();
    assert_eq!(names(&first), ["div", "body", "html"]);
    assert_eq!(names(&second), ["section", "body", "html"]);
}

#[rstest]
fn parent_stage_deduplicates_in_document_order(page: SimpleCursor) {
    let mut context = paragraphs(&page);
    context.reverse();
    let mut seq = Query::context().parent(NodeTest::element()).evaluate(&EvalContext::default(), context).unwrap();
    assert_eq!(seq.properties(), QueryProps::CACHED | QueryProps::COUNT);
    let out = seq.collect_nodes();
    assert_eq!(names(&out), ["div", "section"]);
    assert_eq!(seq.current_position(), 2);
}

#[rstest]
fn ancestor_of_parent_chains_stages(page: SimpleCursor) {
    let plan = Query::context().parent(NodeTest::element()).ancestor(NodeTest::element());
    let out = plan.evaluate(&EvalContext::default(), paragraphs(&page)).unwrap().collect_nodes();
    assert_eq!(names(&out), ["body", "html"]);
}

#[rstest]
fn self_stage_filters_and_inherits_reverse(page: SimpleCursor) {
    let plan = Query::context().ancestor_or_self(NodeTest::kind(KindTest::All)).self_axis(NodeTest::parse("body"));
    let mut seq = plan.evaluate(&EvalContext::default(), paragraphs(&page)).unwrap();
    assert!(seq.properties().contains(QueryProps::REVERSE));
    assert_eq!(seq.advance().as_ref().and_then(SimpleCursor::local_name), Some("body"));
    assert_eq!(seq.current_position(), 1);
    assert!(seq.advance().is_none());
    assert!(seq.advance().is_none());
}

#[rstest]
fn self_stage_over_reverse_input_counts_positions_down() {
    let root = elem("root").child(elem("a").child(elem("b"))).build();
    let b = root.find("b").unwrap();
    let plan = Query::context().ancestor_or_self(NodeTest::element()).self_axis(NodeTest::kind(KindTest::All));
    let mut seq = plan.evaluate(&EvalContext::default(), [b]).unwrap();
    assert!(seq.properties().contains(QueryProps::REVERSE));
    assert_eq!(seq.count(), Some(3));
    let mut seen = Vec::new();
    while let Some(node) = seq.advance() {
        seen.push((node.local_name().unwrap_or("#").to_string(), seq.current_position()));
    }
    let seen: Vec<(&str, usize)> = seen.iter().map(|(n, p)| (n.as_str(), *p)).collect();
    assert_eq!(seen, [("b", 3), ("a", 2), ("root", 1)]);
}

#[rstest]
#[case(Query::context())]
#[case(Query::context().parent(NodeTest::element()))]
#[case(Query::context().ancestor(NodeTest::element()))]
#[case(Query::context().self_axis(NodeTest::parse("p")))]
#[case(Query::context().ancestor_or_self(NodeTest::kind(KindTest::All)).self_axis(NodeTest::parse("body")))]
fn count_property_matches_known_count(page: SimpleCursor, #[case] plan: Query) {
    let seq = plan.evaluate(&EvalContext::default(), paragraphs(&page)).unwrap();
    assert_eq!(seq.properties(), plan.properties());
    assert_eq!(seq.properties().contains(QueryProps::COUNT), seq.count().is_some());
}

#[rstest]
fn context_leaf_passes_items_through(page: SimpleCursor) {
    let mut seq = Query::context().evaluate(&EvalContext::default(), paragraphs(&page)).unwrap();
    assert_eq!(seq.count(), Some(3));
    assert_eq!(seq.properties(), QueryProps::COUNT);
    assert_eq!(seq.collect_nodes(), paragraphs(&page));
}

#[rstest]
fn axis_query_constructor_selects_variant() {
    assert_eq!(AxisQuery::ancestor(Query::context(), NodeTest::element(), true).axis, Axis::AncestorOrSelf);
    assert_eq!(AxisQuery::ancestor(Query::context(), NodeTest::element(), false).axis, Axis::Ancestor);
    let plan = Query::Axis(Box::new(AxisQuery::ancestor(Query::context(), NodeTest::element(), true)));
    assert_eq!(plan, Query::context().ancestor_or_self(NodeTest::element()));
}
