use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xpath_axes::simple::{SimpleCursor, elem};
use xpath_axes::{EvalContext, NodeSequence, NodeTest, Query};

// `depth` nested elements with `width` leaves hanging off the deepest one.
fn comb(depth: usize, width: usize) -> SimpleCursor {
    let mut node = elem("leaf-parent").children((0..width).map(|_| elem("leaf")));
    for _ in 0..depth {
        node = elem("level").child(node);
    }
    node.build()
}

fn leaves(root: &SimpleCursor) -> Vec<SimpleCursor> {
    root.find("leaf-parent").map(|p| p.children()).unwrap_or_default()
}

fn bench_shared_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("ancestor_shared_chain");
    let query = Query::context().ancestor(NodeTest::element());
    for (depth, width) in [(16, 16), (64, 256), (256, 1024)] {
        let root = comb(depth, width);
        let context = leaves(&root);
        for reuse in [true, false] {
            let ctx = EvalContext::builder().with_cursor_reuse(reuse).build();
            let id = BenchmarkId::new(if reuse { "reuse" } else { "clone" }, format!("{depth}x{width}"));
            group.bench_with_input(id, &context, |b, context| {
                b.iter(|| {
                    let mut seq = query.evaluate(&ctx, context.iter().cloned()).unwrap();
                    black_box(seq.collect_nodes().len())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_shared_chain);
criterion_main!(benches);
