use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schema_builder::{compile, EditCommand, EditorSession, FieldNode, FieldPath, FieldType};

fn wide_forest(width: usize) -> Vec<FieldNode> {
    (0..width)
        .map(|i| {
            let ty = if i % 2 == 0 { FieldType::String } else { FieldType::Number };
            FieldNode::leaf(format!("field_{}", i), ty)
        })
        .collect()
}

fn deep_forest(depth: usize) -> Vec<FieldNode> {
    let mut node = FieldNode::leaf("leaf", FieldType::Number);
    for level in (0..depth).rev() {
        node = FieldNode::nested(
            format!("level_{}", level),
            vec![node, FieldNode::leaf("name", FieldType::String)],
        );
    }
    vec![node]
}

fn benchmark_compile_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_wide");
    for width in [10, 100, 1000] {
        let nodes = wide_forest(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &nodes, |b, nodes| {
            b.iter(|| compile(black_box(nodes)));
        });
    }
    group.finish();
}

fn benchmark_compile_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_deep");
    for depth in [4, 16, 64] {
        let nodes = deep_forest(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &nodes, |b, nodes| {
            b.iter(|| compile(black_box(nodes)).to_pretty_json(2));
        });
    }
    group.finish();
}

fn benchmark_deep_edit(c: &mut Criterion) {
    // 32 levels of nesting, then rename the innermost field
    let mut session = EditorSession::default();
    let mut path = FieldPath::new(vec![0]);
    for _ in 0..32 {
        let _ = session.apply(&EditCommand::SetType { path: path.clone(), ty: FieldType::Nested });
        let _ = session.apply(&EditCommand::Append { parent: path.clone() });
        path = path.child(0);
    }
    let rename = EditCommand::SetKey { path, key: "innermost".to_string() };

    c.bench_function("deep_edit_and_preview", |b| {
        b.iter(|| {
            let mut session = session.clone();
            session.apply(black_box(&rename)).unwrap();
            session.preview()
        });
    });
}

criterion_group!(
    benches,
    benchmark_compile_wide,
    benchmark_compile_deep,
    benchmark_deep_edit
);
criterion_main!(benches);
