use criterion::{Criterion, black_box, criterion_group, criterion_main};
use overmodel_core::render::TemplateResolver;
use overmodel_core::tree::{ConfigTree, deep_merge, expand_key};

fn config(size: usize) -> ConfigTree {
    let trees: Vec<ConfigTree> = (0..size)
        .map(|i| expand_key(&format!("service{i}.host.name"), &format!("host-{i}")).unwrap())
        .chain([expand_key("url", "http://{{service0.host.name}}:8080").unwrap()])
        .collect();
    deep_merge(&trees)
}

fn render_flat_benchmark(c: &mut Criterion) {
    let config = config(100);
    let template: String = (0..100)
        .map(|i| format!("service{i}={{{{service{i}.host.name}}}}\n"))
        .collect();

    c.bench_function("render::flat (100 tokens)", |b| {
        let resolver = TemplateResolver::new(&config);
        b.iter(|| {
            let result = resolver.render(black_box(&template));
            assert!(result.is_complete());
        })
    });
}

fn render_nested_benchmark(c: &mut Criterion) {
    let config = config(1);

    c.bench_function("render::nested", |b| {
        let resolver = TemplateResolver::new(&config);
        b.iter(|| resolver.render(black_box("endpoint={{url}}\n")))
    });
}

fn deep_merge_benchmark(c: &mut Criterion) {
    let trees: Vec<ConfigTree> = (0..500)
        .map(|i| expand_key(&format!("a.b{}.c", i % 50), &i.to_string()).unwrap())
        .collect();

    c.bench_function("tree::deep_merge (500 trees)", |b| {
        b.iter(|| deep_merge(black_box(&trees)))
    });
}

criterion_group!(
    benches,
    render_flat_benchmark,
    render_nested_benchmark,
    deep_merge_benchmark
);
criterion_main!(benches);
