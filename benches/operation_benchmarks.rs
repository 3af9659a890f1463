// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use cim_ontology::{
    execute, product, pullback, Category, Functor, Morphism, MorphismType, Object,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn chain_category(name: &str, size: usize) -> Category {
    let mut category = Category::new(name, "bench");
    let objects: Vec<Object> = (0..size)
        .map(|i| Object::new(format!("{name}{i}"), "d").with_attributes([format!("attr{i}")]))
        .collect();
    for object in &objects {
        category.add_object(object.clone());
    }
    for pair in objects.windows(2) {
        category.add_morphism(Morphism::new(
            format!("{}_to_{}", pair[0].name, pair[1].name),
            pair[0].clone(),
            pair[1].clone(),
            MorphismType::Functional,
        ));
    }
    category
}

/// Functor from `source` onto `buckets` objects of `target`, round robin
fn bucketing(name: &str, source: &Arc<Category>, target: &Arc<Category>, buckets: usize) -> Functor {
    let targets: Vec<&String> = target.objects().keys().take(buckets).collect();
    let mut functor = Functor::new(name, Arc::clone(source), Arc::clone(target));
    for (i, object) in source.objects().keys().enumerate() {
        functor
            .object_map
            .insert(object.clone(), targets[i % targets.len()].clone());
    }
    functor
}

fn benchmark_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("product");

    for size in [10, 50, 100].iter() {
        let a = chain_category("a", *size);
        let b = chain_category("b", *size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.iter(|| product(black_box(&a), black_box(&b), None));
        });
    }

    group.finish();
}

fn benchmark_pullback(c: &mut Criterion) {
    let mut group = c.benchmark_group("pullback");

    for size in [100, 500, 1_000].iter() {
        let a = Arc::new(chain_category("a", *size));
        let b = Arc::new(chain_category("b", *size));
        let base = Arc::new(chain_category("c", 16));
        let f = bucketing("F", &a, &base, 16);
        let g = bucketing("G", &b, &base, 16);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.iter(|| pullback(black_box(&a), black_box(&b), &base, &f, &g, None));
        });
    }

    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let source = include_str!("../demos/carbon_footprint.codsl");
    c.bench_function("execute_carbon_footprint", |b| {
        b.iter(|| execute(black_box(source)).map(|env| env.results.len()))
    });
}

criterion_group!(benches, benchmark_product, benchmark_pullback, benchmark_document);

criterion_main!(benches);
