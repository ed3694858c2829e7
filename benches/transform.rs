//! Benchmarks for the import/export rewrite passes
//!
//! Measures throughput on synthetic modules of increasing size so regressions
//! in the line scanner show up before they reach large codebases.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use esm2cjs::{find_exports, find_imports, transform, TransformOptions};

/// Create a module with `statements` import/export statements interleaved
/// with ordinary code.
fn create_module(statements: usize) -> String {
    let mut source = String::new();
    for i in 0..statements {
        match i % 6 {
            0 => source.push_str(&format!("import dep{i} from './dep{i}';\n")),
            1 => source.push_str(&format!("import {{ a{i}, b{i} as c{i} }} from '@scope/pkg{i}';\n")),
            2 => source.push_str(&format!("import Def{i}, * as ns{i} from \"lib{i}\";\n")),
            3 => source.push_str(&format!("export function fn{i}(x) {{\n  return x + {i};\n}}\n")),
            4 => source.push_str(&format!("export {{ a{i} as alias{i} }} from './re{i}';\n")),
            _ => source.push_str(&format!("export * from './all{i}';\n")),
        }
        source.push_str(&format!("const local{i} = compute({i});\n"));
    }
    source
}

/// Benchmark the full two-pass transform
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let options = TransformOptions::default();

    for size in [100, 1_000, 10_000] {
        let source = create_module(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| transform(black_box(source), &options));
        });
    }

    group.finish();
}

/// Benchmark the transform with a path rewrite rule active
fn bench_transform_with_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_with_rewrite");
    let options = TransformOptions::new()
        .with_match(r"^\./(\w+)$")
        .with_replace_by("./cjs/$1.js");

    for size in [100, 1_000] {
        let source = create_module(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| transform(black_box(source), &options));
        });
    }

    group.finish();
}

/// Benchmark the recognizers alone
fn bench_recognize(c: &mut Criterion) {
    let source = create_module(1_000);

    c.bench_function("find_imports_1000", |b| {
        b.iter(|| find_imports(black_box(&source)).len())
    });
    c.bench_function("find_exports_1000", |b| {
        b.iter(|| find_exports(black_box(&source)).len())
    });
}

criterion_group!(
    benches,
    bench_transform,
    bench_transform_with_rewrite,
    bench_recognize
);
criterion_main!(benches);
