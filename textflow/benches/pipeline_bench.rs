//! Benchmarks for the text stages and the pipeline driver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textflow::prelude::*;

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {:05} level={}", (i * 7919) % lines, if i % 3 == 0 { "warn" } else { "info" }))
        .collect::<Vec<_>>()
        .join("\n")
}

fn stage_benchmark(c: &mut Criterion) {
    let text = sample_text(10_000);

    let grep = Grep::new(StageId(1), "warn");
    c.bench_function("grep_literal_10k", |b| {
        b.iter(|| grep.execute(black_box(StageResult::text(text.clone()))));
    });

    let sort = Sort::new(StageId(2));
    c.bench_function("sort_10k", |b| {
        b.iter(|| sort.execute(black_box(StageResult::text(text.clone()))));
    });

    let replace = Replace::new(StageId(3), "level=", "lvl:").unwrap();
    c.bench_function("replace_10k", |b| {
        b.iter(|| replace.execute(black_box(StageResult::text(text.clone()))));
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, sample_text(10_000)).unwrap();

    let pipeline = PipelineBuilder::new("bench")
        .stage(ReadFile::new(StageId(1), &input))
        .stage(Grep::new(StageId(2), "warn"))
        .stage(Sort::new(StageId(3)))
        .stage(Replace::new(StageId(4), "warn", "WARN").unwrap())
        .build()
        .unwrap();

    c.bench_function("read_grep_sort_replace_10k", |b| {
        b.iter(|| black_box(pipeline.run()));
    });
}

criterion_group!(benches, stage_benchmark, pipeline_benchmark);
criterion_main!(benches);
