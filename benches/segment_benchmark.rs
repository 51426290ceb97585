//! Benchmarks for readflow processing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic word layouts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use readflow::{ProcessOptions, SourceWord};

/// Creates a synthetic document with a running header, a page-number footer
/// and a few prose paragraphs per page.
fn create_test_words(page_count: u32) -> Vec<SourceWord> {
    let mut words = Vec::new();

    for page in 1..=page_count {
        let mut push_line = |text: &str, x0: f32, top: f32| {
            let mut x = x0;
            for token in text.split_whitespace() {
                let width = token.len() as f32 * 6.0;
                words.push(
                    SourceWord::new(token, page, x, top, x + width, top + 12.0)
                        .with_page_size(612.0, 792.0),
                );
                x += width + 4.0;
            }
        };

        push_line("Benchmark Report", 72.0, 30.0);

        let mut top = 100.0;
        for paragraph in 0..4 {
            push_line("The quick brown fox jumps over the lazy dog and keeps", 90.0, top);
            top += 14.0;
            push_line("running through the field until the evening comes and", 72.0, top);
            top += 14.0;
            push_line(&format!("rests at paragraph {}.", paragraph), 72.0, top);
            top += 30.0;
        }

        push_line(&page.to_string(), 300.0, 760.0);
    }

    words
}

/// Benchmark paragraph segmentation only.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for page_count in [1, 10, 50].iter() {
        let words = create_test_words(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = readflow::pipeline::process_words(
                    black_box(words.clone()),
                    &ProcessOptions::default(),
                );
            });
        });
    }

    group.finish();
}

/// Benchmark the full pipeline with boilerplate removal.
fn bench_full_pipeline(c: &mut Criterion) {
    let words = create_test_words(50);

    c.bench_function("full_pipeline_parallel", |b| {
        b.iter(|| {
            let _ = readflow::Reflow::new()
                .skip_patterns(true)
                .process(black_box(words.clone()));
        });
    });

    c.bench_function("full_pipeline_sequential", |b| {
        b.iter(|| {
            let _ = readflow::Reflow::new()
                .skip_patterns(true)
                .sequential()
                .process(black_box(words.clone()));
        });
    });
}

criterion_group!(benches, bench_segmentation, bench_full_pipeline);
criterion_main!(benches);
