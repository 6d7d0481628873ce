//! Benchmarks for text buffer operations.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quire_buffer::{BackspacePolicy, BufferConfig, Mode, NewlinePolicy, TextBuffer};

/// Generates a large text string for benchmarking.
fn generate_large_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Line {}: This is a sample line of text for benchmarking purposes.\n", i))
        .collect()
}

fn split_join() -> BufferConfig {
    BufferConfig {
        newline: NewlinePolicy::Split,
        backspace: BackspacePolicy::Join,
    }
}

/// Benchmarks loading and serializing whole documents.
fn bench_text_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_conversion");

    for size in [100, 1000, 10000].iter() {
        let text = generate_large_text(*size);
        let buffer = TextBuffer::from(text.as_str());

        group.bench_with_input(BenchmarkId::new("from_text", size), &text, |b, text| {
            b.iter(|| black_box(TextBuffer::from_text(black_box(text), BufferConfig::default())))
        });

        group.bench_with_input(BenchmarkId::new("to_text", size), &buffer, |b, buffer| {
            b.iter(|| black_box(buffer.to_text()))
        });
    }

    group.finish();
}

/// Benchmarks typing into an insert-mode buffer.
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    let sentence = "The quick brown fox jumps over the lazy dog. ";

    group.bench_function("insert_char_sentence", |b| {
        b.iter_with_setup(TextBuffer::new, |mut buffer| {
            for ch in sentence.chars() {
                buffer.insert_char(Mode::Insert, black_box(ch)).unwrap();
            }
            black_box(buffer)
        })
    });

    group.bench_function("backspace_sentence", |b| {
        b.iter_with_setup(
            || TextBuffer::from(sentence),
            |mut buffer| {
                for _ in 0..sentence.len() {
                    let _ = buffer.move_cursor_right();
                }
                for _ in 0..sentence.len() {
                    buffer.delete_char_before_cursor(Mode::Insert).unwrap();
                }
                black_box(buffer)
            },
        )
    });

    group.finish();
}

/// Benchmarks line splitting and joining on a large document.
fn bench_line_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_edits");
    let base_text = generate_large_text(10000);

    group.bench_function("split_line_blank", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base_text.as_str()),
            |mut buffer| {
                buffer.split_line(Mode::Insert).unwrap();
                black_box(buffer)
            },
        )
    });

    group.bench_function("split_then_join", |b| {
        b.iter_with_setup(
            || TextBuffer::from_text(&base_text, split_join()),
            |mut buffer| {
                for _ in 0..10 {
                    buffer.move_cursor_right().unwrap();
                }
                buffer.split_line(Mode::Insert).unwrap();
                buffer.delete_char_before_cursor(Mode::Insert).unwrap();
                black_box(buffer)
            },
        )
    });

    group.finish();
}

/// Benchmarks cursor navigation.
fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let text = generate_large_text(1000);

    group.bench_function("walk_down_document", |b| {
        b.iter_with_setup(
            || TextBuffer::from(text.as_str()),
            |mut buffer| {
                while buffer.move_cursor_down().is_ok() {}
                black_box(buffer.cursor())
            },
        )
    });

    group.bench_function("walk_right_across_lines", |b| {
        b.iter_with_setup(
            || TextBuffer::from(text.as_str()),
            |mut buffer| {
                for _ in 0..5000 {
                    let _ = buffer.move_cursor_right();
                }
                black_box(buffer.cursor())
            },
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_conversion,
    bench_typing,
    bench_line_edits,
    bench_navigation,
);

criterion_main!(benches);
