//! Performance benchmarks for the word and list diff engines.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use html_diff_tools::{diff_list, diff_words, tokenize, DiffConfig};
use std::fmt::Write as _;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "and", "runs",
];

/// Generate a document of `paragraphs` paragraphs, changing every
/// `change_every`-th word when `changed` is set.
fn generate_document(paragraphs: usize, changed: bool, change_every: usize) -> String {
    let mut html = String::new();
    let mut n = 0;
    for p in 0..paragraphs {
        html.push_str("<p>");
        for w in 0..20 {
            if w > 0 {
                html.push(' ');
            }
            let word = WORDS[(p + w) % WORDS.len()];
            if changed && n % change_every == 0 {
                let _ = write!(html, "{word}ed");
            } else {
                html.push_str(word);
            }
            n += 1;
        }
        if p % 5 == 0 {
            let _ = write!(html, " <a href=\"/page/{p}\">link {p}</a>");
        }
        html.push_str("</p>");
    }
    html
}

/// Generate a list of `items` items, rewording every 7th item when `changed`.
fn generate_list(items: usize, changed: bool) -> String {
    let mut html = String::from("<ul>");
    for i in 0..items {
        if changed && i % 7 == 0 {
            let _ = write!(html, "<li>Revised step {i}: check the {} twice</li>", WORDS[i % WORDS.len()]);
        } else {
            let _ = write!(html, "<li>Step {i}: check the {}</li>", WORDS[i % WORDS.len()]);
        }
    }
    html.push_str("</ul>");
    html
}

fn benchmark_tokenize(c: &mut Criterion) {
    let config = DiffConfig::default();
    let document = generate_document(200, false, 1);

    c.bench_function("tokenize_200_paragraphs", |b| {
        b.iter(|| tokenize(black_box(&document), &config));
    });
}

fn benchmark_diff_words(c: &mut Criterion) {
    let config = DiffConfig::default();
    let mut group = c.benchmark_group("diff_words");

    for paragraphs in [10, 50, 200] {
        let old = generate_document(paragraphs, false, 1);
        let new = generate_document(paragraphs, true, 37);
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &(old, new),
            |b, (old, new)| {
                b.iter(|| diff_words(black_box(old), black_box(new), &config));
            },
        );
    }

    group.finish();
}

fn benchmark_diff_list(c: &mut Criterion) {
    let config = DiffConfig::default();
    let mut group = c.benchmark_group("diff_list");

    for items in [10, 50, 100] {
        let old = generate_list(items, false);
        let new = generate_list(items, true);
        group.bench_with_input(
            BenchmarkId::from_parameter(items),
            &(old, new),
            |b, (old, new)| {
                b.iter(|| diff_list(black_box(old), black_box(new), &config));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_diff_words,
    benchmark_diff_list
);
criterion_main!(benches);
