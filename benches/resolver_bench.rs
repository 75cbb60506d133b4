#![allow(unused)]
//! Date resolution benchmarks.
//!
//! Each format family is reached only after every earlier family fails, so
//! the late families (month names, free-form) are the slow path.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `date_parser` | One input per format family |
//! | `cascade` | Resolver with textual hints vs. image fallback |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench resolver_bench
//! ```

use std::hint::black_box;

use bujo_core::config::ResolverConfig;
use bujo_core::{DateHints, DateParser, DateResolver, ImageMetadata};
use chrono::{Duration, Local};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn date_parser_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_parser");
    let parser = DateParser::new(Local::now().date_naive());

    for (family, input) in [
        ("iso", "2026-10-14"),
        ("delimited", "14.10.2026"),
        ("concatenated", "20261014"),
        ("relative", "tomorrow"),
        ("weekday", "Friday"),
        ("month_day", "October 14th"),
        ("free_form", "Wednesday, October 14, 2026"),
        ("miss", "smudged ink"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(family), input, |b, input| {
            b.iter(|| black_box(parser.parse(input)))
        });
    }
    group.finish();
}

fn cascade_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    let now = Local::now();
    let resolver = DateResolver::new(ResolverConfig::default(), now);

    let page_hint = DateHints {
        page_date: Some("Oct 9".into()),
        ..DateHints::default()
    };
    let bad_hints = DateHints {
        page_date: Some("smudge".into()),
        entry_date: Some("??".into()),
        collection_date: Some("n/a".into()),
    };
    let mut image = ImageMetadata::unknown("file:///page.jpg");
    image.created_at = now - Duration::days(2);

    group.bench_function("page_date", |b| {
        b.iter(|| black_box(resolver.resolve(&page_hint, None)))
    });
    group.bench_function("misses_then_image", |b| {
        b.iter(|| black_box(resolver.resolve(&bad_hints, Some(&image))))
    });
    group.finish();
}

criterion_group!(benches, date_parser_bench, cascade_bench);
criterion_main!(benches);
