//! # Listing Benchmarks
//!
//! Cost of deriving the public menu for growing categories.
//!
//! Run with: `cargo bench -p menuboard-core`

use chrono::Utc;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use menuboard_core::{
    Category, MenuItem, MenuItemId, NewMenuItem, SubCategoryFilter, derive_listing, reconcile,
};
use std::hint::black_box;

const SYLLABLES: [&str; 8] = ["가", "나", "라", "마", "바", "사", "아", "자"];
const SUBS: [&str; 3] = ["coffee", "tea", "smoothie"];

/// Build `size` drinks with rotating names, sub-categories and stock.
fn create_items(size: usize) -> Vec<MenuItem> {
    (0..size)
        .map(|i| {
            let name = format!("{}{} {}", SYLLABLES[i % 8], SYLLABLES[(i / 8) % 8], i);
            NewMenuItem::new(name, Category::Drink)
                .with_sub_category(SUBS[i % 3])
                .with_stock((i % 5) as i64)
                .into_item(MenuItemId(i as u64), Utc::now())
        })
        .collect()
}

fn bench_derive_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_listing");
    for size in [10, 100, 1000] {
        let items = create_items(size);
        group.bench_with_input(BenchmarkId::new("all", size), &items, |b, items| {
            b.iter(|| derive_listing(black_box(items.clone()), Category::Drink, SubCategoryFilter::All));
        });
        group.bench_with_input(BenchmarkId::new("filtered", size), &items, |b, items| {
            b.iter(|| {
                derive_listing(
                    black_box(items.clone()),
                    Category::Drink,
                    SubCategoryFilter::Only("tea".to_string()),
                )
            });
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let files: Vec<String> = (0..200).map(|i| format!("/uploads/hero/{}.jpg", i)).collect();
    let saved: Vec<String> = files.iter().rev().step_by(2).cloned().collect();
    c.bench_function("reconcile_200", |b| {
        b.iter(|| reconcile(black_box(&files), black_box(&saved)));
    });
}

criterion_group!(benches, bench_derive_listing, bench_reconcile);
criterion_main!(benches);
