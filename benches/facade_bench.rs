// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dom_shortcut::{parse_html, Dom};

fn fixture() -> Dom {
    let mut html = String::from("<html><body><div class='container'><ul id='list'>");
    for i in 0..200 {
        html.push_str(&format!(
            "<li class='item'><!-- {i} --> <span class='label'>item {i}</span> </li>"
        ));
    }
    html.push_str("</ul></div></body></html>");
    Dom::new(parse_html(&html).unwrap()).unwrap()
}

fn selection_benchmark(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let dom = fixture();

    c.bench_function("select_all_descendant", |b| {
        b.iter(|| black_box(dom.select_all(".container li > span.label").unwrap().len()))
    });

    c.bench_function("children", |b| {
        let list = dom.by_id("list").unwrap().unwrap();
        b.iter(|| black_box(dom.children(&list, ".item").unwrap().len()))
    });
}

fn find_ancestor_benchmark(c: &mut Criterion) {
    let dom = fixture();
    let leaf = dom.select_all("span.label").unwrap().pop().unwrap();

    c.bench_function("find_ancestor", |b| {
        b.iter(|| black_box(dom.find_ancestor(&leaf, ".container", false).unwrap()))
    });
}

fn clean_benchmark(c: &mut Criterion) {
    c.bench_function("clean", |b| {
        b.iter_batched(
            fixture,
            |dom| {
                let list = dom.by_id("list").unwrap().unwrap();
                black_box(dom.clean(&list))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    selection_benchmark,
    find_ancestor_benchmark,
    clean_benchmark
);
criterion_main!(benches);
