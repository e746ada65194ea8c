use criterion::{Criterion, black_box, criterion_group, criterion_main};
use flatscout_core::{Document, ExtractConfig, ListingExtractor, ListingMatcher, extract_listings};

fn bench_parse(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/listings.html").unwrap();

    c.bench_function("parse", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_find_containers(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/listings.html").unwrap();
    let doc = Document::parse(&html).unwrap();
    let matcher = ListingMatcher::default();

    c.bench_function("find_containers", |b| b.iter(|| matcher.find_containers(black_box(doc.root()))));
}

fn bench_extract(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/listings.html").unwrap();
    let doc = Document::parse(&html).unwrap();
    let extractor = ListingExtractor::new(&ExtractConfig::default()).unwrap();

    c.bench_function("extract", |b| b.iter(|| extractor.extract(black_box(&doc))));
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/listings.html").unwrap();
    let config = ExtractConfig::default();

    c.bench_function("full_extraction", |b| {
        b.iter(|| extract_listings(black_box(&html), black_box(&config)))
    });
}

criterion_group!(benches, bench_parse, bench_find_containers, bench_extract, bench_full_extraction);
criterion_main!(benches);
