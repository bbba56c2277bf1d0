use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dirsift::{
    Enumerator, FileType, ListingOptions, MatchingMethod, MatchingTarget, PathPatternMatcher,
};
use std::fs;

fn build_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for d in 0..10 {
        let sub = dir.path().join(format!("dir{d}")).join("nested");
        fs::create_dir_all(&sub).unwrap();
        for f in 0..20 {
            fs::write(sub.join(format!("file{f}.txt")), "x").unwrap();
            fs::write(sub.join(format!("image{f}.jpg")), "x").unwrap();
        }
    }
    dir
}

fn bench_recursive_listing(c: &mut Criterion) {
    let tree = build_tree();
    let enumerator = Enumerator::default();

    c.bench_function("recursive_listing", |b| {
        b.iter(|| {
            let listing = enumerator.list_sync(
                black_box(tree.path()),
                ListingOptions::builder().recursive(true).build(),
            );
            black_box(listing.len())
        })
    });
}

fn bench_substring_search(c: &mut Criterion) {
    let tree = build_tree();
    let enumerator = Enumerator::default();
    let matcher =
        PathPatternMatcher::new("jpg", MatchingTarget::Extension, MatchingMethod::Substring)
            .unwrap();

    c.bench_function("substring_search", |b| {
        b.iter(|| {
            let listing = enumerator.list_sync(
                black_box(tree.path()),
                ListingOptions::builder()
                    .recursive(true)
                    .file_type(FileType::NonDirectoryOnly)
                    .matcher(matcher.clone())
                    .build(),
            );
            black_box(listing.len())
        })
    });
}

fn bench_regex_search(c: &mut Criterion) {
    let tree = build_tree();
    let enumerator = Enumerator::default();
    let matcher =
        PathPatternMatcher::new(r"^image1\d", MatchingTarget::FullName, MatchingMethod::Regex)
            .unwrap();

    c.bench_function("regex_search", |b| {
        b.iter(|| {
            let listing = enumerator.list_sync(
                black_box(tree.path()),
                ListingOptions::builder()
                    .recursive(true)
                    .matcher(matcher.clone())
                    .build(),
            );
            black_box(listing.len())
        })
    });
}

#[cfg(feature = "async")]
fn bench_async_stream(c: &mut Criterion) {
    use futures::StreamExt;
    use tokio::runtime::Runtime;

    let tree = build_tree();
    let enumerator = Enumerator::default();
    let rt = Runtime::new().unwrap();

    c.bench_function("async_stream", |b| {
        b.iter(|| {
            rt.block_on(async {
                enumerator
                    .stream(
                        black_box(tree.path()),
                        ListingOptions::builder().recursive(true).build(),
                    )
                    .count()
                    .await
            })
        })
    });
}

#[cfg(not(feature = "async"))]
criterion_group!(
    benches,
    bench_recursive_listing,
    bench_substring_search,
    bench_regex_search
);

#[cfg(feature = "async")]
criterion_group!(
    benches,
    bench_recursive_listing,
    bench_substring_search,
    bench_regex_search,
    bench_async_stream
);

criterion_main!(benches);
