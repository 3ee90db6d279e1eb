use pipeviz_core::{Catalog, Decoration, RenderCache, Renderer, Toggles};
use std::sync::Arc;

#[test]
fn render_cache_repeated_request_expected_shared_value() {
    let catalog = Catalog::builtin();
    let cache = RenderCache::new(Renderer::new(&catalog));
    let toggles = Toggles::new().with(Decoration::Quality);

    let first = cache.render("Simple ETL", &toggles).expect("render should succeed");
    let second = cache.render("Simple ETL", &toggles).expect("render should succeed");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn render_cache_distinct_toggles_expected_separate_entries_matching_renderer() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);
    let cache = RenderCache::new(renderer);

    let plain = cache.render("Backfill", &Toggles::new()).expect("render should succeed");
    let annotated = cache
        .render("Backfill", &Toggles::new().annotated(true))
        .expect("render should succeed");

    assert_eq!(cache.len(), 2);
    assert_ne!(plain, annotated);
    assert_eq!(
        *annotated,
        renderer
            .render("Backfill", &Toggles::new().annotated(true))
            .expect("render should succeed")
    );
}

#[test]
fn render_cache_unknown_pattern_expected_error_not_cached() {
    let catalog = Catalog::builtin();
    let cache = RenderCache::new(Renderer::new(&catalog));

    cache
        .render("unknown-pattern-xyz", &Toggles::new())
        .expect_err("lookup should fail");
    assert!(cache.is_empty());

    cache
        .render("CDC Merge", &Toggles::new())
        .expect("render should succeed");
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn render_cache_shared_across_threads_expected_consistent() {
    let catalog = Catalog::builtin();
    let cache = RenderCache::new(Renderer::new(&catalog));
    let names = catalog.list_names();

    std::thread::scope(|scope| {
        for name in &names {
            let cache = &cache;
            scope.spawn(move || {
                cache
                    .render(name, &Toggles::all())
                    .expect("render should succeed");
            });
        }
    });

    assert_eq!(cache.len(), names.len());
}
