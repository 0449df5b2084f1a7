#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use seocheck::extractor::extract_html;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let Ok(base) = Url::parse("https://example.com/page") else {
        return;
    };

    // Extraction must never panic, and its counts must stay consistent.
    let signals = extract_html(&html, &base);
    let images = &signals.images;
    assert!(
        images.images_without_alt_attribute + images.images_with_empty_alt_attribute
            <= images.total_images
    );
    assert_eq!(signals.links.internal_links_count, signals.links.internal_links.len());
});
