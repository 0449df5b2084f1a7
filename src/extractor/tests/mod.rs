use std::fs;
use url::Url;

use crate::extractor::{extract_html, model::HeadingLevels};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_optimized_page() {
    let html = fixture("optimized.html");
    let base = Url::parse("https://bakery.example.com/sourdough").unwrap();
    let signals = extract_html(&html, &base);

    assert_eq!(signals.title.title_length, 45);
    assert!(signals.title.title_optimal);
    assert_eq!(signals.meta_description.meta_description_length, 140);
    assert!(signals.meta_description.meta_description_optimal);
    assert_eq!(
        signals.canonical.canonical_url,
        "https://bakery.example.com/sourdough"
    );
    assert!(signals.canonical.canonical_exists);

    assert_eq!(signals.headings.headings.h1, vec!["Baking Sourdough at Home"]);
    assert!(signals.headings.h1_optimal);

    // title + h1 + paragraphs; style and script bodies excluded
    assert_eq!(signals.content.word_count, 350);
    assert!(signals.content.content_length_optimal);

    assert_eq!(signals.images.total_images, 0);

    assert_eq!(signals.links.total_link_tags, 3);
    assert_eq!(
        signals.links.internal_links,
        vec!["https://bakery.example.com/recipes"]
    );
    assert_eq!(
        signals.links.external_links,
        vec!["https://flour.example.org/starter"]
    );

    assert!(signals.social.has_og_title);
    assert!(signals.social.has_og_description);
    assert!(signals.social.has_og_image);
    assert!(signals.social.has_twitter_card);
    assert_eq!(signals.social.og_tags_count, 3);

    assert!(signals.backlinks.referring_domains_candidate.is_empty());
}

#[test]
fn test_extract_unoptimized_page() {
    let html = fixture("unoptimized.html");
    let base = Url::parse("https://shop.example.com/").unwrap();
    let signals = extract_html(&html, &base);

    assert_eq!(signals.title.title, "");
    assert!(!signals.title.title_exists);
    assert!(!signals.meta_description.meta_description_exists);
    assert!(!signals.canonical.canonical_exists);

    assert_eq!(signals.headings.heading_counts.h1, 3);
    assert!(signals.headings.has_h1);
    assert!(signals.headings.multiple_h1);
    assert!(!signals.headings.h1_optimal);

    assert_eq!(signals.content.word_count, 50);
    assert!(!signals.content.content_length_optimal);

    assert_eq!(signals.images.total_images, 10);
    assert_eq!(signals.images.images_without_alt_attribute, 10);
    assert_eq!(signals.images.images_with_empty_alt_attribute, 0);
    assert_eq!(signals.images.alt_optimization_ratio, 0.0);

    assert_eq!(signals.links.total_link_tags, 0);
    assert_eq!(signals.social.og_tags_count, 0);
}

#[test]
fn test_extraction_is_idempotent() {
    let html = fixture("optimized.html");
    let base = Url::parse("https://bakery.example.com/sourdough").unwrap();

    let first = extract_html(&html, &base);
    let second = extract_html(&html, &base);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><h1>Unclosed<p>Some <img src=x> text<a href='/x'>more";
    let base = Url::parse("https://example.com/").unwrap();
    let signals = extract_html(html, &base);

    assert_eq!(signals.title.title, "Broken");
    assert!(signals.headings.has_h1);
    assert_eq!(signals.images.total_images, 1);
    assert_eq!(signals.links.internal_links, vec!["https://example.com/x"]);
}

#[test]
fn test_empty_document_defaults() {
    let base = Url::parse("https://example.com/").unwrap();
    let signals = extract_html("", &base);

    assert_eq!(signals.content.word_count, 0);
    assert_eq!(signals.headings.heading_counts, HeadingLevels::default());
    assert_eq!(signals.links.total_link_tags, 0);
    assert!(!signals.title.title_exists);
}

#[test]
fn test_noscript_tracking_pixel() {
    let html = r#"<html><head><title>Pixel</title>
        <noscript><img height="1" width="1" src="https://px.example/tr?id=1"/></noscript>
        </head><body><p>one two</p>
        <noscript><img height="1" width="1" style="display:none" src="https://px.example/t.gif"/></noscript>
        </body></html>"#;
    let base = Url::parse("https://example.com/").unwrap();
    let signals = extract_html(html, &base);

    assert_eq!(signals.content.word_count, 3);
    assert_eq!(signals.images.total_images, 2);
    assert_eq!(signals.images.images_without_alt_attribute, 2);
    assert_eq!(signals.images.alt_optimization_ratio, 0.0);
}

#[test]
fn test_signals_serialize_as_flat_mapping() {
    let html = fixture("unoptimized.html");
    let base = Url::parse("https://shop.example.com/").unwrap();
    let value = serde_json::to_value(extract_html(&html, &base)).unwrap();

    assert_eq!(value["titleOptimal"], false);
    assert_eq!(value["wordCount"], 50);
    assert_eq!(value["imagesWithoutAltAttribute"], 10);
    assert_eq!(value["headingCounts"]["h1"], 3);
    assert!(value["headings"]["h1"].is_array());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            path in "[a-z/]*"
        ) {
            let base = Url::parse(&format!("https://example.com/{path}")).unwrap();
            let _ = extract_html(&html, &base);
        }

        #[test]
        fn test_image_counts_are_consistent(
            alts in proptest::collection::vec(proptest::option::of("[ a-z]{0,4}"), 0..20)
        ) {
            let imgs: String = alts
                .iter()
                .map(|alt| match alt {
                    Some(alt) => format!(r#"<img src="i.png" alt="{alt}">"#),
                    None => r#"<img src="i.png">"#.to_string(),
                })
                .collect();
            let base = Url::parse("https://example.com/").unwrap();
            let signals = extract_html(&format!("<html><body>{imgs}</body></html>"), &base);

            let images = signals.images;
            prop_assert_eq!(images.total_images, alts.len());
            prop_assert!(
                images.images_without_alt_attribute + images.images_with_empty_alt_attribute
                    <= images.total_images
            );
            prop_assert!((0.0..=1.0).contains(&images.alt_optimization_ratio));
        }

        #[test]
        fn test_link_partition_is_disjoint(
            hrefs in proptest::collection::vec(
                prop_oneof![
                    "/[a-z]{1,6}",
                    "https://example\\.com/[a-z]{0,4}",
                    "https://other\\.org/[a-z]{0,4}",
                    "#[a-z]{0,3}",
                ],
                0..25,
            )
        ) {
            let anchors: String = hrefs
                .iter()
                .map(|href| format!(r#"<a href="{href}">x</a>"#))
                .collect();
            let base = Url::parse("https://example.com/").unwrap();
            let links = extract_html(&format!("<html><body>{anchors}</body></html>"), &base).links;

            for link in &links.internal_links {
                prop_assert!(!links.external_links.contains(link));
            }
            let non_fragment = hrefs.iter().filter(|h| !h.starts_with('#')).count();
            prop_assert_eq!(links.total_link_tags, non_fragment);
        }

        #[test]
        fn test_title_optimality_matches_length(title in "[A-Za-z][A-Za-z ]{0,80}[A-Za-z]") {
            let base = Url::parse("https://example.com/").unwrap();
            let signals = extract_html(&format!("<html><head><title>{title}</title></head></html>"), &base);
            let len = title.chars().count();
            prop_assert_eq!(signals.title.title_optimal, (30..=60).contains(&len));
        }
    }
}
