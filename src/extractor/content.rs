use scraper::Html;
use scraper::node::Node;

use crate::extractor::model::ContentSignals;

const EXCLUDED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Concatenated text of the document with `<script>` and `<style>` subtrees
/// removed, whitespace runs collapsed to single spaces.
pub fn visible_text(document: &Html) -> String {
    let mut raw = String::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(el) => EXCLUDED_ELEMENTS.contains(&el.name()),
            _ => false,
        });
        if !hidden {
            raw.push_str(text);
        }
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn extract(document: &Html) -> ContentSignals {
    ContentSignals::from_word_count(count_words(&visible_text(document)))
}
