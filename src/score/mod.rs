//! Category scores derived from a stored result. Pure: no I/O, no clock.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, PageAnalysis};

const FULL: f64 = 100.0;
const PARTIAL: f64 = 50.0;
const NONE: f64 = 0.0;

/// Per-category scores in `[0, 100]` and their unweighted mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub title: f64,
    pub meta_description: f64,
    pub h1: f64,
    pub content: f64,
    pub technical: f64,
    pub images: f64,
    pub social: f64,
    pub overall: f64,
}

fn tiered(optimal: bool, present: bool) -> f64 {
    if optimal {
        FULL
    } else if present {
        PARTIAL
    } else {
        NONE
    }
}

fn share_of(checks: &[bool]) -> f64 {
    let passed = checks.iter().filter(|&&check| check).count();
    passed as f64 * FULL / checks.len() as f64
}

impl ScoreBreakdown {
    pub fn from_page(page: &PageAnalysis) -> Self {
        let signals = &page.signals;

        let title = tiered(signals.title.title_optimal, signals.title.title_exists);
        let meta_description = tiered(
            signals.meta_description.meta_description_optimal,
            signals.meta_description.meta_description_exists,
        );
        let h1 = tiered(signals.headings.h1_optimal, signals.headings.has_h1);
        // thin content is a soft penalty, never zero
        let content = if signals.content.content_length_optimal {
            FULL
        } else {
            PARTIAL
        };
        let technical = share_of(&[
            page.site_files.robots_txt_exists,
            page.site_files.sitemap_xml_exists,
            signals.canonical.canonical_exists,
        ]);
        let images = if signals.images.total_images == 0 {
            FULL
        } else {
            signals.images.alt_optimization_ratio * FULL
        };
        let social = share_of(&[
            signals.social.has_og_title,
            signals.social.has_og_description,
            signals.social.has_og_image,
        ]);

        let overall = (title + meta_description + h1 + content + technical + images + social) / 7.0;

        Self {
            title,
            meta_description,
            h1,
            content,
            technical,
            images,
            social,
            overall,
        }
    }
}

/// Scores for a successful result; `None` for a failed one.
pub fn score(result: &AnalysisResult) -> Option<ScoreBreakdown> {
    result.page().map(ScoreBreakdown::from_page)
}
