//! Network checks that run after the page itself was fetched. None of them
//! can fail the analysis; problems are folded into the returned values.

pub mod links;
pub mod site;

pub use links::{BrokenLink, BrokenReason, LinkHealth, sample_links};
pub use site::{SiteFiles, check_well_known};
