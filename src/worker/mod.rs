//! Summary production and delivery planning

pub mod deliver;
pub mod summarize;

pub use summarize::SummaryPipeline;

/// Canonical failure message shown to users when summarization fails.
pub const CANONICAL_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't generate a summary at this time. Please try again later.";
