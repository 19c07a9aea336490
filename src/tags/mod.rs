//! Tag resolution: noisy catalog subjects → bounded, ranked tag set

mod policy;
mod resolver;
mod tag_set;

pub use policy::TagPolicy;
pub use resolver::{CandidateTag, TagResolver};
pub use tag_set::TagSet;

/// Comparison key for tags: trimmed and lowercased.
pub(crate) fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}
