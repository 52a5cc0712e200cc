//! Feed client for the mock content API
//!
//! Data-fetching layer for an infinite-scroll feed, independent of any
//! rendering framework:
//!
//! - [`api`]: wire types and the `SectionApi` transport port, with a
//!   reqwest implementation.
//! - [`pager`]: strictly ordered, lazily triggered page accumulation.
//! - [`details`]: per-section detail cache with a bounded freshness
//!   window and bounded retries.
//! - [`entrance`]: per-item one-shot entrance animation state machine.

pub mod api;
pub mod details;
pub mod entrance;
pub mod pager;
mod retry;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{ApiError, HttpSectionApi, SectionApi, SectionDetail, SectionPage, SectionRef};
pub use details::{DetailCache, DEFAULT_FRESH_FOR};
pub use entrance::{EntrancePhase, EntranceTracker};
pub use pager::{FeedPager, DEFAULT_PREFETCH_MARGIN};
pub use retry::DEFAULT_RETRY_LIMIT;
