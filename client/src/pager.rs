//! Feed pager
//!
//! Accumulates the section reference list lazily, one page at a time.
//! Page fetches are strictly ordered: page N+1 is only requested after
//! the page-N response is known and says more data exists, and a page is
//! never requested twice. Exclusive access (`&mut self`) keeps at most
//! one page request in flight.

use std::sync::Arc;

use crate::api::{ApiError, SectionApi, SectionRef};
use crate::retry::{with_retries, DEFAULT_RETRY_LIMIT};

/// How close to the end of loaded content the visible position must be
/// before the next page is requested.
pub const DEFAULT_PREFETCH_MARGIN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Next(u32),
    Exhausted,
}

pub struct FeedPager<A: SectionApi> {
    api: Arc<A>,
    sections: Vec<SectionRef>,
    cursor: Cursor,
    total_items: Option<u64>,
    prefetch_margin: usize,
    retry_limit: u32,
}

impl<A: SectionApi> FeedPager<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            sections: Vec::new(),
            cursor: Cursor::Next(0),
            total_items: None,
            prefetch_margin: DEFAULT_PREFETCH_MARGIN,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    pub fn with_prefetch_margin(mut self, margin: usize) -> Self {
        self.prefetch_margin = margin;
        self
    }

    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    /// References accumulated so far, in canonical catalog order.
    pub fn sections(&self) -> &[SectionRef] {
        &self.sections
    }

    /// Total catalog size, known once the first page response arrives.
    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub fn has_more(&self) -> bool {
        matches!(self.cursor, Cursor::Next(_))
    }

    /// Whether `visible_index` is close enough to the end of loaded
    /// content that the next page should be fetched.
    pub fn near_end(&self, visible_index: usize) -> bool {
        self.has_more() && visible_index + self.prefetch_margin >= self.sections.len()
    }

    /// Fetch the next page if `visible_index` is near the end of loaded
    /// content. Returns whether a page request was made.
    pub async fn maybe_load_more(&mut self, visible_index: usize) -> Result<bool, ApiError> {
        if !self.near_end(visible_index) {
            return Ok(false);
        }
        self.load_next().await?;
        Ok(true)
    }

    /// Fetch the page at the cursor and append its items, retrying
    /// transient failures up to the bounded limit. A fetch that still
    /// fails leaves the cursor unchanged, so a later trigger tries the
    /// same page again rather than skipping it. Returns the number of
    /// references appended.
    pub async fn load_next(&mut self) -> Result<usize, ApiError> {
        let page = match self.cursor {
            Cursor::Next(page) => page,
            Cursor::Exhausted => return Ok(0),
        };

        let api = self.api.clone();
        let response = with_retries(self.retry_limit, move || {
            let api = api.clone();
            async move { api.fetch_page(page).await }
        })
        .await?;

        self.total_items = Some(response.total_items);
        self.cursor = match response.next_page {
            Some(next) => Cursor::Next(next),
            None => Cursor::Exhausted,
        };
        let appended = response.items.len();
        self.sections.extend(response.items);

        tracing::debug!(
            page,
            appended,
            loaded = self.sections.len(),
            has_more = self.has_more(),
            "page loaded"
        );
        Ok(appended)
    }
}
