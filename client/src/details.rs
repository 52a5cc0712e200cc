//! Section detail cache
//!
//! Detail fetches for different sections are independent and may run
//! concurrently; the map lock is never held across an await. A failed
//! fetch is scoped to its own section and never disturbs sibling entries
//! or the page list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::api::{ApiError, SectionApi, SectionDetail, SectionRef};
use crate::retry::{with_retries, DEFAULT_RETRY_LIMIT};

/// How long a cached detail stays fresh before a later request silently
/// revalidates it.
pub const DEFAULT_FRESH_FOR: Duration = Duration::from_secs(60);

struct CacheEntry {
    detail: SectionDetail,
    fetched_at: Instant,
}

pub struct DetailCache<A: SectionApi> {
    api: Arc<A>,
    fresh_for: Duration,
    retry_limit: u32,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<A: SectionApi> DetailCache<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            fresh_for: DEFAULT_FRESH_FOR,
            retry_limit: DEFAULT_RETRY_LIMIT,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_fresh_for(mut self, fresh_for: Duration) -> Self {
        self.fresh_for = fresh_for;
        self
    }

    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    /// The detail record for one section: served from cache while fresh,
    /// otherwise fetched with bounded retries and re-cached. When
    /// revalidation of an expired entry fails, the stale entry is served
    /// instead; an error is returned only for sections with no cached
    /// data at all.
    ///
    /// Two callers racing on the same key may both fetch; the later
    /// write wins. Only page fetches are single-flight.
    pub async fn get(&self, section: &SectionRef) -> Result<SectionDetail, ApiError> {
        let key = section.key();
        if let Some(detail) = self.fresh(&key) {
            return Ok(detail);
        }

        let api = self.api.clone();
        let target = section.clone();
        let result = with_retries(self.retry_limit, move || {
            let api = api.clone();
            let target = target.clone();
            async move { api.fetch_detail(&target).await }
        })
        .await;

        match result {
            Ok(detail) => {
                self.entries.lock().unwrap().insert(
                    key,
                    CacheEntry {
                        detail: detail.clone(),
                        fetched_at: Instant::now(),
                    },
                );
                Ok(detail)
            }
            Err(err) => match self.stale(&key) {
                Some(detail) => {
                    tracing::debug!(section = %section, "revalidation failed, serving stale detail: {}", err);
                    Ok(detail)
                }
                None => Err(err),
            },
        }
    }

    fn fresh(&self, key: &str) -> Option<SectionDetail> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).and_then(|entry| {
            (entry.fetched_at.elapsed() <= self.fresh_for).then(|| entry.detail.clone())
        })
    }

    fn stale(&self, key: &str) -> Option<SectionDetail> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).map(|entry| entry.detail.clone())
    }
}
