//! Test utilities
//!
//! A manual in-memory transport with call-count instrumentation. Manual
//! rather than macro-generated: the tests need scripted failure windows
//! and exact call accounting, which is easier to read as plain code.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, SectionApi, SectionDetail, SectionPage, SectionRef};

const KINDS: [&str; 4] = ["hero", "card", "quote", "video"];

fn scripted_failure() -> ApiError {
    ApiError::Api {
        status: 503,
        message: "scripted failure".to_string(),
    }
}

/// Deterministic stand-in for the HTTP transport. Serves a generated
/// catalog shaped like the real server's, records every call, and can be
/// scripted to fail.
pub struct MockSectionApi {
    total_items: u64,
    page_size: u64,
    page_calls: Mutex<Vec<u32>>,
    detail_calls: Mutex<Vec<String>>,
    page_failures: Mutex<u32>,
    detail_failures: Mutex<HashMap<String, u32>>,
    missing: Mutex<Vec<String>>,
}

impl MockSectionApi {
    pub fn new(total_items: u64, page_size: u64) -> Self {
        Self {
            total_items,
            page_size,
            page_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
            page_failures: Mutex::new(0),
            detail_failures: Mutex::new(HashMap::new()),
            missing: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next `count` page fetches with a retryable error.
    pub fn fail_pages(&self, count: u32) {
        *self.page_failures.lock().unwrap() = count;
    }

    /// Fail the next `count` detail fetches for `key` with a retryable
    /// error.
    pub fn fail_details(&self, key: &str, count: u32) {
        self.detail_failures
            .lock()
            .unwrap()
            .insert(key.to_string(), count);
    }

    /// Treat `key` as absent from the catalog (terminal not-found).
    pub fn remove_detail(&self, key: &str) {
        self.missing.lock().unwrap().push(key.to_string());
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn detail_call_count(&self, key: &str) -> usize {
        self.detail_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }

    pub fn section_ref(index: u64) -> SectionRef {
        SectionRef::new(KINDS[(index % KINDS.len() as u64) as usize], index)
    }

    pub fn detail_for(section: &SectionRef) -> SectionDetail {
        SectionDetail {
            kind: section.kind.clone(),
            index: section.index,
            title: format!("Mock Item {}", section.index),
            text: format!("Mock text for item {}.", section.index),
            image: format!("https://picsum.photos/seed/{}/400/300", section.index),
            video_url: (section.kind == "video")
                .then(|| format!("https://example.com/videos/{}.mp4", section.index)),
        }
    }
}

#[async_trait]
impl SectionApi for MockSectionApi {
    async fn fetch_page(&self, page: u32) -> Result<SectionPage, ApiError> {
        self.page_calls.lock().unwrap().push(page);

        {
            let mut failures = self.page_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(scripted_failure());
            }
        }

        let start = u64::from(page) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        let items: Vec<SectionRef> = (start..end).map(Self::section_ref).collect();
        let next_page = if end < self.total_items {
            Some(page + 1)
        } else {
            None
        };

        Ok(SectionPage {
            items,
            next_page,
            total_items: self.total_items,
        })
    }

    async fn fetch_detail(&self, section: &SectionRef) -> Result<SectionDetail, ApiError> {
        let key = section.key();
        self.detail_calls.lock().unwrap().push(key.clone());

        if self.missing.lock().unwrap().contains(&key) {
            return Err(ApiError::NotFound(key));
        }

        {
            let mut failures = self.detail_failures.lock().unwrap();
            if let Some(left) = failures.get_mut(&key) {
                if *left > 0 {
                    *left -= 1;
                    return Err(scripted_failure());
                }
            }
        }

        if section.index >= self.total_items {
            return Err(ApiError::NotFound(key));
        }

        Ok(Self::detail_for(section))
    }
}
