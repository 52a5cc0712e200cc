//! sectionfeed demo reader
//!
//! Walks the whole feed against a running mock content server and renders
//! each section to the terminal: pages load lazily through the pager,
//! details for each page are fetched concurrently through the cache, and
//! the entrance tracker marks items the first time they appear. A section
//! whose detail fetch fails renders an inline error; the walk continues.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use sectionfeed_client::{
    ApiError, DetailCache, EntranceTracker, FeedPager, HttpSectionApi, SectionDetail, SectionRef,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the rendered feed.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let api = Arc::new(HttpSectionApi::from_env());
    let mut pager = FeedPager::new(api.clone());
    let details = Arc::new(DetailCache::new(api));
    let mut entrance = EntranceTracker::new();

    let mut position = 0usize;
    loop {
        if let Err(err) = pager.maybe_load_more(position).await {
            eprintln!("!! failed to load more sections: {err}");
            break;
        }

        let window: Vec<SectionRef> = pager.sections()[position..].to_vec();
        if window.is_empty() {
            break;
        }

        let results = fetch_details(&details, &window).await?;

        for section in &window {
            let entering = entrance.begin(section);
            match &results[section.key().as_str()] {
                Ok(detail) => println!("{}", render(detail, entering)),
                Err(err) => println!("  #{:<3} !! {}", section.index, err),
            }
            entrance.settle(section);
            position += 1;
        }
    }

    match pager.total_items() {
        Some(total) => println!("— end — {} of {} sections", position, total),
        None => println!("— end — no sections loaded"),
    }

    Ok(())
}

/// Fetch the window's details concurrently; each section succeeds or
/// fails on its own.
async fn fetch_details(
    details: &Arc<DetailCache<HttpSectionApi>>,
    window: &[SectionRef],
) -> Result<HashMap<String, std::result::Result<SectionDetail, ApiError>>> {
    let mut fetches = JoinSet::new();
    for section in window {
        let details = details.clone();
        let section = section.clone();
        fetches.spawn(async move {
            let result = details.get(&section).await;
            (section.key(), result)
        });
    }

    let mut results = HashMap::new();
    while let Some(joined) = fetches.join_next().await {
        let (key, result) = joined?;
        results.insert(key, result);
    }
    Ok(results)
}

fn render(detail: &SectionDetail, entering: bool) -> String {
    let marker = if entering { ">" } else { " " };
    match detail.kind.as_str() {
        "hero" => format!(
            "{} #{:<3} HERO  {}\n        {}\n        [{}]",
            marker, detail.index, detail.title, detail.text, detail.image
        ),
        "quote" => format!(
            "{} #{:<3} QUOTE \u{201c}{}\u{201d}",
            marker, detail.index, detail.text
        ),
        "video" => format!(
            "{} #{:<3} VIDEO {}\n        [{}]",
            marker,
            detail.index,
            detail.title,
            detail.video_url.as_deref().unwrap_or("no stream"),
        ),
        _ => format!(
            "{} #{:<3} CARD  {} — {}",
            marker, detail.index, detail.title, detail.text
        ),
    }
}
