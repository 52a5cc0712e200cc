//! Section catalog
//!
//! The full content set is generated deterministically at startup and
//! never mutated afterwards. Handlers receive it as a shared read-only
//! value through [`crate::AppState`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation category of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Card,
    Quote,
    Video,
}

impl SectionKind {
    /// Fixed rotation used when assigning kinds at generation time.
    pub const ROTATION: [SectionKind; 4] = [
        SectionKind::Hero,
        SectionKind::Card,
        SectionKind::Quote,
        SectionKind::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Card => "card",
            SectionKind::Quote => "quote",
            SectionKind::Video => "video",
        }
    }

    /// Capitalized form used in generated titles ("Hero Item 0").
    fn label(&self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::Card => "Card",
            SectionKind::Quote => "Quote",
            SectionKind::Video => "Video",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lightweight reference to one section, as returned by the listing
/// endpoint. `index` is zero-based and globally unique across the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionRef {
    pub kind: SectionKind,
    pub index: usize,
}

/// The full content payload for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDetail {
    pub kind: SectionKind,
    pub index: usize,
    pub title: String,
    pub text: String,
    pub image: String,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// One page of section references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPage {
    pub items: Vec<SectionRef>,
    /// Next page number, or `null` when the catalog is exhausted.
    pub next_page: Option<usize>,
    pub total_items: usize,
}

/// Sources for the `videoUrl` field on video sections, assigned
/// round-robin in generation order.
const VIDEO_URLS: [&str; 3] = [
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
];

/// Immutable, deterministically generated content catalog.
///
/// Detail records are keyed by the exact string `"{kind}:{index}"` so the
/// detail endpoint can look up raw query values without parsing them —
/// any non-matching pair (unknown kind, out-of-range or non-canonical
/// index, missing parameter) simply misses.
pub struct Catalog {
    refs: Vec<SectionRef>,
    details: HashMap<String, SectionDetail>,
    page_size: usize,
}

impl Catalog {
    /// Build the full catalog. Pure function of its inputs; always
    /// succeeds.
    pub fn generate(total_items: usize, page_size: usize) -> Self {
        let mut refs = Vec::with_capacity(total_items);
        let mut details = HashMap::with_capacity(total_items);
        let mut video_count = 0usize;

        for index in 0..total_items {
            let kind = SectionKind::ROTATION[index % SectionKind::ROTATION.len()];
            refs.push(SectionRef { kind, index });

            let video_url = match kind {
                SectionKind::Video => {
                    let url = VIDEO_URLS[video_count % VIDEO_URLS.len()];
                    video_count += 1;
                    Some(url.to_string())
                }
                _ => None,
            };

            details.insert(
                format!("{}:{}", kind, index),
                SectionDetail {
                    kind,
                    index,
                    title: format!("{} Item {}", kind.label(), index),
                    text: format!(
                        "This is the description for {} item number {}. Lorem ipsum dolor sit amet.",
                        kind, index
                    ),
                    image: format!("https://picsum.photos/seed/{}/400/300", index),
                    video_url,
                },
            );
        }

        Self {
            refs,
            details,
            page_size,
        }
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// The slice of references at `[page*page_size, (page+1)*page_size)`.
    ///
    /// Pages past the end of the catalog yield an empty item list with
    /// `next_page: None`; arbitrarily large page numbers must not panic.
    pub fn page(&self, page: usize) -> SectionPage {
        let start = page.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(self.refs.len());
        let items = if start < self.refs.len() {
            self.refs[start..end].to_vec()
        } else {
            Vec::new()
        };
        let next_page = if end < self.refs.len() {
            Some(page + 1)
        } else {
            None
        };

        SectionPage {
            items,
            next_page,
            total_items: self.refs.len(),
        }
    }

    /// Look up a detail record by raw query-string values.
    pub fn detail(&self, kind: &str, index: &str) -> Option<&SectionDetail> {
        self.details.get(&format!("{}:{}", kind, index))
    }
}
