use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One normalized search result - the canonical, schema-stable unit every
/// upstream payload variant is mapped into.
///
/// Fields no variant supplied serialize as explicit `null`, so the JSON
/// output always carries the full shape. Records are built once per raw item
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// Explicit or synthesized share URL, when one could be derived
    pub url: Option<String>,

    /// Stable identifier; items without one are dropped, never emitted
    pub id: String,

    /// Caption text, empty when absent
    pub desc: String,

    /// Original numeric timestamp, kept verbatim as a string
    pub create_time: Option<String>,

    /// ISO-8601 rendering of `create_time`
    pub created_at: Option<String>,

    pub video: VideoMeta,

    /// Author unique handle (flattened - the nested author object does not
    /// survive normalization)
    pub author: Option<String>,

    pub music: MusicMeta,
    pub stats: EngagementStats,
    pub author_stats: AuthorStats,

    /// Region code the item was created in
    pub location_created: Option<String>,

    /// Content classification labels, possibly empty
    pub diversification_labels: Vec<String>,

    /// Author display name
    pub nickname: Option<String>,
}

/// Media metadata for the underlying video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMeta {
    /// Duration in seconds
    pub duration: Option<Number>,
    /// Aspect ratio, explicit or computed as `"{height}x{width}"`
    pub ratio: Option<String>,
    pub bitrate: Option<Number>,
    pub format: Option<String>,
}

/// Attached music metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicMeta {
    pub title: Option<String>,
    pub play_url: Option<String>,
}

/// Per-item engagement counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    pub digg_count: Option<Number>,
    pub share_count: Option<Number>,
    pub comment_count: Option<Number>,
    pub play_count: Option<Number>,
}

/// Aggregate counters for the item's author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub follower_count: Option<Number>,
    pub heart_count: Option<Number>,
    pub video_count: Option<Number>,
}

/// Configuration for the parsing process
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Maximum number of extracted items to normalize. The cap applies to
    /// the extracted list before normalization, so items dropped for a
    /// missing id are not backfilled from beyond the limit.
    pub max_items: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig { max_items: 100 }
    }
}
