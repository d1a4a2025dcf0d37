use serde_json::{Number, Value};
use tracing::debug;

use crate::normalize::access::get_path;
use crate::normalize::coerce::{number_from_f64, to_f64, to_number, unix_timestamp_to_iso};
use crate::normalize::extract::extract_items;
use crate::types::{
    AuthorStats, EngagementStats, MusicMeta, ParseConfig, SearchRecord, VideoMeta,
};

/// Normalize a whole payload into canonical records.
///
/// Extracts the item list, truncates it to `config.max_items`, then
/// normalizes the survivors in order. Items that cannot yield a stable id
/// are skipped without aborting the batch, and the relative order of the
/// emitted records matches the input.
pub fn parse_search_results(raw: &Value, config: &ParseConfig) -> Vec<SearchRecord> {
    let items = extract_items(raw);
    let limit = config.max_items.min(items.len());

    let mut records = Vec::with_capacity(limit);
    for item in &items[..limit] {
        match normalize_item(item) {
            Some(record) => records.push(record),
            None => debug!("skipping item without a stable id"),
        }
    }

    records
}

/// Map one raw item, whatever its upstream schema, into a [`SearchRecord`].
///
/// Pure function: no I/O, no side effects. Returns `None` when no stable id
/// can be derived - the one condition that makes an item unusable.
pub fn normalize_item(item: &Value) -> Option<SearchRecord> {
    if !item.is_object() {
        return None;
    }

    let id = first_string(item, &["id", "videoId", "stats.videoId", "aweme_id"])?;

    let author = first_string(
        item,
        &[
            "author.uniqueId",
            "author.unique_id",
            "author.username",
            "author.id",
            "authorId",
        ],
    );

    let url = first_string(item, &["url", "shareUrl"]).or_else(|| {
        author
            .as_ref()
            .map(|handle| format!("https://www.tiktok.com/@{handle}/video/{id}"))
    });

    // The original timestamp is kept verbatim as a string; the ISO form is
    // derived from the same raw value so the pair stays consistent.
    let create_time_raw = first_value(item, &["createTime", "create_time", "video.createTime"]);
    let create_time = create_time_raw.and_then(scalar_to_string);
    let created_at = create_time_raw.and_then(unix_timestamp_to_iso);

    Some(SearchRecord {
        url,
        id,
        desc: first_string(item, &["desc", "description"]).unwrap_or_default(),
        create_time,
        created_at,
        video: normalize_video(item),
        author,
        music: normalize_music(item),
        stats: normalize_stats(item),
        author_stats: normalize_author_stats(item),
        location_created: first_string(item, &["locationCreated", "region", "author.region"]),
        diversification_labels: normalize_labels(item),
        nickname: first_string(item, &["author.nickname", "author.nickName", "nickname"]),
    })
}

fn normalize_video(item: &Value) -> VideoMeta {
    let video = container(item, &["video", "videoMeta", "aweme_detail.video"]);

    let duration = video
        .and_then(|v| {
            first_number(v, &["duration", "durationSecond"]).or_else(|| {
                // Millisecond variant, scaled down to seconds.
                get_path(v, "durationMs")
                    .and_then(to_f64)
                    .and_then(|ms| number_from_f64(ms / 1000.0))
            })
        })
        .or_else(|| first_number(item, &["duration"]));

    let ratio = video.and_then(|v| {
        first_string(v, &["ratio", "ratioFormat"]).or_else(|| computed_ratio(v))
    });

    let bitrate =
        video.and_then(|v| first_number(v, &["bitrate", "bitrate_kbps", "bitrateInfo.0.bitrate"]));

    let format = video.and_then(|v| {
        first_string(v, &["format", "codec"]).or_else(|| match get_path(v, "playAddr") {
            Some(Value::String(addr)) if addr.ends_with(".mp4") => Some("mp4".to_string()),
            _ => None,
        })
    });

    VideoMeta {
        duration,
        ratio,
        bitrate,
        format,
    }
}

/// `"{height}x{width}"`, when both dimensions are present.
fn computed_ratio(video: &Value) -> Option<String> {
    let height = get_path(video, "height").and_then(to_number)?;
    let width = get_path(video, "width").and_then(to_number)?;
    Some(format!("{height}x{width}"))
}

fn normalize_music(item: &Value) -> MusicMeta {
    let music = container(item, &["music", "musicInfo"]);

    MusicMeta {
        title: music.and_then(|m| first_string(m, &["title", "musicName"])),
        play_url: music
            .and_then(|m| first_string(m, &["playUrl", "play_url", "playUrl.urlList.0"])),
    }
}

fn normalize_stats(item: &Value) -> EngagementStats {
    let stats = container(item, &["stats", "statistics"]);

    EngagementStats {
        digg_count: stats
            .and_then(|s| first_number(s, &["diggCount", "digg_count", "likeCount", "like_count"])),
        share_count: stats.and_then(|s| {
            first_number(
                s,
                &["shareCount", "share_count", "forwardCount", "forward_count"],
            )
        }),
        comment_count: stats
            .and_then(|s| first_number(s, &["commentCount", "comment_count", "comments"])),
        play_count: stats
            .and_then(|s| first_number(s, &["playCount", "play_count", "viewCount", "view_count"])),
    }
}

fn normalize_author_stats(item: &Value) -> AuthorStats {
    let stats = container(item, &["authorStats", "author_statistics", "author.stats"]);

    AuthorStats {
        follower_count: stats.and_then(|s| first_number(s, &["followerCount", "follower_count"])),
        heart_count: stats
            .and_then(|s| first_number(s, &["heartCount", "heart_count", "totalLikes"])),
        video_count: stats
            .and_then(|s| first_number(s, &["videoCount", "video_count", "videoTotal"])),
    }
}

/// First present array among the known label fields, elements stringified.
fn normalize_labels(item: &Value) -> Vec<String> {
    ["diversificationLabels", "labels", "classificationLabels"]
        .iter()
        .find_map(|path| get_path(item, path).and_then(Value::as_array))
        .map(|labels| labels.iter().map(label_text).collect())
        .unwrap_or_default()
}

fn label_text(label: &Value) -> String {
    match label {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// First path whose value is an object - containers arrive under several
/// alternate names.
fn container<'a>(item: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .find_map(|path| get_path(item, path).filter(|v| v.is_object()))
}

/// First path that yields a usable string. Bare numbers count: upstream ids
/// arrive both quoted and unquoted. Empty strings do not.
fn first_string(item: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| get_path(item, path).and_then(scalar_to_string))
}

/// First path that coerces to a finite number. Presence decides, not
/// truthiness, so a stored `0` wins its chain.
fn first_number(item: &Value, paths: &[&str]) -> Option<Number> {
    paths
        .iter()
        .find_map(|path| get_path(item, path).and_then(to_number))
}

/// First path that resolves to any non-null value.
fn first_value<'a>(item: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| get_path(item, path))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_canonical_item_end_to_end() {
        let raw = json!({
            "itemList": [
                {"id": "7", "author": {"uniqueId": "bob"}, "stats": {"diggCount": 3}}
            ]
        });

        let records = parse_search_results(&raw, &ParseConfig { max_items: 10 });
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, "7");
        assert_eq!(record.author.as_deref(), Some("bob"));
        assert_eq!(
            record.url.as_deref(),
            Some("https://www.tiktok.com/@bob/video/7")
        );
        assert_eq!(record.stats.digg_count, Some(Number::from(3)));
        assert_eq!(record.stats.share_count, None);
        assert_eq!(record.stats.comment_count, None);
        assert_eq!(record.stats.play_count, None);
    }

    #[test]
    fn test_items_without_id_are_dropped_in_place() {
        let raw = json!({"items": [
            {"id": "1"},
            {"desc": "no id here"},
            {"id": "3"}
        ]});

        let records = parse_search_results(&raw, &ParseConfig::default());
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_truncation_applies_before_normalization() {
        let raw = json!({"items": [
            {"desc": "malformed"},
            {"id": "2"},
            {"id": "3"},
            {"id": "4"},
            {"id": "5"}
        ]});

        // The malformed first item consumes one slot of the cap; the drop is
        // not backfilled from beyond the limit.
        let records = parse_search_results(&raw, &ParseConfig { max_items: 2 });
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_id_fallback_chain() {
        assert_eq!(normalize_item(&json!({"videoId": 99})).unwrap().id, "99");
        assert_eq!(
            normalize_item(&json!({"stats": {"videoId": "s1"}})).unwrap().id,
            "s1"
        );
        assert_eq!(
            normalize_item(&json!({"aweme_id": "a1"})).unwrap().id,
            "a1"
        );
        assert_eq!(normalize_item(&json!({"id": ""})), None);
        assert_eq!(normalize_item(&json!("scalar item")), None);
    }

    #[test]
    fn test_snake_case_schema_variant() {
        let item = json!({
            "aweme_id": "42",
            "author": {"unique_id": "carol", "region": "SE"},
            "statistics": {"digg_count": 10, "share_count": 2},
            "author_statistics": {"follower_count": 1000, "totalLikes": 50}
        });

        let record = normalize_item(&item).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.author.as_deref(), Some("carol"));
        assert_eq!(record.location_created.as_deref(), Some("SE"));
        assert_eq!(record.stats.digg_count, Some(Number::from(10)));
        assert_eq!(record.author_stats.follower_count, Some(Number::from(1000)));
        assert_eq!(record.author_stats.heart_count, Some(Number::from(50)));
    }

    #[test]
    fn test_zero_counter_is_preserved() {
        let item = json!({
            "id": "z",
            "stats": {"diggCount": 0, "digg_count": 7}
        });

        // Presence wins: the explicit 0 must not fall through to the
        // snake_case variant.
        let record = normalize_item(&item).unwrap();
        assert_eq!(record.stats.digg_count, Some(Number::from(0)));
    }

    #[test]
    fn test_explicit_url_beats_synthesized() {
        let item = json!({
            "id": "u",
            "shareUrl": "https://example.com/v/u",
            "author": {"uniqueId": "dave"}
        });

        let record = normalize_item(&item).unwrap();
        assert_eq!(record.url.as_deref(), Some("https://example.com/v/u"));
    }

    #[test]
    fn test_url_absent_without_handle() {
        let record = normalize_item(&json!({"id": "x"})).unwrap();
        assert_eq!(record.url, None);
        assert_eq!(record.author, None);
    }

    #[test]
    fn test_video_duration_fallbacks() {
        let from_millis = normalize_item(&json!({
            "id": "1", "video": {"durationMs": 45500}
        }))
        .unwrap();
        assert_eq!(from_millis.video.duration.unwrap().to_string(), "45.5");

        let from_top_level = normalize_item(&json!({
            "id": "2", "videoMeta": {}, "duration": 30
        }))
        .unwrap();
        assert_eq!(from_top_level.video.duration, Some(Number::from(30)));
    }

    #[test]
    fn test_video_ratio_computed_from_dimensions() {
        let record = normalize_item(&json!({
            "id": "1",
            "video": {"height": 1024, "width": 576}
        }))
        .unwrap();
        assert_eq!(record.video.ratio.as_deref(), Some("1024x576"));
    }

    #[test]
    fn test_video_bitrate_from_indexed_path() {
        let record = normalize_item(&json!({
            "id": "1",
            "video": {"bitrateInfo": [{"bitrate": 1500}, {"bitrate": 700}]}
        }))
        .unwrap();
        assert_eq!(record.video.bitrate, Some(Number::from(1500)));
    }

    #[test]
    fn test_video_format_inferred_from_play_address() {
        let record = normalize_item(&json!({
            "id": "1",
            "video": {"playAddr": "https://cdn.example.com/v.mp4"}
        }))
        .unwrap();
        assert_eq!(record.video.format.as_deref(), Some("mp4"));
    }

    #[test]
    fn test_music_play_url_from_url_list() {
        let record = normalize_item(&json!({
            "id": "1",
            "musicInfo": {
                "musicName": "tune",
                "playUrl": {"urlList": ["https://cdn.example.com/a.mp3"]}
            }
        }))
        .unwrap();
        assert_eq!(record.music.title.as_deref(), Some("tune"));
        assert_eq!(
            record.music.play_url.as_deref(),
            Some("https://cdn.example.com/a.mp3")
        );
    }

    #[test]
    fn test_create_time_pair_is_consistent() {
        let record = normalize_item(&json!({
            "id": "1",
            "create_time": 1_700_000_000_i64
        }))
        .unwrap();
        assert_eq!(record.create_time.as_deref(), Some("1700000000"));
        assert_eq!(
            record.created_at.as_deref(),
            Some("2023-11-14T22:13:20.000Z")
        );

        // A non-numeric raw value keeps the string but yields no ISO form.
        let odd = normalize_item(&json!({"id": "2", "createTime": "later"})).unwrap();
        assert_eq!(odd.create_time.as_deref(), Some("later"));
        assert_eq!(odd.created_at, None);
    }

    #[test]
    fn test_label_field_variants() {
        let primary = normalize_item(&json!({
            "id": "1",
            "diversificationLabels": ["Comedy", "Dance"]
        }))
        .unwrap();
        assert_eq!(primary.diversification_labels, vec!["Comedy", "Dance"]);

        let classified = normalize_item(&json!({
            "id": "2",
            "classificationLabels": ["News", 7]
        }))
        .unwrap();
        assert_eq!(classified.diversification_labels, vec!["News", "7"]);

        // An empty primary array still wins its chain.
        let empty = normalize_item(&json!({
            "id": "3",
            "diversificationLabels": [],
            "labels": ["shadowed"]
        }))
        .unwrap();
        assert!(empty.diversification_labels.is_empty());
    }

    #[test]
    fn test_desc_defaults_to_empty() {
        let record = normalize_item(&json!({"id": "1"})).unwrap();
        assert_eq!(record.desc, "");

        let described = normalize_item(&json!({"id": "2", "description": "alt"})).unwrap();
        assert_eq!(described.desc, "alt");
    }
}
