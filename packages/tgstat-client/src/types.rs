use serde::{Deserialize, Deserializer, Serialize};

/// Query for the `channels/posts` endpoint. The token is appended by the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub channel_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub limit: u32,
    pub offset: u32,
    pub hide_forwards: u8,
    pub hide_deleted: u8,
}

impl PostsQuery {
    /// Page of non-forwarded, non-deleted posts published between two unix timestamps.
    pub fn page(channel_id: impl Into<String>, start_time: i64, end_time: i64, limit: u32, offset: u32) -> Self {
        Self {
            channel_id: channel_id.into(),
            start_time,
            end_time,
            limit,
            offset,
            hide_forwards: 1,
            hide_deleted: 1,
        }
    }
}

/// Envelope shared by every TGStat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub response: Option<T>,
}

/// One page of channel posts.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub count: u32,
    #[serde(default)]
    pub items: Vec<ChannelPost>,
}

/// A single media asset published in a channel.
///
/// Albums are split into one item per attachment; attachments of the same
/// album share a `group_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPost {
    pub link: String,
    #[serde(default, deserialize_with = "group_id_as_string")]
    pub group_id: Option<String>,
    #[serde(deserialize_with = "unix_seconds")]
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
}

/// Counters returned by `posts/stat`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStat {
    pub views_count: i64,
    pub shares_count: i64,
    pub reactions_count: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn group_id_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        NumberOrText::Int(n) => n.to_string(),
        NumberOrText::Float(f) => f.to_string(),
        NumberOrText::Text(s) => s,
    }))
}

fn unix_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Int(n) => Ok(n),
        NumberOrText::Float(f) => Ok(f as i64),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f as i64)
            .map_err(serde::de::Error::custom),
    }
}
