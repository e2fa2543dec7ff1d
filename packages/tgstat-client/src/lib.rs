//! Pure TGStat REST API client.
//!
//! A minimal client for the TGStat statistics API. Supports paging through a
//! channel's posts and fetching per-post counters.
//!
//! # Example
//!
//! ```rust,ignore
//! use tgstat_client::{PostsQuery, TgStatClient};
//!
//! let client = TgStatClient::new("your-api-token");
//!
//! let page = client
//!     .channel_posts(&PostsQuery::page("t.me/channel", start, end, 50, 0))
//!     .await?;
//! for post in &page.items {
//!     let stat = client.post_stat(&post.link).await?;
//!     println!("{}: {} views", post.link, stat.views_count);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, TgStatError};
pub use types::{ChannelPost, PostStat, PostsPage, PostsQuery};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiEnvelope;

const BASE_URL: &str = "https://api.tgstat.ru";

#[derive(Clone)]
pub struct TgStatClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl TgStatClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page of channel posts.
    pub async fn channel_posts(&self, query: &PostsQuery) -> Result<PostsPage> {
        tracing::debug!(
            channel_id = %query.channel_id,
            offset = query.offset,
            limit = query.limit,
            "Fetching channel posts page"
        );
        self.get("channels/posts", query).await
    }

    /// Fetch view/share/reaction counters of a single post. `post_id` may be the post link.
    pub async fn post_stat(&self, post_id: &str) -> Result<PostStat> {
        tracing::debug!(post_id, "Fetching post stat");
        self.get("posts/stat", &[("postId", post_id)]).await
    }

    async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TgStatError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ApiEnvelope<T> = resp.json().await?;
        if envelope.status.as_deref() == Some("error") {
            return Err(TgStatError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope.response.ok_or(TgStatError::MissingPayload)
    }
}
