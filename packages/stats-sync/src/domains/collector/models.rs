use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::common::PostCounters;

/// Date and text of a canonical post, keyed by its link in collector maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub date: NaiveDateTime,
    pub text: String,
}

/// Ordered `link -> entry` map produced while collecting.
pub type PostMap = IndexMap<String, PostEntry>;

/// Per-view engagement of one canonical post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostStats {
    pub link: String,
    pub date: NaiveDateTime,
    pub text: String,
    /// Shares per 100 views, rounded to 2 decimals.
    pub shares_per_view: f64,
    /// Reactions per 100 views, rounded to 2 decimals.
    pub reactions_per_view: f64,
}

impl PostStats {
    /// Fails on zero views instead of producing an infinite or NaN ratio.
    pub fn from_counters(link: &str, entry: &PostEntry, counters: PostCounters) -> Result<Self> {
        if counters.views <= 0 {
            bail!(
                "post {} has {} views; per-view ratios are undefined",
                link,
                counters.views
            );
        }

        Ok(Self {
            link: link.to_string(),
            date: entry.date,
            text: entry.text.clone(),
            shares_per_view: per_view_percent(counters.shares, counters.views),
            reactions_per_view: per_view_percent(counters.reactions, counters.views),
        })
    }
}

fn per_view_percent(count: i64, views: i64) -> f64 {
    let percent = count as f64 / views as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Immutable, chronologically ordered result of one collection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostSnapshot {
    posts: IndexMap<String, PostStats>,
}

impl PostSnapshot {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.posts.contains_key(link)
    }

    pub fn get(&self, link: &str) -> Option<&PostStats> {
        self.posts.get(link)
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.posts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostStats> {
        self.posts.values()
    }
}

impl FromIterator<PostStats> for PostSnapshot {
    fn from_iter<I: IntoIterator<Item = PostStats>>(iter: I) -> Self {
        Self {
            posts: iter
                .into_iter()
                .map(|stats| (stats.link.clone(), stats))
                .collect(),
        }
    }
}
