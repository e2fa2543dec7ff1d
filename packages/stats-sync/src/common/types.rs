use chrono::NaiveDateTime;

/// One media asset of a channel post as reported by the analytics API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub link: String,
    /// Shared by every attachment of one album; `None` for single-asset posts.
    pub group_id: Option<String>,
    pub date: NaiveDateTime,
    pub text: String,
}

/// Engagement counters of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostCounters {
    pub views: i64,
    pub shares: i64,
    pub reactions: i64,
}

/// Tabs of the statistics spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    /// Rolling view of the last 31 days.
    Daily,
    /// Previous month's report, published during the reporting window.
    Results,
}

impl Sheet {
    /// Resource name, also the key rows are listed under.
    pub fn name(self) -> &'static str {
        match self {
            Sheet::Daily => "daily",
            Sheet::Results => "results",
        }
    }

    /// Key a single row is wrapped under in request bodies.
    pub fn record_key(self) -> &'static str {
        match self {
            Sheet::Daily => "daily",
            Sheet::Results => "result",
        }
    }
}

impl std::fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
