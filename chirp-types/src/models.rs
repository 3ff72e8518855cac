use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage format of tweet timestamps (`2024-11-17 08:03:59`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Smallest identifier handed out for content and tweet rows (11 digits)
pub const MIN_ROW_ID: i64 = 10_000_000_000;

/// Largest identifier that still fits the 11-digit id space
pub const MAX_ROW_ID: i64 = 99_999_999_999;

// Custom serde module for NaiveDateTime to keep the storage string format on the wire
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub cid: i64,
    pub text: Option<String>,
    pub media: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub tid: i64,
    #[serde(with = "timestamp_format")]
    pub posted_at: NaiveDateTime,
    pub like_count: i64,
    pub retweet_count: i64,
    /// Content row holding the text and media of this tweet
    pub cid: i64,
    pub handle: String,
}

/// Text/media payload of a tweet as shown on a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetContent {
    pub text: Option<String>,
    pub media: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
