// Synthetic metadata attached to newly created tweets.
//
// Tweets do not record the real creation time. Each one gets a random
// timestamp inside a fixed window and random engagement counters.

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use std::ops::RangeInclusive;

pub const YEARS: RangeInclusive<i32> = 2020..=2030;
pub const MONTHS: RangeInclusive<u32> = 10..=12;
pub const DAYS: RangeInclusive<u32> = 10..=28;

/// Upper bound for generated like and retweet counts
pub const MAX_ENGAGEMENT: i64 = 100_000;

/// Random timestamp with year, month and day drawn from the fixed window
/// and any time of day.
pub fn random_posted_at<R: Rng + ?Sized>(rng: &mut R) -> Result<NaiveDateTime> {
    let year = rng.gen_range(YEARS);
    let month = rng.gen_range(MONTHS);
    let day = rng.gen_range(DAYS);

    let hour = rng.gen_range(0..=23);
    let minute = rng.gen_range(0..=59);
    let second = rng.gen_range(0..=59);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            anyhow!(
                "Invalid synthetic timestamp {}-{}-{} {}:{}:{}",
                year,
                month,
                day,
                hour,
                minute,
                second
            )
        })
}

/// Starting like/retweet counters of a tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    pub likes: i64,
    pub retweets: i64,
}

impl Engagement {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            likes: rng.gen_range(0..=MAX_ENGAGEMENT),
            retweets: rng.gen_range(0..=MAX_ENGAGEMENT),
        }
    }
}
