use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params_from_iter, types::Type, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;

use chirp_types::{Tweet, TweetContent, TIMESTAMP_FORMAT};

use super::content_repository::ContentRepository;
use super::ids::allocated_id;
use crate::synthetic::{self, Engagement};

/// Bound handles per timeline query, well below SQLite's variable limit
const HANDLES_PER_QUERY: usize = 500;

pub struct TweetRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TweetRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a tweet under `handle` together with its content row.
    ///
    /// Both rows are written in one transaction. The timestamp and the
    /// like/retweet counters are synthetic. The handle is not checked here.
    pub fn create(&self, handle: &str, text: Option<&str>, media: Option<&str>) -> Result<Tweet> {
        let mut rng = rand::thread_rng();
        let posted_at = synthetic::random_posted_at(&mut rng)?;
        let engagement = Engagement::random(&mut rng);

        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin tweet transaction")?;

        let cid = ContentRepository::new(&tx).create(text, media)?;

        tx.execute(
            "INSERT INTO tweets_with_content (posted_at, like_count, retweet_count, cid, handle)
             VALUES (?, ?, ?, ?, ?)",
            (
                posted_at.format(TIMESTAMP_FORMAT).to_string(),
                engagement.likes,
                engagement.retweets,
                cid,
                handle,
            ),
        )
        .context("Failed to create tweet")?;
        let tid = allocated_id(&tx, "tweets_with_content")?;

        tx.commit().context("Failed to commit tweet")?;

        Ok(Tweet {
            tid,
            posted_at,
            like_count: engagement.likes,
            retweet_count: engagement.retweets,
            cid,
            handle: handle.to_string(),
        })
    }

    /// Get a single tweet by tid
    pub fn get_by_tid(&self, tid: i64) -> Result<Option<Tweet>> {
        let tweet = self
            .conn
            .query_row(
                "SELECT tid, posted_at, like_count, retweet_count, cid, handle
                 FROM tweets_with_content
                 WHERE tid = ?",
                [tid],
                row_to_tweet,
            )
            .optional()?;
        Ok(tweet)
    }

    /// Text and media of every tweet authored by any of `users`, keyed by cid.
    ///
    /// Tweets sharing a cid collapse into one entry. Tweets whose content
    /// row is missing are skipped. Handles are bound in batches of
    /// `HANDLES_PER_QUERY`, so one query covers any ordinary follow list.
    pub fn get_tweets_from_users(&self, users: &[String]) -> Result<BTreeMap<i64, TweetContent>> {
        let mut tweets = BTreeMap::new();

        for batch in users.chunks(HANDLES_PER_QUERY) {
            let placeholders = vec!["?"; batch.len()].join(", ");
            let query = format!(
                "SELECT t.cid, c.text, c.media
                 FROM tweets_with_content t
                 JOIN content c ON c.cid = t.cid
                 WHERE t.handle IN ({})",
                placeholders
            );

            let mut stmt = self.conn.prepare(&query)?;
            let rows = stmt.query_map(params_from_iter(batch.iter()), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    TweetContent {
                        text: row.get(1)?,
                        media: row.get(2)?,
                    },
                ))
            })?;

            for row in rows {
                let (cid, content) = row?;
                tweets.insert(cid, content);
            }
        }

        Ok(tweets)
    }
}

fn row_to_tweet(row: &Row<'_>) -> rusqlite::Result<Tweet> {
    let posted_at: String = row.get(1)?;
    let posted_at = NaiveDateTime::parse_from_str(&posted_at, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(Tweet {
        tid: row.get(0)?,
        posted_at,
        like_count: row.get(2)?,
        retweet_count: row.get(3)?,
        cid: row.get(4)?,
        handle: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::FollowRepository;
    use crate::db::Database;
    use crate::synthetic::{DAYS, MAX_ENGAGEMENT, MONTHS, YEARS};
    use chirp_types::{MAX_ROW_ID, MIN_ROW_ID};
    use chrono::Datelike;

    fn setup_test_db() -> Database {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        db
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .expect("Failed to count rows")
    }

    #[test]
    fn test_create_tweet_persists_both_rows() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);

        let tweet = repo
            .create("alice", Some("first post"), Some("photo.jpg"))
            .expect("Failed to create tweet");

        assert!((MIN_ROW_ID..=MAX_ROW_ID).contains(&tweet.tid));
        assert!((MIN_ROW_ID..=MAX_ROW_ID).contains(&tweet.cid));
        assert!(YEARS.contains(&tweet.posted_at.year()));
        assert!(MONTHS.contains(&tweet.posted_at.month()));
        assert!(DAYS.contains(&tweet.posted_at.day()));
        assert!(tweet.like_count <= MAX_ENGAGEMENT);
        assert!(tweet.retweet_count <= MAX_ENGAGEMENT);

        let stored = repo.get_by_tid(tweet.tid).unwrap().expect("tweet stored");
        assert_eq!(stored, tweet);

        let content = ContentRepository::new(&conn)
            .get_by_cid(tweet.cid)
            .unwrap()
            .expect("content stored");
        assert_eq!(content.text.as_deref(), Some("first post"));
        assert_eq!(content.media.as_deref(), Some("photo.jpg"));
    }

    #[test]
    fn test_create_then_fetch_includes_tweet() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);

        let tweet = repo.create("bob", Some("hi"), None).unwrap();
        let tweets = repo.get_tweets_from_users(&["bob".to_string()]).unwrap();

        assert_eq!(
            tweets.get(&tweet.cid),
            Some(&TweetContent {
                text: Some("hi".to_string()),
                media: None,
            })
        );
    }

    #[test]
    fn test_ids_never_reused() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);

        let mut tids = std::collections::HashSet::new();
        let mut cids = std::collections::HashSet::new();
        for i in 0..20 {
            let tweet = repo.create("carol", Some(format!("tweet {}", i).as_str()), None).unwrap();
            assert!(tids.insert(tweet.tid));
            assert!(cids.insert(tweet.cid));
        }
    }

    #[test]
    fn test_failed_tweet_insert_leaves_no_content() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        conn.execute_batch("DROP TABLE tweets_with_content").unwrap();

        let result = TweetRepository::new(&conn).create("alice", Some("lost"), None);

        assert!(result.is_err());
        assert_eq!(count(&conn, "content"), 0);
    }

    #[test]
    fn test_timeline_of_followed_users() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let follows = FollowRepository::new(&conn);
        let repo = TweetRepository::new(&conn);

        follows.follow("a", "b").unwrap();
        follows.follow("a", "c").unwrap();
        let from_b = repo.create("b", Some("from b"), Some("b.png")).unwrap();
        let from_c = repo.create("c", Some("from c"), None).unwrap();
        let from_d = repo.create("d", Some("from d"), None).unwrap();

        let following = follows.get_users_someone_follows("a").unwrap();
        let tweets = repo.get_tweets_from_users(&following).unwrap();

        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[&from_b.cid].text.as_deref(), Some("from b"));
        assert_eq!(tweets[&from_b.cid].media.as_deref(), Some("b.png"));
        assert_eq!(tweets[&from_c.cid].text.as_deref(), Some("from c"));
        assert!(!tweets.contains_key(&from_d.cid));
    }

    #[test]
    fn test_shared_cid_collapses_to_one_entry() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);

        let tweet = repo.create("b", Some("shared"), None).unwrap();
        conn.execute(
            "INSERT INTO tweets_with_content (posted_at, like_count, retweet_count, cid, handle)
             VALUES ('2021-10-10 00:00:00', 0, 0, ?, 'c')",
            [tweet.cid],
        )
        .unwrap();

        let tweets = repo
            .get_tweets_from_users(&["b".to_string(), "c".to_string()])
            .unwrap();
        assert_eq!(tweets.len(), 1);
    }

    #[test]
    fn test_follow_list_larger_than_one_query() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);

        let users: Vec<String> = (0..40_000).map(|i| format!("user{}", i)).collect();
        let first = repo.create(&users[0], Some("first"), None).unwrap();
        let middle = repo.create(&users[HANDLES_PER_QUERY], Some("middle"), None).unwrap();
        let last = repo.create(&users[users.len() - 1], Some("last"), None).unwrap();

        let tweets = repo.get_tweets_from_users(&users).unwrap();

        assert_eq!(tweets.len(), 3);
        assert_eq!(tweets[&first.cid].text.as_deref(), Some("first"));
        assert_eq!(tweets[&middle.cid].text.as_deref(), Some("middle"));
        assert_eq!(tweets[&last.cid].text.as_deref(), Some("last"));
    }

    #[test]
    fn test_no_users_no_tweets() {
        let db = setup_test_db();
        let conn = db.connection().expect("Failed to get connection");
        let repo = TweetRepository::new(&conn);
        repo.create("b", Some("unseen"), None).unwrap();

        assert!(repo.get_tweets_from_users(&[]).unwrap().is_empty());
    }
}
