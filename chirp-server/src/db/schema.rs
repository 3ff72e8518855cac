/// SQL schema for the Chirp database
/// Creates the legacy demo table and the tweet tables with their indexes.
/// Handles and cids are plain references: a follow edge or tweet may name a
/// handle that has no users row.
pub const SCHEMA: &str = r#"
-- Legacy demo table, unrelated to the tweet tables
CREATE TABLE IF NOT EXISTS test (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    handle TEXT PRIMARY KEY,
    display_name TEXT
);

-- Follow edges (one-way, duplicates allowed)
CREATE TABLE IF NOT EXISTS following (
    follower TEXT NOT NULL,
    followed TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_following_follower ON following(follower);

-- Tweet payloads
CREATE TABLE IF NOT EXISTS content (
    cid INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT,
    media TEXT
);

-- Tweet metadata, one row per content row
CREATE TABLE IF NOT EXISTS tweets_with_content (
    tid INTEGER PRIMARY KEY AUTOINCREMENT,
    posted_at TEXT NOT NULL,
    like_count INTEGER NOT NULL DEFAULT 0,
    retweet_count INTEGER NOT NULL DEFAULT 0,
    cid INTEGER NOT NULL,
    handle TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tweets_handle ON tweets_with_content(handle);
CREATE INDEX IF NOT EXISTS idx_tweets_cid ON tweets_with_content(cid);
"#;

/// Starts the content and tweet id sequences just below 10_000_000_000 so
/// every allocated id has 11 digits. Existing sequence rows are left alone.
pub const ID_SEQUENCE_FLOORS: &str = r#"
INSERT INTO sqlite_sequence (name, seq)
    SELECT 'content', 9999999999
    WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'content');

INSERT INTO sqlite_sequence (name, seq)
    SELECT 'tweets_with_content', 9999999999
    WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'tweets_with_content');
"#;

/// Legacy table seed, applied only while the table is empty
pub const LEGACY_SEED: &str = r#"
INSERT INTO test (name)
    SELECT column1 FROM (VALUES ('grace hopper'), ('alan turing'), ('ada lovelace'))
    WHERE NOT EXISTS (SELECT 1 FROM test);
"#;

/// Demo users and follow edges for local development
/// - vladverba is the author used by GET /another
/// - alice follows bob and carol, bob follows vladverba
pub const DEMO_DATA: &str = r#"
INSERT OR IGNORE INTO users (handle, display_name) VALUES
    ('vladverba', 'Vlad Verba'),
    ('alice', 'Alice'),
    ('bob', 'Bob'),
    ('carol', 'Carol');

INSERT INTO following (follower, followed)
    SELECT column1, column2 FROM (VALUES ('alice', 'bob'), ('alice', 'carol'), ('bob', 'vladverba'))
    WHERE NOT EXISTS (SELECT 1 FROM following);
"#;
