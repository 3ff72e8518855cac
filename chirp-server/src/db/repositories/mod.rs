mod content_repository;
mod follow_repository;
mod ids;
mod legacy_repository;
mod tweet_repository;
mod user_repository;

pub use content_repository::ContentRepository;
pub use follow_repository::FollowRepository;
pub use legacy_repository::LegacyRepository;
pub use tweet_repository::TweetRepository;
pub use user_repository::UserRepository;
