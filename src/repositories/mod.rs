pub mod feed_repository;
pub mod trivia_repository;

pub use feed_repository::{FeedRepository, JsonFeedRepository};
pub use trivia_repository::{SqliteTriviaRepository, TriviaRepository};
