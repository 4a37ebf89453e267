pub use self::leaderboard::{leaderboard_pages, validate_pages};

mod leaderboard;
