// Colors
pub const KART_BLUE: u32 = 0x00AEEF;

// Message limits
pub const EMBED_FIELDS_SIZE: usize = 25;
pub const MESSAGE_EMBEDS_SIZE: usize = 10;

// Leaderboard
pub const LEADERBOARD_TITLE: &str = "🏁 Mario Kart Leaderboard";
pub const LEADERBOARD_DESCRIPTION: &str = "Fastest confirmed times";

// Error messages
pub const INVALID_TIME: &str = "❌ Invalid time. Use `mm:ss.ms` or `ss.ms`";

// Discord error codes
pub const UNKNOWN_MESSAGE: u64 = 10008;
