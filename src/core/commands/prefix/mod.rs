/// A `<prefix><track> <time>` message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeCommand {
    /// Lowercased first argument
    pub key: String,
    /// Remaining arguments joined by single spaces
    pub time: String,
}

impl TimeCommand {
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let mut args = content.strip_prefix(prefix)?.split_whitespace();
        let key = args.next()?.to_lowercase();
        let time = args.collect::<Vec<_>>().join(" ");

        Some(Self { key, time })
    }
}
