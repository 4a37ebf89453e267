#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read leaderboard file")]
    Io(#[from] tokio::io::Error),
    #[error("failed to deserialize leaderboard file")]
    Json(#[from] serde_json::Error),
}
