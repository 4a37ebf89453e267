pub use self::{snapshot::SnapshotError, time::InvalidTime};

mod snapshot;
mod time;
