use std::fmt::{Display, Formatter, Result as FmtResult};

use twilight_model::id::{marker::MessageMarker, Id};

pub use self::{
    snapshot::{BestTime, Record, Snapshot},
    time::{CanonicalTime, UNSET},
    tracks::{track_list, Track},
};

pub mod time;
pub mod tracks;

mod snapshot;

/// Longer minutes are refused so a record always fits into its embed field
pub const MAX_MINUTE_DIGITS: usize = 9;

/// Track keys mapped to their record, in display order
pub type Records = Vec<(String, Record)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitResult {
    /// The time is the new record for the track
    Accepted(CanonicalTime),
    /// The time did not beat the contained current record
    Rejected(CanonicalTime),
    UnknownTrack,
    InvalidFormat,
}

/// Best times of every track.
///
/// Deciding whether a submission is accepted happens here, writing the
/// state to disk and rendering it is up to the caller.
pub struct Leaderboard {
    tracks: Vec<Track>,
    state: Snapshot,
}

impl Leaderboard {
    /// Leaderboard without any records
    pub fn new(tracks: Vec<Track>) -> Self {
        let leaderboard = tracks
            .iter()
            .map(|track| (track.key.clone(), Record::unset(&track.name)))
            .collect();

        let state = Snapshot {
            leaderboard,
            message_id: None,
        };

        Self { tracks, state }
    }

    /// Continue from a persisted state.
    ///
    /// Records of tracks that are no longer known are kept, known tracks
    /// missing from the snapshot are appended without a record.
    pub fn restore(tracks: Vec<Track>, mut state: Snapshot) -> Self {
        for track in tracks.iter() {
            let missing = !state.leaderboard.iter().any(|(key, _)| *key == track.key);

            if missing {
                let record = Record::unset(&track.name);
                state.leaderboard.push((track.key.clone(), record));
            }
        }

        Self { tracks, state }
    }

    /// The known track for a command key
    pub fn track(&self, key: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.key == key)
    }

    /// Store `raw_time` as new record for the track of `key` if it's faster
    /// than the current one.
    pub fn submit(&mut self, key: &str, raw_time: &str, holder: &str) -> SubmitResult {
        let track = match self.tracks.iter().find(|track| track.key == key) {
            Some(track) => track,
            None => return SubmitResult::UnknownTrack,
        };

        if !time::validate(raw_time) {
            return SubmitResult::InvalidFormat;
        }

        let time = match time::normalize(raw_time) {
            Ok(time) => time,
            Err(_) => return SubmitResult::InvalidFormat,
        };

        if time.minute_digits() > MAX_MINUTE_DIGITS {
            return SubmitResult::InvalidFormat;
        }

        let idx = match self.state.leaderboard.iter().position(|(k, _)| k == key) {
            Some(idx) => idx,
            None => {
                let record = Record::unset(&track.name);
                self.state.leaderboard.push((track.key.clone(), record));

                self.state.leaderboard.len() - 1
            }
        };

        let record = &mut self.state.leaderboard[idx].1;

        match record.best {
            Some(ref best) if !time::is_faster(&time, Some(&best.time)) => {
                SubmitResult::Rejected(best.time.clone())
            }
            _ => {
                record.best = Some(BestTime {
                    time: time.clone(),
                    holder: holder.to_owned(),
                });

                SubmitResult::Accepted(time)
            }
        }
    }

    /// All records in display order
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.state.leaderboard.iter().map(|(key, record)| Entry {
            icon: tracks::icon(key),
            name: &record.track,
            best: record.best.as_ref(),
        })
    }

    pub fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.state.message_id
    }

    pub fn set_message_id(&mut self, message_id: Option<Id<MessageMarker>>) {
        self.state.message_id = message_id;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }
}

/// Read-only view on a track's record
#[derive(Copy, Clone, Debug)]
pub struct Entry<'a> {
    pub icon: &'static str,
    pub name: &'a str,
    best: Option<&'a BestTime>,
}

impl<'a> Entry<'a> {
    pub fn time(&self) -> OrUnset<'a, CanonicalTime> {
        OrUnset(self.best.map(|best| &best.time))
    }

    pub fn holder(&self) -> OrUnset<'a, str> {
        OrUnset(self.best.map(|best| best.holder.as_str()))
    }
}

/// Displays the value or [`UNSET`]
pub struct OrUnset<'a, T: ?Sized>(Option<&'a T>);

impl<T: Display + ?Sized> Display for OrUnset<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(UNSET),
        }
    }
}
