use std::path::Path;

use eyre::{Context as _, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::{fs, io::AsyncWriteExt};
use twilight_model::id::{marker::MessageMarker, Id};

use crate::error::SnapshotError;

use super::{time::CanonicalTime, Records};

/// Persisted state of the leaderboard
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(with = "records")]
    pub leaderboard: Records,
    #[serde(
        default,
        rename = "leaderboardMessageId",
        deserialize_with = "lenient_message_id"
    )]
    pub message_id: Option<Id<MessageMarker>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Display name of the track
    pub track: String,
    pub best: Option<BestTime>,
}

impl Record {
    pub fn unset(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            best: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestTime {
    pub time: CanonicalTime,
    pub holder: String,
}

impl Snapshot {
    pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path).await?;

        serde_json::from_slice(&bytes).map_err(SnapshotError::from)
    }

    /// Rewrites the whole file at `path`
    pub async fn persist(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self).context("failed to serialize leaderboard")?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
            .context("failed to open leaderboard file")?;

        file.write_all(&bytes)
            .await
            .context("failed writing to leaderboard file")?;

        file.flush()
            .await
            .context("failed to flush leaderboard file")?;

        Ok(())
    }
}

/// A broken message id only costs the message, not the records; a new
/// message is sent on the next refresh.
fn lenient_message_id<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Id<MessageMarker>>, D::Error> {
    let value = match Option::<Value>::deserialize(d)? {
        Some(value) => value,
        None => return Ok(None),
    };

    match Id::deserialize(&value) {
        Ok(id) => Ok(Some(id)),
        Err(err) => {
            warn!("Ignoring invalid leaderboard message id {value}: {err}");

            Ok(None)
        }
    }
}

mod records {
    use std::fmt::{Formatter, Result as FmtResult};

    use serde::{
        de::{Error as _, MapAccess, Visitor},
        ser::{SerializeMap, SerializeStruct},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use crate::leaderboard::time::{normalize, UNSET};

    use super::{BestTime, Record, Records};

    #[derive(Deserialize)]
    struct RawRecord {
        track: String,
        time: String,
        holder: String,
    }

    struct RecordsVisitor;

    impl<'de> Visitor<'de> for RecordsVisitor {
        type Value = Records;

        fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
            f.write_str("a map of track keys to records")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut records: Records = Vec::with_capacity(map.size_hint().unwrap_or(0));

            while let Some((key, raw)) = map.next_entry::<String, RawRecord>()? {
                let RawRecord {
                    track,
                    time,
                    holder,
                } = raw;

                let best = match (time == UNSET, holder == UNSET) {
                    (true, true) => None,
                    (false, false) => {
                        let time = normalize(&time).map_err(A::Error::custom)?;

                        Some(BestTime { time, holder })
                    }
                    _ => {
                        return Err(A::Error::custom(format_args!(
                            "record `{key}` must have either both time and holder or neither"
                        )))
                    }
                };

                let record = Record { track, best };

                match records.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, entry)) => *entry = record,
                    None => records.push((key, record)),
                }
            }

            Ok(records)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Records, D::Error> {
        d.deserialize_map(RecordsVisitor)
    }

    struct BorrowedRawRecord<'r>(&'r Record);

    impl Serialize for BorrowedRawRecord<'_> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let mut raw = s.serialize_struct("RawRecord", 3)?;

            raw.serialize_field("track", &self.0.track)?;

            match self.0.best {
                Some(ref best) => {
                    raw.serialize_field("time", &best.time)?;
                    raw.serialize_field("holder", &best.holder)?;
                }
                None => {
                    raw.serialize_field("time", UNSET)?;
                    raw.serialize_field("holder", UNSET)?;
                }
            }

            raw.end()
        }
    }

    pub(super) fn serialize<S: Serializer>(records: &Records, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(records.len()))?;

        for (key, record) in records {
            map.serialize_entry(key, &BorrowedRawRecord(record))?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::leaderboard::time::normalize;

    use super::*;

    fn sample() -> Snapshot {
        let best = BestTime {
            time: normalize("1:5.25").unwrap(),
            holder: "<@42>".to_owned(),
        };

        Snapshot {
            leaderboard: vec![
                ("rainbowroad".to_owned(), Record::unset("Rainbow Road")),
                (
                    "babypark".to_owned(),
                    Record {
                        track: "Baby Park".to_owned(),
                        best: Some(best),
                    },
                ),
            ],
            message_id: Some(Id::new(1_234_567_890)),
        }
    }

    #[test]
    fn json_layout() {
        let json = serde_json::to_string(&sample()).unwrap();

        let expected = r#"{"leaderboard":{"rainbowroad":{"track":"Rainbow Road","time":"—","holder":"—"},"babypark":{"track":"Baby Park","time":"1:05.25","holder":"<@42>"}},"leaderboardMessageId":"1234567890"}"#;

        assert_eq!(json, expected);
    }

    #[test]
    fn keeps_key_order() {
        let json = r#"{
            "leaderboard": {
                "zzz": { "track": "Z", "time": "—", "holder": "—" },
                "aaa": { "track": "A", "time": "58.5", "holder": "<@1>" },
                "mmm": { "track": "M", "time": "—", "holder": "—" }
            },
            "leaderboardMessageId": null
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = snapshot.leaderboard.iter().map(|(key, _)| key.as_str()).collect();

        assert_eq!(keys, ["zzz", "aaa", "mmm"]);
        assert_eq!(snapshot.message_id, None);

        let best = snapshot.leaderboard[1].1.best.as_ref().unwrap();
        assert_eq!(best.time.to_string(), "0:58.5");
    }

    #[test]
    fn invalid_message_id_keeps_records() {
        for id in [r#""abc""#, r#""0""#, "0", "-5", "{}"] {
            let json = format!(
                r#"{{
                    "leaderboard": {{ "aaa": {{ "track": "A", "time": "58.5", "holder": "<@1>" }} }},
                    "leaderboardMessageId": {id}
                }}"#
            );

            let snapshot: Snapshot = serde_json::from_str(&json).unwrap();

            assert_eq!(snapshot.message_id, None, "{id}");
            assert_eq!(snapshot.leaderboard.len(), 1, "{id}");
            assert!(snapshot.leaderboard[0].1.best.is_some(), "{id}");
        }
    }

    #[test]
    fn message_id_as_string_or_number() {
        for id in [r#""123""#, "123"] {
            let json = format!(r#"{{ "leaderboard": {{}}, "leaderboardMessageId": {id} }}"#);
            let snapshot: Snapshot = serde_json::from_str(&json).unwrap();

            assert_eq!(snapshot.message_id, Some(Id::new(123)), "{id}");
        }

        let snapshot: Snapshot = serde_json::from_str(r#"{ "leaderboard": {} }"#).unwrap();
        assert_eq!(snapshot.message_id, None);
    }

    #[test]
    fn half_set_record_is_corrupt() {
        let json = r#"{
            "leaderboard": { "aaa": { "track": "A", "time": "58.5", "holder": "—" } },
            "leaderboardMessageId": null
        }"#;

        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn invalid_time_is_corrupt() {
        let json = r#"{
            "leaderboard": { "aaa": { "track": "A", "time": "fast", "holder": "<@1>" } },
            "leaderboardMessageId": null
        }"#;

        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[tokio::test]
    async fn persist_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");

        let snapshot = sample();
        snapshot.persist(&path).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn persist_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");

        sample().persist(&path).await.unwrap();

        let small = Snapshot::default();
        small.persist(&path).await.unwrap();

        assert_eq!(Snapshot::load(&path).await.unwrap(), small);
    }

    #[tokio::test]
    async fn load_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");

        let missing = Snapshot::load(&path).await;
        assert!(matches!(missing, Err(SnapshotError::Io(_))));

        fs::write(&path, b"{\"leaderboard\": [").await.unwrap();

        let corrupt = Snapshot::load(&path).await;
        assert!(matches!(corrupt, Err(SnapshotError::Json(_))));
    }
}
