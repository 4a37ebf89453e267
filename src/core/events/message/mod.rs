use std::sync::Arc;

use twilight_model::channel::Message;

use crate::{
    core::{commands::prefix::TimeCommand, Context},
    leaderboard::SubmitResult,
    util::constants::INVALID_TIME,
    DEFAULT_PREFIX,
};

pub async fn handle_message(ctx: Arc<Context>, msg: Message) {
    if msg.author.bot {
        return;
    }

    let TimeCommand { key, time } = match TimeCommand::parse(&msg.content, DEFAULT_PREFIX) {
        Some(cmd) => cmd,
        None => return,
    };

    let holder = format!("<@{}>", msg.author.id);
    let mut leaderboard = ctx.leaderboard.lock().await;

    let res = leaderboard.submit(&key, &time, &holder);

    let track = match leaderboard.track(&key) {
        Some(track) => track.name.clone(),
        None => return,
    };

    let username = &msg.author.name;

    match res {
        SubmitResult::Accepted(ref record) => {
            info!("{username} set a new record on {track}: {record}");

            if let Err(err) = ctx.store_leaderboard(&leaderboard).await {
                warn!("{:?}", err.wrap_err("failed to store leaderboard"));
            }

            ctx.refresh_leaderboard(&mut leaderboard).await;
        }
        SubmitResult::Rejected(ref record) => {
            info!("{username} submitted `{time}` on {track} but the record is {record}")
        }
        SubmitResult::InvalidFormat => {
            debug!("{username} submitted invalid time `{time}` on {track}")
        }
        SubmitResult::UnknownTrack => {}
    }

    drop(leaderboard);

    let content = match reply_content(&res, &track, &time) {
        Some(content) => content,
        None => return,
    };

    if let Err(err) = ctx.reply(&msg, &content).await {
        warn!("{:?}", err.wrap_err("failed to reply to submission"));
    }
}

/// Answer to a submission of `time` on `track`, unknown tracks are ignored
fn reply_content(res: &SubmitResult, track: &str, time: &str) -> Option<String> {
    let content = match res {
        SubmitResult::Accepted(record) => format!("Updated **{track}** to **{record}**!"),
        SubmitResult::Rejected(record) => {
            format!("❌ **{time}** is not faster than the current record on **{track}** (**{record}**)")
        }
        SubmitResult::InvalidFormat => INVALID_TIME.to_owned(),
        SubmitResult::UnknownTrack => return None,
    };

    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_shows_canonical_time() {
        let res = SubmitResult::Accepted("1:5.1".parse().unwrap());
        let content = reply_content(&res, "Baby Park", "1:5.1");

        assert_eq!(content.as_deref(), Some("Updated **Baby Park** to **1:05.1**!"));
    }

    #[test]
    fn rejected_shows_submitted_and_current_time() {
        let res = SubmitResult::Rejected("58.5".parse().unwrap());
        let content = reply_content(&res, "DK Mountain", "58.45");

        assert_eq!(
            content.as_deref(),
            Some("❌ **58.45** is not faster than the current record on **DK Mountain** (**0:58.5**)")
        );
    }

    #[test]
    fn invalid_format_explains_the_format() {
        let content = reply_content(&SubmitResult::InvalidFormat, "Baby Park", "fast");

        assert_eq!(content.as_deref(), Some(INVALID_TIME));
    }

    #[test]
    fn unknown_track_gets_no_reply() {
        assert_eq!(reply_content(&SubmitResult::UnknownTrack, "", "58.5"), None);
    }
}
