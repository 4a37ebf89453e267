use eyre::{Context as _, Report, Result};
use tokio::time::{timeout, Duration};
use twilight_http::{
    api_error::{ApiError, GeneralApiError},
    error::ErrorType,
    Error as HttpError,
};
use twilight_model::channel::Message;

use crate::{
    core::{BotConfig, Context},
    embeds::{leaderboard_pages, validate_pages},
    leaderboard::Leaderboard,
    util::constants::{MESSAGE_EMBEDS_SIZE, UNKNOWN_MESSAGE},
};

const REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

impl Context {
    pub async fn store_leaderboard(&self, leaderboard: &Leaderboard) -> Result<()> {
        let path = BotConfig::get().paths.leaderboard();

        leaderboard.snapshot().persist(&path).await
    }

    /// Re-render the leaderboard message, failures are only logged.
    pub async fn refresh_leaderboard(&self, leaderboard: &mut Leaderboard) {
        match timeout(REFRESH_TIMEOUT, self.update_leaderboard_message(leaderboard)).await {
            Ok(Ok(())) => debug!("Refreshed leaderboard message"),
            Ok(Err(err)) => warn!("{:?}", err.wrap_err("failed to refresh leaderboard")),
            Err(_) => warn!("Refreshing the leaderboard timed out after {REFRESH_TIMEOUT:?}"),
        }
    }

    /// Edit the stored leaderboard message or send a new one if there
    /// is none.
    async fn update_leaderboard_message(&self, leaderboard: &mut Leaderboard) -> Result<()> {
        let mut embeds = leaderboard_pages(leaderboard.entries());

        if embeds.len() > MESSAGE_EMBEDS_SIZE {
            warn!(
                "Leaderboard has {} pages, only the first {MESSAGE_EMBEDS_SIZE} are shown",
                embeds.len()
            );

            embeds.truncate(MESSAGE_EMBEDS_SIZE);
        }

        validate_pages(&embeds).context("leaderboard exceeds embed limits")?;

        let channel = BotConfig::get().leaderboard_channel;

        if let Some(message_id) = leaderboard.message_id() {
            let update_fut = self
                .http
                .update_message(channel, message_id)
                .embeds(Some(embeds.as_slice()))
                .context("invalid leaderboard embeds")?
                .exec();

            match update_fut.await {
                Ok(_) => return Ok(()),
                Err(err) if is_unknown_message(&err) => {
                    info!("Leaderboard message {message_id} is gone, sending a new one")
                }
                Err(err) => {
                    return Err(Report::new(err).wrap_err("failed to edit leaderboard message"))
                }
            }
        }

        let message = self
            .http
            .create_message(channel)
            .embeds(&embeds)
            .context("invalid leaderboard embeds")?
            .exec()
            .await
            .context("failed to send leaderboard message")?
            .model()
            .await
            .context("failed to deserialize leaderboard message")?;

        leaderboard.set_message_id(Some(message.id));

        self.store_leaderboard(leaderboard)
            .await
            .context("failed to store leaderboard message id")
    }

    pub async fn reply(&self, msg: &Message, content: &str) -> Result<()> {
        self.http
            .create_message(msg.channel_id)
            .reply(msg.id)
            .content(content)
            .context("invalid reply content")?
            .exec()
            .await
            .context("failed to send reply")?;

        Ok(())
    }
}

fn is_unknown_message(err: &HttpError) -> bool {
    matches!(
        err.kind(),
        ErrorType::Response {
            error: ApiError::General(GeneralApiError { code, .. }),
            ..
        } if *code == UNKNOWN_MESSAGE
    )
}
