use std::{io::ErrorKind, sync::Arc};

use eyre::{Report, Result, WrapErr};
use tokio::{fs, sync::Mutex};
use twilight_gateway::{cluster::Events, Cluster};
use twilight_http::Client;
use twilight_model::channel::message::AllowedMentions;

use crate::{
    core::BotConfig,
    error::SnapshotError,
    leaderboard::{track_list, Leaderboard, Snapshot},
};

use super::cluster::build_cluster;

mod leaderboard;

pub struct Context {
    pub cluster: Cluster,
    pub http: Arc<Client>,
    /// Held for the whole submit, persist and refresh cycle
    pub leaderboard: Mutex<Leaderboard>,
}

impl Context {
    pub async fn new() -> Result<(Self, Events)> {
        let config = BotConfig::get();

        fs::create_dir_all(config.paths.data())
            .await
            .context("failed to create data folder")?;

        let leaderboard = load_leaderboard(config).await;

        let discord_token = &config.tokens.discord;

        // Replies should ping the author but mentions of record holders never ping
        let mentions = AllowedMentions {
            replied_user: true,
            ..Default::default()
        };

        let http = Client::builder()
            .token(discord_token.to_owned())
            .remember_invalid_token(false)
            .default_allowed_mentions(mentions)
            .build();

        let http = Arc::new(http);

        let current_user = http.current_user().exec().await?.model().await?;
        info!("Connecting to Discord as {}...", current_user.name);

        let (cluster, events) = build_cluster(discord_token, Arc::clone(&http)).await?;

        let ctx = Self {
            cluster,
            http,
            leaderboard: Mutex::new(leaderboard),
        };

        Ok((ctx, events))
    }
}

async fn load_leaderboard(config: &BotConfig) -> Leaderboard {
    let path = config.paths.leaderboard();

    match Snapshot::load(&path).await {
        Ok(snapshot) => {
            info!("Loaded leaderboard from `{}`", path.display());

            return Leaderboard::restore(track_list(), snapshot);
        }
        Err(SnapshotError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            info!("No leaderboard at `{}` yet, creating one", path.display());
        }
        Err(err) => {
            let err = Report::new(err).wrap_err("starting with a fresh leaderboard");
            warn!("{err:?}");
        }
    }

    let leaderboard = Leaderboard::new(track_list());

    if let Err(err) = leaderboard.snapshot().persist(&path).await {
        warn!("{:?}", err.wrap_err("failed to store fresh leaderboard"));
    }

    leaderboard
}
