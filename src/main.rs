#[macro_use]
extern crate log;

use std::sync::Arc;

use eyre::{Context as _, Result};
use log::LevelFilter;
use tokio::signal;

use crate::core::{event_loop, BotConfig, Context};

mod core;
mod embeds;
mod error;
mod leaderboard;
mod logging;
mod util;

pub const DEFAULT_PREFIX: &str = "!";

#[tokio::main]
async fn main() {
    if let Err(err) = async_main().await {
        let err = err.wrap_err("critical error in main");

        // config or logging setup failed so there is no logger yet
        if log::max_level() == LevelFilter::Off {
            eprintln!("{err:?}");
        } else {
            error!("{err:?}");
        }
    }
}

async fn async_main() -> Result<()> {
    let dotenv_res = dotenv::dotenv();
    BotConfig::init().context("failed to initialize config")?;

    let log_dir = BotConfig::get().paths.logs();
    logging::initialize(&log_dir).context("failed to initialize logging")?;

    if dotenv_res.is_err() {
        info!("No .env file found, using the process environment");
    }

    let (ctx, events) = Context::new().await.context("failed to create ctx")?;
    let ctx = Arc::new(ctx);

    let cluster_ctx = Arc::clone(&ctx);
    tokio::spawn(async move { cluster_ctx.cluster.up().await });

    tokio::select! {
        _ = event_loop(Arc::clone(&ctx), events) => error!("Event loop ended"),
        res = signal::ctrl_c() => match res {
            Ok(_) => info!("Received Ctrl+C"),
            Err(err) => error!("Failed to await Ctrl+C: {err}"),
        },
    }

    ctx.cluster.down();
    info!("Shutting down");

    Ok(())
}
