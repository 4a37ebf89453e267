use std::sync::Arc;

use eyre::{Context as _, Result};
use futures::StreamExt;
use twilight_gateway::{cluster::Events, Event};

use self::message::handle_message;

use super::Context;

mod message;

pub async fn event_loop(ctx: Arc<Context>, mut events: Events) {
    while let Some((shard_id, event)) = events.next().await {
        let ctx = Arc::clone(&ctx);

        tokio::spawn(async move {
            let handle_fut = handle_event(ctx, event, shard_id);

            if let Err(err) = handle_fut.await.context("error while handling event") {
                error!("{err:?}");
            }
        });
    }
}

async fn handle_event(ctx: Arc<Context>, event: Event, shard_id: u64) -> Result<()> {
    match event {
        Event::GatewayInvalidateSession(true) => {
            warn!("Gateway invalidated session for shard {shard_id}, but its reconnectable")
        }
        Event::GatewayInvalidateSession(false) => {
            warn!("Gateway invalidated session for shard {shard_id}")
        }
        Event::GatewayReconnect => {
            info!("Gateway requested shard {shard_id} to reconnect")
        }
        Event::MessageCreate(msg) => handle_message(ctx, msg.0).await,
        Event::Ready(_) => {
            info!("Shard {shard_id} is ready");

            let mut leaderboard = ctx.leaderboard.lock().await;
            ctx.refresh_leaderboard(&mut leaderboard).await;
        }
        Event::Resumed => info!("Shard {shard_id} is resumed"),
        Event::ShardConnected(_) => info!("Shard {shard_id} is connected"),
        Event::ShardConnecting(_) => info!("Shard {shard_id} is connecting..."),
        Event::ShardDisconnected(_) => info!("Shard {shard_id} is disconnected"),
        Event::ShardIdentifying(_) => info!("Shard {shard_id} is identifying..."),
        Event::ShardReconnecting(_) => info!("Shard {shard_id} is reconnecting..."),
        Event::ShardResuming(_) => info!("Shard {shard_id} is resuming..."),
        _ => {}
    }

    Ok(())
}
