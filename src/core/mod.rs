pub use self::{config::BotConfig, context::Context, events::event_loop};

mod cluster;
mod config;
mod context;
mod events;

pub mod commands;
