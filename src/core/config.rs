use std::{env, path::PathBuf};

use eyre::{Context, ContextCompat, Result};
use once_cell::sync::OnceCell;
use twilight_model::id::{marker::ChannelMarker, Id};

static CONFIG: OnceCell<BotConfig> = OnceCell::new();

#[derive(Debug)]
pub struct BotConfig {
    pub tokens: Tokens,
    pub paths: Paths,
    pub leaderboard_channel: Id<ChannelMarker>,
}

#[derive(Debug)]
pub struct Paths {
    data: PathBuf,
}

impl Paths {
    pub fn data(&self) -> &PathBuf {
        &self.data
    }

    pub fn leaderboard(&self) -> PathBuf {
        let mut path = self.data.clone();
        path.push("leaderboard.json");

        path
    }

    pub fn logs(&self) -> PathBuf {
        self.data.join("logs")
    }
}

#[derive(Debug)]
pub struct Tokens {
    pub discord: String,
}

impl BotConfig {
    pub fn get() -> &'static Self {
        CONFIG
            .get()
            .expect("`BotConfig::init` must be called first")
    }

    pub fn init() -> Result<()> {
        let config = BotConfig {
            tokens: Tokens {
                discord: env_var("DISCORD_TOKEN")?,
            },
            paths: Paths {
                data: env_var("DATA_PATH")?,
            },
            leaderboard_channel: env_var("LEADERBOARD_CHANNEL_ID")?,
        };

        if CONFIG.set(config).is_err() {
            error!("CONFIG was already set");
        }

        Ok(())
    }
}

trait EnvKind: Sized {
    const EXPECTED: &'static str;

    fn from_str(s: &str) -> Option<Self>;
}

macro_rules! env_kind {
    ($($ty:ty: $arg:ident => $impl:block,)*) => {
        $(
            impl EnvKind for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_str($arg: &str) -> Option<Self> {
                    $impl
                }
            }
        )*
    };
}

env_kind! {
    PathBuf: s => { s.parse().ok() },
    String: s => { Some(s.to_owned()) },
    Id<ChannelMarker>: s => { s.parse().ok().and_then(Id::new_checked) },
}

fn env_var<T: EnvKind>(name: &'static str) -> Result<T> {
    let value = env::var(name).with_context(|| format!("missing env variable `{name}`"))?;

    T::from_str(&value).with_context(|| {
        format!(
            "failed to parse env variable `{name}={value}`; expected {expected}",
            expected = T::EXPECTED
        )
    })
}
