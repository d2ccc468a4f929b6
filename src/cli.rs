mod scout;
mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{scout::ScoutArgs, watch::WatchArgs};
use crate::{api::engie, core::refresher::Refresher, prelude::*};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: refresh the prices periodically and log the sensor state.
    #[clap(name = "watch")]
    Watch(WatchArgs),

    /// Fetch the prices once and print them.
    #[clap(name = "scout")]
    Scout(ScoutArgs),
}

#[derive(Parser)]
pub struct ApiArgs {
    /// EPEX prices endpoint.
    #[clap(long = "url", env = "ENGIE_URL", default_value = engie::Api::URL)]
    pub url: Url,

    /// Request timeout.
    #[clap(long = "timeout", env = "ENGIE_TIMEOUT", default_value = "10s")]
    pub timeout: humantime::Duration,
}

impl ApiArgs {
    pub fn new_refresher(&self) -> Result<Arc<Refresher<engie::Api>>> {
        let api = engie::Api::new(self.url.clone(), *self.timeout)
            .context("failed to build the HTTP client")?;
        Ok(Arc::new(Refresher::new(api)))
    }
}
