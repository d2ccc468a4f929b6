use std::{sync::Arc, time::Duration};

use bon::Builder;
use clap::Parser;
use reqwest::Url;
use tokio::{
    select,
    time::{MissedTickBehavior, interval},
};

use crate::{
    api::{engie, heartbeat},
    cli::ApiArgs,
    core::{refresher::Refresher, view::PriceView},
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(long, env = "REFRESH_INTERVAL", default_value = "1h")]
    interval: humantime::Duration,

    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    heartbeat_url: Option<Url>,
}

impl WatchArgs {
    pub fn interval(&self) -> Duration {
        *self.interval
    }

    pub async fn run(self, api: &ApiArgs) -> Result {
        let refresher = api.new_refresher()?;
        Watcher::builder()
            .interval(self.interval())
            .view(PriceView::new(Arc::clone(&refresher)))
            .refresher(refresher)
            .heartbeat(heartbeat::Client::new(self.heartbeat_url))
            .build()
            .run()
            .await
    }
}

#[derive(Builder)]
struct Watcher {
    refresher: Arc<Refresher<engie::Api>>,
    view: PriceView<engie::Api>,
    heartbeat: heartbeat::Client,

    #[builder(into)]
    interval: Duration,
}

impl Watcher {
    /// Refresh immediately, and then on every interval tick until terminated.
    async fn run(self) -> Result {
        let mut interval = interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            select! {
                result = &mut shutdown => {
                    result?;
                    info!("terminating…");
                    return Ok(());
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    async fn tick(&self) {
        match self.refresher.refresh().await {
            Ok(_) => {
                self.heartbeat.send().await;
            }
            Err(error) => {
                error!("failed to refresh the prices: {:#}", Error::from(error));
            }
        }
        match (self.view.current_value(), self.view.attributes()) {
            (Some(current_price), Some(attributes)) => {
                info!(
                    current_price,
                    average = attributes.average,
                    min = attributes.min,
                    max = attributes.max,
                    tomorrow_valid = attributes.tomorrow_valid,
                    fetched_at = %attributes.fetched_at,
                    "sensor",
                );
            }
            _ => {
                warn!("sensor state is unknown");
            }
        }
    }
}

async fn shutdown_signal() -> Result {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}
