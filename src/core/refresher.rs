use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::{Mutex, watch};

use crate::{
    api::{PriceSource, RefreshError},
    core::snapshot::PriceSnapshot,
    prelude::*,
};

/// Owns the latest successful [`PriceSnapshot`] and replaces it on every successful refresh.
pub struct Refresher<S> {
    source: S,

    /// Held for the whole refresh, so that a concurrent caller waits instead of fetching twice.
    in_flight: Mutex<()>,

    latest: watch::Sender<Option<Arc<PriceSnapshot>>>,
}

impl<S: PriceSource> Refresher<S> {
    pub fn new(source: S) -> Self {
        Self { source, in_flight: Mutex::new(()), latest: watch::Sender::new(None) }
    }

    /// Latest successful snapshot, `None` until the first successful refresh.
    pub fn snapshot(&self) -> Option<Arc<PriceSnapshot>> {
        self.latest.borrow().clone()
    }

    pub async fn refresh(&self) -> Result<Arc<PriceSnapshot>, RefreshError> {
        self.refresh_at(Local::now()).await
    }

    /// Fetch the prices and publish a new snapshot bucketed relative to `now`.
    ///
    /// On failure, the published snapshot is left untouched.
    #[instrument(skip_all, fields(now = %now))]
    pub async fn refresh_at(
        &self,
        now: DateTime<Local>,
    ) -> Result<Arc<PriceSnapshot>, RefreshError> {
        let _guard = self.in_flight.lock().await;
        info!("refreshing…");
        let snapshot = Arc::new(PriceSnapshot::new(self.source.fetch_points().await?, now));
        info!(
            n_today = snapshot.today.len(),
            n_tomorrow = snapshot.tomorrow.len(),
            average = snapshot.average,
            current_price = snapshot.current_price,
            "refreshed",
        );
        self.latest.send_replace(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }
}
