pub mod engie;
mod error;
pub mod heartbeat;
mod models;

use async_trait::async_trait;

pub use self::error::RefreshError;
use crate::{api::models::TimeSeriesResponse, core::snapshot::RawPricePoint};

/// Anything that can publish the EPEX price points.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the raw response body.
    async fn fetch_body(&self) -> Result<String, RefreshError>;

    /// Fetch and parse all the published price points, in upstream order.
    async fn fetch_points(&self) -> Result<Vec<RawPricePoint>, RefreshError> {
        let body = self.fetch_body().await?;
        let response = serde_json::from_str::<TimeSeriesResponse>(&body)?;
        Ok(response.time_series.into_iter().map(RawPricePoint::from).collect())
    }
}
