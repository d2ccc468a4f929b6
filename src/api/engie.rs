//! [Engie Belgium](https://www.engie.be) public EPEX day-ahead prices.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    api::{PriceSource, RefreshError},
    prelude::*,
};

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub const URL: &'static str = "https://api.engie.be/engie/ms/pricing/v1/public/prices/epex";

    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn fetch_body(&self) -> Result<String, RefreshError> {
        info!("fetching…");
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(n_bytes = body.len(), "fetched");
        Ok(body)
    }
}
