use std::sync::Arc;

use clap::Parser;

use crate::{cli::ApiArgs, core::view::PriceView, prelude::*, tables::build_prices_table};

#[derive(Parser)]
pub struct ScoutArgs {
    /// Do not print the sensor state as JSON.
    #[clap(long)]
    no_json: bool,
}

impl ScoutArgs {
    pub async fn run(self, api: &ApiArgs) -> Result {
        let refresher = api.new_refresher()?;
        let view = PriceView::new(Arc::clone(&refresher));
        let snapshot = refresher.refresh().await.context("failed to refresh the prices")?;
        println!("{}", build_prices_table(&snapshot));
        if !self.no_json {
            println!("{}", serde_json::to_string_pretty(&view.state())?);
        }
        Ok(())
    }
}
