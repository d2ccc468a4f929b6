mod api;
mod cli;
mod core;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    match args.command {
        Command::Watch(watch_args) => watch_args.run(&args.api).await?,
        Command::Scout(scout_args) => scout_args.run(&args.api).await?,
    }

    info!("done!");
    Ok(())
}
