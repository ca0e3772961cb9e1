use clap::Parser;
use dotenv::dotenv;
use crate::config::Config;

pub mod clients;
pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    controller::serve(&config).await
}
