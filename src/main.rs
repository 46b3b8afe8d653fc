use eyre::{Result, WrapErr};
use log::info;
use std::sync::Arc;
use teloxide::prelude::Bot;

mod app;
mod bot;
mod command;
mod config;
mod error;
mod exchange;
mod format;
mod poller;
mod scoring;
mod sender;
mod source;
mod state;
#[cfg(test)]
mod testing;

use app::App;
use config::Config;
use source::HttpSource;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let config = Config::from_env().wrap_err("loading configuration")?;
    info!(
        "Starting cashout bot, locale {:?}, poll every {:?}, port {} (unused)",
        config.locale, config.poll_interval, config.port
    );

    let bot = Bot::new(config.api_key.clone());
    let source = Arc::new(HttpSource::new(
        config.balance_url.clone(),
        config.status_url.clone(),
        config.scoring_url.clone(),
    ));
    let app = Arc::new(App::new(&config, source, Arc::new(bot.clone())));

    let prefetch = app.clone();
    tokio::spawn(async move {
        prefetch.scoring_periods().await;
    });

    bot::run(bot, app.clone()).await;
    app.shutdown().await;

    Ok(())
}
