mod commands;
mod downloader;
mod errors;
mod files;
mod handlers;
mod pending;
mod relay;
mod schema;
mod sender;
mod server;
mod transport;
mod utils;
mod workdir;

use std::sync::Arc;

use teloxide::prelude::*;

use crate::{
    downloader::YtDlp,
    pending::{PENDING_TTL, PendingStore, SWEEP_INTERVAL},
    relay::Orchestrator,
    schema::schema,
    sender::{SEND_GAP, SendPacer},
    transport::TelegramTransport,
};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();
    log::info!("Starting media relay bot...");

    let bot = Bot::from_env();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    tokio::spawn(async move {
        if let Err(e) = server::serve(port).await {
            log::error!("HTTP server failed: {}", e);
        }
    });

    let store = Arc::new(PendingStore::new(PENDING_TTL));
    {
        let store = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                store.sweep().await;
            }
        });
    }

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(TelegramTransport::new(bot.clone())),
        Arc::new(YtDlp::new()),
        SendPacer::new(SEND_GAP),
        std::env::temp_dir(),
    ));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![store, orchestrator])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
