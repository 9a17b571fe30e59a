//! CLI for topiclog
//!
//! Subcommands:
//! - `server`: run the HTTP/WebSocket server
//! - `publish`: publish one message to a topic
//! - `subscribe`: print a topic's history and live messages

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use topiclog::client;
use topiclog::config::{Settings, load_config};
use topiclog::store::Store;
use topiclog::transport::start_server;
use topiclog::utils::logging;

#[derive(Parser)]
#[command(name = "topiclog")]
enum Command {
    /// Start the server
    Server,
    /// Publish a single message
    Publish {
        /// WebSocket base URL of the server
        #[arg(long, default_value = "ws://127.0.0.1:8000")]
        url: String,
        topic: String,
        message: String,
    },
    /// Print a topic's history, then follow it
    Subscribe {
        /// WebSocket base URL of the server
        #[arg(long, default_value = "ws://127.0.0.1:8000")]
        url: String,
        topic: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            return;
        }
    };
    logging::init(&config.log.level);

    let result: Result<(), Box<dyn std::error::Error>> = match cmd {
        Command::Server => run_server(config).await,
        Command::Publish {
            url,
            topic,
            message,
        } => client::publish(&url, &topic, &message)
            .await
            .map_err(Into::into),
        Command::Subscribe { url, topic } => client::subscribe(&url, &topic, |message| {
            println!("{}", String::from_utf8_lossy(&message));
        })
        .await
        .map_err(Into::into),
    };

    if let Err(e) = result {
        error!("{e}");
    }
}

async fn run_server(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let policy = config.store.delivery_policy();
    let store = Arc::new(Store::new(policy));
    info!(?policy, "store ready");

    for (topic, messages) in &config.store.preload {
        for message in messages {
            store.publish(topic, message.clone()).await;
        }
        info!(%topic, count = messages.len(), "preloaded topic");
    }

    tokio::select! {
        result = start_server(&config.server, store) => {
            result?;
            error!("Server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
