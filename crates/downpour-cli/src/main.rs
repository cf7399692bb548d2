//! # Downpour
//!
//! Command-line control of a Deluge Web UI.
//!
//! ## Usage
//!
//! ```sh,ignore
//! DELUGE_WEB_PASSWORD=deluge cargo run --release --bin downpour -- list
//! downpour --url http://seedbox:8112/json add-magnet 'magnet:?xt=urn:btih:...'
//! ```

mod cli;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use downpour_client::{ClientConfig, DelugeWebClient};
use downpour_types::{DelugeWebUi, StatusResult};

use crate::cli::{Cli, Command};

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the daemon statistics of a status snapshot.
fn print_status(status: &StatusResult) {
    let stats = &status.stats;
    let show = |value: Option<f64>| value.map_or_else(|| "?".to_string(), |v| format!("{v:.0}"));

    println!("connected:      {}", status.connected);
    println!("torrents:       {}", status.torrents.len());
    println!("download rate:  {} B/s", show(stats.download_rate));
    println!("upload rate:    {} B/s", show(stats.upload_rate));
    println!(
        "connections:    {}/{}",
        show(stats.num_connections),
        show(stats.max_num_connections)
    );
    println!("dht nodes:      {}", show(stats.dht_nodes));
    println!("free space:     {} B", show(stats.free_space));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.connection.apply(ClientConfig::from_env());
    debug!("Using {:?}", config);

    let client = DelugeWebClient::connect(&config).await?;

    match cli.command {
        Command::AddMagnet { magnet_link } => {
            client.add_magnet(&magnet_link).await?;
            info!("Magnet added");
        }
        Command::List => {
            for torrent in client.list_all_torrents().await? {
                println!("{}  {}", torrent.hash, torrent);
            }
        }
        Command::Status => print_status(&client.status().await?),
        Command::SetRatio {
            torrent_hash,
            max_ratio,
        } => {
            client.set_max_ratio(&torrent_hash, max_ratio).await?;
            info!("Max ratio of {} set to {}", torrent_hash, max_ratio);
        }
        Command::Remove {
            torrent_hash,
            keep_data,
        } => {
            client.remove_torrent(&torrent_hash, !keep_data).await?;
            info!("Removed {}", torrent_hash);
        }
    }

    Ok(())
}
