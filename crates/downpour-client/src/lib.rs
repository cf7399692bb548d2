//! # Deluge Web UI client using JSON-RPC.
//!
//! usage:
//!
//! ```rust,ignore
//! use downpour_client::DelugeWebClient;
//! use downpour_types::DelugeWebUi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DelugeWebClient::try_new("http://localhost:8112/json", "deluge").await?;
//!     client.add_magnet("magnet:?xt=urn:btih:...").await?;
//!     for torrent in client.list_all_torrents().await? {
//!         println!("{torrent}");
//!     }
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod conversions;
mod ops;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use tracing_subscriber as _;

pub use client::DelugeWebClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use transport::HttpTransport;
