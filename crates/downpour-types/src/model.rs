//! Records returned by the Deluge Web UI.
//!
//! Every field mirrors a key of the JSON objects the daemon sends back. Deluge omits keys it
//! was not asked for and sends `null` for values it does not know, so all of them are optional.
//! Numbers are `f64` throughout: Deluge 2.x computes rates by division and may send any counter
//! as a float.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of a single torrent, as reported by `web.update_ui`.
///
/// The hash is not part of the per-torrent object on the wire; it is the key under which the
/// object appears in the `torrents` mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[allow(missing_docs)] // rationale: these are the same fields as in the Deluge torrent status
pub struct Torrent {
    #[serde(skip)]
    pub hash: String,

    pub queue: Option<f64>,

    pub name: Option<String>,

    pub total_wanted: Option<f64>,

    pub state: Option<String>,

    pub progress: Option<f64>,

    pub num_seeds: Option<f64>,

    pub total_seeds: Option<f64>,

    pub num_peers: Option<f64>,

    pub total_peers: Option<f64>,

    pub download_payload_rate: Option<f64>,

    pub upload_payload_rate: Option<f64>,

    pub eta: Option<f64>,

    pub ratio: Option<f64>,

    pub distributed_copies: Option<f64>,

    pub is_auto_managed: Option<bool>,

    pub time_added: Option<f64>,

    pub tracker_host: Option<String>,

    pub save_path: Option<String>,

    pub total_done: Option<f64>,

    pub total_uploaded: Option<f64>,

    pub max_download_speed: Option<f64>,

    pub max_upload_speed: Option<f64>,

    pub seeds_peers_ratio: Option<f64>,
}

impl Torrent {
    /// Returns an empty record for the given hash.
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for Torrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}% Complete - Ratio: {}",
            self.name.as_deref().unwrap_or(&self.hash),
            display_or_unknown(self.progress),
            display_or_unknown(self.ratio),
        )
    }
}

fn display_or_unknown(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| format!("{v:.2}"))
}

/// Daemon-wide transfer and connection statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[allow(missing_docs)]
pub struct Stats {
    pub upload_protocol_rate: Option<f64>,

    pub max_upload: Option<f64>,

    pub download_protocol_rate: Option<f64>,

    pub download_rate: Option<f64>,

    pub has_incoming_connections: Option<bool>,

    pub num_connections: Option<f64>,

    pub max_download: Option<f64>,

    pub upload_rate: Option<f64>,

    pub dht_nodes: Option<f64>,

    pub free_space: Option<f64>,

    pub max_num_connections: Option<f64>,
}

/// Result of `web.update_ui`: connection state, statistics and every known torrent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusResult {
    /// Whether the web UI is connected to a daemon.
    pub connected: bool,
    /// Daemon-wide statistics.
    pub stats: Stats,
    /// Torrents in the order the daemon listed them.
    pub torrents: Vec<Torrent>,
}

/// Error object carried in a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// Human readable description.
    pub message: String,
    /// Deluge error code.
    pub code: i64,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torrent_display_uses_name() {
        let torrent = Torrent {
            name: Some("ubuntu.iso".to_string()),
            progress: Some(50.0),
            ratio: Some(1.25),
            ..Torrent::with_hash("abc123")
        };

        assert_eq!(
            torrent.to_string(),
            "ubuntu.iso - 50.00% Complete - Ratio: 1.25"
        );
    }

    #[test]
    fn torrent_display_falls_back_to_hash() {
        let torrent = Torrent::with_hash("abc123");

        assert_eq!(torrent.to_string(), "abc123 - ?% Complete - Ratio: ?");
    }

    #[test]
    fn rpc_error_display() {
        let error = RpcError {
            message: "Not authenticated".to_string(),
            code: 1,
        };

        assert_eq!(error.to_string(), "Not authenticated (code 1)");
    }
}
