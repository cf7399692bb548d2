//! Request builders for the Deluge Web UI methods used by this crate.

use serde::Serialize;
use serde_json::{Value, json};

use crate::envelope::{RpcRequest, build_request};

/// `auth.login`
pub const AUTH_LOGIN: &str = "auth.login";
/// `web.add_torrents`
pub const WEB_ADD_TORRENTS: &str = "web.add_torrents";
/// `core.set_torrent_options`
pub const CORE_SET_TORRENT_OPTIONS: &str = "core.set_torrent_options";
/// `web.update_ui`
pub const WEB_UPDATE_UI: &str = "web.update_ui";
/// `core.remove_torrent`
pub const CORE_REMOVE_TORRENT: &str = "core.remove_torrent";

/// Torrent status keys requested from `web.update_ui`.
pub const TORRENT_FIELDS: [&str; 23] = [
    "queue",
    "name",
    "total_wanted",
    "state",
    "progress",
    "num_seeds",
    "total_seeds",
    "num_peers",
    "total_peers",
    "download_payload_rate",
    "upload_payload_rate",
    "eta",
    "ratio",
    "distributed_copies",
    "is_auto_managed",
    "time_added",
    "tracker_host",
    "save_path",
    "total_done",
    "total_uploaded",
    "max_download_speed",
    "max_upload_speed",
    "seeds_peers_ratio",
];

/// Per-torrent options sent along with `web.add_torrents`.
///
/// `-1` means "use the daemon default" for the limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct AddTorrentOptions {
    pub file_priorities: Vec<i32>,
    pub add_paused: bool,
    pub compact_allocation: bool,
    pub download_location: String,
    pub move_completed: bool,
    pub move_completed_path: String,
    pub max_connections: i32,
    pub max_download_speed: i32,
    pub max_upload_slots: i32,
    pub max_upload_speed: i32,
    pub prioritize_first_last_pieces: bool,
}

impl Default for AddTorrentOptions {
    fn default() -> Self {
        Self {
            file_priorities: Vec::new(),
            add_paused: false,
            compact_allocation: false,
            download_location: String::new(),
            move_completed: false,
            move_completed_path: String::new(),
            max_connections: -1,
            max_download_speed: -1,
            max_upload_slots: -1,
            max_upload_speed: -1,
            prioritize_first_last_pieces: false,
        }
    }
}

/// Options accepted by `core.set_torrent_options`. Unset fields are left untouched by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TorrentOptions {
    /// Stop seeding once `stop_ratio` is reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_at_ratio: Option<bool>,
    /// Share ratio at which to stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_ratio: Option<f64>,
}

impl TorrentOptions {
    /// Options that stop seeding at `ratio`.
    pub fn stop_at(ratio: f64) -> Self {
        Self {
            stop_at_ratio: Some(true),
            stop_ratio: Some(ratio),
        }
    }
}

/// `auth.login` with the web UI password.
pub fn login(password: &str, id: u64) -> RpcRequest {
    build_request(AUTH_LOGIN, vec![json!(password)], id)
}

/// `web.add_torrents` for a single magnet link.
pub fn add_magnet(magnet_link: &str, options: &AddTorrentOptions, id: u64) -> RpcRequest {
    build_request(
        WEB_ADD_TORRENTS,
        vec![json!([{ "path": magnet_link, "options": options }])],
        id,
    )
}

/// `core.set_torrent_options` for a single torrent.
pub fn set_torrent_options(torrent_hash: &str, options: &TorrentOptions, id: u64) -> RpcRequest {
    build_request(
        CORE_SET_TORRENT_OPTIONS,
        vec![json!([torrent_hash]), json!(options)],
        id,
    )
}

/// `web.update_ui` requesting `fields` for every torrent, without filters.
pub fn update_ui(fields: &[&str], id: u64) -> RpcRequest {
    build_request(WEB_UPDATE_UI, vec![json!(fields), Value::Object(Default::default())], id)
}

/// `core.remove_torrent`, optionally deleting downloaded data.
pub fn remove_torrent(torrent_hash: &str, remove_data: bool, id: u64) -> RpcRequest {
    build_request(
        CORE_REMOVE_TORRENT,
        vec![json!(torrent_hash), json!(remove_data)],
        id,
    )
}
