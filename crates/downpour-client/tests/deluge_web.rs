//! Integration test for DelugeWebClient with a chained sequence: add -> list -> set ratio -> remove.
//! Requires a running Deluge Web UI connected to a daemon, and environment configuration:
//! - DELUGE_WEB_URL (default: http://localhost:8112/json)
//! - DELUGE_WEB_PASSWORD (default: empty)
//!
//! Run with `cargo test -p downpour-client --test deluge_web -- --ignored`.

#![allow(unused_crate_dependencies)]

use downpour_client::{ClientConfig, DelugeWebClient};
use downpour_types::DelugeWebUi;

/// Info hash of the magnet link added by the test.
const TEST_HASH: &str = "dd8255ecdc7ca55fb0bbf81323d87062db1f6d1c";

fn magnet_link() -> String {
    format!("magnet:?xt=urn:btih:{TEST_HASH}&dn=Big+Buck+Bunny")
}

#[test_log::test(tokio::test)]
#[ignore = "requires a running Deluge Web UI"]
async fn deluge_web_chained_flow() {
    // Arrange client
    let client = DelugeWebClient::connect(&ClientConfig::from_env())
        .await
        .expect("failed to log in to the Deluge Web UI");

    // 1. Add magnet
    client
        .add_magnet(&magnet_link())
        .await
        .expect("failed to add magnet");

    // 2. List torrents, find ours by hash
    let list = client
        .list_all_torrents()
        .await
        .expect("failed to list torrents");
    assert!(
        list.iter().any(|t| t.hash == TEST_HASH),
        "added torrent not found in list"
    );

    // 3. Cap the seed ratio
    client
        .set_max_ratio(TEST_HASH, 1.0)
        .await
        .expect("failed to set max ratio");

    // 4. Remove our torrent together with its data
    client
        .remove_torrent(TEST_HASH, true)
        .await
        .expect("failed to remove torrent");

    // 5. Ensure our torrent is gone
    let final_list = client
        .list_all_torrents()
        .await
        .expect("failed to list torrents");
    let still_present = final_list.iter().any(|t| t.hash == TEST_HASH);
    assert!(!still_present, "torrent was not removed");
}
