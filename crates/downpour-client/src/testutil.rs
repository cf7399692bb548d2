//! Shared test utilities and fixtures.

use downpour_types::{StatusResult, Torrent, methods::AUTH_LOGIN};
use serde_json::{Value, json};

use crate::ops::{MockDelugeOps, RpcReply};
use crate::session::SessionCookie;

pub(crate) const TEST_SESSION: &str = "0123456789abcdef";

pub(crate) fn make_test_status() -> StatusResult {
    StatusResult {
        connected: true,
        torrents: vec![
            make_test_torrent("hash1", "torrent1"),
            make_test_torrent("hash2", "torrent2"),
        ],
        ..Default::default()
    }
}

pub(crate) fn make_test_torrent(hash: &str, name: &str) -> Torrent {
    Torrent {
        name: Some(name.to_string()),
        progress: Some(50.0),
        ratio: Some(0.5),
        state: Some("Downloading".to_string()),
        ..Torrent::with_hash(hash)
    }
}

/// Body of a successful `web.update_ui` answer listing `hash1` and `hash2`.
pub(crate) fn make_status_body(id: u64) -> Value {
    json!({
        "id": id,
        "result": {
            "connected": true,
            "stats": {
                "download_rate": 1000,
                "upload_rate": 500,
                "num_connections": 5,
                "max_num_connections": 200,
                "dht_nodes": 80,
                "free_space": 1_000_000
            },
            "torrents": {
                "hash1": {"name": "torrent1", "progress": 50.0, "ratio": 0.5, "state": "Downloading"},
                "hash2": {"name": "torrent2", "progress": 50.0, "ratio": 0.5, "state": "Downloading"}
            },
            "filters": {}
        },
        "error": null
    })
}

pub(crate) fn reply(body: Value) -> RpcReply {
    RpcReply {
        body,
        session_cookie: None,
    }
}

pub(crate) fn ack_body(id: u64, result: Value) -> Value {
    json!({"id": id, "result": result, "error": null})
}

pub(crate) fn error_body(id: u64, message: &str, code: i64) -> Value {
    json!({"id": id, "result": null, "error": {"message": message, "code": code}})
}

/// Expects one successful `auth.login` with `password` that sets the test session cookie.
pub(crate) fn expect_login(mock: &mut MockDelugeOps, password: &'static str) {
    mock.expect_post()
        .withf(move |request, cookie| {
            request.method == AUTH_LOGIN && request.params == [json!(password)] && cookie.is_none()
        })
        .times(1)
        .returning(|request, _| {
            Ok(RpcReply {
                body: ack_body(request.id, json!(true)),
                session_cookie: Some(SessionCookie::new(TEST_SESSION)),
            })
        });
}
