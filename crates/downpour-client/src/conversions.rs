//! Conversions from decoded results to the values each operation returns.
//!
//! Each Deluge method answers with its own result shape; these helpers turn a decoded result into
//! the operation's output or a [`DelugeError`] naming the method.

use downpour_types::{DelugeError, RpcResult, StatusResult};
use serde_json::Value;
use tracing::warn;

/// Accepts a null or `true` acknowledgement.
pub(crate) fn acknowledged(method: &str, result: Option<RpcResult>) -> Result<(), DelugeError> {
    match result {
        None | Some(RpcResult::Ack(true)) => Ok(()),
        Some(RpcResult::Ack(false)) => Err(DelugeError::Rejected {
            method: method.to_string(),
        }),
        Some(RpcResult::Status(_)) => Err(unexpected(method, "a status result")),
    }
}

/// Requires a status result.
pub(crate) fn into_status(
    method: &str,
    result: Option<RpcResult>,
) -> Result<StatusResult, DelugeError> {
    match result {
        Some(RpcResult::Status(status)) => Ok(status),
        Some(RpcResult::Ack(value)) => Err(unexpected(method, &value.to_string())),
        None => Err(unexpected(method, "null")),
    }
}

/// Interprets the result of `web.add_torrents`.
///
/// Deluge 1.3 answers with `null` or a boolean; Deluge 2.x answers with one
/// `[success, hash_or_message]` pair per torrent.
pub(crate) fn add_torrents_outcome(method: &str, result: Value) -> Result<(), DelugeError> {
    match result {
        Value::Null | Value::Bool(true) => Ok(()),
        Value::Bool(false) => Err(DelugeError::Rejected {
            method: method.to_string(),
        }),
        Value::Array(entries) => entries
            .iter()
            .try_for_each(|entry| add_torrents_entry(method, entry)),
        other => Err(unexpected(method, &other.to_string())),
    }
}

fn add_torrents_entry(method: &str, entry: &Value) -> Result<(), DelugeError> {
    match entry.get(0).and_then(Value::as_bool) {
        Some(true) => Ok(()),
        Some(false) => {
            let detail = entry.get(1).unwrap_or(&Value::Null);
            warn!("{method} rejected a torrent: {detail}");
            Err(DelugeError::Rejected {
                method: method.to_string(),
            })
        }
        None => Err(unexpected(method, &entry.to_string())),
    }
}

fn unexpected(method: &str, found: &str) -> DelugeError {
    DelugeError::UnexpectedResult {
        method: method.to_string(),
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testutil::make_test_status;

    #[test]
    fn test_acknowledged() {
        assert!(acknowledged("core.remove_torrent", Some(RpcResult::Ack(true))).is_ok());
        assert!(acknowledged("core.set_torrent_options", None).is_ok());

        match acknowledged("core.remove_torrent", Some(RpcResult::Ack(false))) {
            Err(DelugeError::Rejected { method }) => assert_eq!(method, "core.remove_torrent"),
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_acknowledged_rejects_status() {
        let result = acknowledged(
            "core.remove_torrent",
            Some(RpcResult::Status(make_test_status())),
        );

        assert!(matches!(result, Err(DelugeError::UnexpectedResult { .. })));
    }

    #[test]
    fn test_into_status() {
        let status = into_status("web.update_ui", Some(RpcResult::Status(make_test_status())))
            .unwrap();
        assert_eq!(status.torrents.len(), 2);

        match into_status("web.update_ui", Some(RpcResult::Ack(true))) {
            Err(DelugeError::UnexpectedResult { method, found }) => {
                assert_eq!(method, "web.update_ui");
                assert_eq!(found, "true");
            }
            other => panic!("Expected UnexpectedResult, got {other:?}"),
        }
        assert!(into_status("web.update_ui", None).is_err());
    }

    #[test]
    fn test_add_torrents_legacy_results() {
        assert!(add_torrents_outcome("web.add_torrents", Value::Null).is_ok());
        assert!(add_torrents_outcome("web.add_torrents", json!(true)).is_ok());
        assert!(matches!(
            add_torrents_outcome("web.add_torrents", json!(false)),
            Err(DelugeError::Rejected { .. })
        ));
    }

    #[test_log::test]
    fn test_add_torrents_per_torrent_results() {
        assert!(add_torrents_outcome("web.add_torrents", json!([[true, "abc123"]])).is_ok());
        assert!(add_torrents_outcome("web.add_torrents", json!([])).is_ok());
        match add_torrents_outcome(
            "web.add_torrents",
            json!([[true, "abc123"], [false, "Torrent already in session"]]),
        ) {
            Err(DelugeError::Rejected { method }) => assert_eq!(method, "web.add_torrents"),
            other => panic!("Expected Rejected, got {other:?}"),
        }
        assert!(matches!(
            add_torrents_outcome("web.add_torrents", json!([[false]])),
            Err(DelugeError::Rejected { .. })
        ));
        assert!(matches!(
            add_torrents_outcome("web.add_torrents", json!(["abc123"])),
            Err(DelugeError::UnexpectedResult { .. })
        ));
    }
}
