//! # Downpour Types
//!
//! This crate defines the wire model of the Deluge Web UI JSON-RPC interface, the mapping
//! between that model and JSON envelopes, and the common trait implemented by Deluge clients.

pub mod envelope;
pub mod methods;
pub mod model;

use thiserror::Error;

pub use envelope::{
    ApiResponse, DecodeError, RawResponse, RpcRequest, RpcResult, build_request, parse_envelope,
    parse_response, parse_result,
};
pub use model::{RpcError, Stats, StatusResult, Torrent};

/// Error type for Deluge Web UI operations.
#[derive(Error, Debug)]
pub enum DelugeError {
    /// Network-related errors (connection failures, timeouts, HTTP status, etc.)
    #[error("{method} failed: network error: {message}")]
    Network {
        /// Method that was called.
        method: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The password was rejected or the session is no longer valid
    #[error("{method} failed: authentication required")]
    Unauthorized {
        /// Method that was called.
        method: String,
    },

    /// The endpoint URL could not be parsed
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The login response did not carry a session cookie
    #[error("login succeeded but no session cookie was returned")]
    MissingSessionCookie,

    /// The daemon answered with an error object
    #[error("{method} failed: {error}")]
    Remote {
        /// Method that was called.
        method: String,
        /// Error reported by the daemon.
        error: RpcError,
    },

    /// The response body did not match the expected shape
    #[error("{method} returned an undecodable response: {source}")]
    Decode {
        /// Method that was called.
        method: String,
        /// What went wrong while decoding.
        #[source]
        source: DecodeError,
    },

    /// The response decoded, but to a result this method never returns
    #[error("{method} returned an unexpected result: {found}")]
    UnexpectedResult {
        /// Method that was called.
        method: String,
        /// Short description of what came back.
        found: String,
    },

    /// The daemon acknowledged the call with `false`
    #[error("{method} was rejected by the daemon")]
    Rejected {
        /// Method that was called.
        method: String,
    },

    /// The response is not the answer to the request that was sent
    #[error("{method} response id {actual} does not match request id {expected}")]
    IdMismatch {
        /// Method that was called.
        method: String,
        /// Id sent with the request.
        expected: u64,
        /// Id found in the response.
        actual: u64,
    },
}

/// DelugeWebUi defines the operations a Deluge Web UI client offers.
#[allow(async_fn_in_trait)]
pub trait DelugeWebUi {
    /// Add a magnet link. The torrent starts downloading immediately.
    async fn add_magnet(&self, magnet_link: &str) -> Result<(), DelugeError>;
    /// Stop seeding the torrent identified by `torrent_hash` once it reaches `max_ratio`.
    async fn set_max_ratio(&self, torrent_hash: &str, max_ratio: f64) -> Result<(), DelugeError>;
    /// Get the connection state, daemon statistics and every torrent.
    async fn status(&self) -> Result<StatusResult, DelugeError>;
    /// List all torrents.
    async fn list_all_torrents(&self) -> Result<Vec<Torrent>, DelugeError>;
    /// Remove a torrent by hash. If `remove_data` is true, the downloaded data is deleted too.
    async fn remove_torrent(&self, torrent_hash: &str, remove_data: bool)
    -> Result<(), DelugeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_method() {
        let err = DelugeError::Remote {
            method: "core.remove_torrent".to_string(),
            error: RpcError {
                message: "Torrent not found".to_string(),
                code: 3,
            },
        };

        assert_eq!(
            err.to_string(),
            "core.remove_torrent failed: Torrent not found (code 3)"
        );
    }

    #[test]
    fn transport_and_auth_errors_name_the_method() {
        let network = DelugeError::Network {
            method: "web.update_ui".to_string(),
            message: "HTTP status 502".to_string(),
        };
        let unauthorized = DelugeError::Unauthorized {
            method: "auth.login".to_string(),
        };

        assert_eq!(
            network.to_string(),
            "web.update_ui failed: network error: HTTP status 502"
        );
        assert_eq!(
            unauthorized.to_string(),
            "auth.login failed: authentication required"
        );
    }

    #[test]
    fn decode_errors_keep_their_source() {
        let err = DelugeError::Decode {
            method: "web.update_ui".to_string(),
            source: DecodeError::MissingField("torrents"),
        };

        assert_eq!(
            err.to_string(),
            "web.update_ui returned an undecodable response: status result is missing `torrents`"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
