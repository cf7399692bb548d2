//! Internal trait abstracting the Deluge Web UI transport.
//!
//! This module provides the [`DelugeOps`] trait which abstracts the HTTP round trip,
//! enabling mocking in tests.

use downpour_types::RpcRequest;
use serde_json::Value;
use thiserror::Error;

use crate::session::SessionCookie;

/// Failures below the JSON-RPC layer.
#[derive(Error, Debug)]
pub(crate) enum TransportError {
    /// The request could not be built or sent, or timed out.
    #[error("{0}")]
    Request(String),

    /// The web server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body is not JSON.
    #[error("invalid response body: {0}")]
    Body(String),
}

/// A decoded response body together with the session cookie it set, if any.
#[derive(Debug, Clone)]
pub(crate) struct RpcReply {
    pub(crate) body: Value,
    pub(crate) session_cookie: Option<SessionCookie>,
}

/// Internal trait that abstracts posting one request envelope.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait DelugeOps {
    async fn post(
        &self,
        request: RpcRequest,
        cookie: Option<SessionCookie>,
    ) -> Result<RpcReply, TransportError>;
}
