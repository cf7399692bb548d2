//! HTTP transport posting envelopes to the Deluge Web UI with reqwest.

use std::time::Duration;

use downpour_types::RpcRequest;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE, COOKIE},
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::ops::{DelugeOps, RpcReply, TransportError};
use crate::session::SessionCookie;

const USER_AGENT: &str = concat!("downpour/", env!("CARGO_PKG_VERSION"));

/// Default transport of [`DelugeWebClient`](crate::DelugeWebClient): posts JSON-RPC envelopes
/// to a single endpoint with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub(crate) fn try_new(endpoint: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl DelugeOps for HttpTransport {
    async fn post(
        &self,
        request: RpcRequest,
        cookie: Option<SessionCookie>,
    ) -> Result<RpcReply, TransportError> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie.header_value());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        debug!("{} (id {}) answered with HTTP {}", request.method, request.id, status);
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let session_cookie = SessionCookie::from_headers(response.headers());
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(RpcReply {
            body,
            session_cookie,
        })
    }
}
