//! Deluge Web UI client implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use downpour_types::{
    DecodeError, DelugeError, DelugeWebUi, RpcError, RpcRequest, RpcResult, StatusResult,
    Torrent,
    methods::{self, AUTH_LOGIN, AddTorrentOptions, TORRENT_FIELDS, TorrentOptions},
    parse_envelope, parse_response,
};

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::conversions::{acknowledged, add_torrents_outcome, into_status};
use crate::ops::{DelugeOps, TransportError};
use crate::session::SessionCookie;
use crate::transport::HttpTransport;


/// Error code the Deluge Web UI uses for calls made without a valid session.
const NOT_AUTHENTICATED: i64 = 1;

/// Id of the first request a client sends.
const FIRST_REQUEST_ID: u64 = 1;

/// DelugeWebClient is a Deluge client that uses the Web UI JSON-RPC interface.
///
/// The session cookie obtained at login is held for the lifetime of the client and sent with
/// every call. Each request carries its own id.
#[allow(missing_debug_implementations, private_bounds)]
pub struct DelugeWebClient<T: DelugeOps = HttpTransport> {
    transport: T,
    session: SessionCookie,
    next_id: AtomicU64,
}

impl DelugeWebClient {
    /// Create a new DelugeWebClient and log in.
    ///
    /// This method is async as the login happens on creation.
    pub async fn connect(config: &ClientConfig) -> Result<Self, DelugeError> {
        let url = Url::parse(&config.endpoint)
            .map_err(|e| DelugeError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        debug!("Connecting to Deluge Web UI at {}", url);
        let transport = HttpTransport::try_new(url, config.timeout)
            .map_err(|err| map_transport_error(AUTH_LOGIN, err))?;
        let client = Self::login(transport, &config.password).await?;

        debug!("Logged in to Deluge Web UI");
        Ok(client)
    }

    /// Create a new DelugeWebClient for `endpoint` with the default timeout and log in.
    pub async fn try_new(endpoint: &str, password: &str) -> Result<Self, DelugeError> {
        let config = ClientConfig {
            endpoint: endpoint.to_string(),
            password: password.to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        Self::connect(&config).await
    }
}

#[allow(private_bounds)]
impl<T: DelugeOps> DelugeWebClient<T> {
    /// Logs in over `transport` and keeps the session it hands out.
    pub(crate) async fn login(transport: T, password: &str) -> Result<Self, DelugeError> {
        let next_id = AtomicU64::new(FIRST_REQUEST_ID);
        let id = next_id.fetch_add(1, Ordering::Relaxed);

        debug!("Logging in (id {id})");
        let reply = transport
            .post(methods::login(password, id), None)
            .await
            .map_err(|err| map_transport_error(AUTH_LOGIN, err))?;

        match decode_reply(AUTH_LOGIN, id, &reply.body)? {
            Some(RpcResult::Ack(true)) => {}
            Some(RpcResult::Ack(false)) => {
                return Err(DelugeError::Unauthorized {
                    method: AUTH_LOGIN.to_string(),
                });
            }
            other => {
                return Err(DelugeError::UnexpectedResult {
                    method: AUTH_LOGIN.to_string(),
                    found: format!("{other:?}"),
                });
            }
        }

        let session = reply
            .session_cookie
            .ok_or(DelugeError::MissingSessionCookie)?;

        Ok(Self {
            transport,
            session,
            next_id,
        })
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Posts `request` with the session cookie and returns the decoded body.
    async fn send(&self, request: RpcRequest) -> Result<Value, DelugeError> {
        debug!("Calling {} (id {})", request.method, request.id);
        let method = request.method.clone();
        let reply = self
            .transport
            .post(request, Some(self.session.clone()))
            .await
            .map_err(|err| map_transport_error(&method, err))?;
        Ok(reply.body)
    }

    /// Sends `request` and decodes its result into a typed [`RpcResult`].
    async fn call(&self, request: RpcRequest) -> Result<Option<RpcResult>, DelugeError> {
        let method = request.method.clone();
        let id = request.id;
        let body = self.send(request).await?;
        decode_reply(&method, id, &body)
    }

    /// Sends `request` and returns its result without interpreting it.
    async fn call_raw(&self, request: RpcRequest) -> Result<Value, DelugeError> {
        let method = request.method.clone();
        let id = request.id;
        let body = self.send(request).await?;

        let envelope = parse_envelope(&body).map_err(|source| decode_error(&method, source))?;
        check_id(&method, id, envelope.id)?;
        match envelope.error {
            Some(error) => Err(remote_error(&method, error)),
            None => Ok(envelope.result),
        }
    }
}

#[allow(private_bounds)]
impl<T: DelugeOps> DelugeWebUi for DelugeWebClient<T> {
    async fn add_magnet(&self, magnet_link: &str) -> Result<(), DelugeError> {
        debug!("Adding magnet: {}", magnet_link);
        let request =
            methods::add_magnet(magnet_link, &AddTorrentOptions::default(), self.next_id());
        let method = request.method.clone();
        let result = self.call_raw(request).await?;

        debug!("Add result: {result}");
        add_torrents_outcome(&method, result)
    }

    async fn set_max_ratio(&self, torrent_hash: &str, max_ratio: f64) -> Result<(), DelugeError> {
        debug!("Setting max ratio of {torrent_hash} to {max_ratio}");
        let request = methods::set_torrent_options(
            torrent_hash,
            &TorrentOptions::stop_at(max_ratio),
            self.next_id(),
        );
        let method = request.method.clone();
        let result = self.call(request).await?;

        acknowledged(&method, result)?;
        debug!("Max ratio set");
        Ok(())
    }

    async fn status(&self) -> Result<StatusResult, DelugeError> {
        debug!("Getting Web UI status");
        let request = methods::update_ui(&TORRENT_FIELDS, self.next_id());
        let method = request.method.clone();
        let status = into_status(&method, self.call(request).await?)?;

        if !status.connected {
            warn!("Deluge Web UI is not connected to a daemon");
        }
        debug!(
            "Status: connected={}, {} torrents, stats={:?}",
            status.connected,
            status.torrents.len(),
            status.stats
        );
        Ok(status)
    }

    async fn list_all_torrents(&self) -> Result<Vec<Torrent>, DelugeError> {
        debug!("Listing all torrents");
        let torrents = self.status().await?.torrents;
        debug!("Torrents: {torrents:?}");

        Ok(torrents)
    }

    async fn remove_torrent(
        &self,
        torrent_hash: &str,
        remove_data: bool,
    ) -> Result<(), DelugeError> {
        debug!("Removing torrent {torrent_hash}, remove_data={remove_data}");
        let request = methods::remove_torrent(torrent_hash, remove_data, self.next_id());
        let method = request.method.clone();
        let result = self.call(request).await?;

        acknowledged(&method, result)?;
        debug!("Remove command sent");
        Ok(())
    }
}

/// Decodes a response body, checks its id and splits it on the error field.
fn decode_reply(
    method: &str,
    expected_id: u64,
    body: &Value,
) -> Result<Option<RpcResult>, DelugeError> {
    let response = parse_response(body).map_err(|source| decode_error(method, source))?;
    check_id(method, expected_id, response.id)?;
    response
        .into_outcome()
        .map_err(|error| remote_error(method, error))
}

fn check_id(method: &str, expected: u64, actual: Option<u64>) -> Result<(), DelugeError> {
    match actual {
        Some(actual) if actual != expected => Err(DelugeError::IdMismatch {
            method: method.to_string(),
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

fn decode_error(method: &str, source: DecodeError) -> DelugeError {
    DelugeError::Decode {
        method: method.to_string(),
        source,
    }
}

/// Maps an error object from the daemon to a Deluge error.
fn remote_error(method: &str, error: RpcError) -> DelugeError {
    if error.code == NOT_AUTHENTICATED {
        return DelugeError::Unauthorized {
            method: method.to_string(),
        };
    }
    DelugeError::Remote {
        method: method.to_string(),
        error,
    }
}

/// Maps transport errors to Deluge errors.
fn map_transport_error(method: &str, err: TransportError) -> DelugeError {
    match err {
        TransportError::Status(401 | 403) => DelugeError::Unauthorized {
            method: method.to_string(),
        },
        TransportError::Status(_) | TransportError::Request(_) | TransportError::Body(_) => {
            DelugeError::Network {
                method: method.to_string(),
                message: err.to_string(),
            }
        }
    }
}
