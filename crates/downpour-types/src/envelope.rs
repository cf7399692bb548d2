//! JSON-RPC envelope mapping.
//!
//! Translates an outbound `(method, params, id)` triple into the request envelope the Deluge Web
//! UI expects, and an inbound response body into an [`ApiResponse`]. Nothing here performs I/O:
//! the transport hands in an already decoded [`Value`] and posts whatever [`RpcRequest`] it is
//! given.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{RpcError, Stats, StatusResult, Torrent};

/// Outbound JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Remote method name, e.g. `web.update_ui`.
    pub method: String,
    /// Positional parameters.
    pub params: Vec<Value>,
    /// Correlation id echoed back by the daemon.
    pub id: u64,
}

/// Builds a request envelope.
pub fn build_request(method: impl Into<String>, params: Vec<Value>, id: u64) -> RpcRequest {
    RpcRequest {
        method: method.into(),
        params,
        id,
    }
}

/// Errors raised while mapping a response body onto typed results.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body is not a response envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// A key the status result requires is absent or null.
    #[error("status result is missing `{0}`")]
    MissingField(&'static str),

    /// A key that must hold an object holds something else.
    #[error("expected an object for `{field}`, found {found}")]
    NotAnObject {
        /// Name of the offending key.
        field: &'static str,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A nested object does not match the expected record.
    #[error("invalid `{field}`: {source}")]
    InvalidField {
        /// Key, or torrent hash, whose value failed to decode.
        field: String,
        /// Underlying serde failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Envelope with the result still undecoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResponse {
    /// Echoed correlation id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Raw `result` value, [`Value::Null`] when absent.
    #[serde(default)]
    pub result: Value,
    /// Decoded `error` object, if any.
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Typed result of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResult {
    /// Acknowledgement-only response.
    Ack(bool),
    /// Full status snapshot from `web.update_ui`.
    Status(StatusResult),
}

impl RpcResult {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Ack(value) => *value,
            Self::Status(_) => true,
        }
    }
}

/// Fully decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Echoed correlation id.
    pub id: Option<u64>,
    /// Decoded result, `None` for a null or absent result.
    pub result: Option<RpcResult>,
    /// Error reported by the daemon.
    pub error: Option<RpcError>,
}

impl ApiResponse {
    /// Legacy success flag: a truthy result and no error.
    ///
    /// A `false` or null result reads as failure here even when the daemon reported no error.
    /// Prefer [`ApiResponse::into_outcome`] to decide whether a call failed.
    pub fn success(&self) -> bool {
        self.error.is_none() && self.result.as_ref().is_some_and(RpcResult::is_truthy)
    }

    /// Splits the response on the presence of the error field alone.
    pub fn into_outcome(self) -> Result<Option<RpcResult>, RpcError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}

/// Decodes the envelope fields without interpreting `result`.
pub fn parse_envelope(raw: &Value) -> Result<RawResponse, DecodeError> {
    RawResponse::deserialize(raw).map_err(DecodeError::Envelope)
}

/// Interprets a raw `result` value.
///
/// Null maps to `None` and booleans to [`RpcResult::Ack`]; anything else must be a status result.
pub fn parse_result(result: Value) -> Result<Option<RpcResult>, DecodeError> {
    match result {
        Value::Null => Ok(None),
        Value::Bool(value) => Ok(Some(RpcResult::Ack(value))),
        other => parse_status(other).map(|status| Some(RpcResult::Status(status))),
    }
}

/// Decodes a complete response body.
pub fn parse_response(raw: &Value) -> Result<ApiResponse, DecodeError> {
    let envelope = parse_envelope(raw)?;
    Ok(ApiResponse {
        id: envelope.id,
        result: parse_result(envelope.result)?,
        error: envelope.error,
    })
}

fn parse_status(value: Value) -> Result<StatusResult, DecodeError> {
    let mut status = into_object("result", value)?;

    let connected = match status.remove("connected") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(connected)) => connected,
        Some(other) => {
            return Err(DecodeError::InvalidField {
                field: "connected".to_string(),
                source: serde::de::Error::custom(format!(
                    "expected a boolean, found {}",
                    json_type(&other)
                )),
            });
        }
    };

    let stats = required("stats", status.remove("stats"))?;
    let stats = Stats::deserialize(Value::Object(into_object("stats", stats)?)).map_err(
        |source| DecodeError::InvalidField {
            field: "stats".to_string(),
            source,
        },
    )?;

    let torrents = required("torrents", status.remove("torrents"))?;
    let torrents = into_object("torrents", torrents)?
        .into_iter()
        .map(|(hash, details)| {
            let mut torrent =
                Torrent::deserialize(details).map_err(|source| DecodeError::InvalidField {
                    field: format!("torrents.{hash}"),
                    source,
                })?;
            torrent.hash = hash;
            Ok(torrent)
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(StatusResult {
        connected,
        stats,
        torrents,
    })
}

fn required(field: &'static str, value: Option<Value>) -> Result<Value, DecodeError> {
    match value {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn into_object(
    field: &'static str,
    value: Value,
) -> Result<serde_json::Map<String, Value>, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject {
            field,
            found: json_type(&other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
