//! Session cookie issued by `auth.login`.

use std::fmt;

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Name of the cookie the Deluge Web UI uses to track a logged in session.
pub(crate) const SESSION_COOKIE_NAME: &str = "_session_id";

/// Value of the `_session_id` cookie.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SessionCookie(String);

impl SessionCookie {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Finds the session cookie among the `Set-Cookie` headers of a response.
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(parse_set_cookie)
    }

    /// Value for the `Cookie` request header.
    pub(crate) fn header_value(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.0)
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        f.write_str("SessionCookie(<redacted>)")
    }
}

fn parse_set_cookie(header: &str) -> Option<SessionCookie> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let value = value.trim();
    (name.trim() == SESSION_COOKIE_NAME && !value.is_empty()).then(|| SessionCookie::new(value))
}
