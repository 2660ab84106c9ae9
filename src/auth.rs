use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

/// Credentials held by a client for its lifetime.
///
/// Any combination of kinds may be stored at once. Only one is ever sent,
/// picked by [`Credentials::authorization`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Elastic Cloud API key (already base64-encoded `id:api_key`)
    pub api_key: String,
    /// Basic authentication username
    pub basic_username: String,
    /// Basic authentication password
    pub basic_password: String,
    /// OAuth2 bearer token
    pub oauth2_token: String,
}

/// Authorization header resolved from [`Credentials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization<'a> {
    ApiKey(&'a str),
    Basic { username: &'a str, password: &'a str },
    Bearer(&'a str),
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn set_basic(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.basic_username = username.into();
        self.basic_password = password.into();
    }

    pub fn set_oauth2_token(&mut self, token: impl Into<String>) {
        self.oauth2_token = token.into();
    }

    /// Pick the credential to send: API key, then Basic, then Bearer.
    ///
    /// Basic needs both a username and a password. Returns `None` when no
    /// kind is usable, in which case no `Authorization` header is sent.
    pub fn authorization(&self) -> Option<Authorization<'_>> {
        non_empty(&self.api_key)
            .map(Authorization::ApiKey)
            .or_else(|| self.basic())
            .or_else(|| non_empty(&self.oauth2_token).map(Authorization::Bearer))
    }

    fn basic(&self) -> Option<Authorization<'_>> {
        let username = non_empty(&self.basic_username)?;
        let password = non_empty(&self.basic_password)?;
        Some(Authorization::Basic { username, password })
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("basic_username", &self.basic_username)
            .field("basic_password", &redact(&self.basic_password))
            .field("oauth2_token", &redact(&self.oauth2_token))
            .finish()
    }
}

impl Authorization<'_> {
    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            Authorization::ApiKey(key) => format!("ApiKey {}", key),
            Authorization::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
            }
            Authorization::Bearer(token) => format!("Bearer {}", token),
        }
    }

    /// Short name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            Authorization::ApiKey(_) => "ApiKey",
            Authorization::Basic { .. } => "Basic",
            Authorization::Bearer(_) => "Bearer",
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
