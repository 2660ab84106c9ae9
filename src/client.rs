use crate::error::{EsError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Create the HTTP client backing a transport.
///
/// One idle connection per host is kept so consecutive requests reuse it.
pub fn create_http_client(config: &Config) -> Result<Client> {
    let mut builder = ClientBuilder::new().pool_max_idle_per_host(1);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    Ok(builder.build()?)
}

/// Target cluster and connection settings, fixed once a client is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// Elasticsearch host name or address
    pub host: String,
    /// Elasticsearch port
    pub port: u16,
    /// Whole-request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
    /// Connect timeout; `None` keeps the HTTP client's default
    pub connect_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 9200,
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme, host and port
    pub fn new(scheme: String, host: String, port: u16) -> Self {
        Config {
            scheme,
            host,
            port,
            ..Config::default()
        }
    }

    /// Parse `scheme://host[:port]`, e.g. an Elastic Cloud endpoint.
    ///
    /// A missing port falls back to the scheme's well-known port.
    pub fn from_url(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint)?;
        let host = url
            .host_str()
            .ok_or_else(|| EsError::UrlParse(url::ParseError::EmptyHost))?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| EsError::UrlParse(url::ParseError::InvalidPort))?;
        Ok(Config::new(url.scheme().to_string(), host, port))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Get the base URL requests are resolved against
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}
