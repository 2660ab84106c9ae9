//! # es-client - Minimal Elasticsearch REST client
//!
//! A small blocking client for sending document requests to an Elasticsearch
//! cluster. Every operation is a single HTTP request built from a fixed path
//! template and an optional JSON body.
//!
//! ## Features
//!
//! - Index, get, delete, update and search convenience operations
//! - Generic `send_request` for any other endpoint
//! - Elastic Cloud API key, HTTP Basic and OAuth2 bearer authentication
//! - Pluggable [`Transport`], with a reqwest-backed implementation by default
//! - Responses returned as-is: status code plus raw body
//!
//! ## Basic Usage
//!
//! ```no_run
//! use es_client::{Config, EsClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = EsClient::connect(&Config::default())?;
//!
//!     let response = client.index("books", r#"{"title":"Dune"}"#, "refresh=true")?;
//!     println!("{} {}", response.status_code, response.body);
//!
//!     let response = client.search("books", r#"{"query":{"match_all":{}}}"#, "")?;
//!     if response.is_success() {
//!         println!("first hit: {:?}", response.get_string("hits/hits/0/_id"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! At most one `Authorization` header is sent. When several credential kinds
//! are set, the API key wins over Basic auth, which wins over a bearer token.
//!
//! ```no_run
//! use es_client::{Config, EsClient};
//!
//! let config = Config::from_url("https://my-deployment.es.io:9243")?;
//! let mut client = EsClient::connect(&config)?.with_elastic_cloud_api_key("base64-api-key");
//! client.set_basic_auth("elastic", "changeme"); // stored, but shadowed by the API key
//! # Ok::<(), es_client::EsError>(())
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod response;
pub mod rest;
pub mod transport;

// Re-export main types for convenience
pub use auth::{Authorization, Credentials};
pub use client::Config;
pub use error::{EsError, Result};
pub use response::{get_path, Response};
pub use rest::{EsClient, DEFAULT_CONTENT_TYPE};
pub use transport::{Method, ReqwestTransport, Transport};

/// Client version reported to the cluster
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header identifying this client on every request
pub const CLIENT_META_HEADER: &str = "x-elastic-client-meta";
