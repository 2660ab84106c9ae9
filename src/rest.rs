use crate::auth::Credentials;
use crate::client::Config;
use crate::error::Result;
use crate::response::Response;
use crate::transport::{Method, ReqwestTransport, Transport};
use crate::{CLIENT_META_HEADER, VERSION};
use tracing::{debug, trace};

/// Content type sent with request bodies unless the caller picks another
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Elasticsearch REST client.
///
/// Owns its transport exclusively. Every operation takes `&mut self` and runs
/// one blocking request to completion, so a client never has two requests in
/// flight.
#[derive(Debug)]
pub struct EsClient<T: Transport = ReqwestTransport> {
    transport: T,
    credentials: Credentials,
}

impl EsClient<ReqwestTransport> {
    /// Create a client for the cluster in `config` over HTTP.
    ///
    /// No connection is made until the first request.
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(EsClient::new(ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> EsClient<T> {
    /// Create a client on top of an already configured transport
    pub fn new(transport: T) -> Self {
        EsClient {
            transport,
            credentials: Credentials::default(),
        }
    }

    /// Set the Elastic Cloud API key
    pub fn set_elastic_cloud_api_key(&mut self, api_key: impl Into<String>) {
        self.credentials.set_api_key(api_key);
    }

    /// Set the basic authentication username and password
    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.set_basic(username, password);
    }

    /// Set the OAuth2 bearer token
    pub fn set_oauth2_token(&mut self, token: impl Into<String>) {
        self.credentials.set_oauth2_token(token);
    }

    pub fn with_elastic_cloud_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_elastic_cloud_api_key(api_key);
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.set_basic_auth(username, password);
        self
    }

    pub fn with_oauth2_token(mut self, token: impl Into<String>) -> Self {
        self.set_oauth2_token(token);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send a request and return the raw response.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Request path, e.g. `/books/_doc/42`
    /// * `body` - Request body; empty sends a header-only request
    /// * `query` - Query string appended verbatim after `?`; empty for none.
    ///   [`ReqwestTransport`] percent-encodes characters not allowed in a
    ///   request target (such as spaces and `#`) when it puts the path on the wire
    /// * `content_type` - Content type of `body`
    ///
    /// # Returns
    /// The status code and body as received, including error statuses
    pub fn send_request(
        &mut self,
        method: Method,
        path: &str,
        body: &str,
        query: &str,
        content_type: &str,
    ) -> Result<Response> {
        let mut url = path.to_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }

        debug!(%method, %url, content_type, "sending request");

        self.transport.connection_keep_alive();
        self.transport.begin_request(method, &url)?;

        if let Some(authorization) = self.credentials.authorization() {
            trace!(scheme = authorization.scheme(), "attaching authorization");
            self.transport
                .send_header("Authorization", &authorization.header_value())?;
        }

        self.transport
            .send_header(CLIENT_META_HEADER, &format!("arduino={}", VERSION))?;

        if !body.is_empty() {
            trace!(%body, "request body");
            self.transport.send_header("Content-Type", content_type)?;
            self.transport
                .send_header("Content-Length", &body.len().to_string())?;
            self.transport.begin_body()?;
            self.transport.write_body(body.as_bytes())?;
        }

        self.transport.end_request()?;

        let response = Response {
            status_code: self.transport.response_status_code()?,
            body: self.transport.response_body()?,
        };

        debug!(status = response.status_code, "response received");
        trace!(body = %response.body, "response body");

        Ok(response)
    }

    /// Elasticsearch Index API
    ///
    /// See <https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-index_.html>
    pub fn index(&mut self, index: &str, body: &str, query: &str) -> Result<Response> {
        let path = format!("/{}/_doc", index);
        self.send_request(Method::Post, &path, body, query, DEFAULT_CONTENT_TYPE)
    }

    /// Elasticsearch Get API
    ///
    /// See <https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-get.html>
    pub fn get(&mut self, index: &str, id: &str, query: &str) -> Result<Response> {
        let path = format!("/{}/_doc/{}", index, id);
        self.send_request(Method::Get, &path, "", query, DEFAULT_CONTENT_TYPE)
    }

    /// Elasticsearch Delete API
    ///
    /// See <https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-delete.html>
    pub fn del(&mut self, index: &str, id: &str, query: &str) -> Result<Response> {
        let path = format!("/{}/_doc/{}", index, id);
        self.send_request(Method::Delete, &path, "", query, DEFAULT_CONTENT_TYPE)
    }

    /// Elasticsearch Update API
    ///
    /// See <https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-update.html>
    pub fn update(&mut self, index: &str, id: &str, body: &str, query: &str) -> Result<Response> {
        let path = format!("/{}/_update/{}", index, id);
        self.send_request(Method::Post, &path, body, query, DEFAULT_CONTENT_TYPE)
    }

    /// Elasticsearch Search API
    ///
    /// See <https://www.elastic.co/guide/en/elasticsearch/reference/current/search-search.html>
    pub fn search(&mut self, index: &str, body: &str, query: &str) -> Result<Response> {
        let path = format!("/{}/_search", index);
        self.send_request(Method::Post, &path, body, query, DEFAULT_CONTENT_TYPE)
    }
}
