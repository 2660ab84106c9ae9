use crate::client::{create_http_client, Config};
use crate::error::{EsError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// HTTP verbs the client can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = EsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "delete" => Ok(Method::Delete),
            _ => Err(EsError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Step-by-step HTTP exchange the client drives for every request.
///
/// A request is `begin_request`, any number of `send_header`, optionally
/// `begin_body` + `write_body`, then `end_request`, which blocks until the
/// server answers. The status and body are read back afterwards.
pub trait Transport {
    /// Ask for the connection to stay open between requests
    fn connection_keep_alive(&mut self);

    fn begin_request(&mut self, method: Method, path: &str) -> Result<()>;

    fn send_header(&mut self, name: &str, value: &str) -> Result<()>;

    fn begin_body(&mut self) -> Result<()>;

    fn write_body(&mut self, body: &[u8]) -> Result<()>;

    fn end_request(&mut self) -> Result<()>;

    fn response_status_code(&mut self) -> Result<u16>;

    fn response_body(&mut self) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn connection_keep_alive(&mut self) {
        (**self).connection_keep_alive()
    }

    fn begin_request(&mut self, method: Method, path: &str) -> Result<()> {
        (**self).begin_request(method, path)
    }

    fn send_header(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).send_header(name, value)
    }

    fn begin_body(&mut self) -> Result<()> {
        (**self).begin_body()
    }

    fn write_body(&mut self, body: &[u8]) -> Result<()> {
        (**self).write_body(body)
    }

    fn end_request(&mut self) -> Result<()> {
        (**self).end_request()
    }

    fn response_status_code(&mut self) -> Result<u16> {
        (**self).response_status_code()
    }

    fn response_body(&mut self) -> Result<String> {
        (**self).response_body()
    }
}

/// Request being assembled between `begin_request` and `end_request`
#[derive(Debug)]
struct PendingRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

/// Transport backed by a blocking reqwest client bound to one host and port
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    keep_alive: bool,
    pending: Option<PendingRequest>,
    status: Option<u16>,
    body: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport for the host and port in `config`.
    ///
    /// Nothing is sent until the first request ends.
    pub fn new(config: &Config) -> Result<Self> {
        let client = create_http_client(config)?;
        Self::with_client(client, config)
    }

    /// Build a transport around an existing reqwest client
    pub fn with_client(client: Client, config: &Config) -> Result<Self> {
        Ok(ReqwestTransport {
            client,
            base_url: Url::parse(&config.base_url())?,
            keep_alive: false,
            pending: None,
            status: None,
            body: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request target against the base URL without reinterpreting it.
    ///
    /// The target is appended to the authority as text, so a leading `//` stays
    /// part of the path. `#` and a path `\` are escaped so the server receives
    /// them instead of a fragment or a separator. Dot segments are rejected since
    /// the URL parser would collapse them into another path. Characters not
    /// allowed in a request target, such as spaces, are percent-encoded.
    pub fn request_url(&self, target: &str) -> Result<Url> {
        let invalid = |reason: String| EsError::InvalidPath {
            path: target.to_string(),
            reason,
        };

        if !target.starts_with('/') {
            return Err(invalid("must start with '/'".to_string()));
        }

        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        if path.split('/').any(is_dot_segment) {
            return Err(invalid("contains a dot segment".to_string()));
        }

        let mut escaped = path.replace('#', "%23").replace('\\', "%5C");
        if let Some(query) = query {
            escaped.push('?');
            escaped.push_str(&query.replace('#', "%23"));
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, escaped)).map_err(|e| invalid(e.to_string()))
    }

    fn pending_mut(&mut self) -> Result<&mut PendingRequest> {
        self.pending
            .as_mut()
            .ok_or_else(|| EsError::transport("no request in progress"))
    }
}

impl Transport for ReqwestTransport {
    fn connection_keep_alive(&mut self) {
        self.keep_alive = true;
    }

    fn begin_request(&mut self, method: Method, path: &str) -> Result<()> {
        self.status = None;
        self.body = None;
        self.pending = None;
        let url = self.request_url(path)?;
        self.pending = Some(PendingRequest {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        });
        Ok(())
    }

    fn send_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| EsError::InvalidHeader {
            name: name.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| EsError::InvalidHeader {
            name: name.to_string(),
        })?;
        self.pending_mut()?.headers.insert(header_name, header_value);
        Ok(())
    }

    fn begin_body(&mut self) -> Result<()> {
        self.pending_mut()?.body.get_or_insert_with(Vec::new);
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> Result<()> {
        let pending = self.pending_mut()?;
        let buffer = pending
            .body
            .as_mut()
            .ok_or_else(|| EsError::transport("body written before begin_body"))?;
        buffer.extend_from_slice(body);
        Ok(())
    }

    fn end_request(&mut self) -> Result<()> {
        let mut pending = self
            .pending
            .take()
            .ok_or_else(|| EsError::transport("no request in progress"))?;

        if !self.keep_alive {
            pending.headers.insert(CONNECTION, HeaderValue::from_static("close"));
        }

        let mut request = self
            .client
            .request(pending.method.into(), pending.url)
            .headers(pending.headers);
        if let Some(body) = pending.body {
            request = request.body(body);
        }

        let http_response = request.send()?;
        self.status = Some(http_response.status().as_u16());
        self.body = Some(http_response.text()?);
        Ok(())
    }

    fn response_status_code(&mut self) -> Result<u16> {
        self.status
            .ok_or_else(|| EsError::transport("no response received"))
    }

    fn response_body(&mut self) -> Result<String> {
        self.body
            .take()
            .ok_or_else(|| EsError::transport("no response body available"))
    }
}

// Also covers the percent-encoded forms the URL parser treats as dots.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}
