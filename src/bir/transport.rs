//! HTTP transport for the BIR SOAP endpoint.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::bir::envelope;
use crate::error::BirError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const ACCEPT_TYPES: &str =
    "text/xml,application/xml,application/soap+xml;q=0.9,*/*;q=0.8";
const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One SOAP call against the BIR endpoint.
///
/// The trait is the seam for substituting a scripted endpoint in tests;
/// production uses [`HttpTransport`].
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// POST one request envelope under the given WS-Addressing action
    /// and return the bare response envelope.
    async fn call(&self, action: &str, request: &str) -> Result<String, BirError>;

    /// Install the session token attached to every call after login.
    fn set_sid(&self, sid: &str);
}

/// reqwest-backed transport with the fixed browser-like headers the
/// service expects.
pub struct HttpTransport {
    http: Client,
    endpoint: String,
    sid: Mutex<Option<String>>,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, BirError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_TYPES));

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            sid: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn call(&self, action: &str, request: &str) -> Result<String, BirError> {
        let sid = self.sid.lock().unwrap().clone();

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", SOAP_CONTENT_TYPE)
            .body(request.to_string());
        if let Some(sid) = sid {
            builder = builder.header("sid", sid);
        }

        tracing::debug!(action, "calling BIR endpoint");
        let response = builder.send().await?.error_for_status()?;
        let body = response.text().await?;

        // Responses arrive with multipart/related MIME framing.
        Ok(envelope::strip_mime(&body)?.to_string())
    }

    fn set_sid(&self, sid: &str) {
        *self.sid.lock().unwrap() = Some(sid.to_string());
    }
}
