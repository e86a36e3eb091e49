//! Session-scoped BIR client.
//!
//! One query is one session: Zaloguj issues a short-lived SID, the
//! search runs under it, and Wyloguj tears it down best-effort. The SID
//! is never reused across queries.

use tracing::{debug, warn};

use crate::bir::envelope;
use crate::bir::parse;
use crate::bir::transport::{HttpTransport, SoapTransport};
use crate::bir::types::Entity;
use crate::config::BirConfig;
use crate::error::BirError;

/// Fixed length of a normalized NIP.
const NIP_DIGITS: usize = 10;

pub struct BirClient {
    transport: Box<dyn SoapTransport>,
    config: BirConfig,
}

impl BirClient {
    /// Client against the configured BIR endpoint.
    pub fn new(config: BirConfig) -> Result<Self, BirError> {
        let transport = Box::new(HttpTransport::new(&config.endpoint)?);
        Ok(Self { transport, config })
    }

    /// Client with a substitute transport, for tests.
    pub fn with_transport(config: BirConfig, transport: Box<dyn SoapTransport>) -> Self {
        Self { transport, config }
    }

    /// Establish a session and return its SID. An empty or missing
    /// ZalogujResult means the access key was rejected; this is fatal
    /// for the whole query, no retry.
    pub async fn login(&self) -> Result<String, BirError> {
        let request = envelope::zaloguj(&self.config.endpoint, &self.config.api_key);
        let response = self.transport.call(envelope::ACTION_ZALOGUJ, &request).await?;

        let sid = envelope::extract_result(&response, "ZalogujResult")?
            .ok_or_else(|| BirError::Authentication("Zaloguj returned no SID".to_string()))?;

        self.transport.set_sid(&sid);
        debug!("BIR session established");
        Ok(sid)
    }

    /// Tear the session down. Callers treat failures as non-fatal.
    pub async fn logout(&self, sid: &str) -> Result<(), BirError> {
        let request = envelope::wyloguj(&self.config.endpoint, sid);
        self.transport.call(envelope::ACTION_WYLOGUJ, &request).await?;
        Ok(())
    }

    /// Search the registry by NIP.
    ///
    /// Normalizes the input (rejecting anything that is not 10 digits
    /// before any network traffic), logs in, runs one
    /// DaneSzukajPodmioty call, and logs out whatever the outcome. A
    /// logout failure is logged and swallowed; it never replaces the
    /// search result or error. An empty search result is `Ok(vec![])`,
    /// not an error.
    pub async fn search_by_nip(&self, raw: &str) -> Result<Vec<Entity>, BirError> {
        let nip = normalize_nip(raw)?;

        let sid = self.login().await?;
        let result = self.search(&nip).await;

        if let Err(err) = self.logout(&sid).await {
            warn!("BIR logout failed: {err}");
        }

        result
    }

    async fn search(&self, nip: &str) -> Result<Vec<Entity>, BirError> {
        let request = envelope::dane_szukaj_podmioty(&self.config.endpoint, nip);
        let response = self
            .transport
            .call(envelope::ACTION_DANE_SZUKAJ_PODMIOTY, &request)
            .await?;

        match envelope::extract_result(&response, "DaneSzukajPodmiotyResult")? {
            Some(xml) => parse::parse_entities(&xml),
            None => Ok(Vec::new()),
        }
    }
}

/// Strip separator characters from a raw NIP. Anything that does not
/// leave exactly 10 digits is rejected.
pub fn normalize_nip(raw: &str) -> Result<String, BirError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != NIP_DIGITS {
        return Err(BirError::InvalidNip(raw.to_string()));
    }
    Ok(digits)
}
