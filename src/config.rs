//! Endpoint and credential configuration.

/// Production endpoint of the BIR1.1 REGON search service.
const BIR_ENDPOINT: &str =
    "https://wyszukiwarkaregon.stat.gov.pl/wsBIR/UslugaBIRzewnPubl.svc";

/// Access key issued by GUS for the production service.
const BIR_API_KEY: &str = "d9d3ee105bf04a23a2e2";

/// Connection settings for the BIR service, injected into the client so
/// tests can substitute a mock endpoint.
#[derive(Debug, Clone)]
pub struct BirConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl Default for BirConfig {
    fn default() -> Self {
        Self {
            endpoint: BIR_ENDPOINT.to_string(),
            api_key: BIR_API_KEY.to_string(),
        }
    }
}

impl BirConfig {
    /// Production configuration, with `GUS_ENDPOINT` and `GUS_API_KEY`
    /// environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var("GUS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(api_key) = std::env::var("GUS_API_KEY") {
            config.api_key = api_key;
        }
        config
    }
}
