//! GUS REGON (BIR1.1) lookup client.
//!
//! Queries the Polish national business registry by NIP over the
//! registry's SOAP endpoint and maps the result document into typed
//! entity records. One query is one session: login, a single search
//! call, and a best-effort logout.
//!
//! Two output surfaces over the same record:
//! - a labeled text block for interactive use
//! - a single-line flat JSON object for a caller embedding the binary
//!   as a subprocess

pub mod bir;
pub mod config;
pub mod error;
pub mod output;

pub use bir::client::{normalize_nip, BirClient};
pub use bir::transport::{HttpTransport, SoapTransport};
pub use bir::types::Entity;
pub use config::BirConfig;
pub use error::BirError;
pub use output::{error_json, BestMatch, NO_DATA_MESSAGE};
