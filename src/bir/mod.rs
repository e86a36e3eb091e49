//! BIR (REGON internet database) integration
//!
//! This module provides:
//! - SOAP transport and envelope codec for the BIR1.1 service
//! - Session-scoped client (Zaloguj -> DaneSzukajPodmioty -> Wyloguj)
//! - Result document parser producing typed entity records

pub mod client;
pub mod envelope;
pub mod parse;
pub mod transport;
pub mod types;

pub use client::BirClient;
pub use transport::{HttpTransport, SoapTransport};
pub use types::Entity;
