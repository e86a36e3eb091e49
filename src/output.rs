//! Rendering of entity records.
//!
//! Two surfaces over the same record: a labeled multi-line text block
//! for interactive use, and a flat JSON object consumed by the caller
//! that embeds this binary as a subprocess.

use serde::Serialize;
use serde_json::{json, Value};

use crate::bir::types::Entity;

/// Message emitted when a query matches nothing.
pub const NO_DATA_MESSAGE: &str = "Brak danych dla podanego NIP.";

/// Names longer than this are truncated in `short_name`.
const SHORT_NAME_MAX: usize = 30;
const SHORT_NAME_KEEP: usize = 27;

impl Entity {
    /// Fixed-order labeled block, one line per field. The closure-date
    /// line appears only when the registry reported one; an absent unit
    /// number shows as `-`.
    pub fn pretty(&self) -> String {
        let mut lines = vec![
            format!("Nazwa: {}", self.name),
            format!("NIP: {}", self.nip),
            format!("REGON: {}", self.regon),
            format!("Województwo: {}", self.province),
            format!("Powiat: {}", self.county),
            format!("Gmina: {}", self.municipality),
            format!("Miejscowość: {}", self.city),
            format!("Kod pocztowy: {}", self.postal_code),
            format!("Ulica: {}", self.street),
            format!("Numer nieruchomości: {}", self.building_no),
            format!("Numer lokalu: {}", self.unit_no.as_deref().unwrap_or("-")),
            format!("Miejscowość poczty: {}", self.post_city),
            format!("Typ: {}", self.kind),
            format!("SilosID: {}", self.silos_id),
        ];
        if let Some(date) = &self.closure_date {
            lines.push(format!("Zakończenie działalności: {date}"));
        }
        lines.join("\n")
    }
}

/// Flat best-match object for the subprocess caller.
///
/// `statusVat` and `contact_person` are always empty; the caller
/// enriches them from other sources.
#[derive(Debug, Serialize)]
pub struct BestMatch {
    pub name: String,
    pub short_name: String,
    pub nip: String,
    pub street: String,
    pub building: String,
    /// Unit number; empty string when the entity has none.
    pub local: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    /// REGON, or null when the registry returned none.
    pub regon: Option<String>,
    #[serde(rename = "statusVat")]
    pub status_vat: String,
    pub contact_person: String,
}

impl BestMatch {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            name: entity.name.clone(),
            short_name: short_name(&entity.name),
            nip: entity.nip.clone(),
            street: entity.street.clone(),
            building: entity.building_no.clone(),
            local: entity.unit_no.clone().unwrap_or_default(),
            postal_code: entity.postal_code.clone(),
            city: entity.city.clone(),
            country: "Poland".to_string(),
            regon: if entity.regon.is_empty() {
                None
            } else {
                Some(entity.regon.clone())
            },
            status_vat: String::new(),
            contact_person: String::new(),
        }
    }
}

/// First 27 characters plus an ellipsis once a name passes 30
/// characters; shorter names pass through unchanged.
fn short_name(name: &str) -> String {
    if name.chars().count() <= SHORT_NAME_MAX {
        name.to_string()
    } else {
        let kept: String = name.chars().take(SHORT_NAME_KEEP).collect();
        format!("{kept}…")
    }
}

/// JSON error object for single-shot mode.
pub fn error_json(message: &str) -> Value {
    json!({ "error": message })
}
