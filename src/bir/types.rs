//! Typed records for BIR search results.

use std::collections::HashMap;

/// One business entity returned by DaneSzukajPodmioty.
///
/// Fields mirror the leaf elements of a `<dane>` element. Required text
/// fields default to the empty string when the element is missing;
/// `unit_no` and `closure_date` stay absent instead, so "not
/// applicable" is distinguishable from an empty value. Records are
/// built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// National business registry number (REGON).
    pub regon: String,
    /// Tax identification number.
    pub nip: String,
    pub name: String,
    pub province: String,
    pub county: String,
    pub municipality: String,
    pub city: String,
    pub postal_code: String,
    pub street: String,
    pub building_no: String,
    pub unit_no: Option<String>,
    /// Entity-type classifier (`P`, `F`, `LP`, `LF`).
    pub kind: String,
    /// Registry silo the entity is reported from; 0 when absent.
    pub silos_id: i64,
    pub closure_date: Option<String>,
    pub post_city: String,
}

impl Entity {
    /// Build a record from collected leaf values. This is the single
    /// place the wire tags map onto record fields.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let req = |tag: &str| fields.get(tag).cloned().unwrap_or_default();
        let opt = |tag: &str| fields.get(tag).cloned();

        Self {
            regon: req("Regon"),
            nip: req("Nip"),
            name: req("Nazwa"),
            province: req("Wojewodztwo"),
            county: req("Powiat"),
            municipality: req("Gmina"),
            city: req("Miejscowosc"),
            postal_code: req("KodPocztowy"),
            street: req("Ulica"),
            building_no: req("NrNieruchomosci"),
            unit_no: opt("NrLokalu"),
            kind: req("Typ"),
            silos_id: fields
                .get("SilosID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            closure_date: opt("DataZakonczeniaDzialalnosci"),
            post_city: req("MiejscowoscPoczty"),
        }
    }
}
