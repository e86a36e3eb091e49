//! Result document parser.
//!
//! DaneSzukajPodmioty returns an XML document whose `root` element
//! holds one `dane` element per matched entity. Leaf values are
//! collected by tag name with surrounding whitespace trimmed; the
//! tag-to-field mapping lives in [`Entity::from_fields`].

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::bir::types::Entity;
use crate::error::BirError;

/// Parse a result document into entity records, in document order.
///
/// Zero `dane` elements is a valid document and yields an empty vec.
pub fn parse_entities(xml: &str) -> Result<Vec<Entity>, BirError> {
    let mut reader = Reader::from_str(xml);
    let mut entities = Vec::new();
    let mut fields: Option<HashMap<String, String>> = None;
    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if tag == "dane" {
                    fields = Some(HashMap::new());
                    current_tag = None;
                } else if fields.is_some() {
                    current_tag = Some(tag);
                }
            }
            Event::Text(t) => {
                if let (Some(fields), Some(tag)) = (fields.as_mut(), current_tag.as_ref()) {
                    let value = t.unescape()?;
                    let value = value.trim();
                    if !value.is_empty() {
                        fields.entry(tag.clone()).or_default().push_str(value);
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"dane" {
                    if let Some(fields) = fields.take() {
                        entities.push(Entity::from_fields(&fields));
                    }
                } else {
                    current_tag = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(dane: &str) -> String {
        format!("<root>{dane}</root>")
    }

    #[test]
    fn test_empty_document_yields_no_records() {
        assert!(parse_entities("<root></root>").unwrap().is_empty());
        assert!(parse_entities("<root/>").unwrap().is_empty());
    }

    #[test]
    fn test_full_record_maps_every_field() {
        let xml = doc(
            "<dane>\
             <Regon>123456785</Regon>\
             <Nip>1234563218</Nip>\
             <Nazwa>TEST SP Z O O</Nazwa>\
             <Wojewodztwo>MAZOWIECKIE</Wojewodztwo>\
             <Powiat>Warszawa</Powiat>\
             <Gmina>Mokotów</Gmina>\
             <Miejscowosc>Warszawa</Miejscowosc>\
             <KodPocztowy>00-001</KodPocztowy>\
             <Ulica>Testowa</Ulica>\
             <NrNieruchomosci>5</NrNieruchomosci>\
             <NrLokalu>12</NrLokalu>\
             <Typ>P</Typ>\
             <SilosID>6</SilosID>\
             <DataZakonczeniaDzialalnosci>2020-01-31</DataZakonczeniaDzialalnosci>\
             <MiejscowoscPoczty>Warszawa</MiejscowoscPoczty>\
             </dane>",
        );
        let entities = parse_entities(&xml).unwrap();
        assert_eq!(entities.len(), 1);

        let entity = &entities[0];
        assert_eq!(entity.regon, "123456785");
        assert_eq!(entity.nip, "1234563218");
        assert_eq!(entity.name, "TEST SP Z O O");
        assert_eq!(entity.province, "MAZOWIECKIE");
        assert_eq!(entity.county, "Warszawa");
        assert_eq!(entity.municipality, "Mokotów");
        assert_eq!(entity.city, "Warszawa");
        assert_eq!(entity.postal_code, "00-001");
        assert_eq!(entity.street, "Testowa");
        assert_eq!(entity.building_no, "5");
        assert_eq!(entity.unit_no.as_deref(), Some("12"));
        assert_eq!(entity.kind, "P");
        assert_eq!(entity.silos_id, 6);
        assert_eq!(entity.closure_date.as_deref(), Some("2020-01-31"));
        assert_eq!(entity.post_city, "Warszawa");
    }

    #[test]
    fn test_missing_leaves_default_without_error() {
        let xml = doc("<dane><Nazwa>FIRMA</Nazwa></dane>");
        let entity = &parse_entities(&xml).unwrap()[0];

        assert_eq!(entity.name, "FIRMA");
        assert_eq!(entity.regon, "");
        assert_eq!(entity.street, "");
        assert_eq!(entity.unit_no, None);
        assert_eq!(entity.closure_date, None);
        assert_eq!(entity.silos_id, 0);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let xml = doc("<dane><Nazwa>  FIRMA X  </Nazwa><Nip>\n1234563218\n</Nip></dane>");
        let entity = &parse_entities(&xml).unwrap()[0];
        assert_eq!(entity.name, "FIRMA X");
        assert_eq!(entity.nip, "1234563218");
    }

    #[test]
    fn test_non_numeric_silos_id_defaults_to_zero() {
        let xml = doc("<dane><SilosID>abc</SilosID></dane>");
        assert_eq!(parse_entities(&xml).unwrap()[0].silos_id, 0);
    }

    #[test]
    fn test_records_keep_document_order() {
        let xml = doc(
            "<dane><Nazwa>PIERWSZA</Nazwa></dane>\
             <dane><Nazwa>DRUGA</Nazwa></dane>\
             <dane><Nazwa>TRZECIA</Nazwa></dane>",
        );
        let names: Vec<_> = parse_entities(&xml)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["PIERWSZA", "DRUGA", "TRZECIA"]);
    }

    #[test]
    fn test_escaped_entities_in_values() {
        let xml = doc("<dane><Nazwa>A &amp; B &lt;SP&gt;</Nazwa></dane>");
        assert_eq!(parse_entities(&xml).unwrap()[0].name, "A & B <SP>");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = parse_entities("<root><dane></root>").unwrap_err();
        assert!(matches!(err, BirError::MalformedResponse(_)));
    }
}
