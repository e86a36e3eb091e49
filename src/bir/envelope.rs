//! SOAP 1.2 envelope codec for the BIR1.1 service.
//!
//! Request side: builders for the three operations this program
//! consumes, with the WS-Addressing headers the service requires.
//! Response side: MIME framing removal and extraction of the named
//! `*Result` element's text.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::BirError;

const NS_PUBL: &str = "http://CIS/BIR/PUBL/2014/07";

pub const ACTION_ZALOGUJ: &str =
    "http://CIS/BIR/PUBL/2014/07/IUslugaBIRzewnPubl/Zaloguj";
pub const ACTION_DANE_SZUKAJ_PODMIOTY: &str =
    "http://CIS/BIR/PUBL/2014/07/IUslugaBIRzewnPubl/DaneSzukajPodmioty";
pub const ACTION_WYLOGUJ: &str =
    "http://CIS/BIR/PUBL/2014/07/IUslugaBIRzewnPubl/Wyloguj";

/// Wrap an operation body in a SOAP 1.2 envelope addressed at the
/// service endpoint.
fn envelope(endpoint: &str, action: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:ns="{ns}" xmlns:dat="{ns}/DataContract">
  <soap:Header xmlns:wsa="http://www.w3.org/2005/08/addressing">
    <wsa:Action>{action}</wsa:Action>
    <wsa:To>{to}</wsa:To>
  </soap:Header>
  <soap:Body>
    {body}
  </soap:Body>
</soap:Envelope>"#,
        ns = NS_PUBL,
        action = escape(action),
        to = escape(endpoint),
        body = body,
    )
}

/// Login request carrying the service access key.
pub fn zaloguj(endpoint: &str, api_key: &str) -> String {
    let body = format!(
        "<ns:Zaloguj><ns:pKluczUzytkownika>{}</ns:pKluczUzytkownika></ns:Zaloguj>",
        escape(api_key)
    );
    envelope(endpoint, ACTION_ZALOGUJ, &body)
}

/// Search request with the NIP as the sole criteria field.
pub fn dane_szukaj_podmioty(endpoint: &str, nip: &str) -> String {
    let body = format!(
        "<ns:DaneSzukajPodmioty><ns:pParametryWyszukiwania><dat:Nip>{}</dat:Nip></ns:pParametryWyszukiwania></ns:DaneSzukajPodmioty>",
        escape(nip)
    );
    envelope(endpoint, ACTION_DANE_SZUKAJ_PODMIOTY, &body)
}

/// Session teardown request.
pub fn wyloguj(endpoint: &str, sid: &str) -> String {
    let body = format!(
        "<ns:Wyloguj><ns:pIdentyfikatorSesji>{}</ns:pIdentyfikatorSesji></ns:Wyloguj>",
        escape(sid)
    );
    envelope(endpoint, ACTION_WYLOGUJ, &body)
}

/// Slice the SOAP envelope out of a raw response body.
///
/// BIR answers with `multipart/related` MIME framing around the
/// envelope document; the namespace prefix on `Envelope` varies, so the
/// slice is prefix-agnostic. A body already consisting of a bare
/// envelope passes through unchanged.
pub fn strip_mime(body: &str) -> Result<&str, BirError> {
    let open = body
        .find("Envelope")
        .and_then(|at| body[..at].rfind('<'))
        .ok_or_else(|| {
            BirError::MalformedResponse("no SOAP envelope in response".to_string())
        })?;
    let close = body.rfind("Envelope>").ok_or_else(|| {
        BirError::MalformedResponse("unterminated SOAP envelope in response".to_string())
    })?;
    Ok(&body[open..close + "Envelope>".len()])
}

/// Extract the text content of the named `*Result` element from a
/// response envelope, matching by local name so the service's prefix
/// choice does not matter. `None` means the element is absent or holds
/// nothing but whitespace.
pub fn extract_result(
    envelope_xml: &str,
    result_tag: &str,
) -> Result<Option<String>, BirError> {
    let mut reader = Reader::from_str(envelope_xml);
    let mut inside = false;
    let mut found = false;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == result_tag.as_bytes() => {
                inside = true;
                found = true;
            }
            Event::Empty(e) if e.local_name().as_ref() == result_tag.as_bytes() => {
                found = true;
                break;
            }
            Event::End(e) if e.local_name().as_ref() == result_tag.as_bytes() => break,
            Event::Text(t) if inside => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    let text = text.trim();
    if !found || text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zaloguj_envelope_carries_action_and_key() {
        let xml = zaloguj("http://localhost/svc", "abc123");
        assert!(xml.contains("<wsa:Action>http://CIS/BIR/PUBL/2014/07/IUslugaBIRzewnPubl/Zaloguj</wsa:Action>"));
        assert!(xml.contains("<wsa:To>http://localhost/svc</wsa:To>"));
        assert!(xml.contains("<ns:pKluczUzytkownika>abc123</ns:pKluczUzytkownika>"));
    }

    #[test]
    fn test_search_envelope_escapes_criteria() {
        let xml = dane_szukaj_podmioty("http://localhost/svc", "12<34&56789");
        assert!(xml.contains("<dat:Nip>12&lt;34&amp;56789</dat:Nip>"));
    }

    #[test]
    fn test_wyloguj_envelope_carries_sid() {
        let xml = wyloguj("http://localhost/svc", "sid-xyz");
        assert!(xml.contains("<ns:pIdentyfikatorSesji>sid-xyz</ns:pIdentyfikatorSesji>"));
    }

    #[test]
    fn test_strip_mime_unwraps_multipart_framing() {
        let body = "--uuid:1234\r\nContent-Type: application/xop+xml\r\n\r\n\
                    <s:Envelope xmlns:s=\"x\"><s:Body/></s:Envelope>\r\n--uuid:1234--";
        let envelope = strip_mime(body).unwrap();
        assert_eq!(envelope, "<s:Envelope xmlns:s=\"x\"><s:Body/></s:Envelope>");
    }

    #[test]
    fn test_strip_mime_passes_bare_envelope_through() {
        let body = "<soap:Envelope><soap:Body/></soap:Envelope>";
        assert_eq!(strip_mime(body).unwrap(), body);
    }

    #[test]
    fn test_strip_mime_rejects_body_without_envelope() {
        let err = strip_mime("--uuid:1234--").unwrap_err();
        assert!(matches!(err, BirError::MalformedResponse(_)));
    }

    #[test]
    fn test_extract_result_is_prefix_agnostic() {
        let envelope = "<s:Envelope xmlns:s=\"x\"><s:Body>\
                        <ZalogujResponse xmlns=\"y\"><ZalogujResult>token1</ZalogujResult></ZalogujResponse>\
                        </s:Body></s:Envelope>";
        assert_eq!(
            extract_result(envelope, "ZalogujResult").unwrap(),
            Some("token1".to_string())
        );

        let prefixed = "<e:Envelope xmlns:e=\"x\" xmlns:b=\"y\"><e:Body>\
                        <b:ZalogujResponse><b:ZalogujResult>token2</b:ZalogujResult></b:ZalogujResponse>\
                        </e:Body></e:Envelope>";
        assert_eq!(
            extract_result(prefixed, "ZalogujResult").unwrap(),
            Some("token2".to_string())
        );
    }

    #[test]
    fn test_extract_result_unescapes_embedded_document() {
        let envelope = "<Envelope><Body><R>&lt;root&gt;&lt;dane/&gt;&lt;/root&gt;</R></Body></Envelope>";
        assert_eq!(
            extract_result(envelope, "R").unwrap(),
            Some("<root><dane/></root>".to_string())
        );
    }

    #[test]
    fn test_extract_result_absent_or_empty_is_none() {
        let no_element = "<Envelope><Body/></Envelope>";
        assert_eq!(extract_result(no_element, "R").unwrap(), None);

        let empty = "<Envelope><Body><R/></Body></Envelope>";
        assert_eq!(extract_result(empty, "R").unwrap(), None);

        let whitespace = "<Envelope><Body><R>   </R></Body></Envelope>";
        assert_eq!(extract_result(whitespace, "R").unwrap(), None);
    }

    #[test]
    fn test_extract_result_rejects_malformed_xml() {
        let err = extract_result("<Envelope><Body></Wrong></Envelope>", "R").unwrap_err();
        assert!(matches!(err, BirError::MalformedResponse(_)));
    }
}
