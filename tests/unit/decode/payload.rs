use super::*;

#[test]
fn delimited_form_takes_second_part() {
    let p = locate_payload("https://edit.tf/#0:QIECBAgQ:PS=0").unwrap();
    assert_eq!(p.metadata.as_deref(), Some("0"));
    assert_eq!(p.data, "QIECBAgQ");
}

#[test]
fn whitespace_and_foreign_characters_are_stripped() {
    let p = locate_payload("  edit.tf/#8:ab\n  cd\t=e.f  ").unwrap();
    assert_eq!(p.data, "abcdef");
}

#[test]
fn percent_encoding_is_decoded_before_splitting() {
    let p = locate_payload("x#8%3Aab%0A%20%20cd").unwrap();
    assert_eq!(p.metadata.as_deref(), Some("8"));
    assert_eq!(p.data, "abcd");
}

#[test]
fn malformed_escape_keeps_raw_fragment() {
    // "%zz" is not an escape; the raw text is sanitized instead.
    let p = locate_payload("x#1:ab%zzcd").unwrap();
    assert_eq!(p.data, "abzzcd");
}

#[test]
fn legacy_form_needs_minimum_length() {
    let short = format!("#{}", "A".repeat(LEGACY_MIN_LEN - 1));
    assert_eq!(
        locate_payload(&short),
        Err(ImportError::Unparseable {
            len: LEGACY_MIN_LEN - 1,
            min: LEGACY_MIN_LEN
        })
    );
    let long = format!("#{}", "A".repeat(LEGACY_MIN_LEN));
    let p = locate_payload(&long).unwrap();
    assert!(p.metadata.is_none());
    assert_eq!(p.data.len(), LEGACY_MIN_LEN);
}

#[test]
fn shapes_without_payload_are_rejected() {
    assert_eq!(locate_payload("   "), Err(ImportError::Empty));
    assert_eq!(
        locate_payload("https://edit.tf/"),
        Err(ImportError::MissingFragment)
    );
    assert_eq!(locate_payload("edit.tf/#"), Err(ImportError::EmptyPayload));
    assert_eq!(locate_payload("edit.tf/#0:"), Err(ImportError::EmptyPayload));
    assert_eq!(locate_payload("edit.tf/#0:!!!"), Err(ImportError::EmptyPayload));
}
