use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TelepageError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TelepageError::render("x").to_string().contains("render error:"));
    assert!(TelepageError::export("x").to_string().contains("export error:"));
    assert!(
        TelepageError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn import_errors_convert_and_describe_shape() {
    let err: TelepageError = ImportError::Unparseable { len: 12, min: 1120 }.into();
    let msg = err.to_string();
    assert!(msg.starts_with("import error:"));
    assert!(msg.contains("12"));
    assert!(msg.contains("1120"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TelepageError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
