//! Error handling tests.
//!
//! Configuration errors carry enough context to find the bad definition;
//! data problems never produce errors at all.

use inputmask::error::{InputMaskError, InputMaskResult};
use inputmask::{EditSession, FormatPattern, MaskConfig, MaskOptions, MaskRegistry};
use std::error::Error as StdError;

#[test]
fn test_invalid_pattern_display() {
    let err = FormatPattern::new("--").unwrap_err();
    let display = err.to_string();
    assert!(display.contains("Invalid pattern"));
    assert!(display.contains("'--'"));
    assert!(matches!(err, InputMaskError::InvalidPattern { .. }));
}

#[test]
fn test_max_length_mismatch_display() {
    let err = FormatPattern::new("##-##")
        .and_then(|p| p.with_max_length(9))
        .unwrap_err();
    assert!(err.to_string().contains("does not match 4 placeholders"));
}

#[test]
fn test_missing_pattern_is_invalid_input() {
    let err = FormatPattern::from_options(&MaskOptions::default()).unwrap_err();
    match err {
        InputMaskError::InvalidInput { parameter, .. } => assert_eq!(parameter, "pattern"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_options_error_keeps_source() {
    let err = MaskOptions::from_json("{\"maxLength\": \"four\"}").unwrap_err();
    assert!(matches!(err, InputMaskError::Options(_)));
    assert!(err.source().is_some());
}

#[test]
fn test_config_json_error() {
    assert!(MaskConfig::from_json("not json").is_err());
}

#[test]
fn test_register_pattern_error_propagates() {
    fn configure(registry: &MaskRegistry) -> InputMaskResult<()> {
        registry.register_pattern("ok", "###")?;
        registry.register_pattern("bad", "")?;
        Ok(())
    }

    let registry = MaskRegistry::new();
    assert!(configure(&registry).is_err());
    assert!(registry.contains("ok"));
    assert!(!registry.contains("bad"));
}

#[test]
fn test_inverted_paste_selection() {
    let registry = MaskRegistry::with_builtins();
    let mut session = EditSession::new(&registry, Some(MaskConfig::new("phone")));
    #[allow(clippy::reversed_empty_ranges)]
    let err = session.handle_paste(3..1, "9").unwrap_err();
    assert!(err.to_string().contains("selection"));
}

#[test]
fn test_data_problems_are_not_errors() {
    let registry = MaskRegistry::with_builtins();
    // bad characters, incomplete data and unknown ids all produce values
    assert_eq!(registry.apply("phone", "abc", None, None).formatted, "");
    assert_eq!(registry.apply("date", "1", None, None).formatted, "1");
    assert_eq!(registry.apply("unknown", "abc", None, None).formatted, "abc");
}
