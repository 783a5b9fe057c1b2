//! Tests for the phone mask: progressive formatting, paste cleanup and
//! caret placement across inserted separators.

use inputmask::{MaskHandler, PhoneMask};

mod common;
use common::*;

mod formatting_tests {
    use super::*;

    #[test]
    fn test_typing_one_digit_at_a_time() {
        let mask = PhoneMask::new();
        let expected = [
            "5",
            "55",
            "555",
            "(555) 1",
            "(555) 12",
            "(555) 123",
            "(555) 123-4",
            "(555) 123-45",
            "(555) 123-456",
            "(555) 123-4567",
        ];

        let mut field = String::new();
        for (digit, want) in "5551234567".chars().zip(expected) {
            field.push(digit);
            let caret = field.chars().count();
            let result = mask.apply(&field, Some(caret), None);
            assert_eq!(result.formatted, want);
            // typing at the end keeps the caret at the end
            assert_eq!(result.caret, Some(want.chars().count()));
            field = result.formatted;
        }
    }

    #[test]
    fn test_paste_with_punctuation() {
        let result = PhoneMask::new().apply("555.123.4567", None, None);
        assert_eq!(result.formatted, "(555) 123-4567");
        assert_eq!(result.raw, "5551234567");
    }

    #[test]
    fn test_paste_with_country_code_and_letters() {
        let result = PhoneMask::new().apply("tel: 555-123-4567 ext", None, None);
        assert_eq!(result.formatted, "(555) 123-4567");
    }

    #[test]
    fn test_excess_digits_dropped() {
        let result = PhoneMask::new().apply("(555) 123-45678", None, None);
        assert_eq!(result.raw, "5551234567");
    }
}

mod caret_tests {
    use super::*;

    #[test]
    fn test_insert_in_middle_keeps_caret_after_inserted_digit() {
        // "(555) 123-4567" with "9" typed after the area code's closing paren
        let mask = PhoneMask::new();
        let result = mask.apply("(555) 9123-4567", Some(7), None);
        assert_eq!(result.formatted, "(555) 912-3456");
        assert_eq!(result.caret, Some(7));
    }

    #[test]
    fn test_caret_before_any_digit() {
        let mask = PhoneMask::new();
        assert_eq!(mask.apply("(555) 123", Some(0), None).caret, Some(1));
        assert_eq!(mask.apply("555", Some(0), None).caret, Some(0));
    }

    #[test]
    fn test_caret_crossing_separator() {
        // caret after "3" in the bare run lands past the ") "
        let result = PhoneMask::new().apply("5553", Some(4), None);
        assert_eq!(result.formatted, "(555) 3");
        assert_eq!(result.caret, Some(7));
    }

    #[test]
    fn test_unknown_caret_stays_unknown() {
        assert_eq!(PhoneMask::new().apply("5551234", None, None).caret, None);
    }

    #[test]
    fn test_caret_bounds_over_corpus() {
        let mask = PhoneMask::new();
        for input in hostile_inputs() {
            for caret in caret_positions(&input) {
                let result = mask.apply(&input, caret, None);
                assert_caret_in_bounds(&result, &input);
            }
        }
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_number_is_valid() {
        let mask = PhoneMask::new();
        assert!(mask.validate("5551234567", None));
        assert!(mask.validate("(555) 123-4567", None));
    }

    #[test]
    fn test_partial_or_long_number_is_invalid() {
        let mask = PhoneMask::new();
        assert!(!mask.validate("", None));
        assert!(!mask.validate("555123", None));
        assert!(!mask.validate("55512345678", None));
    }

    #[test]
    fn test_parse_strips_everything_but_digits() {
        assert_eq!(PhoneMask::new().parse("(555) 123-4567", None), "5551234567");
        assert_eq!(PhoneMask::new().parse("", None), "");
    }
}
