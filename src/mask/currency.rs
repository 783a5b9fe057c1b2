//! Currency amount mask.
//!
//! Amounts are handled as integer cents rendered through string arithmetic,
//! so no floating point is involved and arbitrarily long input cannot
//! overflow the formatter.
//!
//! Input without a decimal point is read as a cents count (`123456` is
//! `1,234.56`). Input with a decimal point is read as units and cents, and
//! fraction digits past the second are dropped rather than rounded.
//!
//! The exception is a formatted amount that gained or lost one fraction
//! digit, which is what a keystroke in a live field produces. Its digits
//! shift through the cents (`0.012` is `0.12`, `1.2` is `0.12`), and a
//! deletion that leaves nothing but zeros clears the field.

use super::{digits_only, MaskHandler, MaskOptions, MaskResult};
use crate::caret;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct CurrencyMask;

/// Split of a normalised amount.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Amount {
    /// Canonical raw value, as the user's input reduced to digits and a point.
    raw: String,
    /// Whole units, without leading zeros, `"0"` for none.
    units: String,
    /// Exactly two fraction digits.
    cents: String,
    /// Digits were read as a cents count, so they line up from the right.
    in_cents: bool,
}

impl CurrencyMask {
    pub const ID: &'static str = "currency";

    pub fn new() -> Self {
        Self
    }

    fn non_numeric() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"[^0-9.]").expect("Valid currency filter regex"));
        &PATTERN
    }

    /// A formatted amount with one fraction digit typed or deleted.
    fn edited_format() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?:0|[1-9]\d{0,2}(?:,\d{3})*)\.(?:\d|\d{3})$")
                .expect("Valid edited currency regex")
        });
        &PATTERN
    }

    /// Reads every digit of an edited amount as a cents count.
    fn shifted(input: &str) -> Option<Amount> {
        let digits = digits_only(input);
        let digits = digits.trim_start_matches('0');

        let deleted = input.rsplit('.').next().is_some_and(|fraction| fraction.len() == 1);
        if digits.is_empty() && deleted {
            return None;
        }

        let split = digits.len().saturating_sub(2);
        let units = if split == 0 { "0" } else { &digits[..split] };
        let cents = format!("{:0>2}", &digits[split..]);
        Some(Amount {
            raw: format!("{}.{}", units, cents),
            units: units.to_string(),
            cents,
            in_cents: true,
        })
    }

    fn amount(input: &str) -> Option<Amount> {
        if Self::edited_format().is_match(input) {
            return Self::shifted(input);
        }

        let cleaned = Self::non_numeric().replace_all(input, "");
        if !cleaned.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let (units, cents, raw, in_cents) = match cleaned.split_once('.') {
            Some((whole, fraction)) => {
                let mut fraction: String = fraction.chars().filter(|c| *c != '.').collect();
                fraction.truncate(2);
                let raw = format!("{}.{}", whole, fraction);
                let cents = format!("{:0<2}", fraction);
                (whole.to_string(), cents, raw, false)
            }
            None => {
                let digits = cleaned.to_string();
                let split = digits.len().saturating_sub(2);
                let cents = format!("{:0>2}", &digits[split..]);
                (digits[..split].to_string(), cents, digits, true)
            }
        };

        let units = units.trim_start_matches('0');
        Some(Amount {
            raw,
            units: if units.is_empty() { "0".to_string() } else { units.to_string() },
            cents,
            in_cents,
        })
    }

    /// Inserts thousands separators into a run of digits.
    fn group_thousands(units: &str) -> String {
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, c) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }
}

impl MaskHandler for CurrencyMask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn apply(&self, input: &str, caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        let Some(amount) = Self::amount(input) else {
            return MaskResult {
                caret: caret.map(|_| 0),
                ..MaskResult::default()
            }
            .with_meta("is_empty", true)
            .with_meta("value_in_cents", 0)
            .with_meta("value_in_dollars", 0.0);
        };

        let formatted = format!("{}.{}", Self::group_thousands(&amount.units), amount.cents);
        let caret = caret.map(|at| {
            let n = caret::data_before(input, at, caret::is_digit);
            if n == 0 || !amount.in_cents {
                return caret::offset_after_data(&formatted, n, caret::is_digit);
            }
            // padding zeros appear on the left, so count the digits after the caret
            let after = caret::data_before(input, usize::MAX, caret::is_digit) - n;
            let shown = caret::data_before(&formatted, usize::MAX, caret::is_digit);
            caret::offset_after_data(&formatted, shown.saturating_sub(after), caret::is_digit)
        });

        let mut result = MaskResult {
            raw: amount.raw,
            formatted,
            caret,
            ..MaskResult::default()
        }
        .with_meta("is_empty", false);

        if let Ok(cents) = format!("{}{}", amount.units, amount.cents).parse::<u64>() {
            result = result
                .with_meta("value_in_cents", cents)
                .with_meta("value_in_dollars", cents as f64 / 100.0);
        }
        result
    }

    fn parse(&self, formatted: &str, _options: Option<&MaskOptions>) -> String {
        formatted.replace(',', "")
    }

    fn validate(&self, raw: &str, _options: Option<&MaskOptions>) -> bool {
        let mut parts = raw.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

        (!whole.is_empty() || !fraction.is_empty())
            && all_digits(whole)
            && all_digits(fraction)
            && fraction.len() <= 2
    }

    fn is_data_char(&self, c: char, _options: Option<&MaskOptions>) -> bool {
        c.is_ascii_digit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &str) -> MaskResult {
        CurrencyMask::new().apply(input, None, None)
    }

    #[test]
    fn test_digits_are_cents() {
        let result = apply("123456");
        assert_eq!(result.raw, "123456");
        assert_eq!(result.formatted, "1,234.56");
        assert_eq!(apply("5").formatted, "0.05");
        assert_eq!(apply("1234567890").formatted, "12,345,678.90");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(apply("").formatted, "");
        assert_eq!(apply(".").formatted, "");
        assert_eq!(apply("$").formatted, "");
        assert_eq!(apply("").meta["is_empty"], true);
    }

    #[test]
    fn test_leading_point() {
        assert_eq!(apply(".99").formatted, "0.99");
        assert_eq!(apply(".9").formatted, "0.90");
    }

    #[test]
    fn test_fraction_truncated_not_rounded() {
        let result = apply("123.456789");
        assert_eq!(result.raw, "123.45");
        assert_eq!(result.formatted, "123.45");
        assert_eq!(result.meta["value_in_cents"], 12345);
    }

    #[test]
    fn test_typed_fraction_digit_shifts_cents() {
        assert_eq!(apply("0.012").formatted, "0.12");
        assert_eq!(apply("0.123").formatted, "1.23");
        let result = apply("1,234.567");
        assert_eq!(result.formatted, "12,345.67");
        assert_eq!(result.raw, "12345.67");
        assert_eq!(apply("0.000").formatted, "0.00");
    }

    #[test]
    fn test_deleted_fraction_digit_shifts_cents() {
        assert_eq!(apply("1.2").formatted, "0.12");
        assert_eq!(apply("0.1").formatted, "0.01");
        assert_eq!(apply("0.0").formatted, "");
        assert_eq!(apply("0.0").meta["is_empty"], true);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(CurrencyMask::group_thousands("0"), "0");
        assert_eq!(CurrencyMask::group_thousands("123"), "123");
        assert_eq!(CurrencyMask::group_thousands("1234"), "1,234");
        assert_eq!(CurrencyMask::group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_parse_keeps_point() {
        assert_eq!(CurrencyMask::new().parse("1,234.56", None), "1234.56");
    }

    #[test]
    fn test_validate() {
        let mask = CurrencyMask::new();
        assert!(mask.validate("1234.56", None));
        assert!(mask.validate("99", None));
        assert!(!mask.validate("", None));
        assert!(!mask.validate(".", None));
        assert!(!mask.validate("1.234", None));
    }

    #[test]
    fn test_caret_after_same_digit_count() {
        let result = CurrencyMask::new().apply("1,234.56", Some(8), None);
        assert_eq!(result.caret, Some(8));

        let result = CurrencyMask::new().apply("1234.56", Some(1), None);
        assert_eq!(result.formatted, "1,234.56");
        assert_eq!(result.caret, Some(1));
    }
}
