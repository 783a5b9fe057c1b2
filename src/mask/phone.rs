//! North American phone number mask.
//!
//! Renders up to ten digits as `(DDD) DDD-DDDD`, formatting progressively
//! while the number is typed:
//! - 1-3 digits stay bare, no parentheses around an unfinished area code
//! - 4-6 digits: `(555) 1` .. `(555) 123`
//! - 7-10 digits: `(555) 123-4` .. `(555) 123-4567`

use super::{digits_only, MaskHandler, MaskOptions, MaskResult};
use crate::caret;

/// Digits in a complete number: area code, exchange, subscriber.
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct PhoneMask;

impl PhoneMask {
    pub const ID: &'static str = "phone";

    pub fn new() -> Self {
        Self
    }

    /// Formats an already stripped digit string.
    pub fn format_digits(digits: &str) -> String {
        let digits = &digits[..digits.len().min(PHONE_DIGITS)];
        match digits.len() {
            0..=3 => digits.to_string(),
            4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
            _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        }
    }

    /// Caret just after the `n`-th digit of `formatted`.
    ///
    /// With no digits to the left the caret goes inside the opening
    /// parenthesis, or to the start when there is none.
    fn caret_for(formatted: &str, n: usize) -> usize {
        if n == 0 {
            return usize::from(formatted.starts_with('('));
        }
        caret::offset_after_data(formatted, n, caret::is_digit)
    }
}

impl MaskHandler for PhoneMask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn apply(&self, input: &str, caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        let mut raw = digits_only(input);
        raw.truncate(PHONE_DIGITS);
        let formatted = Self::format_digits(&raw);

        let caret = caret.map(|at| {
            let n = caret::data_before(input, at, caret::is_digit).min(raw.len());
            Self::caret_for(&formatted, n)
        });

        MaskResult {
            raw,
            formatted,
            caret,
            ..MaskResult::default()
        }
    }

    fn parse(&self, formatted: &str, _options: Option<&MaskOptions>) -> String {
        digits_only(formatted)
    }

    fn validate(&self, raw: &str, _options: Option<&MaskOptions>) -> bool {
        digits_only(raw).len() == PHONE_DIGITS
    }

    fn is_data_char(&self, c: char, _options: Option<&MaskOptions>) -> bool {
        c.is_ascii_digit()
    }
}
