//! Payment card number mask.
//!
//! Grouping depends on the card brand, which is sniffed from the leading
//! digits on every call, so the layout switches as soon as the prefix is
//! recognisable:
//! - American Express: `#### ###### #####`
//! - Diners Club: `#### ###### ####`
//! - everything else: `#### #### #### ####`

use super::pattern::FormatPattern;
use super::{digits_only, MaskHandler, MaskOptions, MaskResult};
use once_cell::sync::Lazy;

/// Card network inferred from the number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Diners,
    Unknown,
}

impl CardBrand {
    /// Detects the brand from a digit string, complete or not.
    pub fn detect(digits: &str) -> Self {
        let prefix = |n: usize| digits.get(..n).and_then(|p| p.parse::<u32>().ok());

        if digits.starts_with('4') {
            Self::Visa
        } else if matches!(prefix(2), Some(34 | 37)) {
            Self::Amex
        } else if prefix(2) == Some(36) || matches!(prefix(3), Some(300..=305)) {
            Self::Diners
        } else if matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720)) {
            Self::Mastercard
        } else if matches!(prefix(4), Some(6011))
            || matches!(prefix(2), Some(65))
            || matches!(prefix(3), Some(644..=649))
        {
            Self::Discover
        } else {
            Self::Unknown
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Diners => "diners",
            Self::Unknown => "unknown",
        }
    }

    /// Accepted number lengths.
    pub fn lengths(self) -> &'static [usize] {
        match self {
            Self::Visa => &[13, 16],
            Self::Amex => &[15],
            Self::Diners => &[14],
            Self::Mastercard | Self::Discover | Self::Unknown => &[16],
        }
    }

    fn pattern(self) -> &'static FormatPattern {
        static FOUR_FOUR_FOUR_FOUR: Lazy<FormatPattern> = Lazy::new(|| {
            FormatPattern::new("#### #### #### ####").expect("Valid card pattern")
        });
        static FOUR_SIX_FIVE: Lazy<FormatPattern> =
            Lazy::new(|| FormatPattern::new("#### ###### #####").expect("Valid Amex pattern"));
        static FOUR_SIX_FOUR: Lazy<FormatPattern> =
            Lazy::new(|| FormatPattern::new("#### ###### ####").expect("Valid Diners pattern"));

        match self {
            Self::Amex => &*FOUR_SIX_FIVE,
            Self::Diners => &*FOUR_SIX_FOUR,
            _ => &*FOUR_FOUR_FOUR_FOUR,
        }
    }
}

/// Luhn (mod 10) checksum.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

#[derive(Debug, Clone, Default)]
pub struct CreditCardMask;

impl CreditCardMask {
    pub const ID: &'static str = "credit-card";

    pub fn new() -> Self {
        Self
    }
}

impl MaskHandler for CreditCardMask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn apply(&self, input: &str, caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        let brand = CardBrand::detect(&digits_only(input));
        brand
            .pattern()
            .format(input, caret)
            .with_meta("brand", brand.name())
    }

    fn parse(&self, formatted: &str, _options: Option<&MaskOptions>) -> String {
        digits_only(formatted)
    }

    fn validate(&self, raw: &str, _options: Option<&MaskOptions>) -> bool {
        let digits = digits_only(raw);
        let brand = CardBrand::detect(&digits);
        brand.lengths().contains(&digits.len()) && luhn_valid(&digits)
    }

    fn is_data_char(&self, c: char, _options: Option<&MaskOptions>) -> bool {
        c.is_ascii_digit()
    }
}
