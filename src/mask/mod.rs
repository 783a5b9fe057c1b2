//! Mask handlers and the contract they share.
//!
//! A mask turns whatever the user typed or pasted into a display string,
//! a canonical raw value and a caret recommendation. Handlers are stateless
//! and shared between every input that uses them, so [`MaskHandler::apply`]
//! must be a pure function of its arguments.

pub mod credit_card;
pub mod currency;
pub mod pattern;
pub mod phone;

pub use credit_card::{CardBrand, CreditCardMask};
pub use currency::CurrencyMask;
pub use pattern::{CustomPatternMask, FormatPattern, PatternMask, Preset, SerialMask, Slot};
pub use phone::PhoneMask;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::InputMaskResult;

/// Open, mask-specific bag of auxiliary facts about a result.
pub type Meta = BTreeMap<String, Value>;

/// Output of a single [`MaskHandler::apply`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaskResult {
    /// Data-only value, free of separators.
    pub raw: String,

    /// Display value with literals inserted.
    pub formatted: String,

    /// Recommended caret offset into `formatted`, `None` to leave the caret alone.
    pub caret: Option<usize>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Meta,
}

impl MaskResult {
    /// Result of applying no mask at all.
    pub fn passthrough(input: &str) -> Self {
        Self {
            raw: input.to_string(),
            formatted: input.to_string(),
            caret: None,
            meta: Meta::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta.insert(key.to_string(), value.into());
        self
    }
}

/// Formatting strategy for one kind of value.
///
/// Only [`apply`](Self::apply) is mandatory. The default `parse` reruns
/// `apply` and keeps the raw value; the default `validate` accepts anything.
pub trait MaskHandler: Send + Sync {
    /// Registry key, e.g. `"phone"`.
    fn id(&self) -> &str;

    /// Formats `input` and maps `caret` (a char offset into `input`) onto the
    /// formatted result.
    fn apply(&self, input: &str, caret: Option<usize>, options: Option<&MaskOptions>) -> MaskResult;

    /// Recovers the raw value from a formatted one.
    fn parse(&self, formatted: &str, options: Option<&MaskOptions>) -> String {
        self.apply(formatted, None, options).raw
    }

    /// Reports whether `raw` is complete and well-formed.
    fn validate(&self, raw: &str, options: Option<&MaskOptions>) -> bool {
        let _ = (raw, options);
        true
    }

    /// Whether `c` carries data, as opposed to being a separator.
    ///
    /// Used by editing helpers to skip over literals on deletion.
    fn is_data_char(&self, c: char, options: Option<&MaskOptions>) -> bool {
        let _ = options;
        c.is_alphanumeric()
    }
}

/// Host-supplied options for a mask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskOptions {
    /// Template of `#`, `A`, `X` placeholders and literal separators.
    pub pattern: Option<String>,

    /// Maximum count of data characters.
    pub max_length: Option<usize>,

    /// Characters accepted from the input at all.
    pub allowed: Option<AllowedChars>,

    /// Per-character normalisation.
    pub transform: Option<Transform>,
}

impl MaskOptions {
    /// Decodes options supplied as JSON, e.g. `{"pattern": "##-##", "maxLength": 4}`.
    pub fn from_json(json: &str) -> InputMaskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options carrying only a pattern.
    pub fn with_pattern(pattern: &str) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            ..Self::default()
        }
    }
}

/// Character class restricting raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedChars {
    Digits,
    Letters,
    Alphanumeric,
    Any,
    /// Explicit set of accepted characters.
    Set(String),
}

impl AllowedChars {
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Digits => c.is_ascii_digit(),
            Self::Letters => c.is_alphabetic(),
            Self::Alphanumeric => c.is_alphanumeric(),
            Self::Any => !c.is_control(),
            Self::Set(chars) => chars.contains(c),
        }
    }

    /// True when no character could ever pass.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Set(chars) if chars.is_empty())
    }
}

/// Per-character normalisation applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Uppercase,
    Lowercase,
}

impl Transform {
    /// Maps one character, leaving it unchanged when the case mapping
    /// would expand it to several characters.
    pub fn apply(self, c: char) -> char {
        let mut mapped = match self {
            Self::Uppercase => c.to_uppercase().collect::<Vec<_>>(),
            Self::Lowercase => c.to_lowercase().collect::<Vec<_>>(),
        };
        match mapped.len() {
            1 => mapped.remove(0),
            _ => c,
        }
    }
}

/// Keeps ASCII digits only.
pub(crate) fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
