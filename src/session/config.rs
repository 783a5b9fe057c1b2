//! Host-side mask configuration.
//!
//! Hosts either name a mask by string id through [`MaskConfig`], which keeps
//! the registry open to runtime plug-ins, or pick a built-in through the
//! typed [`MaskKind`].

use crate::error::InputMaskResult;
use crate::mask::{
    CreditCardMask, CurrencyMask, CustomPatternMask, MaskOptions, PhoneMask, Preset, SerialMask,
};
use serde::{Deserialize, Serialize};

/// Which mask an input uses and how it is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskConfig {
    pub mask_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<MaskOptions>,
}

impl MaskConfig {
    pub fn new(mask_id: &str) -> Self {
        Self {
            mask_id: mask_id.to_string(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: MaskOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Decodes a configuration such as `{"maskId": "pattern", "options": {"pattern": "##-##"}}`.
    pub fn from_json(json: &str) -> InputMaskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Built-in masks as a closed set, plus an escape hatch for anything
/// registered at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskKind {
    Phone,
    Currency,
    CreditCard,
    /// `AAA-####` serial numbers
    Serial,
    /// Ad-hoc pattern such as `##-##-##`
    Pattern(String),
    Preset(Preset),
    /// Handler registered under this id
    Custom(String),
}

impl MaskKind {
    pub fn id(&self) -> &str {
        match self {
            Self::Phone => PhoneMask::ID,
            Self::Currency => CurrencyMask::ID,
            Self::CreditCard => CreditCardMask::ID,
            Self::Serial => SerialMask::ID,
            Self::Pattern(_) => CustomPatternMask::ID,
            Self::Preset(preset) => preset.id(),
            Self::Custom(id) => id.as_str(),
        }
    }
}

impl From<MaskKind> for MaskConfig {
    fn from(kind: MaskKind) -> Self {
        let config = MaskConfig::new(kind.id());
        match kind {
            MaskKind::Pattern(pattern) => config.with_options(MaskOptions::with_pattern(&pattern)),
            _ => config,
        }
    }
}
