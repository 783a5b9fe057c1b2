//! Caret-stable input masking engine.
//!
//! This library turns raw keystrokes and pasted text into display-formatted
//! values (phone numbers, currency, card numbers, arbitrary placeholder
//! patterns) while keeping the text caret where the user expects it.
//!
//! # Features
//!
//! - **Pure handlers**: every mask is a stateless [`MaskHandler`] whose
//!   `apply` is idempotent on its own output
//! - **Caret preservation**: one shared primitive in [`caret`] maps cursor
//!   offsets across reformatting by counting data characters
//! - **Pattern engine**: `#`/`A`/`X` placeholder templates with literal
//!   separators, filtering, transforms and validators
//! - **Open registry**: built-ins plus anything registered at runtime,
//!   with pass-through for unknown ids
//!
//! # Architecture
//!
//! - [`mask`]: the handler contract and the built-in masks
//! - [`registry`]: id to handler lookup
//! - [`session`]: per-input controller wiring edits to the registry
//! - [`caret`]: cursor mapping between formatted views
//! - [`error`]: configuration errors
//!
//! # Quick Start
//!
//! ```
//! use inputmask::MaskRegistry;
//!
//! let registry = MaskRegistry::with_builtins();
//! let result = registry.apply("phone", "5551234", Some(7), None);
//! assert_eq!(result.formatted, "(555) 123-4");
//! assert_eq!(result.caret, Some(11));
//! ```
//!
//! # Examples
//!
//! ## Custom Patterns
//!
//! ```
//! use inputmask::{FormatPattern, MaskHandler, PatternMask};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mask = PatternMask::new("code", FormatPattern::new("##-##-##")?);
//! assert_eq!(mask.apply("123", None, None).formatted, "12-3");
//! # Ok(())
//! # }
//! ```
//!
//! ## Edit Sessions
//!
//! ```
//! use inputmask::{EditSession, MaskKind, MaskRegistry};
//!
//! let registry = MaskRegistry::with_builtins();
//! let mut session = EditSession::new(&registry, Some(MaskKind::Currency.into()));
//! session.mount(Some("123456"));
//! assert_eq!(session.formatted(), "1,234.56");
//! ```

pub mod caret;
pub mod error;
pub mod mask;
pub mod registry;
pub mod session;

pub use error::{InputMaskError, InputMaskResult};
pub use mask::{
    AllowedChars, CardBrand, CreditCardMask, CurrencyMask, CustomPatternMask, FormatPattern,
    MaskHandler, MaskOptions, MaskResult, Meta, PatternMask, PhoneMask, Preset, SerialMask,
    Transform,
};
pub use registry::MaskRegistry;
pub use session::{EditSession, MaskConfig, MaskKind, SessionState, ValueChange};
