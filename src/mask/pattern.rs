//! Placeholder-driven pattern engine.
//!
//! A pattern mixes placeholders with literal separators:
//!
//! | Placeholder | Accepts |
//! |---|---|
//! | `#` | a digit |
//! | `A` | a letter |
//! | `X` | a letter or digit |
//!
//! Every other character is a literal that the formatter inserts itself.
//! Formatting never runs ahead of the data: a literal is written only once a
//! data character follows it, so `##-##-##` renders `123` as `12-3`, not `12-3-`
//! and `12` as `12`, not `12-`.

use super::{AllowedChars, MaskHandler, MaskOptions, MaskResult, Transform};
use crate::caret;
use crate::error::{InputMaskError, InputMaskResult};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Completeness predicate over a raw value.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One position of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Digit,
    Letter,
    Alphanumeric,
    Literal(char),
}

impl Slot {
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => Self::Digit,
            'A' => Self::Letter,
            'X' => Self::Alphanumeric,
            other => Self::Literal(other),
        }
    }

    pub fn is_placeholder(self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// Whether `c` may fill this slot. Literals accept nothing.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::Letter => c.is_alphabetic(),
            Self::Alphanumeric => c.is_alphanumeric(),
            Self::Literal(_) => false,
        }
    }
}

/// A validated pattern plus the filtering rules that feed it.
#[derive(Clone)]
pub struct FormatPattern {
    source: String,
    slots: Vec<Slot>,
    allowed: AllowedChars,
    max_length: usize,
    transform: Option<Transform>,
    validator: Option<Validator>,
}

impl fmt::Debug for FormatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatPattern")
            .field("source", &self.source)
            .field("allowed", &self.allowed)
            .field("max_length", &self.max_length)
            .field("transform", &self.transform)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl FormatPattern {
    /// Compiles `pattern`, deriving the accepted characters from its
    /// placeholders and the maximum length from their count.
    ///
    /// # Errors
    /// Fails when the pattern is empty or has no placeholders.
    pub fn new(pattern: &str) -> InputMaskResult<Self> {
        if pattern.is_empty() {
            return Err(InputMaskError::pattern(pattern, "pattern is empty"));
        }

        let slots: Vec<Slot> = pattern.chars().map(Slot::from_char).collect();
        let placeholders: Vec<Slot> = slots.iter().copied().filter(|s| s.is_placeholder()).collect();
        if placeholders.is_empty() {
            return Err(InputMaskError::pattern(
                pattern,
                "pattern has no '#', 'A' or 'X' placeholders",
            ));
        }

        let allowed = if placeholders.iter().all(|s| *s == Slot::Digit) {
            AllowedChars::Digits
        } else if placeholders.iter().all(|s| *s == Slot::Letter) {
            AllowedChars::Letters
        } else {
            AllowedChars::Alphanumeric
        };

        Ok(Self {
            source: pattern.to_string(),
            max_length: placeholders.len(),
            slots,
            allowed,
            transform: None,
            validator: None,
        })
    }

    /// Builds a pattern from host options.
    ///
    /// # Errors
    /// Fails when no pattern is given or the options contradict it.
    pub fn from_options(options: &MaskOptions) -> InputMaskResult<Self> {
        let source = options
            .pattern
            .as_deref()
            .ok_or_else(|| InputMaskError::input("pattern", "no pattern supplied"))?;

        let mut pattern = Self::new(source)?;
        if let Some(max_length) = options.max_length {
            pattern = pattern.with_max_length(max_length)?;
        }
        if let Some(allowed) = &options.allowed {
            pattern = pattern.with_allowed(allowed.clone())?;
        }
        if let Some(transform) = options.transform {
            pattern = pattern.with_transform(transform);
        }
        Ok(pattern)
    }

    /// Declares the expected data length.
    ///
    /// # Errors
    /// Fails when `max_length` differs from the placeholder count.
    pub fn with_max_length(mut self, max_length: usize) -> InputMaskResult<Self> {
        if max_length != self.max_length {
            return Err(InputMaskError::pattern(
                &self.source,
                format!(
                    "max length {} does not match {} placeholders",
                    max_length, self.max_length
                ),
            ));
        }
        self.max_length = max_length;
        Ok(self)
    }

    /// Restricts the characters accepted from input.
    ///
    /// # Errors
    /// Fails on an empty character set.
    pub fn with_allowed(mut self, allowed: AllowedChars) -> InputMaskResult<Self> {
        if allowed.is_empty() {
            return Err(InputMaskError::pattern(&self.source, "allowed character set is empty"));
        }
        self.allowed = allowed;
        Ok(self)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn is_data_slot(&self, offset: usize) -> bool {
        self.slots.get(offset).is_some_and(|s| s.is_placeholder())
    }

    /// Offset of the first placeholder at or after `at`.
    fn literal_run_end(&self, at: usize) -> usize {
        self.slots[at..]
            .iter()
            .position(|s| s.is_placeholder())
            .map_or(self.slots.len(), |p| at + p)
    }

    /// Whether a literal before `end` could never have been typed as data.
    fn untypeable_literal_before(&self, end: usize) -> bool {
        self.slots[..end]
            .iter()
            .any(|s| matches!(*s, Slot::Literal(l) if !self.allowed.accepts(l)))
    }

    /// Number of leading input chars that sit where the pattern expects
    /// them: literals in literal slots, acceptable data in placeholders.
    fn aligned_prefix(&self, input: &str) -> usize {
        input
            .chars()
            .zip(&self.slots)
            .take_while(|&(c, slot)| match *slot {
                Slot::Literal(literal) => c == literal,
                placeholder => {
                    let c = self.transform.map_or(c, |t| t.apply(c));
                    self.allowed.accepts(c) && placeholder.accepts(c)
                }
            })
            .count()
    }

    /// Formats `input`, mapping `caret` from `input` onto the result.
    pub fn format(&self, input: &str, caret: Option<usize>) -> MaskResult {
        // (offset in input, normalised char)
        let cleaned: Vec<(usize, char)> = input
            .chars()
            .enumerate()
            .filter(|(_, c)| self.allowed.accepts(*c))
            .map(|(i, c)| (i, self.transform.map_or(c, |t| t.apply(c))))
            .collect();

        let input_len = caret::char_len(input);
        let aligned = self.aligned_prefix(input);

        let mut formatted = String::new();
        let mut raw = String::new();
        let mut pending = String::new();
        let mut data_offsets = Vec::with_capacity(self.max_length);
        let mut next = 0;

        for (at, slot) in self.slots.iter().enumerate() {
            if data_offsets.len() == self.max_length {
                break;
            }

            match *slot {
                Slot::Literal(literal) => {
                    // Input already laid out like the pattern carries its
                    // literals in place; anything else is data. A prefix made
                    // only of typeable chars needs data after it to count.
                    let run_end = self.literal_run_end(at);
                    if aligned >= run_end
                        && (input_len > run_end || self.untypeable_literal_before(run_end))
                        && cleaned.get(next).is_some_and(|&(offset, _)| offset == at)
                    {
                        next += 1;
                    }
                    pending.push(literal);
                }
                placeholder => {
                    while next < cleaned.len() && !placeholder.accepts(cleaned[next].1) {
                        next += 1;
                    }
                    let Some(&(offset, c)) = cleaned.get(next) else {
                        break;
                    };
                    next += 1;

                    formatted.push_str(&pending);
                    pending.clear();
                    formatted.push(c);
                    raw.push(c);
                    data_offsets.push(offset);
                }
            }
        }

        let caret = caret.map(|at| {
            let n = data_offsets.iter().filter(|&&offset| offset < at).count();
            if n == 0 {
                let home = self.slots.iter().position(|s| s.is_placeholder()).unwrap_or(0);
                home.min(caret::char_len(&formatted))
            } else {
                caret::offset_after_data(&formatted, n, |i, _| self.is_data_slot(i))
            }
        });

        MaskResult {
            raw,
            formatted,
            caret,
            ..MaskResult::default()
        }
    }

    /// Raw value held by a formatted string.
    pub fn parse(&self, formatted: &str) -> String {
        self.format(formatted, None).raw
    }

    /// Runs the validator against the raw data, or requires every
    /// placeholder to be filled when there is none.
    pub fn validate(&self, raw: &str) -> bool {
        let data = self.format(raw, None).raw;
        match &self.validator {
            Some(validator) => validator(&data),
            None => data.chars().count() == self.max_length,
        }
    }

    pub fn is_data_char(&self, c: char) -> bool {
        self.allowed.accepts(c) && self.slots.iter().any(|s| s.accepts(c))
    }
}

/// Handler around one fixed pattern.
#[derive(Debug, Clone)]
pub struct PatternMask {
    id: String,
    pattern: FormatPattern,
}

impl PatternMask {
    pub fn new(id: &str, pattern: FormatPattern) -> Self {
        Self {
            id: id.to_string(),
            pattern,
        }
    }

    pub fn pattern(&self) -> &FormatPattern {
        &self.pattern
    }
}

impl MaskHandler for PatternMask {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, input: &str, caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        self.pattern.format(input, caret)
    }

    fn parse(&self, formatted: &str, _options: Option<&MaskOptions>) -> String {
        self.pattern.parse(formatted)
    }

    fn validate(&self, raw: &str, _options: Option<&MaskOptions>) -> bool {
        self.pattern.validate(raw)
    }

    fn is_data_char(&self, c: char, _options: Option<&MaskOptions>) -> bool {
        self.pattern.is_data_char(c)
    }
}

/// Resolves the pattern a runtime-configured mask should use.
///
/// A broken definition is logged and yields `None`, which callers turn into
/// pass-through behavior.
fn runtime_pattern(id: &str, options: &MaskOptions) -> Option<FormatPattern> {
    match FormatPattern::from_options(options) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            warn!("mask '{}' falling back to pass-through: {}", id, err);
            None
        }
    }
}

/// Serial-number mask, `AAA-####` unless options supply another pattern.
#[derive(Debug, Clone)]
pub struct SerialMask {
    default: FormatPattern,
}

impl SerialMask {
    pub const ID: &'static str = "serial";
    pub const DEFAULT_PATTERN: &'static str = "AAA-####";

    pub fn new() -> Self {
        let default = FormatPattern::new(Self::DEFAULT_PATTERN)
            .expect("Valid serial pattern")
            .with_transform(Transform::Uppercase);
        Self { default }
    }

    /// Pattern in effect for `options`; `None` means pass-through.
    fn resolve(&self, options: Option<&MaskOptions>) -> Option<FormatPattern> {
        match options {
            Some(options) if options.pattern.is_some() => {
                let mut options = options.clone();
                options.transform.get_or_insert(Transform::Uppercase);
                runtime_pattern(Self::ID, &options)
            }
            _ => Some(self.default.clone()),
        }
    }
}

impl Default for SerialMask {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskHandler for SerialMask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn apply(&self, input: &str, caret: Option<usize>, options: Option<&MaskOptions>) -> MaskResult {
        match self.resolve(options) {
            Some(pattern) => pattern.format(input, caret),
            None => MaskResult::passthrough(input),
        }
    }

    fn parse(&self, formatted: &str, options: Option<&MaskOptions>) -> String {
        match self.resolve(options) {
            Some(pattern) => pattern.parse(formatted),
            None => formatted.to_string(),
        }
    }

    fn validate(&self, raw: &str, options: Option<&MaskOptions>) -> bool {
        self.resolve(options).map_or(true, |p| p.validate(raw))
    }

    fn is_data_char(&self, c: char, options: Option<&MaskOptions>) -> bool {
        self.resolve(options).map_or(c.is_alphanumeric(), |p| p.is_data_char(c))
    }
}

/// Fully user-defined pattern taken from `options.pattern`.
///
/// Without a usable pattern the mask is a pass-through.
#[derive(Debug, Clone, Default)]
pub struct CustomPatternMask;

impl CustomPatternMask {
    pub const ID: &'static str = "pattern";

    pub fn new() -> Self {
        Self
    }

    fn resolve(options: Option<&MaskOptions>) -> Option<FormatPattern> {
        options.and_then(|options| runtime_pattern(Self::ID, options))
    }
}

impl MaskHandler for CustomPatternMask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn apply(&self, input: &str, caret: Option<usize>, options: Option<&MaskOptions>) -> MaskResult {
        match Self::resolve(options) {
            Some(pattern) => pattern.format(input, caret),
            None => MaskResult::passthrough(input),
        }
    }

    fn parse(&self, formatted: &str, options: Option<&MaskOptions>) -> String {
        match Self::resolve(options) {
            Some(pattern) => pattern.parse(formatted),
            None => formatted.to_string(),
        }
    }

    fn validate(&self, raw: &str, options: Option<&MaskOptions>) -> bool {
        Self::resolve(options).map_or(true, |p| p.validate(raw))
    }

    fn is_data_char(&self, c: char, options: Option<&MaskOptions>) -> bool {
        Self::resolve(options).map_or(c.is_alphanumeric(), |p| p.is_data_char(c))
    }
}

/// Predefined pattern masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `MM/DD/YYYY`
    Date,
    /// `HH:MM`, 24-hour
    Time,
    /// US social security number
    Ssn,
    /// ZIP or ZIP+4
    Zip,
    LicensePlate,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Date,
        Preset::Time,
        Preset::Ssn,
        Preset::Zip,
        Preset::LicensePlate,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Ssn => "ssn",
            Self::Zip => "zip",
            Self::LicensePlate => "license-plate",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.id() == id)
    }

    pub fn pattern_source(self) -> &'static str {
        match self {
            Self::Date => "##/##/####",
            Self::Time => "##:##",
            Self::Ssn => "###-##-####",
            Self::Zip => "#####-####",
            Self::LicensePlate => "XXX-XXXX",
        }
    }

    pub fn format_pattern(self) -> FormatPattern {
        let pattern = FormatPattern::new(self.pattern_source()).expect("Valid preset pattern");
        match self {
            Self::Date => pattern.with_validator(valid_date),
            Self::Time => pattern.with_validator(valid_time),
            Self::Ssn => pattern.with_validator(valid_ssn),
            Self::Zip => pattern.with_validator(|raw: &str| raw.len() == 5 || raw.len() == 9),
            Self::LicensePlate => pattern.with_transform(Transform::Uppercase),
        }
    }

    pub fn handler(self) -> PatternMask {
        PatternMask::new(self.id(), self.format_pattern())
    }
}

fn valid_date(raw: &str) -> bool {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{4})$").expect("Valid date regex"));

    PATTERN.captures(raw).is_some_and(|caps| {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        (1..=12).contains(&month) && (1..=31).contains(&day)
    })
}

fn valid_time(raw: &str) -> bool {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})$").expect("Valid time regex"));

    PATTERN.captures(raw).is_some_and(|caps| {
        let hours: u32 = caps[1].parse().unwrap_or(99);
        let minutes: u32 = caps[2].parse().unwrap_or(99);
        hours < 24 && minutes < 60
    })
}

fn valid_ssn(raw: &str) -> bool {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d{3})(\d{2})(\d{4})$").expect("Valid SSN regex"));

    PATTERN.captures(raw).is_some_and(|caps| {
        let (area, group, serial) = (&caps[1], &caps[2], &caps[3]);
        area != "000"
            && area != "666"
            && !area.starts_with('9')
            && group != "00"
            && serial != "0000"
    })
}
