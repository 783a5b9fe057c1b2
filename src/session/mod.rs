//! Edit-session controller.
//!
//! An [`EditSession`] sits between one live text field and the registry.
//! Every edit is a fresh reformat through the configured mask; there is no
//! separate "committed" state. Caret placement is handed to the host as a
//! pending value to apply on its next paint, because writing a value into a
//! field usually resets the caret to the end in the same update.

pub mod config;

pub use config::{MaskConfig, MaskKind};

use crate::caret;
use crate::error::{InputMaskError, InputMaskResult};
use crate::mask::{MaskHandler, MaskOptions, MaskResult, Meta};
use crate::registry::MaskRegistry;
use log::trace;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet mounted.
    Uninitialized,
    /// Holding a formatted value; every edit stays here.
    Formatted,
}

/// Payload delivered to change observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueChange {
    pub raw: String,
    pub formatted: String,
    pub meta: Meta,
}

impl From<&MaskResult> for ValueChange {
    fn from(result: &MaskResult) -> Self {
        Self {
            raw: result.raw.clone(),
            formatted: result.formatted.clone(),
            meta: result.meta.clone(),
        }
    }
}

type Observer<'r> = Box<dyn FnMut(&ValueChange) + 'r>;

/// Masking state for one input element.
pub struct EditSession<'r> {
    registry: &'r MaskRegistry,
    config: Option<MaskConfig>,
    state: SessionState,
    current: MaskResult,
    pending_caret: Option<usize>,
    observers: Vec<Observer<'r>>,
}

impl fmt::Debug for EditSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("current", &self.current)
            .field("pending_caret", &self.pending_caret)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<'r> EditSession<'r> {
    /// Creates a session; `None` configures no masking at all.
    pub fn new(registry: &'r MaskRegistry, config: Option<MaskConfig>) -> Self {
        Self {
            registry,
            config,
            state: SessionState::Uninitialized,
            current: MaskResult::default(),
            pending_caret: None,
            observers: Vec::new(),
        }
    }

    /// Registers a callback run after every edit.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&ValueChange) + 'r,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn value(&self) -> &MaskResult {
        &self.current
    }

    pub fn raw(&self) -> &str {
        &self.current.raw
    }

    pub fn formatted(&self) -> &str {
        &self.current.formatted
    }

    pub fn meta(&self) -> &Meta {
        &self.current.meta
    }

    fn options(&self) -> Option<&MaskOptions> {
        self.config.as_ref().and_then(|c| c.options.as_ref())
    }

    /// Handler for this session, resolved fresh on every call so that
    /// registry changes take effect on the next edit.
    fn handler(&self) -> Option<Arc<dyn MaskHandler>> {
        self.config
            .as_ref()
            .and_then(|config| self.registry.get(&config.mask_id))
    }

    fn run(&self, input: &str, caret: Option<usize>) -> MaskResult {
        match self.handler() {
            Some(handler) => handler.apply(input, caret, self.options()),
            None => MaskResult::passthrough(input),
        }
    }

    /// Mounts the session, formatting `initial` once when present.
    ///
    /// Observers are not notified; the initial value is not a user edit.
    pub fn mount(&mut self, initial: Option<&str>) -> &MaskResult {
        if let Some(initial) = initial {
            self.current = self.run(initial, None);
        }
        self.state = SessionState::Formatted;
        self.pending_caret = None;
        &self.current
    }

    /// Seeds the session from an externally formatted value, such as a
    /// server-provided default.
    pub fn reseed_formatted(&mut self, formatted: &str) -> &MaskResult {
        let raw = match self.handler() {
            Some(handler) => handler.parse(formatted, self.options()),
            None => formatted.to_string(),
        };
        self.mount(Some(&raw))
    }

    /// Reformats after the field's text changed to `input` with the caret at
    /// `caret` (a char offset into `input`).
    pub fn handle_change(&mut self, input: &str, caret: Option<usize>) -> &MaskResult {
        let result = self.run(input, caret);
        trace!(
            "edit {:?} @ {:?} -> {:?} @ {:?}",
            input,
            caret,
            result.formatted,
            result.caret
        );

        // the latest edit's caret wins over one the host never drained
        self.pending_caret = result.caret;
        self.current = result;
        self.state = SessionState::Formatted;

        let change = ValueChange::from(&self.current);
        for observer in &mut self.observers {
            observer(&change);
        }
        &self.current
    }

    /// Replaces `selection` (char offsets into the formatted value) with
    /// `pasted` and reformats.
    ///
    /// # Errors
    /// Fails when the selection starts after it ends.
    pub fn handle_paste(&mut self, selection: Range<usize>, pasted: &str) -> InputMaskResult<&MaskResult> {
        if selection.start > selection.end {
            return Err(InputMaskError::input(
                "selection",
                format!("start {} is after end {}", selection.start, selection.end),
            ));
        }

        let chars: Vec<char> = self.current.formatted.chars().collect();
        let end = selection.end.min(chars.len());
        let start = selection.start.min(end);

        let mut input: String = chars[..start].iter().collect();
        input.push_str(pasted);
        input.extend(&chars[end..]);

        let caret = start + caret::char_len(pasted);
        Ok(self.handle_change(&input, Some(caret)))
    }

    fn is_data(&self, handler: Option<&Arc<dyn MaskHandler>>, c: char) -> bool {
        handler.map_or(true, |h| h.is_data_char(c, self.options()))
    }

    /// Backspace at `caret`, skipping over literals so that the key always
    /// removes a data character.
    pub fn handle_backspace(&mut self, caret: usize) -> &MaskResult {
        let handler = self.handler();
        let chars: Vec<char> = self.current.formatted.chars().collect();
        let caret = caret.min(chars.len());

        let target = (0..caret).rev().find(|&i| self.is_data(handler.as_ref(), chars[i]));
        match target {
            Some(i) => {
                let input: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
                self.handle_change(&input, Some(i))
            }
            None => {
                self.pending_caret = Some(caret);
                &self.current
            }
        }
    }

    /// Forward delete at `caret`, skipping over literals.
    pub fn handle_delete(&mut self, caret: usize) -> &MaskResult {
        let handler = self.handler();
        let chars: Vec<char> = self.current.formatted.chars().collect();
        let caret = caret.min(chars.len());

        let target = (caret..chars.len()).find(|&i| self.is_data(handler.as_ref(), chars[i]));
        match target {
            Some(i) => {
                let input: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
                self.handle_change(&input, Some(caret))
            }
            None => {
                self.pending_caret = Some(caret);
                &self.current
            }
        }
    }

    /// Caret the host should apply on its next paint, if any.
    pub fn pending_caret(&self) -> Option<usize> {
        self.pending_caret
    }

    /// Takes the pending caret, leaving none behind.
    pub fn take_pending_caret(&mut self) -> Option<usize> {
        self.pending_caret.take()
    }

    /// Runs the mask's validator on the current raw value.
    pub fn is_valid(&self) -> bool {
        self.handler()
            .map_or(true, |h| h.validate(&self.current.raw, self.options()))
    }
}
