//! Lookup table from mask id to handler.
//!
//! Registration and removal are configuration-time operations. Lookups take
//! a shared lock only long enough to clone the handler's `Arc`, so handlers
//! always run without the registry locked.

use crate::error::InputMaskResult;
use crate::mask::{
    CreditCardMask, CurrencyMask, CustomPatternMask, FormatPattern, MaskHandler, MaskOptions,
    MaskResult, PatternMask, PhoneMask, Preset, SerialMask,
};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type HandlerMap = HashMap<String, Arc<dyn MaskHandler>>;

/// String-keyed set of mask handlers, at most one per id.
#[derive(Default)]
pub struct MaskRegistry {
    handlers: RwLock<HandlerMap>,
}

impl fmt::Debug for MaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskRegistry")
            .field("ids", &self.list())
            .finish()
    }
}

impl MaskRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in mask.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(PhoneMask::new());
        registry.register(CurrencyMask::new());
        registry.register(CreditCardMask::new());
        registry.register(SerialMask::new());
        registry.register(CustomPatternMask::new());
        for preset in Preset::ALL {
            registry.register(preset.handler());
        }
        registry
    }

    /// Process-wide registry, seeded with the built-ins on first use.
    pub fn global() -> &'static MaskRegistry {
        static GLOBAL: Lazy<MaskRegistry> = Lazy::new(MaskRegistry::with_builtins);
        &GLOBAL
    }

    fn read(&self) -> RwLockReadGuard<'_, HandlerMap> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HandlerMap> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `handler` under its id, replacing and returning any previous one.
    pub fn register<H>(&self, handler: H) -> Option<Arc<dyn MaskHandler>>
    where
        H: MaskHandler + 'static,
    {
        self.register_shared(Arc::new(handler))
    }

    pub fn register_shared(&self, handler: Arc<dyn MaskHandler>) -> Option<Arc<dyn MaskHandler>> {
        let id = handler.id().to_string();
        let previous = self.write().insert(id.clone(), handler);
        debug!(
            "registered mask '{}'{}",
            id,
            if previous.is_some() { " (replaced)" } else { "" }
        );
        previous
    }

    /// Compiles `pattern` and registers it under `id`.
    ///
    /// # Errors
    /// Fails when the pattern definition is malformed; nothing is registered.
    pub fn register_pattern(&self, id: &str, pattern: &str) -> InputMaskResult<()> {
        let pattern = FormatPattern::new(pattern)?;
        self.register(PatternMask::new(id, pattern));
        Ok(())
    }

    /// Removes the handler for `id`, if any.
    pub fn unregister(&self, id: &str) -> Option<Arc<dyn MaskHandler>> {
        let removed = self.write().remove(id);
        if removed.is_some() {
            debug!("unregistered mask '{}'", id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn MaskHandler>> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Applies the mask registered as `id`, or passes `input` through
    /// untouched when there is none.
    pub fn apply(
        &self,
        id: &str,
        input: &str,
        caret: Option<usize>,
        options: Option<&MaskOptions>,
    ) -> MaskResult {
        match self.get(id) {
            Some(handler) => handler.apply(input, caret, options),
            None => {
                debug!("no mask registered as '{}', passing input through", id);
                MaskResult::passthrough(input)
            }
        }
    }

    /// Parses with the mask registered as `id`; unknown ids return the input.
    pub fn parse(&self, id: &str, formatted: &str, options: Option<&MaskOptions>) -> String {
        self.get(id)
            .map_or_else(|| formatted.to_string(), |h| h.parse(formatted, options))
    }

    /// Validates with the mask registered as `id`; unknown ids accept anything.
    pub fn validate(&self, id: &str, raw: &str, options: Option<&MaskOptions>) -> bool {
        self.get(id).map_or(true, |h| h.validate(raw, options))
    }
}
