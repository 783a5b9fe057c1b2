//! Custom assertions for mask invariants.
//!
//! Each assertion names the input that broke the invariant so a failing
//! corpus entry is easy to find.

use inputmask::{caret, MaskHandler, MaskOptions, MaskResult};

/// Asserts that reapplying a mask to its own output changes nothing.
///
/// # Panics
/// Panics if the formatted value or the caret moves on the second pass.
pub fn assert_idempotent(
    handler: &dyn MaskHandler,
    input: &str,
    caret: Option<usize>,
    options: Option<&MaskOptions>,
) -> MaskResult {
    let first = handler.apply(input, caret, options);
    let second = handler.apply(&first.formatted, first.caret, options);
    assert_eq!(
        second.formatted, first.formatted,
        "mask '{}' is not idempotent for input {:?}",
        handler.id(),
        input
    );
    assert_eq!(
        second.caret, first.caret,
        "mask '{}' moved the caret on reapply for input {:?}",
        handler.id(),
        input
    );
    first
}

/// Asserts that a returned caret lies within the formatted value.
///
/// # Panics
/// Panics if the caret is past the end of `formatted`.
pub fn assert_caret_in_bounds(result: &MaskResult, input: &str) {
    if let Some(at) = result.caret {
        let len = caret::char_len(&result.formatted);
        assert!(
            at <= len,
            "caret {} beyond formatted {:?} (len {}) for input {:?}",
            at,
            result.formatted,
            len,
            input
        );
    }
}

/// Asserts that a result is an untouched pass-through of `input`.
///
/// # Panics
/// Panics if raw or formatted differ from the input, or a caret was set.
pub fn assert_passthrough(result: &MaskResult, input: &str) {
    assert_eq!(result.raw, input, "raw should equal input");
    assert_eq!(result.formatted, input, "formatted should equal input");
    assert_eq!(result.caret, None, "pass-through must not move the caret");
}
