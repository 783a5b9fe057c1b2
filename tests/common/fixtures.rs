//! Input corpora and throwaway handlers.

use inputmask::{MaskHandler, MaskOptions, MaskResult};

/// Awkward inputs every mask must survive.
pub fn hostile_inputs() -> Vec<String> {
    vec![
        String::new(),
        " ".to_string(),
        ".".to_string(),
        "-".to_string(),
        "abc".to_string(),
        "5".to_string(),
        "555.123.4567".to_string(),
        "(555) 123-4567".to_string(),
        "+1 (555) 123-4567".to_string(),
        "1,234.56".to_string(),
        "123.456789".to_string(),
        ".99".to_string(),
        "1.2.3".to_string(),
        "00012".to_string(),
        "abc1234".to_string(),
        "1a2b3c4d".to_string(),
        "4111 1111 1111 1111".to_string(),
        "3782-822463-10005".to_string(),
        "12/31/2024".to_string(),
        "🔢📱☎️ 42".to_string(),
        "\n\r\t".to_string(),
        "9".repeat(200),
        "a".repeat(200),
    ]
}

/// Caret positions to try for `input`: start, middle, end and past the end.
pub fn caret_positions(input: &str) -> Vec<Option<usize>> {
    let len = input.chars().count();
    vec![None, Some(0), Some(len / 2), Some(len), Some(len + 5)]
}

/// Handler that upper-cases its input, used for registry isolation tests.
#[derive(Debug, Clone)]
pub struct ShoutMask {
    pub id: String,
}

impl ShoutMask {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl MaskHandler for ShoutMask {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, input: &str, caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        MaskResult {
            raw: input.to_uppercase(),
            formatted: input.to_uppercase(),
            caret,
            ..MaskResult::default()
        }
    }
}

/// Handler whose `apply` is broken.
#[derive(Debug, Clone, Default)]
pub struct PanickingMask;

impl MaskHandler for PanickingMask {
    fn id(&self) -> &str {
        "panics"
    }

    fn apply(&self, _input: &str, _caret: Option<usize>, _options: Option<&MaskOptions>) -> MaskResult {
        panic!("broken mask");
    }
}
