//! Caret mapping between formatted views of the same data.
//!
//! Every mask renders an ordered sequence of data characters interleaved
//! with literals. When the value is reformatted the literals move, so a raw
//! character offset is meaningless across the edit. What survives is the
//! number of data characters to the left of the caret: count them in the old
//! text, then find the slot after that many data characters in the new one.
//!
//! All offsets are in `char`s, not bytes.

/// Length of `text` in `char`s.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Clamps `caret` to `0..=char_len(text)`.
pub fn clamp(text: &str, caret: usize) -> usize {
    caret.min(char_len(text))
}

/// Counts the data characters strictly before `caret`.
///
/// `is_data` receives the char offset and the character so that callers
/// whose literals can look like data (a `1` in `+1 (###)`) can classify by
/// position instead of by character class.
pub fn data_before<F>(text: &str, caret: usize, mut is_data: F) -> usize
where
    F: FnMut(usize, char) -> bool,
{
    text.chars()
        .take(caret)
        .enumerate()
        .filter(|&(i, c)| is_data(i, c))
        .count()
}

/// Returns the offset immediately after the `n`-th data character.
///
/// `n == 0` maps to offset 0; handlers that want a different home position
/// (after an opening parenthesis, say) special-case it themselves. When
/// `text` holds fewer than `n` data characters the caret lands at the end.
pub fn offset_after_data<F>(text: &str, n: usize, mut is_data: F) -> usize
where
    F: FnMut(usize, char) -> bool,
{
    if n == 0 {
        return 0;
    }

    let mut seen = 0;
    for (i, c) in text.chars().enumerate() {
        if is_data(i, c) {
            seen += 1;
            if seen == n {
                return i + 1;
            }
        }
    }
    char_len(text)
}

/// Maps `caret` in `from` to the equivalent position in `to`.
pub fn remap<F, G>(from: &str, caret: usize, to: &str, is_from_data: F, is_to_data: G) -> usize
where
    F: FnMut(usize, char) -> bool,
    G: FnMut(usize, char) -> bool,
{
    let n = data_before(from, caret, is_from_data);
    offset_after_data(to, n, is_to_data)
}

/// Position-blind digit classifier.
pub fn is_digit(_: usize, c: char) -> bool {
    c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_before_counts_digits_only() {
        assert_eq!(data_before("(555) 12", 8, is_digit), 5);
        assert_eq!(data_before("(555) 12", 1, is_digit), 0);
        assert_eq!(data_before("(555) 12", 100, is_digit), 5);
    }

    #[test]
    fn test_offset_after_data() {
        assert_eq!(offset_after_data("(555) 123-4567", 3, is_digit), 4);
        assert_eq!(offset_after_data("(555) 123-4567", 4, is_digit), 7);
        assert_eq!(offset_after_data("(555) 123-4567", 0, is_digit), 0);
        assert_eq!(offset_after_data("(555) 1", 9, is_digit), 7);
    }

    #[test]
    fn test_remap_across_inserted_literals() {
        // caret after the 4th digit of a bare run lands after the 4th digit
        // once parentheses and a space have been inserted
        assert_eq!(remap("5551", 4, "(555) 1", is_digit, is_digit), 7);
    }

    #[test]
    fn test_positional_classifier() {
        // the leading "1" is a literal here, only offsets >= 4 carry data
        let is_slot = |i: usize, _c: char| i >= 4;
        assert_eq!(offset_after_data("+1 (555", 1, is_slot), 5);
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        assert_eq!(char_len("€1"), 2);
        assert_eq!(data_before("€1", 2, is_digit), 1);
        assert_eq!(clamp("€1", 9), 2);
    }
}
