use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

/// Convert a protocol column (UTF-16 code units) to a char index within the
/// line, clamped to the end of the line.
pub(crate) fn char_index_for_utf16(chars: &[char], target_utf16: usize) -> usize {
    let mut seen_utf16 = 0usize;
    let mut index = 0usize;
    for ch in chars {
        let width = ch.len_utf16();
        if seen_utf16 + width > target_utf16 {
            break;
        }
        seen_utf16 += width;
        index += 1;
        if seen_utf16 == target_utf16 {
            break;
        }
    }
    index
}

/// Protocol column (UTF-16 code units) of the given char index.
pub(crate) fn utf16_column(chars: &[char], char_index: usize) -> u32 {
    chars[..char_index.min(chars.len())]
        .iter()
        .map(|c| c.len_utf16() as u32)
        .sum()
}

/// Word under the cursor: a run of alphanumerics and underscores around the
/// given position. Returns the word and its range (UTF-16 columns) on that
/// line.
pub(crate) fn word_at_position(rope: &Rope, position: Position) -> Option<(String, Range)> {
    let line_idx = position.line as usize;
    if line_idx >= rope.len_lines() {
        return None;
    }
    let line = rope.line(line_idx).to_string();
    let chars: Vec<char> = line.chars().collect();

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut start = char_index_for_utf16(&chars, position.character as usize);
    let mut end = start;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }
    if start == end {
        return None;
    }

    let word: String = chars[start..end].iter().collect();
    let range = Range::new(
        Position::new(position.line, utf16_column(&chars, start)),
        Position::new(position.line, utf16_column(&chars, end)),
    );
    Some((word, range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_in_middle_of_line() {
        let rope = Rope::from_str("same => n,Goto(greet)\n");
        let (word, range) = word_at_position(&rope, Position::new(0, 17)).unwrap();
        assert_eq!(word, "greet");
        assert_eq!(range.start.character, 15);
        assert_eq!(range.end.character, 20);
    }

    #[test]
    fn cursor_at_word_edges() {
        let rope = Rope::from_str("exten => 100,1,Answer()\n");
        // At the start of "Answer"
        let (word, _) = word_at_position(&rope, Position::new(0, 15)).unwrap();
        assert_eq!(word, "Answer");
        // At the end of "Answer"
        let (word, _) = word_at_position(&rope, Position::new(0, 21)).unwrap();
        assert_eq!(word, "Answer");
    }

    #[test]
    fn no_word_on_punctuation_or_past_eol() {
        let rope = Rope::from_str("a => b\n");
        assert!(word_at_position(&rope, Position::new(0, 3)).is_none());
        assert!(word_at_position(&rope, Position::new(5, 0)).is_none());
    }

    #[test]
    fn underscores_and_digits_are_word_chars() {
        let rope = Rope::from_str("same => n(play_msg2)\n");
        let (word, _) = word_at_position(&rope, Position::new(0, 12)).unwrap();
        assert_eq!(word, "play_msg2");
    }

    #[test]
    fn non_bmp_chars_count_as_two_columns() {
        // Each emoji occupies two UTF-16 code units, so 'a' starts at
        // protocol column 5 even though it is the fourth char.
        let rope = Rope::from_str("😀😀 a b\n");
        let (word, range) = word_at_position(&rope, Position::new(0, 5)).unwrap();
        assert_eq!(word, "a");
        assert_eq!(range.start.character, 5);
        assert_eq!(range.end.character, 6);

        let (word, range) = word_at_position(&rope, Position::new(0, 7)).unwrap();
        assert_eq!(word, "b");
        assert_eq!(range.start.character, 7);
        assert_eq!(range.end.character, 8);
    }

    #[test]
    fn cursor_inside_surrogate_pair_clamps_to_char_start() {
        let chars: Vec<char> = "😀ab".chars().collect();
        assert_eq!(char_index_for_utf16(&chars, 1), 0);
        assert_eq!(char_index_for_utf16(&chars, 2), 1);
        assert_eq!(char_index_for_utf16(&chars, 99), 3);
        assert_eq!(utf16_column(&chars, 1), 2);
        assert_eq!(utf16_column(&chars, 3), 4);
    }
}
