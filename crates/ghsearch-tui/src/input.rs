//! Single-line query editor.
//!
//! Cursor positions are in char units; display columns are computed with
//! `unicode-width` only when rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    cursor: usize,
}

impl SearchInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts `text` at the cursor. Line breaks are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if cleaned.is_empty() {
            return;
        }
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert_str(byte_idx, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Applies a key press. Returns `true` if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        let before = self.text.len();
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.text.is_empty() {
                    return false;
                }
                self.clear();
                return true;
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut buf = [0; 4];
                self.insert_str(ch.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => {}
        }
        self.text.len() != before
    }

    /// Returns the slice of text that fits in `width` columns with the cursor
    /// visible, and the cursor's column within that slice.
    pub fn visible_window(&self, width: usize) -> (String, u16) {
        if width == 0 {
            return (String::new(), 0);
        }

        let chars: Vec<char> = self.text.chars().collect();
        let mut start = 0;
        let mut cursor_col: usize = chars[..self.cursor].iter().map(|c| char_width(*c)).sum();
        // Keep one column free for the cursor itself.
        while cursor_col >= width && start < self.cursor {
            cursor_col -= char_width(chars[start]);
            start += 1;
        }

        let mut used = 0;
        let visible: String = chars[start..]
            .iter()
            .take_while(|c| {
                used += char_width(**c);
                used <= width
            })
            .collect();

        (visible, u16::try_from(cursor_col).unwrap_or(u16::MAX))
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut SearchInput, text: &str) {
        for ch in text.chars() {
            input.input(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = SearchInput::default();
        type_str(&mut input, "abc");
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 3);

        assert!(input.input(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_cursor_movement_does_not_change_text() {
        let mut input = SearchInput::default();
        type_str(&mut input, "abc");

        assert!(!input.input(key(KeyCode::Left)));
        assert!(!input.input(key(KeyCode::Home)));
        assert_eq!(input.cursor(), 0);
        assert!(!input.input(key(KeyCode::Backspace)));

        assert!(input.input(key(KeyCode::Delete)));
        assert_eq!(input.text(), "bc");
        assert!(!input.input(key(KeyCode::End)));
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte_chars() {
        let mut input = SearchInput::default();
        type_str(&mut input, "héo");
        input.input(key(KeyCode::Left));
        type_str(&mut input, "l");
        assert_eq!(input.text(), "hélo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = SearchInput::default();
        type_str(&mut input, "octo");

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(input.input(ctrl_u));
        assert!(input.is_empty());
        assert!(!input.input(ctrl_u));
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = SearchInput::default();
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert!(!input.input(ctrl_p));
        assert!(input.is_empty());
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut input = SearchInput::default();
        input.insert_str("tor\nvalds\r\n");
        assert_eq!(input.text(), "torvalds");
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_visible_window_scrolls_to_cursor() {
        let mut input = SearchInput::default();
        type_str(&mut input, "abcdefgh");

        let (visible, cursor_x) = input.visible_window(5);
        assert_eq!(visible, "efgh");
        assert_eq!(cursor_x, 4);

        input.input(key(KeyCode::Home));
        let (visible, cursor_x) = input.visible_window(5);
        assert_eq!(visible, "abcde");
        assert_eq!(cursor_x, 0);
    }
}
