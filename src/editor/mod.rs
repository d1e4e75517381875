// ── Editor component abstraction ──────────────────────────────────────────────
//
// `TextBuffer` is the seam between the window controller and whatever
// editing widget backs it (`ScintillaView` on Windows, an in-memory buffer in
// tests).  Offsets at this seam always count characters, never bytes.

#[cfg(windows)]
pub mod scintilla;

use std::fmt;

/// The text-editing widget's document.
pub(crate) trait TextBuffer {
    /// Replace the whole document.
    fn set_text(&mut self, text: &str);
    /// The whole document.
    fn text(&self) -> String;
    /// Move the caret to a character offset (clamped to the document end).
    fn place_cursor(&mut self, offset: usize);
    /// Caret position as a character offset from the start of the document.
    fn cursor_offset(&self) -> usize;
    /// Line and column of the caret.  Called on every caret move, so it must
    /// not copy the document.
    fn cursor_position(&self) -> CursorPosition;
}

// ── Cursor position ───────────────────────────────────────────────────────────

/// 1-based line and column of the caret, as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CursorPosition {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl CursorPosition {
    /// Position of character offset `offset` within `text`.
    ///
    /// Offsets past the end are treated as the end of the text.
    pub(crate) fn at_offset(text: &str, offset: usize) -> Self {
        Self::after(text.chars().take(offset))
    }

    /// Position immediately after the characters in `prefix`.
    ///
    /// `\n`, `\r\n` and a lone `\r` each end a line.
    pub(crate) fn after(prefix: impl IntoIterator<Item = char>) -> Self {
        let mut line = 1;
        let mut column = 1;
        let mut prev = None;
        for ch in prefix {
            match ch {
                // second half of a CRLF pair: the break was already counted
                '\n' if prev == Some('\r') => {}
                '\n' | '\r' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
            prev = Some(ch);
        }
        Self { line, column }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
