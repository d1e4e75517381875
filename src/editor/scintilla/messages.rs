// ── Scintilla message constants ───────────────────────────────────────────────
//
// Source of truth: Scintilla.h (https://www.scintilla.org/ScintillaDoc.html)
// Only the subset the viewer sends is listed here.
// All SCI_* values are sent via SendMessageW(hwnd_sci, SCI_*, wparam, lparam).

// ── Code page ─────────────────────────────────────────────────────────────────

/// Set the code page.  Pass `SC_CP_UTF8` as WPARAM.
pub(super) const SCI_SETCODEPAGE: u32 = 2037;
/// UTF-8 code page value for `SCI_SETCODEPAGE`.
pub(super) const SC_CP_UTF8: usize = 65001;

// ── Document content ──────────────────────────────────────────────────────────

/// Replace all document text.  WPARAM=0; LPARAM=null-terminated UTF-8 string.
pub(super) const SCI_SETTEXT: u32 = 2181;
/// Return byte count of the document (excluding null terminator).
pub(super) const SCI_GETLENGTH: u32 = 2006;
/// Copy document bytes.  WPARAM=buffer len (incl. null); LPARAM=buffer ptr.
pub(super) const SCI_GETTEXT: u32 = 2182;
/// Forget undo history, so a freshly loaded file cannot be undone to blank.
pub(super) const SCI_EMPTYUNDOBUFFER: u32 = 2175;

// ── Caret / position ──────────────────────────────────────────────────────────

/// Return the byte position of the caret.
pub(super) const SCI_GETCURRENTPOS: u32 = 2008;
/// Move the caret to a byte position (also scrolls into view).
pub(super) const SCI_GOTOPOS: u32 = 2025;
/// Count characters between two byte positions.  WPARAM=start; LPARAM=end.
pub(super) const SCI_COUNTCHARACTERS: u32 = 2633;
/// Zero-based line containing byte position `WPARAM`.
pub(super) const SCI_LINEFROMPOSITION: u32 = 2166;
/// Byte position of the start of line `WPARAM`.
pub(super) const SCI_POSITIONFROMLINE: u32 = 2167;
/// Byte position `LPARAM` characters after byte position `WPARAM`;
/// returns 0 when that runs past either end of the document.
pub(super) const SCI_POSITIONRELATIVE: u32 = 2670;

// ── Notifications (pub(crate) for WM_NOTIFY dispatch in window.rs) ───────────

/// Caret moved, selection changed, or content changed.
pub(crate) const SCN_UPDATEUI: u32 = 2007;
