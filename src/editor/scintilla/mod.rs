// ── Scintilla child-window hosting ────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── DLL ownership model ───────────────────────────────────────────────────────
//
// `SciDll` owns the single `LoadLibraryW` call for `SciLexer.dll`.  It is
// stored in `WindowState` after the controller that owns the
// `ScintillaView`, so the view (a bare child `HWND`) is dropped first and
// `FreeLibrary` runs once every Scintilla window is gone.
//
// Scintilla works in UTF-8 byte positions; `TextBuffer` speaks characters.
// The conversion is done by Scintilla itself (SCI_COUNTCHARACTERS /
// SCI_POSITIONRELATIVE), and the caret's line comes from Scintilla's line
// index, so the document is never copied just to find the caret.

#![allow(unsafe_code)]

pub mod messages;

use messages::{
    SC_CP_UTF8, SCI_COUNTCHARACTERS, SCI_EMPTYUNDOBUFFER, SCI_GETCURRENTPOS, SCI_GETLENGTH,
    SCI_GETTEXT, SCI_GOTOPOS, SCI_LINEFROMPOSITION, SCI_POSITIONFROMLINE, SCI_POSITIONRELATIVE,
    SCI_SETCODEPAGE, SCI_SETTEXT,
};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HMODULE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::{FreeLibrary, LoadLibraryW},
        UI::WindowsAndMessaging::{
            CreateWindowExW, SendMessageW, HMENU, WINDOW_EX_STYLE, WINDOW_STYLE, WS_CHILD,
            WS_CLIPSIBLINGS, WS_VISIBLE,
        },
    },
};

use crate::{
    editor::{CursorPosition, TextBuffer},
    error::{Result, ViewerError},
};

// ── DLL identity ──────────────────────────────────────────────────────────────

const DLL_NAME: &str = "SciLexer.dll";
const CLASS_NAME: &str = "Scintilla";

// ── SciDll ────────────────────────────────────────────────────────────────────

/// RAII handle to the loaded `SciLexer.dll`.
///
/// Loading the DLL registers the `"Scintilla"` window class.  `FreeLibrary`
/// is called on `Drop`.
pub(crate) struct SciDll(HMODULE);

impl SciDll {
    /// Load `SciLexer.dll` from the application directory.
    pub(crate) fn load() -> Result<Self> {
        let path: Vec<u16> = DLL_NAME.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: path is a valid null-terminated UTF-16 string.
        // LoadLibraryW searches the application directory first on Win10/11.
        let dll = unsafe { LoadLibraryW(PCWSTR(path.as_ptr())) }.map_err(ViewerError::from)?;
        Ok(Self(dll))
    }
}

impl Drop for SciDll {
    fn drop(&mut self) {
        // SAFETY: self.0 was returned by a successful LoadLibraryW and has not
        // been freed since.  The Scintilla child window is destroyed together
        // with its parent before WindowState is dropped.
        unsafe {
            let _ = FreeLibrary(self.0);
        }
    }
}

// ── ScintillaView ─────────────────────────────────────────────────────────────

/// The hosted Scintilla editor child window.
///
/// Does **not** own the `SciLexer.dll` module handle.  The child `HWND` is
/// destroyed automatically by Windows when the parent is destroyed.
pub(crate) struct ScintillaView {
    hwnd: HWND,
}

impl ScintillaView {
    /// Create a visible, zero-size Scintilla child inside `hwnd_parent`.
    ///
    /// `_dll` proves that `SciLexer.dll` is loaded and the `"Scintilla"` class
    /// is registered.  The parent sizes the view on `WM_SIZE`.
    pub(crate) fn create(hwnd_parent: HWND, hinstance: HINSTANCE, _dll: &SciDll) -> Result<Self> {
        let class_wide: Vec<u16> = CLASS_NAME.encode_utf16().chain(std::iter::once(0)).collect();

        // SAFETY: class_wide is null-terminated UTF-16 for the class registered
        // by SciLexer.dll (_dll proves the DLL is loaded).  hwnd_parent and
        // hinstance are valid Win32 handles from WM_CREATE.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class_wide.as_ptr()),
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_CLIPSIBLINGS | WINDOW_STYLE(0x0200_0000), // WS_CLIPCHILDREN
                0,
                0,
                0,
                0,
                hwnd_parent,
                HMENU::default(),
                hinstance,
                None,
            )
        }
        .map_err(|_| {
            // SAFETY: GetLastError reads thread-local state set by the just-
            // failed CreateWindowExW; no Win32 calls between them.
            let code = unsafe { GetLastError().0 };
            ViewerError::Win32 {
                function: "CreateWindowExW (Scintilla)",
                code,
            }
        })?;

        let view = Self { hwnd };
        view.send(SCI_SETCODEPAGE, SC_CP_UTF8, 0);
        Ok(view)
    }

    /// The Scintilla child window handle.  Valid until the parent is destroyed.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn send(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: hwnd is a live Scintilla window for as long as `self` is
        // reachable (the parent owns both).  Every message sent through here
        // passes either plain integers or a pointer the caller keeps alive
        // for the duration of this synchronous call.
        unsafe { SendMessageW(self.hwnd, msg, WPARAM(wparam), LPARAM(lparam)).0 }
    }

    /// Total byte length of the document.
    fn doc_len(&self) -> usize {
        self.send(SCI_GETLENGTH, 0, 0) as usize
    }
}

impl TextBuffer for ScintillaView {
    fn set_text(&mut self, text: &str) {
        let mut buf: Vec<u8> = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text.as_bytes());
        buf.push(0);
        // buf is null-terminated UTF-8 and outlives the call.
        self.send(SCI_SETTEXT, 0, buf.as_ptr() as isize);
        self.send(SCI_EMPTYUNDOBUFFER, 0, 0);
    }

    fn text(&self) -> String {
        let len = self.doc_len();
        let mut buf = vec![0u8; len + 1];
        // buf is len+1 bytes; SCI_GETTEXT writes at most that many.
        self.send(SCI_GETTEXT, len + 1, buf.as_mut_ptr() as isize);
        buf.truncate(len);
        String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    fn place_cursor(&mut self, offset: usize) {
        let pos = match self.send(SCI_POSITIONRELATIVE, 0, offset as isize) {
            // 0 for a non-zero offset means "past the end"
            0 if offset > 0 => self.doc_len(),
            p => p as usize,
        };
        self.send(SCI_GOTOPOS, pos, 0);
    }

    fn cursor_offset(&self) -> usize {
        let pos = self.send(SCI_GETCURRENTPOS, 0, 0);
        self.send(SCI_COUNTCHARACTERS, 0, pos) as usize
    }

    fn cursor_position(&self) -> CursorPosition {
        // Scintilla breaks lines at CR, LF and CRLF, like `CursorPosition::after`.
        // SCI_GETCOLUMN is not used: it expands tabs.
        let pos = self.send(SCI_GETCURRENTPOS, 0, 0);
        let line = self.send(SCI_LINEFROMPOSITION, pos as usize, 0);
        let line_start = self.send(SCI_POSITIONFROMLINE, line as usize, 0);
        let column = self.send(SCI_COUNTCHARACTERS, line_start as usize, pos);
        CursorPosition {
            line: line as usize + 1,
            column: column as usize + 1,
        }
    }
}
