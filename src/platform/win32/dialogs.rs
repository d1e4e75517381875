// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// The Win32 common-dialog APIs behind the `FilePicker` seam.  Each dialog is
// modal: it runs its own message loop until the user confirms or cancels.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::HWND,
        UI::Controls::Dialogs::{
            GetOpenFileNameW, GetSaveFileNameW, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY,
            OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW, OPEN_FILENAME_FLAGS,
        },
    },
};

use crate::files::{FileHandle, FilePicker};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

/// Null-separated (display, pattern) pairs ending with a double null.
const FILTER: &str = "Text Files (*.txt)\0*.txt\0All Files (*.*)\0*.*\0\0";

// ── Picker ────────────────────────────────────────────────────────────────────

/// `FilePicker` backed by `GetOpenFileNameW` / `GetSaveFileNameW`.
pub(crate) struct Win32Picker {
    pub(crate) owner: HWND,
    /// Pre-populates the save dialog's file-name field.
    pub(crate) default_name: String,
}

impl FilePicker for Win32Picker {
    fn pick_open(&self) -> Option<FileHandle> {
        show_dialog(
            self.owner,
            "",
            OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY,
            Dialog::Open,
        )
        .map(FileHandle::new)
    }

    fn pick_save(&self) -> Option<FileHandle> {
        show_dialog(
            self.owner,
            &self.default_name,
            OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST,
            Dialog::Save,
        )
        .map(FileHandle::new)
    }
}

// ── Dialog ────────────────────────────────────────────────────────────────────

enum Dialog {
    Open,
    Save,
}

/// Show one of the common file dialogs.
///
/// Returns the chosen path, or `None` if the user cancelled (or the dialog
/// failed, which Win32 does not distinguish without `CommDlgExtendedError`).
fn show_dialog(
    hwnd_owner: HWND,
    default_name: &str,
    flags: OPEN_FILENAME_FLAGS,
    kind: Dialog,
) -> Option<PathBuf> {
    let mut buf: Vec<u16> = default_name
        .encode_utf16()
        .chain(std::iter::repeat(0))
        .take(PATH_BUF_LEN)
        .collect();
    // always leave room for the terminator
    buf[PATH_BUF_LEN - 1] = 0;

    let filter: Vec<u16> = FILTER.encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: hwnd_owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        Flags: flags,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf` and `filter` outlive this
    // call.  The dialog reads and writes only within the buffers we provided.
    // Called on the UI thread (required for modal dialogs).
    let ok = unsafe {
        match kind {
            Dialog::Open => GetOpenFileNameW(&mut ofn),
            Dialog::Save => GetSaveFileNameW(&mut ofn),
        }
    };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
///
/// Goes through `OsString` so unpaired surrogates survive.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    use std::os::windows::ffi::OsStringExt;

    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    PathBuf::from(std::ffi::OsString::from_wide(&buf[..len]))
}
