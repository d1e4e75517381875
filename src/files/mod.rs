// ── File handles and the services that produce / consume them ────────────────
//
// Pure Rust; no Win32 imports.  The dialog service (`FilePicker`) hands out
// `FileHandle`s, the I/O service (`FileIo`) reads or writes them and reports
// back through `IoCompletion`.

pub(crate) mod io;

use std::path::{Path, PathBuf};

pub(crate) use io::{CompletionSink, ThreadedIo};

// ── FileHandle ────────────────────────────────────────────────────────────────

/// An opaque reference to a storage location picked by the user.
///
/// Used once per operation (read on open, write on save) and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The raw last path component, lossily converted for display.
    ///
    /// Falls back to the whole path when there is no file-name component
    /// (e.g. a drive root).
    pub(crate) fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The human-readable name of the file, if its metadata can be queried.
    ///
    /// `None` when the location does not exist (yet), cannot be stat'ed, or
    /// its name is not valid Unicode.
    pub(crate) fn display_name(&self) -> Option<String> {
        std::fs::metadata(&self.path).ok()?;
        self.path.file_name()?.to_str().map(str::to_owned)
    }

    /// Label used for the window title and for save-failure reports.
    pub(crate) fn title(&self) -> String {
        self.display_name().unwrap_or_else(|| self.basename())
    }
}

// ── Services ──────────────────────────────────────────────────────────────────

/// Native file-selection dialogs.  `None` means the user cancelled.
pub(crate) trait FilePicker {
    fn pick_open(&self) -> Option<FileHandle>;
    fn pick_save(&self) -> Option<FileHandle>;
}

/// Asynchronous whole-file I/O.
///
/// Both calls return immediately; the outcome is delivered later as an
/// [`IoCompletion`] on the UI thread.
pub(crate) trait FileIo {
    fn read_all(&self, file: FileHandle);
    fn write_all(&self, file: FileHandle, bytes: Vec<u8>);
}

/// The outcome of one `FileIo` request.
#[derive(Debug)]
pub(crate) enum IoCompletion {
    Read {
        file: FileHandle,
        result: std::io::Result<Vec<u8>>,
    },
    Write {
        file: FileHandle,
        result: std::io::Result<()>,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
