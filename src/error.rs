// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  No panics in
// production paths.  Operation failures (open, decode, save) are logged and
// the operation stops; startup failures surface as a modal dialog (see
// `platform::win32::window::show_error_dialog`).

use std::{io, path::PathBuf, string::FromUtf8Error};

/// Every error the viewer can produce.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// Reading a file picked in the open dialog failed.
    #[error("Unable to open {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but its bytes are not UTF-8.
    #[error(
        "Unable to load the contents of {}: the file is not encoded with UTF-8",
        .path.display()
    )]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// Writing the buffer to the save destination failed.
    #[error("Unable to save {name}: {source}")]
    Write {
        /// Display name (or base name) of the destination.
        name: String,
        #[source]
        source: io::Error,
    },

    /// Any other I/O error (log directory, thread spawn, …).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// Convert a windows-crate error (HRESULT) directly into a ViewerError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for ViewerError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_path() {
        let err = ViewerError::Read {
            path: PathBuf::from("/tmp/notes.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "Unable to open /tmp/notes.txt: no such file");
    }

    #[test]
    fn decode_error_names_the_path() {
        let source = String::from_utf8(vec![0xFF]).unwrap_err();
        let err = ViewerError::Decode {
            path: PathBuf::from("/tmp/blob.bin"),
            source,
        };
        assert_eq!(
            err.to_string(),
            "Unable to load the contents of /tmp/blob.bin: the file is not encoded with UTF-8"
        );
    }

    #[test]
    fn win32_error_formats_code_as_hex() {
        let err = ViewerError::Win32 {
            function: "CreateWindowExW",
            code: 5,
        };
        assert_eq!(err.to_string(), "CreateWindowExW failed (error 0x00000005)");
    }
}
