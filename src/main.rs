// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`   – Win32 / WinAPI FFI
//   • `editor::scintilla` – Scintilla child-window hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Release builds run as a GUI application (no console window).
// Debug builds keep the console so the stderr log layer is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Without a window backend only the tests reach most of the crate.
#![cfg_attr(not(windows), allow(dead_code, unused_imports))]

mod app;
mod editor;
mod error;
mod files;
mod logging;
mod platform;
mod settings;

fn main() {
    // Logging is best effort: the viewer runs without it.
    let log_guard = match logging::init() {
        Ok(guard) => {
            tracing::debug!(log_file = %guard.log_file.display(), "logging initialised");
            Some(guard)
        }
        Err(e) => {
            eprintln!("text-viewer: logging disabled: {e}");
            None
        }
    };

    if let Err(e) = run() {
        tracing::error!("{e}");
        report_fatal(&e.to_string());
        // process::exit skips destructors; flush the log writer first.
        drop(log_guard);
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run() -> error::Result<()> {
    platform::win32::window::run()
}

#[cfg(not(windows))]
fn run() -> error::Result<()> {
    Err(error::ViewerError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no window backend for this platform; text-viewer runs on Windows",
    )))
}

/// Startup failed before or during the message loop.
#[cfg(windows)]
fn report_fatal(message: &str) {
    // A modal error dialog is the only safe output path in a GUI app.
    platform::win32::window::show_error_dialog(message);
}

#[cfg(not(windows))]
fn report_fatal(message: &str) {
    eprintln!("text-viewer: {message}");
}
