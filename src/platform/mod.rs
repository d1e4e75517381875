// ── Platform abstraction layer ────────────────────────────────────────────────
//
// The OS-facing half of the viewer.  No `unsafe` lives here; all Win32 FFI is
// confined to the `win32` sub-module and never leaks outward.  The window
// controller, files, editor seam and settings above this layer are plain Rust
// and build on every target.

#[cfg(windows)]
pub mod win32;
