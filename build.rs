/// Text Viewer build script.
///
/// The window backend is Win32-only. Other targets still build (the
/// toolkit-independent core and its tests compile everywhere) but the binary
/// exits at startup, so say so at build time instead of failing the build.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=text-viewer has no window backend for {target_os:?}; \
             the binary will exit at startup"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");

    // SciLexer.dll is loaded at runtime via LoadLibraryW and must sit next to
    // the executable; nothing is compiled here.
}
