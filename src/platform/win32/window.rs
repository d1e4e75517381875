// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class and create the top-level window with the
//     stored geometry.
//   • Host the Scintilla view and the status bar; lay them out on WM_SIZE.
//   • Route menu / accelerator commands to the window controller.
//   • Carry I/O completions from worker threads back onto the UI thread.
//   • Keep the geometry settings bound to the window and flush them on close.
//   • Expose a safe error-dialog helper for use by main().
//
// Per-window state lives in a boxed `WindowState` whose pointer is stored in
// GWLP_USERDATA.  Handlers only ever take a shared reference to it; mutation
// goes through `RefCell`.  A modal dialog runs a nested message loop while the
// controller is borrowed, so every handler uses `try_borrow_mut` and I/O
// completions that arrive meanwhile wait in `pending`.

#![allow(unsafe_code)]

use std::{cell::RefCell, collections::VecDeque, ffi::c_void, path::PathBuf};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, BOOL, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{GetStockObject, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{InitCommonControlsEx, ICC_BAR_CLASSES, INITCOMMONCONTROLSEX, NMHDR},
            HiDpi::{SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2},
            WindowsAndMessaging::{
                AppendMenuW, CreateAcceleratorTableW, CreateMenu, CreateWindowExW,
                DefWindowProcW, DestroyAcceleratorTable, DestroyWindow, DispatchMessageW,
                GetClientRect, GetMessageW, GetWindowLongPtrW, GetWindowRect, LoadCursorW,
                LoadIconW, MessageBoxW, MoveWindow, PostMessageW, PostQuitMessage,
                RegisterClassExW, SendMessageW, SetMenu, SetWindowLongPtrW, SetWindowTextW,
                ShowWindow, TranslateAcceleratorW, TranslateMessage, UpdateWindow, ACCEL,
                CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, FCONTROL, FSHIFT, FVIRTKEY, GWLP_USERDATA,
                HACCEL, HMENU, IDC_ARROW, IDI_APPLICATION, MB_ICONERROR, MB_OK, MF_POPUP,
                MF_SEPARATOR, MF_STRING, MSG, SIZE_MAXIMIZED, SIZE_RESTORED, SW_SHOW,
                SW_SHOWMAXIMIZED, WINDOW_EX_STYLE, WINDOW_STYLE, WM_APP, WM_CLOSE, WM_COMMAND,
                WM_DESTROY, WM_NOTIFY, WM_SIZE, WNDCLASSEXW, WS_CHILD, WS_OVERLAPPEDWINDOW,
                WS_VISIBLE,
            },
        },
    },
};

use crate::{
    app::{WindowChrome, WindowController, APP_TITLE},
    editor::scintilla::{messages::SCN_UPDATEUI, SciDll, ScintillaView},
    error::{Result, ViewerError},
    files::{CompletionSink, IoCompletion, ThreadedIo},
    platform::win32::dialogs::Win32Picker,
    settings::{SettingsStore, WindowGeometry},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("TextViewerMainWindow");

// ── Menu command IDs ──────────────────────────────────────────────────────────

const IDM_FILE_OPEN: u16 = 1001;
const IDM_FILE_SAVE_AS: u16 = 1002;
const IDM_FILE_EXIT: u16 = 1003;
const IDM_HELP_ABOUT: u16 = 9001;

/// Posted by worker threads; LPARAM is a `Box<IoCompletion>` raw pointer.
const WM_APP_IO_COMPLETE: u32 = WM_APP + 1;

// ── Status bar (commctrl.h) ───────────────────────────────────────────────────

const STATUS_CLASS: PCWSTR = w!("msctls_statusbar32");
/// WM_USER + 11.  WPARAM = part index; LPARAM = null-terminated UTF-16.
const SB_SETTEXTW: u32 = 0x040B;
const SBARS_SIZEGRIP: u32 = 0x0100;

// ── Public API ────────────────────────────────────────────────────────────────

/// Register the main window class, create the window, and drive the message
/// loop until the user closes the application.
pub(crate) fn run() -> Result<()> {
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    // SAFETY: must precede all window creation; single call at process start.
    // Failure (already set by a manifest) leaves the process DPI mode as is.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_BAR_CLASSES,
    };
    // SAFETY: icc is fully initialised and outlives the call.
    if !unsafe { InitCommonControlsEx(&icc) }.as_bool() {
        return Err(last_error("InitCommonControlsEx"));
    }

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }.map_err(ViewerError::from)?;
    let hinstance = HINSTANCE(hmodule.0);

    let settings = SettingsStore::open().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to settings in the working directory");
        SettingsStore::open_at(PathBuf::from("text-viewer-settings.json"))
    });
    let geometry = settings.geometry();

    register_class(hinstance)?;
    let hwnd = create_window(hinstance, geometry)?;

    let state = WindowState::build(hwnd, hinstance, settings)?;
    // SAFETY: hwnd is our top-level window.  Ownership of the box moves into
    // GWLP_USERDATA and is taken back exactly once, in WM_DESTROY.
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(Box::new(state)) as isize);
    }

    let cmd = if geometry.maximized { SW_SHOWMAXIMIZED } else { SW_SHOW };
    // SAFETY: hwnd was just created and is valid.  Both return values
    // (previous visibility, success) are intentionally ignored.
    unsafe {
        let _ = ShowWindow(hwnd, cmd);
        let _ = UpdateWindow(hwnd);
    }
    layout(hwnd);

    #[cfg(debug_assertions)]
    tracing::debug!("window visible in {:.1} ms", t0.elapsed().as_secs_f64() * 1000.0);

    let accel = build_accelerators()?;
    let result = message_loop(hwnd, accel);
    // SAFETY: accel came from CreateAcceleratorTableW and is destroyed once.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    result
}

/// Show a modal error dialog with the given message.
///
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);
    let title_wide = wide(&format!("{APP_TITLE}: Fatal Error"));

    // SAFETY: msg_wide and title_wide are valid null-terminated UTF-16 strings
    // that remain allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Per-window state ──────────────────────────────────────────────────────────

/// Field order is drop order: the controller (and its Scintilla view) goes
/// before `_sci_dll` releases the DLL.
struct WindowState {
    controller: RefCell<WindowController<ScintillaView, Win32Chrome>>,
    pending: RefCell<VecDeque<IoCompletion>>,
    settings: RefCell<SettingsStore>,
    io: ThreadedIo<WindowSink>,
    editor: HWND,
    status: HWND,
    _sci_dll: SciDll,
}

impl WindowState {
    fn build(hwnd: HWND, hinstance: HINSTANCE, settings: SettingsStore) -> Result<Self> {
        let sci_dll = SciDll::load()?;
        let view = ScintillaView::create(hwnd, hinstance, &sci_dll)?;
        let editor = view.hwnd();

        // SAFETY: STATUS_CLASS is registered by InitCommonControlsEx; hwnd and
        // hinstance are valid.  The status bar positions itself on WM_SIZE.
        let status = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                STATUS_CLASS,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WINDOW_STYLE(SBARS_SIZEGRIP),
                0,
                0,
                0,
                0,
                hwnd,
                HMENU::default(),
                hinstance,
                None,
            )
        }
        .map_err(ViewerError::from)?;

        let chrome = Win32Chrome { window: hwnd, status };
        Ok(Self {
            controller: RefCell::new(WindowController::new(view, chrome)),
            pending: RefCell::new(VecDeque::new()),
            settings: RefCell::new(settings),
            io: ThreadedIo::new(WindowSink { hwnd: hwnd.0 as isize }),
            editor,
            status,
            _sci_dll: sci_dll,
        })
    }

    fn open(&self, hwnd: HWND) {
        let picker = Win32Picker {
            owner: hwnd,
            default_name: String::new(),
        };
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.open(&picker, &self.io);
        }
        self.drain_pending();
    }

    fn save_as(&self, hwnd: HWND) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            let picker = Win32Picker {
                owner: hwnd,
                default_name: controller.document_title().unwrap_or_default().to_owned(),
            };
            controller.save_as(&picker, &self.io);
        }
        self.drain_pending();
    }

    /// Apply queued completions unless the controller is busy further up
    /// the stack; in that case the outer handler drains them afterwards.
    fn drain_pending(&self) {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(completion) => controller.on_io_complete(completion),
                None => break,
            }
        }
    }

    fn cursor_moved(&self) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.cursor_moved();
        }
    }

    /// Two-way geometry binding, window → settings direction.
    fn record_geometry(&self, hwnd: HWND, size_kind: u32) {
        let mut settings = self.settings.borrow_mut();
        let recorded = match size_kind {
            SIZE_MAXIMIZED => settings.record_maximized(true),
            SIZE_RESTORED => {
                let mut rc = RECT::default();
                // SAFETY: hwnd is valid; rc is a valid out-pointer.
                match unsafe { GetWindowRect(hwnd, &mut rc) } {
                    Ok(()) => settings
                        .record_maximized(false)
                        .and_then(|()| settings.record_size(rc.right - rc.left, rc.bottom - rc.top)),
                    Err(_) => Ok(()),
                }
            }
            // minimized: keep the last restored / maximized state
            _ => Ok(()),
        };
        if let Err(e) = recorded {
            tracing::warn!(error = %e, "window geometry not recorded");
        }
    }

    fn flush_settings(&self) {
        if let Err(e) = self.settings.borrow_mut().flush() {
            tracing::warn!(error = %e, "settings not saved");
        }
    }
}

/// Borrow the state attached to `hwnd`, if it has been attached yet.
///
/// # Safety
/// Must be called on the UI thread from inside `wnd_proc`; the returned
/// reference must not outlive the current message.
unsafe fn state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
    // SAFETY: GWLP_USERDATA is either 0 or the pointer stored in `run()`,
    // which stays valid until WM_DESTROY resets it to 0.
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const WindowState;
    unsafe { ptr.as_ref() }
}

// ── Chrome ────────────────────────────────────────────────────────────────────

/// Title bar and status bar of the main window.
struct Win32Chrome {
    window: HWND,
    status: HWND,
}

impl WindowChrome for Win32Chrome {
    fn set_title(&mut self, title: &str) {
        let title = wide(title);
        // SAFETY: window is valid; title is null-terminated and outlives the call.
        unsafe {
            let _ = SetWindowTextW(self.window, PCWSTR(title.as_ptr()));
        }
    }

    fn set_status(&mut self, text: &str) {
        let text = wide(text);
        // SAFETY: status is a valid status-bar window; text outlives the call.
        // Part 0, default drawing style.
        unsafe {
            let _ = SendMessageW(self.status, SB_SETTEXTW, WPARAM(0), LPARAM(text.as_ptr() as isize));
        }
    }
}

// ── Completion sink ───────────────────────────────────────────────────────────

/// Posts completions to the main window's queue.
///
/// Holds the HWND as an integer: window handles may be used from any thread
/// with PostMessageW, but the raw-pointer newtype is not `Send`.
struct WindowSink {
    hwnd: isize,
}

impl CompletionSink for WindowSink {
    fn deliver(&self, completion: IoCompletion) {
        let ptr = Box::into_raw(Box::new(completion));
        // SAFETY: PostMessageW is thread-safe.  On success the pointer is
        // reclaimed by the WM_APP_IO_COMPLETE handler; on failure (window
        // already destroyed) it is reclaimed right here.
        unsafe {
            let posted = PostMessageW(
                HWND(self.hwnd as *mut c_void),
                WM_APP_IO_COMPLETE,
                WPARAM(0),
                LPARAM(ptr as isize),
            );
            if posted.is_err() {
                drop(Box::from_raw(ptr));
                tracing::warn!("I/O completed after the window closed");
            }
        }
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: LoadIconW with IDI_APPLICATION loads a built-in resource.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(ViewerError::from)?;

    // SAFETY: LoadCursorW with IDC_ARROW loads a built-in resource.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(ViewerError::from)?;

    // SAFETY: GetStockObject with WHITE_BRUSH always returns a valid HGDIOBJ;
    // stock brush objects are HBRUSH-compatible.
    let bg_brush = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

/// Create the top-level window at the stored (restored) size.  The
/// maximized flag is applied when the window is first shown.
fn create_window(hinstance: HINSTANCE, geometry: WindowGeometry) -> Result<HWND> {
    let title = wide(APP_TITLE);

    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // HWND::default() (null parent) creates a top-level window.
    // None for lpParam: state is attached after creation.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            geometry.width.max(1),
            geometry.height.max(1),
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
    }
    .map_err(|_| last_error("CreateWindowExW"))?;

    let menu = build_menu()?;
    // SAFETY: hwnd and menu are valid handles.
    unsafe { SetMenu(hwnd, menu) }.map_err(ViewerError::from)?;

    Ok(hwnd)
}

// ── Menu and accelerators ─────────────────────────────────────────────────────

fn build_menu() -> Result<HMENU> {
    // SAFETY: CreateMenu has no preconditions; failures propagate via `?`.
    unsafe {
        let bar = CreateMenu().map_err(ViewerError::from)?;

        // ── File ──────────────────────────────────────────────────────────────
        let file = CreateMenu().map_err(ViewerError::from)?;
        AppendMenuW(file, MF_STRING, IDM_FILE_OPEN as usize, w!("&Open…\tCtrl+O"))
            .map_err(ViewerError::from)?;
        AppendMenuW(file, MF_STRING, IDM_FILE_SAVE_AS as usize, w!("Save &As…\tCtrl+Shift+S"))
            .map_err(ViewerError::from)?;
        AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null()).map_err(ViewerError::from)?;
        AppendMenuW(file, MF_STRING, IDM_FILE_EXIT as usize, w!("E&xit\tAlt+F4"))
            .map_err(ViewerError::from)?;

        // ── Help ──────────────────────────────────────────────────────────────
        let help = CreateMenu().map_err(ViewerError::from)?;
        AppendMenuW(help, MF_STRING, IDM_HELP_ABOUT as usize, w!("&About Text Viewer…"))
            .map_err(ViewerError::from)?;

        // The uIDNewItem parameter for MF_POPUP is the child HMENU cast to usize.
        AppendMenuW(bar, MF_POPUP, file.0 as usize, w!("&File")).map_err(ViewerError::from)?;
        AppendMenuW(bar, MF_POPUP, help.0 as usize, w!("&Help")).map_err(ViewerError::from)?;

        Ok(bar)
    }
}

fn build_accelerators() -> Result<HACCEL> {
    let table = [
        ACCEL {
            fVirt: FVIRTKEY | FCONTROL,
            key: u16::from(b'O'),
            cmd: IDM_FILE_OPEN,
        },
        ACCEL {
            fVirt: FVIRTKEY | FCONTROL | FSHIFT,
            key: u16::from(b'S'),
            cmd: IDM_FILE_SAVE_AS,
        },
    ];
    // SAFETY: table is a valid ACCEL slice; the system copies it.
    unsafe { CreateAcceleratorTableW(&table) }.map_err(ViewerError::from)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            // WM_QUIT
            0 => break,
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessageW call;
                // hwnd and accel are valid for the loop's lifetime.
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            },
        }
    }

    Ok(())
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Status bar along the bottom, editor filling the rest of the client area.
fn layout(hwnd: HWND) {
    // SAFETY: called from the UI thread for a live window.
    let Some(state) = (unsafe { state(hwnd) }) else {
        return;
    };

    let mut client = RECT::default();
    let mut status_rc = RECT::default();
    // SAFETY: all handles are live children of hwnd; the RECTs are valid
    // out-pointers.  The status bar repositions itself on WM_SIZE.
    unsafe {
        let _ = SendMessageW(state.status, WM_SIZE, WPARAM(0), LPARAM(0));
        if GetClientRect(hwnd, &mut client).is_err() || GetWindowRect(state.status, &mut status_rc).is_err() {
            return;
        }
        let status_height = status_rc.bottom - status_rc.top;
        let _ = MoveWindow(
            state.editor,
            0,
            0,
            client.right - client.left,
            (client.bottom - client.top - status_height).max(0),
            BOOL::from(true),
        );
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match msg {
        // ── Lifecycle ─────────────────────────────────────────────────────────
        WM_CLOSE => {
            // WM_DESTROY flushes settings and releases the state.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            // Take back ownership of the state; later messages see no state.
            let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WindowState;
            if !ptr.is_null() {
                // SAFETY: ptr came from Box::into_raw in `run()` and GWLP_USERDATA
                // was just cleared, so this is the only reclaim.
                let state = Box::from_raw(ptr);
                state.flush_settings();
                drop(state);
            }
            PostQuitMessage(0);
            LRESULT(0)
        }

        // ── Layout ────────────────────────────────────────────────────────────
        WM_SIZE => {
            if let Some(state) = state(hwnd) {
                state.record_geometry(hwnd, wparam.0 as u32);
            }
            layout(hwnd);
            LRESULT(0)
        }

        // ── Editor notifications ──────────────────────────────────────────────
        WM_NOTIFY => {
            // SAFETY: for WM_NOTIFY, lparam points to an NMHDR (Scintilla's
            // SCNotification starts with one) valid for this call.
            let hdr = &*(lparam.0 as *const NMHDR);
            if let Some(state) = state(hwnd) {
                if hdr.hwndFrom == state.editor && hdr.code == SCN_UPDATEUI {
                    state.cursor_moved();
                }
            }
            LRESULT(0)
        }

        // ── I/O completions ───────────────────────────────────────────────────
        WM_APP_IO_COMPLETE => {
            // SAFETY: lparam is the Box<IoCompletion> leaked by WindowSink::deliver.
            let completion = Box::from_raw(lparam.0 as *mut IoCompletion);
            if let Some(state) = state(hwnd) {
                state.pending.borrow_mut().push_back(*completion);
                state.drain_pending();
            }
            LRESULT(0)
        }

        // ── Commands ──────────────────────────────────────────────────────────
        WM_COMMAND => {
            // Low word of WPARAM is the command identifier.
            let cmd_id = (wparam.0 & 0xFFFF) as u16;
            let Some(state) = state(hwnd) else {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            };

            match cmd_id {
                IDM_FILE_OPEN => {
                    state.open(hwnd);
                    LRESULT(0)
                }

                IDM_FILE_SAVE_AS => {
                    state.save_as(hwnd);
                    LRESULT(0)
                }

                IDM_FILE_EXIT => {
                    let _ = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
                    LRESULT(0)
                }

                IDM_HELP_ABOUT => {
                    about_dialog(hwnd);
                    LRESULT(0)
                }

                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }

        // Default processing for all unhandled messages.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Helper dialogs ────────────────────────────────────────────────────────────

/// Display the "About" information dialog.
fn about_dialog(hwnd: HWND) {
    let body = wide(concat!(
        "Text Viewer ",
        env!("CARGO_PKG_VERSION"),
        "\n\nOpen, view and save UTF-8 text files.\n\n",
        "Licensed under MIT OR Apache-2.0.",
    ));

    // SAFETY: body is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    unsafe {
        let _ = MessageBoxW(hwnd, PCWSTR(body.as_ptr()), w!("About Text Viewer"), MB_OK);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Null-terminated UTF-16 copy of `s`.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Capture the current Win32 last-error code and wrap it in a `ViewerError`.
///
/// Call immediately after a Win32 function that signals failure: `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> ViewerError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    ViewerError::Win32 {
        function,
        code: code.0,
    }
}
