// ── Window controller ─────────────────────────────────────────────────────────
//
// A single `WindowController` is created when the main window is created and
// owned by it for the window's lifetime.  All calls happen on the UI thread;
// file I/O finishes on worker threads and comes back through
// `on_io_complete`.  There is no global mutable state.

use crate::{
    editor::TextBuffer,
    error::{Result, ViewerError},
    files::{FileHandle, FileIo, FilePicker, IoCompletion},
};

/// Window title before any document is loaded.
pub(crate) const APP_TITLE: &str = "Text Viewer";

/// The parts of the window the controller writes to besides the buffer.
pub(crate) trait WindowChrome {
    fn set_title(&mut self, title: &str);
    /// Text of the cursor-position label.
    fn set_status(&mut self, text: &str);
}

/// Whether a file has been loaded into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentState {
    NoDocument,
    /// `title` is what the window title was set to on load.
    Loaded { title: String },
}

pub(crate) struct WindowController<B, C> {
    buffer: B,
    chrome: C,
    state: DocumentState,
    /// Offset the status label was last rendered for.
    shown_offset: Option<usize>,
}

impl<B: TextBuffer, C: WindowChrome> WindowController<B, C> {
    pub(crate) fn new(buffer: B, mut chrome: C) -> Self {
        chrome.set_title(APP_TITLE);
        let mut this = Self {
            buffer,
            chrome,
            state: DocumentState::NoDocument,
            shown_offset: None,
        };
        this.cursor_moved();
        this
    }

    // ── open ──────────────────────────────────────────────────────────────────

    /// The `open` action: pick a file and start reading it.
    pub(crate) fn open(&mut self, picker: &dyn FilePicker, io: &dyn FileIo) {
        match picker.pick_open() {
            Some(file) => {
                tracing::info!(path = %file.path().display(), "opening");
                io.read_all(file);
            }
            None => tracing::debug!("open cancelled"),
        }
    }

    /// Apply a finished read: replace the buffer on success, otherwise keep
    /// the current buffer and title.
    fn open_file_complete(&mut self, file: FileHandle, result: std::io::Result<Vec<u8>>) -> Result<()> {
        let bytes = result.map_err(|source| ViewerError::Read {
            path: file.path().to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| ViewerError::Decode {
            path: file.path().to_path_buf(),
            source,
        })?;

        self.buffer.set_text(&text);
        self.buffer.place_cursor(0);

        let title = file.title();
        self.chrome.set_title(&title);
        tracing::info!(path = %file.path().display(), chars = text.chars().count(), "loaded");
        self.state = DocumentState::Loaded { title };

        // the whole text changed, so the label must be recomputed even if the
        // caret was already at offset 0
        self.shown_offset = None;
        self.cursor_moved();
        Ok(())
    }

    // ── save-as ───────────────────────────────────────────────────────────────

    /// The `save-as` action: pick a destination and start writing the buffer.
    ///
    /// An empty buffer is never written.
    pub(crate) fn save_as(&mut self, picker: &dyn FilePicker, io: &dyn FileIo) {
        let Some(file) = picker.pick_save() else {
            tracing::debug!("save cancelled");
            return;
        };
        let text = self.buffer.text();
        if text.is_empty() {
            tracing::debug!(path = %file.path().display(), "buffer empty; nothing to save");
            return;
        }
        tracing::info!(path = %file.path().display(), "saving");
        io.write_all(file, text.into_bytes());
    }

    fn save_file_complete(&mut self, file: FileHandle, result: std::io::Result<()>) -> Result<()> {
        result.map_err(|source| ViewerError::Write {
            name: file.title(),
            source,
        })?;
        tracing::info!(path = %file.path().display(), "saved");
        Ok(())
    }

    // ── completions ───────────────────────────────────────────────────────────

    /// Dispatch a finished I/O request.  Failures are reported on the log and
    /// otherwise dropped.
    pub(crate) fn on_io_complete(&mut self, completion: IoCompletion) {
        let outcome = match completion {
            IoCompletion::Read { file, result } => self.open_file_complete(file, result),
            IoCompletion::Write { file, result } => self.save_file_complete(file, result),
        };
        if let Err(e) = outcome {
            tracing::error!("{e}");
        }
    }

    // ── cursor ────────────────────────────────────────────────────────────────

    /// The buffer reported a caret change; refresh the status label.
    pub(crate) fn cursor_moved(&mut self) {
        let offset = self.buffer.cursor_offset();
        if self.shown_offset == Some(offset) {
            return;
        }
        self.shown_offset = Some(offset);
        let pos = self.buffer.cursor_position();
        self.chrome.set_status(&pos.to_string());
    }

    /// Title of the loaded document, used to pre-fill the save dialog.
    pub(crate) fn document_title(&self) -> Option<&str> {
        match &self.state {
            DocumentState::NoDocument => None,
            DocumentState::Loaded { title } => Some(title),
        }
    }

    #[cfg(test)]
    fn state(&self) -> &DocumentState {
        &self.state
    }

    #[cfg(test)]
    fn buffer(&self) -> &B {
        &self.buffer
    }

    #[cfg(test)]
    fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    #[cfg(test)]
    fn chrome(&self) -> &C {
        &self.chrome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        fs, io,
        sync::mpsc,
        time::Duration,
    };

    use super::*;
    use crate::{editor::CursorPosition, files::ThreadedIo};

    // ── fakes ─────────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MemoryBuffer {
        text: String,
        cursor: usize,
        /// How many times the whole document was copied out.
        copies: Cell<usize>,
    }

    impl TextBuffer for MemoryBuffer {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_owned();
            self.cursor = self.cursor.min(self.text.chars().count());
        }

        fn text(&self) -> String {
            self.copies.set(self.copies.get() + 1);
            self.text.clone()
        }

        fn place_cursor(&mut self, offset: usize) {
            self.cursor = offset.min(self.text.chars().count());
        }

        fn cursor_offset(&self) -> usize {
            self.cursor
        }

        fn cursor_position(&self) -> CursorPosition {
            CursorPosition::at_offset(&self.text, self.cursor)
        }
    }

    #[derive(Default)]
    struct RecordingChrome {
        title: String,
        status: String,
        status_updates: usize,
    }

    impl WindowChrome for RecordingChrome {
        fn set_title(&mut self, title: &str) {
            self.title = title.to_owned();
        }

        fn set_status(&mut self, text: &str) {
            self.status = text.to_owned();
            self.status_updates += 1;
        }
    }

    /// Answers dialogs from a script; an exhausted script means "cancel".
    #[derive(Default)]
    struct ScriptedPicker {
        answers: RefCell<VecDeque<Option<FileHandle>>>,
    }

    impl ScriptedPicker {
        fn answering(file: Option<FileHandle>) -> Self {
            let picker = Self::default();
            picker.answers.borrow_mut().push_back(file);
            picker
        }
    }

    impl FilePicker for ScriptedPicker {
        fn pick_open(&self) -> Option<FileHandle> {
            self.answers.borrow_mut().pop_front().flatten()
        }

        fn pick_save(&self) -> Option<FileHandle> {
            self.answers.borrow_mut().pop_front().flatten()
        }
    }

    #[derive(Debug, PartialEq)]
    enum Request {
        Read(FileHandle),
        Write(FileHandle, Vec<u8>),
    }

    /// Records requests instead of performing them.
    #[derive(Default)]
    struct RecordingIo {
        requests: RefCell<Vec<Request>>,
    }

    impl FileIo for RecordingIo {
        fn read_all(&self, file: FileHandle) {
            self.requests.borrow_mut().push(Request::Read(file));
        }

        fn write_all(&self, file: FileHandle, bytes: Vec<u8>) {
            self.requests.borrow_mut().push(Request::Write(file, bytes));
        }
    }

    type TestController = WindowController<MemoryBuffer, RecordingChrome>;

    fn controller() -> TestController {
        WindowController::new(MemoryBuffer::default(), RecordingChrome::default())
    }

    fn controller_with_text(text: &str, cursor: usize) -> TestController {
        let mut c = controller();
        c.buffer_mut().set_text(text);
        c.buffer_mut().place_cursor(cursor);
        c.cursor_moved();
        c
    }

    fn read_ok(path: &str, bytes: &[u8]) -> IoCompletion {
        IoCompletion::Read {
            file: FileHandle::new(path),
            result: Ok(bytes.to_vec()),
        }
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn new_window_shows_app_title_and_origin() {
        let c = controller();
        assert_eq!(c.chrome().title, APP_TITLE);
        assert_eq!(c.chrome().status, "Ln 1, Col 1");
        assert_eq!(c.state(), &DocumentState::NoDocument);
    }

    // ── open ──────────────────────────────────────────────────────────────────

    #[test]
    fn open_requests_a_read_of_the_picked_file() {
        let mut c = controller();
        let io = RecordingIo::default();
        c.open(&ScriptedPicker::answering(Some(FileHandle::new("/docs/a.txt"))), &io);
        assert_eq!(*io.requests.borrow(), vec![Request::Read(FileHandle::new("/docs/a.txt"))]);
    }

    #[test]
    fn cancelled_open_does_nothing() {
        let mut c = controller_with_text("keep me", 3);
        let io = RecordingIo::default();
        c.open(&ScriptedPicker::answering(None), &io);
        assert!(io.requests.borrow().is_empty());
        assert_eq!(c.buffer().text, "keep me");
    }

    #[test]
    fn successful_read_replaces_buffer_and_resets_cursor() {
        for content in ["", "one line", "two\nlines\n", "ünïcödé ✓\r\nmixed\rbreaks"] {
            let mut c = controller_with_text("previous document", 9);
            c.on_io_complete(read_ok("/nowhere/file.txt", content.as_bytes()));

            assert_eq!(c.buffer().text, content);
            assert_eq!(c.buffer().cursor, 0);
            assert_eq!(c.chrome().status, "Ln 1, Col 1");
        }
    }

    #[test]
    fn title_falls_back_to_basename_without_metadata() {
        let mut c = controller();
        c.on_io_complete(read_ok("/nowhere/report.md", b"# hi"));
        assert_eq!(c.chrome().title, "report.md");
        assert_eq!(
            c.state(),
            &DocumentState::Loaded {
                title: "report.md".to_owned()
            }
        );
    }

    #[test]
    fn title_uses_display_name_of_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "x").expect("write");

        let mut c = controller();
        c.on_io_complete(IoCompletion::Read {
            file: FileHandle::new(&path),
            result: Ok(b"x".to_vec()),
        });
        assert_eq!(c.chrome().title, "notes.txt");
    }

    #[test]
    fn failed_read_leaves_buffer_and_title_untouched() {
        let mut c = controller_with_text("still here", 2);
        c.on_io_complete(IoCompletion::Read {
            file: FileHandle::new("/nowhere/gone.txt"),
            result: Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        });
        assert_eq!(c.buffer().text, "still here");
        assert_eq!(c.buffer().cursor, 2);
        assert_eq!(c.chrome().title, APP_TITLE);
        assert_eq!(c.state(), &DocumentState::NoDocument);
    }

    #[test]
    fn invalid_utf8_leaves_buffer_untouched() {
        let mut c = controller_with_text("still here", 2);
        c.on_io_complete(read_ok("/nowhere/blob.bin", &[b'o', b'k', 0xC3, 0x28]));
        assert_eq!(c.buffer().text, "still here");
        assert_eq!(c.chrome().title, APP_TITLE);
        assert_eq!(c.state(), &DocumentState::NoDocument);
    }

    #[test]
    fn decode_failure_is_reported_with_path() {
        let file = FileHandle::new("/nowhere/blob.bin");
        let mut c = controller();
        let err = c
            .open_file_complete(file, Ok(vec![0xFF, 0xFE]))
            .expect_err("not UTF-8");
        assert!(matches!(err, ViewerError::Decode { .. }));
        assert!(err.to_string().contains("/nowhere/blob.bin"));
    }

    #[test]
    fn second_open_discards_first_document() {
        let mut c = controller();
        c.on_io_complete(read_ok("/nowhere/first.txt", b"first"));
        c.on_io_complete(read_ok("/nowhere/second.txt", b"second"));
        assert_eq!(c.buffer().text, "second");
        assert_eq!(c.chrome().title, "second.txt");
        assert_eq!(c.document_title(), Some("second.txt"));
    }

    // ── save-as ───────────────────────────────────────────────────────────────

    #[test]
    fn save_writes_buffer_as_utf8() {
        let mut c = controller_with_text("héllo\n", 0);
        let io = RecordingIo::default();
        c.save_as(&ScriptedPicker::answering(Some(FileHandle::new("/out/h.txt"))), &io);
        assert_eq!(
            *io.requests.borrow(),
            vec![Request::Write(FileHandle::new("/out/h.txt"), "héllo\n".as_bytes().to_vec())]
        );
    }

    #[test]
    fn saving_empty_buffer_performs_no_write() {
        let mut c = controller();
        let io = RecordingIo::default();
        c.save_as(&ScriptedPicker::answering(Some(FileHandle::new("/out/empty.txt"))), &io);
        assert!(io.requests.borrow().is_empty());
    }

    #[test]
    fn cancelled_save_does_nothing() {
        let mut c = controller_with_text("data", 0);
        let io = RecordingIo::default();
        c.save_as(&ScriptedPicker::answering(None), &io);
        assert!(io.requests.borrow().is_empty());
    }

    #[test]
    fn failed_write_names_destination_and_keeps_state() {
        let mut c = controller_with_text("data", 0);
        let err = c
            .save_file_complete(
                FileHandle::new("/readonly/target.txt"),
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            )
            .expect_err("write failed");
        assert!(err.to_string().starts_with("Unable to save target.txt"));

        c.on_io_complete(IoCompletion::Write {
            file: FileHandle::new("/readonly/target.txt"),
            result: Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        });
        assert_eq!(c.buffer().text, "data");
        assert_eq!(c.state(), &DocumentState::NoDocument);
    }

    // ── cursor ────────────────────────────────────────────────────────────────

    #[test]
    fn cursor_on_second_line_start() {
        let c = controller_with_text("alpha\nbeta", 6);
        assert_eq!(c.chrome().status, "Ln 2, Col 1");
    }

    #[test]
    fn unchanged_offset_does_not_rerender() {
        let mut c = controller_with_text("alpha\nbeta", 8);
        let before = c.chrome().status_updates;
        c.cursor_moved();
        c.cursor_moved();
        assert_eq!(c.chrome().status_updates, before);

        c.buffer_mut().place_cursor(2);
        c.cursor_moved();
        assert_eq!(c.chrome().status, "Ln 1, Col 3");
        assert_eq!(c.chrome().status_updates, before + 1);
    }

    #[test]
    fn caret_moves_never_copy_the_document() {
        let text = "0123456789\n".repeat(10_000);
        let mut c = controller_with_text(&text, 0);
        let before = c.buffer().copies.get();
        for offset in (0..text.len()).step_by(997) {
            c.buffer_mut().place_cursor(offset);
            c.cursor_moved();
        }
        assert_eq!(c.buffer().copies.get(), before);
        assert_eq!(c.chrome().status, "Ln 9971, Col 1");
    }

    // ── end to end, real files ────────────────────────────────────────────────

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn save_then_reopen_roundtrips_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roundtrip.txt");
        let (tx, rx) = mpsc::channel();
        let io = ThreadedIo::new(tx);

        let text = "line one\r\nline two ✓\n\ttabbed";
        let mut writer = controller_with_text(text, 0);
        writer.save_as(&ScriptedPicker::answering(Some(FileHandle::new(&path))), &io);
        writer.on_io_complete(rx.recv_timeout(TIMEOUT).expect("write completion"));

        let mut reader = controller();
        reader.open(&ScriptedPicker::answering(Some(FileHandle::new(&path))), &io);
        reader.on_io_complete(rx.recv_timeout(TIMEOUT).expect("read completion"));

        assert_eq!(reader.buffer().text, text);
        assert_eq!(reader.buffer().cursor, 0);
        assert_eq!(reader.chrome().title, "roundtrip.txt");
    }

    #[test]
    fn opening_missing_file_keeps_previous_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tx, rx) = mpsc::channel();
        let io = ThreadedIo::new(tx);

        let mut c = controller_with_text("previous", 4);
        c.open(
            &ScriptedPicker::answering(Some(FileHandle::new(dir.path().join("missing.txt")))),
            &io,
        );
        c.on_io_complete(rx.recv_timeout(TIMEOUT).expect("read completion"));

        assert_eq!(c.buffer().text, "previous");
        assert_eq!(c.buffer().cursor, 4);
    }
}
