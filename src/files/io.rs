// ── Worker-thread file I/O ────────────────────────────────────────────────────
//
// Each request runs on its own short-lived thread.  The thread never touches
// UI state: it performs the blocking call and hands an `IoCompletion` to the
// sink, which is responsible for getting it back onto the UI thread.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
    sync::{mpsc, Arc},
    thread,
};

use super::{FileHandle, FileIo, IoCompletion};

/// Receives completions from worker threads.
pub(crate) trait CompletionSink: Send + Sync + 'static {
    fn deliver(&self, completion: IoCompletion);
}

impl CompletionSink for mpsc::Sender<IoCompletion> {
    fn deliver(&self, completion: IoCompletion) {
        // A closed receiver means nobody is waiting for the result any more.
        let _ = self.send(completion);
    }
}

/// The production [`FileIo`]: one worker thread per request.
pub(crate) struct ThreadedIo<S> {
    sink: Arc<S>,
}

impl<S: CompletionSink> ThreadedIo<S> {
    pub(crate) fn new(sink: S) -> Self {
        Self { sink: Arc::new(sink) }
    }

    /// Run `job` on a worker thread.  If the thread cannot be spawned the
    /// failure is delivered as the completion so the caller still hears back.
    fn spawn<F>(&self, name: &str, job: F, on_spawn_error: impl FnOnce(io::Error) -> IoCompletion)
    where
        F: FnOnce() -> IoCompletion + Send + 'static,
    {
        let sink = Arc::clone(&self.sink);
        let spawned = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || sink.deliver(job()));
        if let Err(e) = spawned {
            tracing::warn!(error = %e, "could not spawn {name} thread");
            self.sink.deliver(on_spawn_error(e));
        }
    }
}

impl<S: CompletionSink> FileIo for ThreadedIo<S> {
    fn read_all(&self, file: FileHandle) {
        tracing::debug!(path = %file.path().display(), "read requested");
        let fallback = file.clone();
        self.spawn(
            "file-read",
            move || {
                let result = fs::read(file.path());
                IoCompletion::Read { file, result }
            },
            move |e| IoCompletion::Read { file: fallback, result: Err(e) },
        );
    }

    fn write_all(&self, file: FileHandle, bytes: Vec<u8>) {
        tracing::debug!(path = %file.path().display(), len = bytes.len(), "write requested");
        let fallback = file.clone();
        self.spawn(
            "file-write",
            move || {
                let result = replace_contents(file.path(), &bytes);
                IoCompletion::Write { file, result }
            },
            move |e| IoCompletion::Write { file: fallback, result: Err(e) },
        );
    }
}

// ── Atomic replace ────────────────────────────────────────────────────────────

/// Overwrite `path` with `bytes`.
///
/// The data is written to a temporary file in the destination directory and
/// renamed over the target, so a failed write never leaves a truncated file.
/// An existing target keeps its permissions.
pub(crate) fn replace_contents(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    match fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
