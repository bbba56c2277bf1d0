// worker.rs
use crate::{
    error::SiftError,
    lister::DirectoryLister,
    options::{CompletionHandler, ListingOptions},
    sync::{self, Listing},
};
use std::{
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
    thread,
};

const WORKER_NAME: &str = "dirsift-enumerator";

/// Handle to a background enumeration
///
/// Dropping the handle detaches the worker; the walk still runs to
/// completion (or cancellation) and still invokes its callbacks.
#[derive(Debug)]
pub struct EnumerationHandle {
    thread: Option<thread::JoinHandle<()>>,
}

impl EnumerationHandle {
    /// Whether the worker has finished, including all callbacks
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, thread::JoinHandle::is_finished)
    }

    /// Blocks until the worker has finished
    ///
    /// # Errors
    ///
    /// Returns `SiftError::Worker` if the worker panicked (for example inside
    /// a caller-supplied callback)
    pub fn join(mut self) -> Result<(), SiftError> {
        match self.thread.take() {
            Some(t) => t
                .join()
                .map_err(|_| SiftError::Worker("enumeration worker panicked".into())),
            None => Ok(()),
        }
    }
}

/// Starts `options` on a dedicated worker thread and returns immediately
///
/// If the thread cannot be spawned, the completion callback is invoked on
/// the calling thread with an empty listing and a `Worker` error.
pub(crate) fn spawn(
    lister: Arc<dyn DirectoryLister>,
    root: PathBuf,
    mut options: ListingOptions,
) -> EnumerationHandle {
    let slot: Arc<Mutex<Option<CompletionHandler>>> = Arc::new(Mutex::new(options.on_complete.take()));
    let worker_slot = slot.clone();

    let spawned = thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || {
            options.on_complete = worker_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            sync::list_sync(&*lister, &root, options);
        });

    match spawned {
        Ok(t) => EnumerationHandle { thread: Some(t) },
        Err(e) => {
            tracing::warn!(error = %e, "cannot start enumeration worker");
            let on_complete = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(cb) = on_complete {
                cb(Listing {
                    entries: Vec::new(),
                    error: Some(SiftError::Worker(e.to_string())),
                });
            }
            EnumerationHandle { thread: None }
        }
    }
}
