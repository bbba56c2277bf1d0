// async_walk.rs
use crate::{
    entry::PathEntry,
    error::SiftError,
    lister::DirectoryLister,
    options::ListingOptions,
    sync::{self, Listing},
};
use async_stream::stream;
use futures::Stream;
use std::{path::PathBuf, sync::Arc};
use tokio::{sync::mpsc, task};

/// Batches buffered between the worker and a slow consumer
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Item yielded by [`listing_stream`]
#[derive(Clone, Debug)]
pub enum ListingEvent {
    /// Non-empty matches of one directory, in pre-order
    Batch(Vec<PathEntry>),
    /// Final listing; always the last item, yielded exactly once
    Complete(Listing),
}

impl ListingEvent {
    pub fn is_complete(&self) -> bool {
        matches!(self, ListingEvent::Complete(_))
    }
}

/// Creates a stream of batches followed by a single completion event
///
/// The walk starts on first poll and runs on Tokio's blocking pool, so the
/// stream must be polled inside a Tokio runtime. Dropping the stream cancels
/// the walk at the next directory boundary, exactly like the cancellation
/// check in `options`. Callbacks set in `options` fire on the worker before
/// the matching event is sent.
///
/// If the worker panics, the completion carries a [`SiftError::Worker`]
/// and the entries of every batch yielded before the panic.
pub fn listing_stream(
    lister: Arc<dyn DirectoryLister>,
    root: PathBuf,
    options: ListingOptions,
) -> impl Stream<Item = ListingEvent> {
    stream! {
        let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let mut options = options;
        let receiver_gone = tx.clone();
        let user_check = options.cancellation.take();
        options.cancellation = Some(Arc::new(move || {
            receiver_gone.is_closed() || user_check.as_ref().is_some_and(|check| check())
        }));

        let join_handle = task::spawn_blocking(move || {
            let listing = sync::run(&*lister, &root, options, &mut |batch| {
                tx.blocking_send(ListingEvent::Batch(batch.to_vec())).is_ok()
            });
            // Receiver may already be gone
            let _ = tx.blocking_send(ListingEvent::Complete(listing));
        });

        let mut delivered = Vec::new();
        while let Some(event) = rx.recv().await {
            if let ListingEvent::Batch(batch) = &event {
                delivered.extend(batch.iter().cloned());
            }
            yield event;
        }

        if let Err(e) = join_handle.await {
            yield ListingEvent::Complete(Listing {
                entries: delivered,
                error: Some(SiftError::Worker(format!("Task failed: {}", e))),
            });
        }
    }
}
