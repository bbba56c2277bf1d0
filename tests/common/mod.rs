#![allow(dead_code)]

use dirsift::{DirectoryLister, Listing, ListingOptionsBuilder, PathEntry, SiftError};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory directory tree with injectable failures
///
/// Children are returned in insertion order, which keeps pre-order
/// assertions deterministic.
#[derive(Default)]
pub struct MemLister {
    dirs: HashMap<PathBuf, Vec<PathEntry>>,
    failing: HashSet<PathBuf>,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl MemLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `path`; a trailing `/` marks a directory. Parents must exist.
    pub fn add(mut self, path: &str) -> Self {
        let is_dir = path.ends_with('/');
        let entry = PathEntry::new(path, is_dir);
        if is_dir {
            self.dirs.entry(entry.path().to_path_buf()).or_default();
        }
        if let Some(parent) = entry.path().parent() {
            self.dirs.entry(parent.to_path_buf()).or_default().push(entry);
        }
        self
    }

    /// Makes listing `dir` fail with permission denied
    pub fn fail(mut self, dir: &str) -> Self {
        self.failing.insert(PathBuf::from(dir));
        self
    }

    /// Makes every listing take at least `delay`
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn listed(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl DirectoryLister for MemLister {
    fn list_children(&self, dir: &Path) -> Result<Vec<PathEntry>, SiftError> {
        self.calls.lock().unwrap().push(dir.to_path_buf());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing.contains(dir) {
            return Err(SiftError::Io {
                path: dir.to_path_buf(),
                source: Arc::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            });
        }
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| SiftError::Io {
                path: dir.to_path_buf(),
                source: Arc::new(io::Error::new(io::ErrorKind::NotFound, "no such directory")),
            })
    }
}

/// Collects batches and the completion of one enumeration
pub struct Recorder {
    pub batches: Arc<Mutex<Vec<Vec<PathEntry>>>>,
    completions: Arc<Mutex<usize>>,
    done_rx: mpsc::Receiver<Listing>,
    done_tx: mpsc::Sender<Listing>,
}

impl Recorder {
    pub fn new() -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
            completions: Arc::new(Mutex::new(0)),
            done_rx,
            done_tx,
        }
    }

    /// Wires both callbacks into `builder`
    pub fn attach(&self, builder: ListingOptionsBuilder) -> ListingOptionsBuilder {
        let batches = self.batches.clone();
        let completions = self.completions.clone();
        let done = self.done_tx.clone();
        builder
            .on_batch(move |b| batches.lock().unwrap().push(b.to_vec()))
            .on_complete(move |listing| {
                *completions.lock().unwrap() += 1;
                done.send(listing).unwrap();
            })
    }

    pub fn wait(&self) -> Listing {
        self.done_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("enumeration did not complete")
    }

    pub fn batches(&self) -> Vec<Vec<PathEntry>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn completions(&self) -> usize {
        *self.completions.lock().unwrap()
    }
}

/// Builds:
/// ```text
/// root/
///   a.txt
///   photo.jpg
///   sub/
///     b.txt
///     pics/
///       c.jpg
///   empty/
/// ```
pub fn photo_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("photo.jpg"), "jpg").unwrap();
    fs::create_dir_all(root.join("sub/pics")).unwrap();
    fs::write(root.join("sub/b.txt"), "b").unwrap();
    fs::write(root.join("sub/pics/c.jpg"), "c").unwrap();
    fs::create_dir(root.join("empty")).unwrap();
    dir
}

pub fn names(entries: &[PathEntry]) -> Vec<String> {
    let mut v: Vec<String> = entries
        .iter()
        .filter_map(|e| e.file_name().map(str::to_string))
        .collect();
    v.sort();
    v
}
