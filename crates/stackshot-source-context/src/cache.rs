use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Raw lines of one source file, split on `\n` with terminators removed.
pub type FileLines = Arc<[Vec<u8>]>;

/// Where the cache gets file contents from.
pub trait FileSource: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads straight from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

static GLOBAL_CACHE: OnceLock<FileLineCache> = OnceLock::new();

/// Lazily populated path → lines map.
///
/// A file is read at most once: the lock stays held across the lookup, the read
/// and the insert, so concurrent first requests for the same path wait for the
/// one reader instead of racing it. Entries are never evicted. Failed reads are
/// not remembered, the next request tries again.
pub struct FileLineCache {
    source: Box<dyn FileSource>,
    files: Mutex<HashMap<PathBuf, FileLines>>,
}

impl FileLineCache {
    pub fn new() -> Self {
        Self::with_source(FsSource)
    }

    pub fn with_source(source: impl FileSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide cache backed by the filesystem.
    pub fn global() -> &'static FileLineCache {
        GLOBAL_CACHE.get_or_init(FileLineCache::new)
    }

    /// Lines of `path`, or `None` when it can't be read.
    pub fn lines_of(&self, path: &Path) -> Option<FileLines> {
        let mut files = self.files.lock();
        if let Some(lines) = files.get(path) {
            return Some(Arc::clone(lines));
        }

        let data = match self.source.read(path) {
            Ok(data) => data,
            Err(error) => {
                debug!(path = %path.display(), %error, "source file unavailable, skipping context");
                return None;
            }
        };

        let lines: FileLines = split_lines(&data).into();
        trace!(path = %path.display(), lines = lines.len(), "cached source file");
        files.insert(path.to_path_buf(), Arc::clone(&lines));
        Some(lines)
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl Default for FileLineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileLineCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLineCache")
            .field("cached_files", &self.len())
            .finish_non_exhaustive()
    }
}

// `\r` is kept, and a trailing newline yields a final empty line.
fn split_lines(data: &[u8]) -> Vec<Vec<u8>> {
    data.split(|byte| *byte == b'\n').map(<[u8]>::to_vec).collect()
}
