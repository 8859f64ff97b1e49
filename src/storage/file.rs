//! File-backed storage backend.
//!
//! Each key lives in its own `<dir>/<key>.json` file. Writes go to a
//! temporary sibling first and are renamed into place, so a reader never sees
//! a half-written value.
//!
//! Key characters outside `[A-Za-z0-9-]` are written as `_XX` per UTF-8 byte,
//! so distinct keys always map to distinct files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{check_quota, StorageBackend, StorageError, StorageResult};

const FILE_EXTENSION: &str = "json";

// == File Backend ==
/// Directory of one file per key, with an optional byte quota over all of
/// them.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileBackend {
    /// Opens (creating if needed) a backend rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P, quota_bytes: Option<usize>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, quota_bytes })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_stem = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_stem.push(byte as char);
            } else {
                file_stem.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.{}", file_stem, FILE_EXTENSION))
    }

    /// Writes `value` to `tmp_path` and renames it over `path`.
    fn write_atomically(tmp_path: &Path, path: &Path, value: &str) -> io::Result<()> {
        {
            let mut file = fs::File::create(tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(tmp_path, path)
    }

    /// Bytes held by every stored key except the file at `skip`.
    fn bytes_used_excluding(&self, skip: &Path) -> StorageResult<usize> {
        let mut total = 0usize;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path == skip || path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            total += fs::metadata(&path)?.len() as usize;
        }
        Ok(total)
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        if self.quota_bytes.is_some() {
            let requested = self.bytes_used_excluding(&path)? + value.len();
            check_quota(self.quota_bytes, requested)?;
        }

        let tmp_path = path.with_extension("tmp");
        if let Err(e) = Self::write_atomically(&tmp_path, &path, value) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temporary file");
                }
            }
            return Err(match e.kind() {
                io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => {
                    StorageError::OutOfSpace {
                        requested: value.len(),
                        source: e,
                    }
                }
                _ => e.into(),
            });
        }

        debug!(path = %path.display(), bytes = value.len(), "Wrote storage item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_tag(&self) -> &'static str {
        "file"
    }
}
