use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::model::{RawSnapshot, Resource};

/// One day's raw payloads in a flat directory, one file per resource.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
    date: NaiveDate,
}

impl SnapshotCache {
    /// Creates the directory if needed and drops anything not from `date`.
    pub fn open(dir: impl Into<PathBuf>, date: NaiveDate) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let cache = Self { dir, date };
        cache.purge_stale()?;
        Ok(cache)
    }

    pub fn open_today(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Self::open(dir, Local::now().date_naive())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name(self.date))
    }

    fn is_expected(&self, name: &str) -> bool {
        Resource::ALL
            .iter()
            .any(|r| r.file_name(self.date) == name)
    }

    fn file_names(&self) -> Result<Vec<String>, CacheError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| CacheError::ReadDir {
            path: self.dir.clone(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CacheError::ReadDir {
                path: self.dir.clone(),
                source,
            })?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// True only when the directory holds exactly today's two files.
    pub fn has_fresh_snapshot(&self) -> Result<bool, CacheError> {
        let names = self.file_names()?;
        let complete = Resource::ALL
            .iter()
            .all(|r| names.contains(&r.file_name(self.date)));
        Ok(complete && names.len() == Resource::ALL.len())
    }

    pub fn purge_stale(&self) -> Result<usize, CacheError> {
        let mut removed = 0;
        for name in self.file_names()? {
            if self.is_expected(&name) {
                continue;
            }
            let path = self.dir.join(&name);
            fs::remove_file(&path).map_err(|source| CacheError::Remove {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "removed stale cache file");
            removed += 1;
        }
        Ok(removed)
    }

    /// Removes today's files, so a snapshot that failed to decode is not
    /// served again as fresh.
    pub fn discard(&self) -> Result<usize, CacheError> {
        let mut removed = 0;
        for resource in Resource::ALL {
            let path = self.path_for(resource);
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(CacheError::Remove { path, source }),
            }
        }
        Ok(removed)
    }

    pub fn read_snapshot(&self) -> Result<RawSnapshot, CacheError> {
        self.purge_stale()?;
        Ok(RawSnapshot {
            bootstrap: self.read(Resource::Bootstrap)?,
            fixtures: self.read(Resource::Fixtures)?,
        })
    }

    fn read(&self, resource: Resource) -> Result<Vec<u8>, CacheError> {
        let path = self.path_for(resource);
        fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CacheError::Missing { path: path.clone() }
            } else {
                CacheError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })
    }

    pub fn write(&self, resource: Resource, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(resource);
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| CacheError::Write {
            path: path.clone(),
            source,
        };
        fs::write(&tmp, bytes).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }

    /// Persists on the blocking pool; failures are logged, never returned.
    pub fn write_through(&self, resource: Resource, bytes: Vec<u8>) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::task::spawn_blocking(move || match cache.write(resource, &bytes) {
            Ok(()) => debug!(%resource, bytes = bytes.len(), "cached response"),
            Err(err) => warn!(%resource, "could not cache response: {err}"),
        })
    }
}
