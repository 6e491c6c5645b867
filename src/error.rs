use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Resource;

#[derive(Error, Debug)]
pub enum FplError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{resource} request failed: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} request cancelled")]
    Cancelled { resource: Resource },

    /// Every failure collected from one concurrent fetch.
    #[error("fetch failed: {}", join_lines(.0))]
    Fetch(Vec<FplError>),

    #[error(transparent)]
    Decode(#[from] DecodeErrors),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{resource} payload is not a json object: {source}")]
    NotAnObject {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} payload has no `{section}` section")]
    MissingSection {
        resource: Resource,
        section: &'static str,
    },

    #[error("invalid `{section}` in {resource}: {source}")]
    Section {
        resource: Resource,
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no event is flagged as the next round")]
    NoNextRound,

    #[error("several events are flagged as the next round: {0:?}")]
    AmbiguousNextRound(Vec<u32>),
}

/// Decode failures aggregated over one merge attempt.
#[derive(Error, Debug)]
#[error("decode failed: {}", join_lines(.0))]
pub struct DecodeErrors(pub Vec<DecodeError>);

impl DecodeErrors {
    pub fn iter(&self) -> impl Iterator<Item = &DecodeError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("create cache dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("list cache dir {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("remove stale cache file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read cache file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cache file {path} is missing")]
    Missing { path: PathBuf },
}

fn join_lines<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, DecodeErrors, FplError};
    use crate::model::Resource;

    #[test]
    fn combined_fetch_error_lists_every_failure() {
        let err = FplError::Fetch(vec![
            FplError::Cancelled {
                resource: Resource::Bootstrap,
            },
            FplError::Cancelled {
                resource: Resource::Fixtures,
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("bootstrap-static request cancelled"));
        assert!(text.contains("fixtures request cancelled"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn decode_errors_render_one_line_each() {
        let errs = DecodeErrors(vec![
            DecodeError::NoNextRound,
            DecodeError::MissingSection {
                resource: Resource::Bootstrap,
                section: "teams",
            },
        ]);
        let text = errs.to_string();
        assert!(text.starts_with("decode failed: no event"));
        assert!(text.contains("no `teams` section"));
    }
}
