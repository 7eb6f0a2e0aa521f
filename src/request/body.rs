//! Request body sources.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error_handling::HttpClientError;

/// Where the bytes of a request body come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodySource {
    /// No body
    #[default]
    Empty,
    /// Bytes sent verbatim
    Literal(Vec<u8>),
    /// Contents of a file
    File(PathBuf),
    /// A file's contents if the string names an existing path, the string itself otherwise.
    ///
    /// Any string that happens to match a path becomes file contents. Prefer
    /// `Literal` or `File` when the caller knows which one it means.
    Inferred(String),
}

impl BodySource {
    /// Produces the body bytes.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::UnreadableSource` when a `File` path cannot be read,
    /// or when an `Inferred` string names an existing path that cannot be read.
    pub fn resolve(&self) -> Result<Vec<u8>, HttpClientError> {
        match self {
            BodySource::Empty => Ok(Vec::new()),
            BodySource::Literal(bytes) => Ok(bytes.clone()),
            BodySource::File(path) => read_all(path),
            BodySource::Inferred(arg) if arg.is_empty() => Ok(Vec::new()),
            BodySource::Inferred(arg) => {
                let path = Path::new(arg);
                if path.exists() {
                    log::debug!("Body argument names an existing path, reading {}", path.display());
                    read_all(path)
                } else {
                    Ok(arg.as_bytes().to_vec())
                }
            }
        }
    }
}

pub(crate) fn read_all(path: &Path) -> Result<Vec<u8>, HttpClientError> {
    fs::read(path).map_err(|e| HttpClientError::unreadable(path, e))
}
