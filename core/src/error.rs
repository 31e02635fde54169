use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the collaborator boundary and propagated unchanged
/// through the index and search services.
#[derive(Debug, Error)]
pub enum Error {
    /// A document or stopword source could not be reached.
    #[error("unable to read {}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source was read but does not have the expected shape.
    #[error("malformed data in {}: {reason}", path.display())]
    DataFormat { path: PathBuf, reason: String },

    /// The persisted index cache is missing, corrupt, or could not be written.
    #[error("index cache {}: {reason}", path.display())]
    IndexStore { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn data_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::DataFormat { path: path.into(), reason: reason.into() }
    }

    pub(crate) fn index_store(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::IndexStore { path: path.into(), reason: reason.into() }
    }
}
