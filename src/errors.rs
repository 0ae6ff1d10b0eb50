use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Result with ConnectError as the error type
pub type ConnectResult<T> = Result<T, ConnectError>;

/// Errors that end a connection run
///
/// Per-file problems (permission denied, undecodable text) are not listed
/// here: they skip a single file and are collected in the run summary.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The resolved output file is already on disk
    #[error("The output file you have selected (\"{0}\") already exists!")]
    OutputExists(String),

    /// The source directory could not be listed because it is missing
    #[error("The directory you have selected (\"{0}\") couldn't be found!")]
    DirectoryNotFound(String),

    /// The output file could not be created (missing parent, bad name)
    #[error(
        "Invalid argument: The output file couldn't be created! Check if your name for the \
         output file (\"-out\") is acceptable or if its directory exists!"
    )]
    OutputNotCreatable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConnectError {
    pub(crate) fn not_creatable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConnectError::OutputNotCreatable {
            path: path.into(),
            source,
        }
    }
}
