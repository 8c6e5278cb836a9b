use std::io;
use std::path::PathBuf;

use tabula_csv::CsvError;
use thiserror::Error;

/// Every way reading or writing a document file can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FsError {
    #[error("no files match `{pattern}`")]
    NoMatchingFiles { pattern: String },

    #[error("no format registered for extension `{extension}`")]
    UnsupportedFormat { extension: String },

    #[error("invalid file pattern")]
    Pattern(#[from] globset::Error),

    #[error("cannot access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDecode(#[from] toml::de::Error),

    #[error(transparent)]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

impl FsError {
    /// Attach `path` to an I/O failure.
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
