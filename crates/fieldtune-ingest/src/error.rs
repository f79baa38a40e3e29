use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("failed to read coverage report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse coverage report {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse coverage CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid coverage record for {field} in {path}: {message}")]
    Record {
        path: PathBuf,
        field: String,
        message: String,
    },

    #[error("unsupported coverage report format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },
}

impl CoverageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
