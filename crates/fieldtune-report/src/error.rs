use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to read disable list {path}: {source}")]
    DisableList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
