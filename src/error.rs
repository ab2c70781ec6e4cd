use std::path::PathBuf;

/// Failures of a single augmentation run.
///
/// Every variant is raised before the summary file is touched, except
/// `WriteFailure`, which is raised while the replacement is being staged.
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    #[error("input not readable: {}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("cannot write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AugmentError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
