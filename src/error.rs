use std::path::PathBuf;
use thiserror::Error;

/// Every way a run of the generator can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum IconError {
    /// No source image was given on the command line.
    #[error("no source image supplied")]
    Usage,

    /// The source is missing, unreadable or not a recognized image format.
    #[error("failed to decode source image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output directory or one of the output files could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl IconError {
    pub(crate) fn decode(path: impl Into<PathBuf>, source: impl Into<image::ImageError>) -> Self {
        IconError::Decode {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<image::ImageError>) -> Self {
        IconError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
