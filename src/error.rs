use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a usable DOCX package.
    #[error("invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error("path {} escapes base directory {}", path.display(), base.display())]
    PathOutsideBase { path: PathBuf, base: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::InvalidDocx(other.to_string()),
        }
    }
}
