use std::path::PathBuf;

use crate::{BoxError, Node, PagedImage};

/// Why a reader produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The reader does not handle this kind of file. A routing signal.
    #[error("file not handled")]
    FileNotHandled,
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("error in reading file {}", path.display())]
    ErrorInReadingFile {
        path: PathBuf,
        #[source]
        source: Option<BoxError>,
    },
}

impl ReadError {
    pub fn reading(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::ErrorInReadingFile { path: path.into(), source: Some(source.into()) }
    }

    pub fn is_not_handled(&self) -> bool {
        matches!(self, ReadError::FileNotHandled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadError::FileNotFound(_))
    }

    pub fn is_error_in_reading(&self) -> bool {
        matches!(self, ReadError::ErrorInReadingFile { .. })
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Anything a reader can hand back from `read_object`.
#[derive(Debug)]
pub enum Object {
    Image(Box<dyn PagedImage>),
    Node(Box<dyn Node>),
}

impl Object {
    pub fn into_image(self) -> Option<Box<dyn PagedImage>> {
        match self {
            Object::Image(image) => Some(image),
            Object::Node(_) => None,
        }
    }
}
