pub mod json_store;
pub mod schema;

use thiserror::Error;

/// Name of the lesson that always sorts first and receives words saved
/// without an explicit lesson.
pub const DEFAULT_LESSON: &str = "Main";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("already exists: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage format error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported data: {0}")]
    Unsupported(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    StorageFault,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Conflict(_) => ErrorKind::Conflict,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Io(_) | StoreError::Serialization(_) | StoreError::Unsupported(_) => {
                ErrorKind::StorageFault
            }
        }
    }

    pub fn is_storage_fault(&self) -> bool {
        self.kind() == ErrorKind::StorageFault
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which lessons a word query covers.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LessonFilter {
    #[default]
    All,
    Only(String),
}

impl LessonFilter {
    pub fn lesson(name: &str) -> Self {
        LessonFilter::Only(name.to_string())
    }

    pub fn accepts(&self, lesson: &str) -> bool {
        match self {
            LessonFilter::All => true,
            LessonFilter::Only(name) => name == lesson,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            LessonFilter::All => None,
            LessonFilter::Only(name) => Some(name),
        }
    }
}
