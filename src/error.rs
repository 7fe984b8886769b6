use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound { id: u32 },
    Parse(String),
    Io(String),
    Construction(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound { id } => {
                write!(f, "product with id {} not found", id)
            }
            CatalogError::Parse(message) => write!(f, "parse error: {}", message),
            CatalogError::Io(message) => write!(f, "io error: {}", message),
            CatalogError::Construction(message) => {
                write!(f, "construction error: {}", message)
            }
            CatalogError::LockPoisoned(operation) => {
                write!(f, "catalog lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}
