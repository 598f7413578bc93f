use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A document could not be analyzed or stored. Not fatal to the engine;
    /// the caller should correct the input or skip the document.
    Indexing,
    /// Internal index-state inconsistency detected while scoring. Fatal for
    /// that search call.
    Query,
    NotFound,
    InvalidInput,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    /// Indexing failure tagged with the offending document id.
    pub fn indexing(doc_id: &str, cause: impl fmt::Display) -> Self {
        Error {
            kind: ErrorKind::Indexing,
            context: format!("document '{}': {}", doc_id, cause),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<fst::Error> for Error {
    fn from(err: fst::Error) -> Self {
        Error {
            kind: ErrorKind::Internal,
            context: format!("FST error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
