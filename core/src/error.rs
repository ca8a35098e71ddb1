use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The id is already present in the index; term frequencies would be corrupted by a merge.
    #[error("document {0} is already indexed")]
    DuplicateDocument(DocId),

    #[error("stop words cannot change after documents have been indexed")]
    StopWordsFrozen,

    #[error("document {0} is not indexed")]
    UnknownDocument(DocId),

    #[error("invalid document status: {0:?}")]
    InvalidStatus(String),
}
