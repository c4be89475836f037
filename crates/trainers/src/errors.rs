use storage::DBError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] DBError),

    #[error("Invalid trainer id: {0}")]
    InvalidId(String),

    #[error("Store assigned an id that is not an ObjectId: {0}")]
    UnexpectedId(String),
}
