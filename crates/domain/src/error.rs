#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<FetchError> for WriteError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Storage(storage) => WriteError::Storage(storage),
            FetchError::Other(other) => WriteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Service(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl StorageError {
    /// Turns a rejected authentication request into the message shown to the user.
    #[must_use]
    pub fn into_auth_error(self) -> AuthError {
        match self {
            StorageError::Service { message, .. } => AuthError::Service(message),
            storage => AuthError::Storage(storage),
        }
    }
}
