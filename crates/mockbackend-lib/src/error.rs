use thiserror::Error;

/// Convenient result alias for the mock backend library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Raised when a port value of zero is supplied.
    #[error("invalid port {value}: must be between 1 and 65535")]
    InvalidPort { value: u16 },
}
