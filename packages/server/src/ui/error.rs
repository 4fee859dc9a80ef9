//! Server start-up and runtime errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// `axum::serve` failed
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
