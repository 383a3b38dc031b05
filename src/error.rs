use thiserror::Error;

/// Errors produced by the client store and its configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] envy::Error),

    #[error("invalid database url `{url}`: {source}")]
    InvalidDatabaseUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// Any failure reported by the store, including constraint violations.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
