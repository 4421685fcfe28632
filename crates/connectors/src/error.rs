use thiserror::Error;

/// All errors coming from the destination database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any Postgres driver error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Any MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Postgres connector creation failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL connector creation failed: {0}")]
    MySql(#[from] mysql_async::Error),

    /// A mis-configured or unsupported destination driver was specified.
    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),
}

/// Errors surfaced by the upstream channel implementation.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel transaction error: {0}")]
    Transaction(String),

    #[error("Channel take error: {0}")]
    Take(String),

    #[error("Channel closed: {0}")]
    Closed(String),
}
