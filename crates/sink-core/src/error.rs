use connectors::error::{ChannelError, ConnectorError, DbError};
use thiserror::Error;

/// Fatal startup-time configuration problems; the sink never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing or empty required key '{0}'")]
    MissingKey(String),

    #[error("unknown driver '{0}'")]
    UnknownDriver(String),

    #[error("unknown SQL dialect '{0}'")]
    UnknownDialect(String),

    #[error("driver '{driver}' and dialect '{dialect}' do not agree")]
    DialectMismatch { driver: String, dialect: String },

    #[error("invalid batch size '{0}'")]
    InvalidBatchSize(String),

    #[error("mapping '{0}' contains no usable entry")]
    EmptyMapping(String),

    #[error("unsupported body format '{0}'")]
    UnsupportedBodyFormat(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    /// `process` was called on a sink that was never started or was stopped.
    #[error("sink is not running")]
    NotRunning,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to destination: {0}")]
    Connect(#[from] ConnectorError),

    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// The batch could not be delivered; both transactions were rolled back
    /// and the channel is expected to redeliver the same events.
    #[error("failed to deliver {events} events to '{table}': {source}")]
    Delivery {
        table: String,
        events: usize,
        #[source]
        source: DbError,
    },
}
