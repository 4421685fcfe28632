use crate::{
    error::{ConnectorError, DbError},
    sql::{mysql::destination::MySqlDestination, postgres::destination::PgDestination},
};
use async_trait::async_trait;
use model::records::insert::InsertRow;
use std::str::FromStr;

/// Destination database connection, exclusively owned by one sink instance.
///
/// The connection never auto-commits: `execute_batch` opens a transaction if
/// none is active, and the transaction stays open until `commit` or
/// `rollback`. An empty batch opens nothing.
#[async_trait]
pub trait EventDestination: Send {
    /// Executes one insert per row as a single atomic batch. Fails on the
    /// first failing row, leaving the transaction open for `rollback`.
    async fn execute_batch(&mut self, rows: &[InsertRow]) -> Result<(), DbError>;

    async fn commit(&mut self) -> Result<(), DbError>;

    async fn rollback(&mut self) -> Result<(), DbError>;
}

/// Supported destination drivers. The same identifiers are accepted for the
/// `driver` and `sqlDialect` configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Postgres,
    MySql,
}

impl FromStr for DriverKind {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DriverKind::Postgres),
            "mysql" | "mariadb" => Ok(DriverKind::MySql),
            other => Err(ConnectorError::UnsupportedDriver(other.to_string())),
        }
    }
}

/// Connects the destination for `driver`. Credentials override whatever the
/// URL carries; when absent the URL is used as-is.
pub async fn connect(
    driver: DriverKind,
    url: &str,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<Box<dyn EventDestination>, ConnectorError> {
    match driver {
        DriverKind::Postgres => Ok(Box::new(PgDestination::connect(url, user, password).await?)),
        DriverKind::MySql => Ok(Box::new(
            MySqlDestination::connect(url, user, password).await?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_kind_parses_known_identifiers() {
        assert_eq!(
            DriverKind::from_str("Postgres").unwrap(),
            DriverKind::Postgres
        );
        assert_eq!(
            DriverKind::from_str("postgresql").unwrap(),
            DriverKind::Postgres
        );
        assert_eq!(DriverKind::from_str("MySQL").unwrap(), DriverKind::MySql);
        assert!(DriverKind::from_str("oracle").is_err());
    }
}
