use crate::{
    destination::EventDestination,
    error::{ConnectorError, DbError},
    sql::postgres::{params::PgParamStore, utils::connect_client},
};
use async_trait::async_trait;
use model::records::insert::InsertRow;
use query_builder::{
    ast::insert::Insert,
    dialect,
    renderer::{Render, Renderer},
};
use tokio_postgres::Client;
use tracing::debug;

/// PostgreSQL destination. Owns its client for the sink's lifetime; the
/// transaction opened by the first write of a batch stays open until
/// `commit` or `rollback`.
pub struct PgDestination {
    client: Client,
    dialect: dialect::Postgres,
    in_txn: bool,
}

impl PgDestination {
    pub async fn connect(
        url: &str,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConnectorError> {
        let client = connect_client(url, user, password).await?;
        Ok(PgDestination {
            client,
            dialect: dialect::Postgres,
            in_txn: false,
        })
    }

    async fn ensure_txn(&mut self) -> Result<(), DbError> {
        if !self.in_txn {
            self.client.batch_execute("BEGIN").await?;
            self.in_txn = true;
        }
        Ok(())
    }
}

#[async_trait]
impl EventDestination for PgDestination {
    async fn execute_batch(&mut self, rows: &[InsertRow]) -> Result<(), DbError> {
        if rows.is_empty() {
            return Ok(());
        }
        self.ensure_txn().await?;

        for row in rows {
            let mut renderer = Renderer::new(&self.dialect);
            Insert::from(row).render(&mut renderer);
            let (sql, params) = renderer.finish();
            debug!(sql = %sql, "executing insert");

            let bindings = PgParamStore::from_values(params);
            self.client
                .execute(sql.as_str(), &bindings.as_refs())
                .await?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        if self.in_txn {
            self.client.batch_execute("COMMIT").await?;
            self.in_txn = false;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        if self.in_txn {
            self.client.batch_execute("ROLLBACK").await?;
            self.in_txn = false;
        }
        Ok(())
    }
}
