use crate::{
    destination::EventDestination,
    error::{ConnectorError, DbError},
    sql::mysql::params::MySqlParamStore,
};
use async_trait::async_trait;
use model::records::insert::InsertRow;
use mysql_async::{Conn, Opts, OptsBuilder, prelude::Queryable};
use query_builder::{
    ast::insert::Insert,
    dialect,
    renderer::{Render, Renderer},
};
use tracing::debug;

/// MySQL destination. Owns its connection for the sink's lifetime; the
/// transaction opened by the first write of a batch stays open until
/// `commit` or `rollback`.
pub struct MySqlDestination {
    conn: Conn,
    dialect: dialect::MySql,
    in_txn: bool,
}

impl MySqlDestination {
    pub async fn connect(
        url: &str,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        let mut builder = OptsBuilder::from_opts(opts);
        if let Some(user) = user {
            builder = builder.user(Some(user));
        }
        if let Some(password) = password {
            builder = builder.pass(Some(password));
        }

        let conn = Conn::new(builder).await?;
        Ok(MySqlDestination {
            conn,
            dialect: dialect::MySql,
            in_txn: false,
        })
    }

    async fn ensure_txn(&mut self) -> Result<(), DbError> {
        if !self.in_txn {
            self.conn.query_drop("START TRANSACTION").await?;
            self.in_txn = true;
        }
        Ok(())
    }
}

#[async_trait]
impl EventDestination for MySqlDestination {
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

            let bindings = MySqlParamStore::from_values(&params);
            self.conn.exec_drop(sql.as_str(), bindings.params()).await?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        if self.in_txn {
            self.conn.query_drop("COMMIT").await?;
            self.in_txn = false;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        if self.in_txn {
            self.conn.query_drop("ROLLBACK").await?;
            self.in_txn = false;
        }
        Ok(())
    }
}
