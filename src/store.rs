//! Storage seam and its PostgreSQL implementation over one long-lived connection.

use crate::config::DbConfig;
use crate::model::{Artisan, ArtisanPatch, NewArtisan};
use crate::sql::{self, text_param, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::{Query, QueryAs};
use sqlx::{ConnectOptions, Connection, Postgres};
use tokio::sync::Mutex;

/// Everything the handlers need from storage. Each method is one statement;
/// callers compose them without a transaction.
#[async_trait]
pub trait ArtisanStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Artisan>, sqlx::Error>;

    async fn find(&self, id: i64) -> Result<Option<Artisan>, sqlx::Error>;

    async fn insert(&self, new: &NewArtisan) -> Result<Artisan, sqlx::Error>;

    /// `None` when no row matched (the row vanished after the existence check),
    /// or when the patch is empty and no statement was issued.
    async fn update(&self, id: i64, patch: &ArtisanPatch) -> Result<Option<Artisan>, sqlx::Error>;

    /// Rows affected.
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;

    /// Round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// The process-wide session. Statements from concurrent requests take turns
/// on the connection; nothing holds it across statements.
pub struct PgArtisanStore {
    conn: Mutex<PgConnection>,
}

impl PgArtisanStore {
    pub async fn connect(db: &DbConfig) -> Result<Self, sqlx::Error> {
        let conn = db.connect_options().connect().await?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: PgConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Send Terminate and wait for the server to close the session.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.into_inner().close().await
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Artisan>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.conn.lock().await;
        bind_as(sqlx::query_as(&q.sql), q).fetch_all(&mut *conn).await
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Artisan>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.conn.lock().await;
        bind_as(sqlx::query_as(&q.sql), q).fetch_optional(&mut *conn).await
    }

    async fn fetch_one(&self, q: &QueryBuf) -> Result<Artisan, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.conn.lock().await;
        bind_as(sqlx::query_as(&q.sql), q).fetch_one(&mut *conn).await
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.conn.lock().await;
        let done = bind(sqlx::query(&q.sql), q).execute(&mut *conn).await?;
        Ok(done.rows_affected())
    }
}

fn bind_as<'q>(
    mut query: QueryAs<'q, Postgres, Artisan, PgArguments>,
    q: &QueryBuf,
) -> QueryAs<'q, Postgres, Artisan, PgArguments> {
    for p in &q.params {
        query = query.bind(text_param(p));
    }
    query
}

fn bind<'q>(mut query: Query<'q, Postgres, PgArguments>, q: &QueryBuf) -> Query<'q, Postgres, PgArguments> {
    for p in &q.params {
        query = query.bind(text_param(p));
    }
    query
}

#[async_trait]
impl ArtisanStore for PgArtisanStore {
    async fn list(&self) -> Result<Vec<Artisan>, sqlx::Error> {
        self.fetch_all(&sql::select_all()).await
    }

    async fn find(&self, id: i64) -> Result<Option<Artisan>, sqlx::Error> {
        self.fetch_optional(&sql::select_by_id(id)).await
    }

    async fn insert(&self, new: &NewArtisan) -> Result<Artisan, sqlx::Error> {
        self.fetch_one(&sql::insert(new)).await
    }

    async fn update(&self, id: i64, patch: &ArtisanPatch) -> Result<Option<Artisan>, sqlx::Error> {
        match sql::update(id, patch) {
            Some(q) => self.fetch_optional(&q).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.execute(&sql::delete(id)).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.conn.lock().await;
        conn.ping().await
    }
}
