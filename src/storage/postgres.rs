//! PostgreSQL-backed store.

use super::{validate_ident, ReferenceCheck, SalesStore};
use crate::domain::sale::{Sale, SaleDraft, SALES_TABLE};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const CREATE_CLIENTES_SQL: &str = "CREATE TABLE IF NOT EXISTS clientes (
    id_cliente BIGSERIAL PRIMARY KEY,
    nombre TEXT
)";

const CREATE_VENTAS_SQL: &str = "CREATE TABLE IF NOT EXISTS ventas (
    id_venta BIGSERIAL PRIMARY KEY,
    fecha_venta DATE,
    total_venta DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (total_venta >= 0),
    id_cliente BIGINT REFERENCES clientes (id_cliente)
)";

/// Tables the service reads and writes.
pub const REQUIRED_TABLES: &[&str] = &["clientes", SALES_TABLE];

/// Store over a shared `PgPool`. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates `clientes` and `ventas` when they do not exist yet. Existing tables are left as is.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CLIENTES_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_VENTAS_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns the entries of [`REQUIRED_TABLES`] absent from the current schema.
    pub async fn missing_tables(&self) -> Result<Vec<String>> {
        let wanted: Vec<String> = REQUIRED_TABLES.iter().map(|t| t.to_string()).collect();
        let present: Vec<String> = sqlx::query_scalar(
            "SELECT table_name::text FROM information_schema.tables
             WHERE table_schema = current_schema() AND table_name = ANY($1)",
        )
        .bind(&wanted)
        .fetch_all(&self.pool)
        .await?;

        Ok(wanted
            .into_iter()
            .filter(|t| !present.contains(t))
            .collect())
    }

    /// Inserts a client row and returns its id. Used by seeding and tests.
    pub async fn insert_client(&self, nombre: &str) -> Result<i64> {
        let id = sqlx::query_scalar("INSERT INTO clientes (nombre) VALUES ($1) RETURNING id_cliente")
            .bind(nombre)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}

#[async_trait]
impl ReferenceCheck for PgStore {
    async fn exists(&self, table: &str, key_column: &str, value: i64) -> Result<bool> {
        if !validate_ident(table) || !validate_ident(key_column) {
            anyhow::bail!("invalid reference target {}.{}", table, key_column);
        }
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1)",
            table, key_column
        );
        let found: bool = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}

#[async_trait]
impl SalesStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_sales(&self) -> Result<Vec<Sale>> {
        let rows = sqlx::query_as::<_, Sale>(
            "SELECT id_venta, fecha_venta, total_venta, id_cliente FROM ventas",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_sale(&self, id: i64) -> Result<Option<Sale>> {
        let row = sqlx::query_as::<_, Sale>(
            "SELECT id_venta, fecha_venta, total_venta, id_cliente FROM ventas WHERE id_venta = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_sale(&self, draft: &SaleDraft) -> Result<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO ventas (fecha_venta, total_venta, id_cliente) VALUES ($1, $2, $3)
             RETURNING id_venta",
        )
        .bind(draft.fecha_venta)
        .bind(draft.total_venta)
        .bind(draft.id_cliente)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_sale(&self, id: i64, draft: &SaleDraft) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE ventas SET fecha_venta = $1, total_venta = $2, id_cliente = $3
             WHERE id_venta = $4",
        )
        .bind(draft.fecha_venta)
        .bind(draft.total_venta)
        .bind(draft.id_cliente)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_sale(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM ventas WHERE id_venta = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
