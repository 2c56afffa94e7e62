//! SQLite-backed boleto store using sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use super::{BoletoStore, Result};
use crate::error::StoreError;
use crate::models::boleto::{BoletoRecord, DocumentType, PersistedBoleto};
use crate::models::config::DatabaseConfig;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS boletos (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     boleto_tipo TEXT NOT NULL, \
     codigo_instalacao TEXT NOT NULL, \
     codigo_usuario TEXT NOT NULL, \
     vencimento TEXT NOT NULL, \
     valor_total TEXT NOT NULL, \
     cod_barras TEXT NOT NULL, \
     cnpj_concessionaria TEXT NOT NULL)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_boletos_codigo_instalacao ON boletos (codigo_instalacao)";

/// Boleto store over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database and ensure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;

        info!("SQLite store ready at {}", config.url);
        Ok(store)
    }

    /// Wrap an existing pool. The schema is created if missing.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Read a stored boleto back.
    pub async fn fetch(&self, id: i64) -> Result<Option<PersistedBoleto>> {
        let row = sqlx::query(
            "SELECT id, boleto_tipo, codigo_instalacao, codigo_usuario, vencimento, \
             valor_total, cod_barras, cnpj_concessionaria FROM boletos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_boleto).transpose()
    }

    /// Number of stored boletos.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boletos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl BoletoStore for SqliteStore {
    async fn insert(&self, record: &BoletoRecord) -> Result<i64> {
        // Held for this insert only; returned to the pool on drop.
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            "INSERT INTO boletos (boleto_tipo, codigo_instalacao, codigo_usuario, vencimento, \
             valor_total, cod_barras, cnpj_concessionaria) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.document_type.as_str())
        .bind(&record.installation_code)
        .bind(&record.user_code)
        .bind(&record.due_date)
        .bind(&record.total_amount)
        .bind(&record.barcode)
        .bind(&record.issuer_tax_id)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted boleto {} (installation {})", id, record.installation_code);
        Ok(id)
    }
}

fn row_to_boleto(row: &SqliteRow) -> Result<PersistedBoleto> {
    let tag: String = row.try_get("boleto_tipo")?;
    let document_type = DocumentType::from_str(&tag).map_err(StoreError::InvalidRow)?;

    Ok(PersistedBoleto {
        id: row.try_get("id")?,
        record: BoletoRecord {
            document_type,
            installation_code: row.try_get("codigo_instalacao")?,
            user_code: row.try_get("codigo_usuario")?,
            due_date: row.try_get("vencimento")?,
            total_amount: row.try_get("valor_total")?,
            barcode: row.try_get("cod_barras")?,
            issuer_tax_id: row.try_get("cnpj_concessionaria")?,
        },
    })
}
