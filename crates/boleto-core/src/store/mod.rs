//! Boleto persistence.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::boleto::BoletoRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only storage for complete boletos.
#[async_trait]
pub trait BoletoStore: Send + Sync {
    /// Store a record and return its generated id.
    async fn insert(&self, record: &BoletoRecord) -> Result<i64>;
}
