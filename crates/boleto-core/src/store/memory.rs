//! In-process store, used for dry runs and tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{BoletoStore, Result};
use crate::models::boleto::{BoletoRecord, PersistedBoleto};

/// Keeps records in memory; ids start at 1.
///
/// A push cannot leave the list half-written, so a lock poisoned by a
/// panicking holder is recovered rather than reported.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<BoletoRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BoletoRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored record.
    pub fn records(&self) -> Vec<PersistedBoleto> {
        self.lock()
            .iter()
            .enumerate()
            .map(|(i, record)| PersistedBoleto {
                id: i as i64 + 1,
                record: record.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl BoletoStore for MemoryStore {
    async fn insert(&self, record: &BoletoRecord) -> Result<i64> {
        let mut records = self.lock();
        records.push(record.clone());
        Ok(records.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::boleto::DocumentType;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn record(installation_code: &str) -> BoletoRecord {
        BoletoRecord {
            document_type: DocumentType::Internet,
            installation_code: installation_code.to_string(),
            user_code: "87654321".to_string(),
            due_date: "15/06/2024".to_string(),
            total_amount: "129,90".to_string(),
            barcode: "1".repeat(48),
            issuer_tax_id: "00.00.000/0000-00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_follow_insertion_order() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        assert_eq!(store.insert(&record("111111111111")).await.unwrap(), 1);
        assert_eq!(store.insert(&record("222222222222")).await.unwrap(), 2);

        let stored = store.records();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].id, 2);
        assert_eq!(stored[1].record.installation_code, "222222222222");
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_recovered_everywhere() {
        let store = Arc::new(MemoryStore::new());
        store.insert(&record("111111111111")).await.unwrap();

        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.records.lock().unwrap();
            panic!("holder panicked");
        })
        .join();
        assert!(store.records.is_poisoned());

        assert_eq!(store.len(), 1);
        assert_eq!(store.insert(&record("222222222222")).await.unwrap(), 2);
        assert_eq!(store.records().len(), 2);
    }
}
