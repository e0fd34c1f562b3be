use super::transactions_model::*;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for transaction storage.
///
/// The store is a flat, ordered list of purchase records.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn load_transactions(&self) -> Result<Vec<TransactionRecord>>;
    async fn save_transactions(&self, records: Vec<TransactionRecord>) -> Result<()>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Stored records in file order.
    fn list(&self) -> Result<Vec<TransactionRecord>>;

    /// Validates, appends and persists a record.
    async fn add(&self, record: TransactionRecord) -> Result<Transaction>;

    /// Removes the first record matching all three keys and persists.
    async fn delete(&self, ticker: &str, datetime: &str, shares: Decimal)
        -> Result<TransactionRecord>;

    /// Every stored record, validated. This is the input of a report run.
    fn snapshot(&self) -> Result<Vec<Transaction>>;
}
