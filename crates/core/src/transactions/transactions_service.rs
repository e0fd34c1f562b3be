use async_trait::async_trait;
use chrono_tz::Tz;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::transactions_model::*;
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing the stored purchase list.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    timezone: Tz,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>, timezone: Tz) -> Self {
        Self {
            repository,
            timezone,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list(&self) -> Result<Vec<TransactionRecord>> {
        self.repository.load_transactions()
    }

    async fn add(&self, record: TransactionRecord) -> Result<Transaction> {
        let mut records = self.repository.load_transactions()?;
        let transaction = Transaction::from_record(records.len(), &record, self.timezone)?;

        // Store the normalized ticker so later lookups are case-stable
        records.push(TransactionRecord {
            ticker: transaction.ticker.clone(),
            ..record
        });
        self.repository.save_transactions(records).await?;

        info!(
            "Added purchase of {} {} at {} EUR on {}",
            transaction.shares, transaction.ticker, transaction.price_eur, transaction.trade_date
        );
        Ok(transaction)
    }

    async fn delete(
        &self,
        ticker: &str,
        datetime: &str,
        shares: Decimal,
    ) -> Result<TransactionRecord> {
        let mut records = self.repository.load_transactions()?;
        let position = records
            .iter()
            .position(|r| r.matches(ticker, datetime, shares))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "transaction {} x{} at {}",
                    ticker, shares, datetime
                ))
            })?;

        let removed = records.remove(position);
        self.repository.save_transactions(records).await?;
        debug!("Deleted transaction #{} ({})", position, removed.ticker);
        Ok(removed)
    }

    fn snapshot(&self) -> Result<Vec<Transaction>> {
        let records = self.repository.load_transactions()?;
        Ok(ingest(&records, self.timezone)?)
    }
}
