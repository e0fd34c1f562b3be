use async_trait::async_trait;
use log::{debug, error, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::errors::IntoCore;
use realfolio_core::errors::Result;
use realfolio_core::transactions::{TransactionRecord, TransactionRepositoryTrait};

/// Transaction store backed by a pretty-printed JSON array file.
///
/// A missing file is an empty portfolio. An unreadable or unparsable file
/// is logged and also loads as empty; malformed elements are skipped.
pub struct JsonTransactionRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonTransactionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTransactionRepository {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("Transaction file lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn parse_records(&self, content: &str) -> Vec<TransactionRecord> {
        let elements = match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(elements)) => elements,
            Ok(_) => {
                warn!(
                    "Transactions file {} does not hold a JSON array, ignoring it",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    "Transactions file {} is not valid JSON ({}), ignoring it",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                match serde_json::from_value::<TransactionRecord>(element) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping malformed transaction #{}: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Serializes with four-space indentation.
    fn to_pretty_json(records: &[TransactionRecord]) -> serde_json::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        records.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// Writes next to the target first so readers never see a partial file.
    fn write_atomically(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for JsonTransactionRepository {
    fn load_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No transactions file at {}, starting empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(
                    "Could not read transactions file {}: {}",
                    self.path.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        let records = self.parse_records(&content);
        debug!(
            "Loaded {} transactions from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    async fn save_transactions(&self, records: Vec<TransactionRecord>) -> Result<()> {
        let bytes = Self::to_pretty_json(&records).into_core()?;

        let _guard = self.lock_writes();
        self.write_atomically(&bytes)
            .map_err(|e| {
                error!(
                    "Failed to save transactions to {}: {}",
                    self.path.display(),
                    e
                );
                e
            })
            .into_core()?;

        debug!(
            "Saved {} transactions to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
