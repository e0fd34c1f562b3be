//! JSON file storage implementation for Realfolio.
//!
//! This crate implements the repository traits defined in `realfolio-core`
//! on top of a single pretty-printed JSON file holding the ordered list of
//! purchase records.
//!
//! ```text
//!   core (domain)
//!        │
//!        ▼
//!  storage-json (this crate)
//!        │
//!        ▼
//!  transactions.json
//! ```

pub mod errors;
pub mod transactions;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};
pub use transactions::JsonTransactionRepository;

// Re-export from realfolio-core for convenience
pub use realfolio_core::errors::{Error, Result};
