//! Portfolio valuation, income attribution, yearly summaries and the
//! report service that orchestrates them.

pub mod income;
pub mod positions;
pub mod report;
pub mod summary;
pub mod valuation;

pub use income::*;
pub use positions::*;
pub use report::*;
pub use summary::*;
pub use valuation::*;
