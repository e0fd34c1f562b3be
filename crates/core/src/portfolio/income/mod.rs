pub mod income_calculator;
pub mod income_model;

pub use income_calculator::*;
pub use income_model::*;
