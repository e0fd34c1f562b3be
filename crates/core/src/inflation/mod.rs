pub mod inflation_calculator;
pub mod inflation_model;

#[cfg(test)]
mod inflation_calculator_tests;

pub use inflation_calculator::*;
pub use inflation_model::*;
