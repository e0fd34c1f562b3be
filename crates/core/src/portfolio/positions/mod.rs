pub mod positions_calculator;
pub mod positions_model;

pub use positions_calculator::*;
pub use positions_model::*;
