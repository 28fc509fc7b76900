pub mod metro;
pub mod comparison;

pub use metro::*;
pub use comparison::*;
