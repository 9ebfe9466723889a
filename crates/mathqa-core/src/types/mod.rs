pub mod example;
pub mod prediction;

pub use example::Example;
pub use prediction::Prediction;
