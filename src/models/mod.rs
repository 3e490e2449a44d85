pub mod data_models;
pub mod narrative;

pub use data_models::*;
pub use narrative::*;
