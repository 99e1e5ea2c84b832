pub mod data;
pub mod datatypes;
pub mod error;

pub use arrow;
