pub mod chart;
pub mod spec;

pub use vegalite_common::{arrow, data, datatypes, error};
