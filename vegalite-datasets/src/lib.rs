pub mod bundled;
pub mod config;
pub mod datasets;
pub mod directory;
pub mod remote;
pub mod source;

pub use datasets::Datasets;
