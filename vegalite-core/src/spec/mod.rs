pub mod chart;
pub mod config;
pub mod data;
pub mod encoding;
pub mod mark;
pub mod scale;
pub mod shorthand;
pub mod values;
