pub mod changed;
pub mod config;
pub mod summarize;
