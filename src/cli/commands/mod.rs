pub mod build;
pub mod config;
pub mod matrix;
