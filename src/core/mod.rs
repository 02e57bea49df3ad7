pub mod config;

pub use config::{default_config, load_config, save_config, Config};
