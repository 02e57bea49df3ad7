use crate::cli::output;
use crate::core::config::{default_config, load_config, save_config};
use anyhow::Context;
use clap::Subcommand;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "phylo-ngram.toml";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with default settings
    Init {
        /// Where to write the file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a configuration file and print the settings it resolves to
    Show {
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Init { path, force } => init(path, force),
        ConfigCommands::Show { path } => show(path),
    }
}

fn init(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(crate::PhyloError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    save_config(&path, &default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    output::success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}

fn show(path: PathBuf) -> anyhow::Result<()> {
    let config =
        load_config(&path).with_context(|| format!("Failed to load config {}", path.display()))?;
    let contents = toml::to_string_pretty(&config)
        .map_err(|e| crate::PhyloError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", contents);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phylo.toml");

        run(ConfigCommands::Init {
            path: path.clone(),
            force: false,
        })
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.input.record_marker, '>');
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phylo.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let err = run(ConfigCommands::Init {
            path: path.clone(),
            force: false,
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::PhyloError>(),
            Some(crate::PhyloError::Config(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        run(ConfigCommands::Init { path, force: true }).unwrap();
    }
}
