//! The `config` command.

use std::path::PathBuf;

use clap::Args;

use super::common::{load_config, resolve_config_path};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only print the config file path
    #[arg(long)]
    pub path: bool,
}

/// Print the effective configuration as INI.
pub fn run(args: ConfigArgs) -> Result<(), CliError> {
    let path = resolve_config_path(args.config.as_deref());

    if args.path {
        match path {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory on this platform)"),
        }
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;

    match &path {
        Some(path) if path.exists() => println!("; loaded from {}", path.display()),
        Some(path) => println!("; defaults ({} not found)", path.display()),
        None => println!("; defaults"),
    }
    print!("{}", config.to_ini_string());

    Ok(())
}
