use std::path::Path;

use anyhow::Result;
use offers_config::Config;

pub fn handle(path_only: bool, config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
