mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mkvstrip.toml",
        "~/.config/mkvstrip/config.toml",
        "/etc/mkvstrip/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(FileConfig::default())
}

fn validate_config(config: &FileConfig) -> Result<()> {
    if let Some(bin) = &config.mkvmerge_bin {
        if bin.as_os_str().is_empty() {
            anyhow::bail!("mkvmerge_bin cannot be empty");
        }
    }

    let blank = config
        .languages
        .iter()
        .chain(config.subs_languages.iter().flatten())
        .any(|code| code.trim().is_empty());
    if blank {
        anyhow::bail!("Language codes cannot be empty");
    }

    Ok(())
}
