//! Subcommand implementations.

pub mod config;
pub mod process;
pub mod serve;

use std::path::PathBuf;

use tracing::debug;

use boleto_core::BoletoConfig;

/// Load the configuration named by `--config`, else the user config file
/// when one exists, else the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoletoConfig> {
    let path = resolve_config_path(config_path.map(PathBuf::from), config::default_config_path());
    if let Some(path) = &path {
        debug!("Loading configuration from {}", path.display());
    }
    Ok(BoletoConfig::load(path.as_deref())?)
}

fn resolve_config_path(explicit: Option<PathBuf>, user_default: PathBuf) -> Option<PathBuf> {
    explicit.or_else(|| user_default.exists().then_some(user_default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("config.json");
        std::fs::write(&user, "{}").unwrap();

        let explicit = PathBuf::from("outro.json");
        assert_eq!(
            resolve_config_path(Some(explicit.clone()), user),
            Some(explicit)
        );
    }

    #[test]
    fn test_user_file_used_when_present() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("config.json");

        assert_eq!(resolve_config_path(None, user.clone()), None);

        std::fs::write(&user, "{}").unwrap();
        assert_eq!(resolve_config_path(None, user.clone()), Some(user));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nada.json");
        assert!(load_config(missing.to_str()).is_err());
    }
}
