//! Resolved paths and settings shared by every command

use anyhow::Result;
use ivping::{ActionDispatcher, ActionSettings, AppConfig};
use ivping_core::{DataDir, HostRecord, HostSource};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::HelpfulError;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub data_dir: DataDir,
    pub config_path: PathBuf,
    pub config: AppConfig,
    pub hosts_file: PathBuf,
}

impl AppContext {
    /// Resolve settings: defaults, then the settings file, then CLI flags.
    pub fn load(
        data_dir: DataDir,
        config_override: Option<PathBuf>,
        hosts_override: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = config_override.unwrap_or_else(|| data_dir.config_file());
        let config = AppConfig::load(&config_path)
            .map_err(|err| HelpfulError::config_invalid(&config_path, &err))?;

        let hosts_file = hosts_override
            .or_else(|| {
                config
                    .hosts_file
                    .as_deref()
                    .map(|path| resolve_relative(data_dir.root(), path))
            })
            .unwrap_or_else(|| data_dir.hosts_file());

        debug!(
            config = %config_path.display(),
            hosts_file = %hosts_file.display(),
            "Resolved settings"
        );

        Ok(Self {
            data_dir,
            config_path,
            config,
            hosts_file,
        })
    }

    pub fn host_source(&self) -> HostSource {
        HostSource::new(&self.hosts_file)
    }

    pub fn action_settings(&self) -> ActionSettings {
        ActionSettings::from_config(&self.config)
    }

    pub fn dispatcher(&self) -> ActionDispatcher {
        ActionDispatcher::system(self.action_settings())
    }

    /// Load hosts for a one-shot command; problems become stderr warnings.
    pub fn load_hosts(&self) -> Vec<HostRecord> {
        let load = self.host_source().load_recoverable();
        if let Some(notice) = load.notice {
            eprintln!("Warning: {}", notice);
        }
        load.hosts
    }
}

/// Relative `hosts_file` entries are taken from the data directory.
fn resolve_relative(root: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        root.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_settings_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::load(DataDir::at(tmp.path()), None, None).unwrap();
        assert_eq!(ctx.config_path, tmp.path().join("ivping.toml"));
        assert_eq!(ctx.hosts_file, tmp.path().join("data_hosts.xlsx"));
        assert_eq!(ctx.config, AppConfig::default());
    }

    #[test]
    fn test_settings_file_hosts_path_relative_to_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ivping.toml"), "hosts_file = \"lists/site.xlsx\"\n").unwrap();

        let ctx = AppContext::load(DataDir::at(tmp.path()), None, None).unwrap();
        assert_eq!(ctx.hosts_file, tmp.path().join("lists").join("site.xlsx"));
    }

    #[test]
    fn test_cli_flag_wins_over_settings_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ivping.toml"), "hosts_file = \"site.xlsx\"\n").unwrap();

        let ctx = AppContext::load(
            DataDir::at(tmp.path()),
            None,
            Some(PathBuf::from("/srv/other.xlsx")),
        )
        .unwrap();
        assert_eq!(ctx.hosts_file, PathBuf::from("/srv/other.xlsx"));
    }

    #[test]
    fn test_explicit_config_path() {
        let tmp = tempfile::tempdir().unwrap();
        let custom = tmp.path().join("custom.toml");
        std::fs::write(&custom, "[ping]\ncount = 2\n").unwrap();

        let ctx = AppContext::load(DataDir::at(tmp.path()), Some(custom.clone()), None).unwrap();
        assert_eq!(ctx.config_path, custom);
        assert_eq!(ctx.action_settings().ping_count, 2);
    }

    #[test]
    fn test_invalid_settings_file_is_helpful() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ivping.toml"), "[ping]\ncount = 0\n").unwrap();

        let err = AppContext::load(DataDir::at(tmp.path()), None, None).unwrap_err();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert!(helpful.message.contains("ivping.toml"));
        assert!(helpful.context.as_deref().unwrap().contains("ping.count"));
    }

    #[test]
    fn test_load_hosts_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::load(DataDir::at(tmp.path()), None, None).unwrap();
        assert!(ctx.load_hosts().is_empty());
    }
}
