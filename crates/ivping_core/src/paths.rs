use std::io;
use std::path::{Path, PathBuf};

/// Per-user data folder name (shared with existing installations).
pub const DATA_FOLDER: &str = "Ivpinggradle_data";
/// Host spreadsheet file name.
pub const HOSTS_FILE_NAME: &str = "data_hosts.xlsx";
/// Optional settings file name.
pub const CONFIG_FILE_NAME: &str = "ivping.toml";

/// Per-user application data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Use an explicit root directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the data directory.
    ///
    /// Priority:
    /// 1) IVPING_HOME
    /// 2) APPDATA/Ivpinggradle_data (when set and not blank)
    /// 3) HOME or USERPROFILE/AppData/Roaming/Ivpinggradle_data
    /// 4) ./Ivpinggradle_data
    pub fn resolve<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(override_path) = non_blank("IVPING_HOME") {
            return Self::at(override_path);
        }
        if let Some(roaming) = non_blank("APPDATA") {
            return Self::at(PathBuf::from(roaming).join(DATA_FOLDER));
        }

        let home = non_blank("HOME")
            .or_else(|| non_blank("USERPROFILE"))
            .map(PathBuf::from)
            .or_else(dirs::home_dir);
        match home {
            Some(home) => Self::at(home.join("AppData").join("Roaming").join(DATA_FOLDER)),
            None => Self::at(PathBuf::from(".").join(DATA_FOLDER)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default host spreadsheet: <root>/data_hosts.xlsx
    pub fn hosts_file(&self) -> PathBuf {
        self.root.join(HOSTS_FILE_NAME)
    }

    /// Settings file: <root>/ivping.toml
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Logs directory: <root>/logs
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the root directory if needed.
    pub fn ensure(&self) -> io::Result<&Path> {
        std::fs::create_dir_all(&self.root)?;
        Ok(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_override_wins() {
        let dir = DataDir::resolve(env_of(&[("IVPING_HOME", "/srv/ivping"), ("APPDATA", "/roaming")]));
        assert_eq!(dir.root(), Path::new("/srv/ivping"));
    }

    #[test]
    fn test_appdata_preferred_over_home() {
        let dir = DataDir::resolve(env_of(&[("APPDATA", "/roaming"), ("HOME", "/home/op")]));
        assert_eq!(dir.root(), Path::new("/roaming").join(DATA_FOLDER));
        assert_eq!(
            dir.hosts_file(),
            Path::new("/roaming").join(DATA_FOLDER).join("data_hosts.xlsx")
        );
    }

    #[test]
    fn test_blank_appdata_falls_back_to_home() {
        let dir = DataDir::resolve(env_of(&[("APPDATA", "   "), ("HOME", "/home/op")]));
        assert_eq!(
            dir.root(),
            Path::new("/home/op").join("AppData").join("Roaming").join(DATA_FOLDER)
        );
    }

    #[test]
    fn test_userprofile_used_without_home() {
        let dir = DataDir::resolve(env_of(&[("USERPROFILE", "/users/op")]));
        assert!(dir.root().starts_with("/users/op"));
        assert!(dir.root().ends_with(DATA_FOLDER));
    }

    #[test]
    fn test_derived_paths() {
        let dir = DataDir::at("/data");
        assert_eq!(dir.config_file(), Path::new("/data/ivping.toml"));
        assert_eq!(dir.logs_dir(), Path::new("/data/logs"));
    }

    #[test]
    fn test_ensure_creates_root() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::at(tmp.path().join("nested").join("data"));
        dir.ensure().unwrap();
        assert!(dir.root().is_dir());
    }
}
