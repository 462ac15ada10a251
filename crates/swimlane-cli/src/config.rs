//! TOML configuration discovery.
//!
//! An explicit `--config` path must exist. Without one, the first existing
//! file among [`candidate_paths`] is used, and the built-in defaults apply
//! when there is none.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use swimlane::{CompileError, config::AppConfig};

/// Project-local configuration file, relative to the working directory.
const LOCAL_CONFIG: &str = "swimlane/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for CompileError {
    fn from(err: ConfigError) -> Self {
        CompileError::Io(io::Error::other(err))
    }
}

/// Implicit config locations, most specific first: the project-local file,
/// then the platform config directory.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "swimlane", "swimlane") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("No platform config directory on this system"),
    }
    paths
}

/// Resolve the configuration for this run.
///
/// # Errors
///
/// Fails when an explicit path does not exist, or when the chosen file
/// cannot be read or is not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CompileError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return read_config(path);
    }

    match candidate_paths().into_iter().find(|path| path.exists()) {
        Some(path) => read_config(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, CompileError> {
    info!(path = path.display().to_string(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use swimlane::config::IdStrategy;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [layout]
            pool_margin = 150
            lane_header_inset = 40
            pool_height = 300

            [ids]
            strategy = "random"
            seed = 7

            [output]
            indent = 2
            "#,
        );
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.layout().pool_margin(), 150);
        assert_eq!(config.layout().lane_header_inset(), 40);
        assert_eq!(config.layout().pool_height(), 300);
        assert_eq!(config.ids().strategy(), IdStrategy::Random);
        assert_eq!(config.ids().seed(), Some(7));
        assert_eq!(config.output().indent(), 2);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config("[layout]\npool_height = 400\n");
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.layout().pool_height(), 400);
        assert_eq!(config.layout().pool_margin(), 200);
        assert_eq!(config.ids().strategy(), IdStrategy::Sequential);
        assert_eq!(config.output().indent(), 4);
    }

    #[test]
    fn test_local_config_is_searched_first() {
        assert_eq!(candidate_paths()[0], PathBuf::from(LOCAL_CONFIG));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = load_config(Some("/definitely/not/here/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_toml_fails() {
        let file = write_config("[ids]\nstrategy = \"shuffled\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration in"));
    }
}
