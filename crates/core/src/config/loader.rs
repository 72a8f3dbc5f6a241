use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::PrefetchConfig, ConfigError};

/// Prefix for environment variable overrides, e.g. `OBJFS_PREFETCH_HELPER__PROGRAM`.
pub const ENV_PREFIX: &str = "OBJFS_PREFETCH_";

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<PrefetchConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: PrefetchConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration where the file is optional.
///
/// Without a path, built-in defaults are used and only environment
/// overrides apply. A path that is given but missing is still an error.
pub fn load_config_or_default(path: Option<&Path>) -> Result<PrefetchConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Figment::new()
            .merge(env_overrides())
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string())),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<PrefetchConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputMode;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[helper]
program = "objfsutil-canary"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.helper.program, PathBuf::from("objfsutil-canary"));
        assert_eq!(config.helper.args, vec!["prefetch".to_string()]);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
enabled = "sometimes"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/objfs-prefetch.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_or_default_missing_path_is_error() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/prefetch.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[helper]
program = "/usr/local/bin/objfsutil"
input = "arguments"

[sidecar]
enabled = false
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config.helper.program,
            PathBuf::from("/usr/local/bin/objfsutil")
        );
        assert_eq!(config.helper.input, InputMode::Arguments);
        assert!(!config.sidecar.enabled);
        assert!(config.enabled);
    }
}
