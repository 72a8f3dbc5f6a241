use super::{types::PrefetchConfig, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Helper program is not empty
/// - Sidecar rules have non-empty, distinct suffixes
pub fn validate_config(config: &PrefetchConfig) -> Result<(), ConfigError> {
    if config.helper.program.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "helper.program cannot be empty".to_string(),
        ));
    }

    for (i, rule) in config.sidecar.rules.iter().enumerate() {
        if rule.source_suffix.is_empty() || rule.companion_suffix.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "sidecar.rules[{}] suffixes cannot be empty",
                i
            )));
        }
        if rule.source_suffix == rule.companion_suffix {
            return Err(ConfigError::ValidationError(format!(
                "sidecar.rules[{}] source and companion suffix are both {:?}",
                i, rule.source_suffix
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SidecarRule;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&PrefetchConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_program_fails() {
        let mut config = PrefetchConfig::default();
        config.helper.program = PathBuf::new();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_suffix_fails() {
        let mut config = PrefetchConfig::default();
        config.sidecar.rules.push(SidecarRule::new("", ".json"));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("rules[1]"));
    }

    #[test]
    fn test_validate_identical_suffixes_fail() {
        let mut config = PrefetchConfig::default();
        config.sidecar.rules = vec![SidecarRule::new(".d.ts", ".d.ts")];
        assert!(validate_config(&config).is_err());
    }
}
