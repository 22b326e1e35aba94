//! Engine configuration loader.
//!
//! Reads `fluentmodel.toml` and deserializes it into [`EngineConfig`]. Falls
//! back to defaults when the file is missing or malformed.

use std::path::Path;

use fluentmodel_types::config::EngineConfig;

/// File name looked up by [`load_engine_config_in`].
pub const CONFIG_FILE_NAME: &str = "fluentmodel.toml";

/// Load engine configuration from `path`.
///
/// - Missing file: [`EngineConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub fn load_engine_config(path: &Path) -> EngineConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return EngineConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return EngineConfig::default();
        }
    };

    match toml::from_str::<EngineConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            EngineConfig::default()
        }
    }
}

/// Load `{dir}/fluentmodel.toml`.
pub fn load_engine_config_in(dir: &Path) -> EngineConfig {
    load_engine_config(&dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    use fluentmodel_types::config::{MemberNaming, RefreshPolicy};
    use tempfile::TempDir;

    #[test]
    fn load_engine_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_engine_config_in(tmp.path());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_engine_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
member_naming = "verbatim"
refresh_policy = "per_builder"

[appearance]
default_discriminator = "Look"
"#,
        )
        .unwrap();

        let config = load_engine_config_in(tmp.path());
        assert_eq!(config.member_naming, MemberNaming::Verbatim);
        assert_eq!(config.refresh_policy, RefreshPolicy::PerBuilder);
        assert_eq!(config.appearance.default_discriminator, "Look");
    }

    #[test]
    fn load_engine_config_partial_toml_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "refresh_policy = \"per_builder\"\n").unwrap();

        let config = load_engine_config(&path);
        assert_eq!(config.refresh_policy, RefreshPolicy::PerBuilder);
        assert_eq!(config.member_naming, MemberNaming::PascalCase);
        assert_eq!(config.appearance.default_discriminator, "Visibility");
    }

    #[test]
    fn load_engine_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not { valid toml !!!").unwrap();

        let config = load_engine_config_in(tmp.path());
        assert_eq!(config, EngineConfig::default());
    }
}
