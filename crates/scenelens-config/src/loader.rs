//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = config.logging.directory.take() {
            config.logging.directory = Some(Self::expand_path(&dir.to_string_lossy()).into());
        }
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.scenelens`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::schema::InputBackend;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.introspection.depth_limit, 10);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 4000

            [introspection]
            root_graph_key = "main_viewport"
            depth_limit = 16
            host_timeout_ms = 500

            [input]
            backend = "dry_run"
            origin_x = 12
            origin_y = 34

            [logging]
            level = "debug"
            file = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.introspection.root_graph_key, "main_viewport");
        assert_eq!(config.introspection.depth_limit, 16);
        assert_eq!(config.introspection.host_timeout_ms, 500);
        assert_eq!(config.input.backend, InputBackend::DryRun);
        assert_eq!(config.input.origin_y, 34);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/scenelens.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/scenelens.toml")).unwrap();
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_load_or_default_invalid_file_still_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = [unclosed").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test sets a unique test-only env var
        unsafe {
            std::env::set_var("SCENELENS_TEST_ROOT_KEY", "root_scene");
        }
        let content = "[introspection]\nroot_graph_key = \"${SCENELENS_TEST_ROOT_KEY}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.introspection.root_graph_key, "root_scene");
        unsafe {
            std::env::remove_var("SCENELENS_TEST_ROOT_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_SCENELENS_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_SCENELENS_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/var/log"), "/var/log");
    }

    #[test]
    fn test_log_directory_tilde_expanded() {
        let config = ConfigLoader::load_str("[logging]\ndirectory = \"~/scenelens-logs\"").unwrap();
        let dir = config.logging.directory.unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.to_string_lossy().ends_with("scenelens-logs"));
    }
}
