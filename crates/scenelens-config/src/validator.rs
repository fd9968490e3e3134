//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_introspection(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_introspection(config: &Config, result: &mut ValidationResult) {
        let section = &config.introspection;

        if section.root_graph_key.is_empty() {
            result.add_error(ValidationError::new(
                "introspection.root_graph_key",
                "Root graph key cannot be empty",
            ));
        }

        if section.depth_limit == 0 {
            result.add_error(ValidationError::new(
                "introspection.depth_limit",
                "depth_limit must be greater than 0",
            ));
        } else if section.depth_limit > 64 {
            result.add_warning(ValidationWarning::new(
                "introspection.depth_limit",
                "depth_limit is very high (>64), cyclic chains will take longer to give up",
            ));
        }

        if section.host_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "introspection.host_timeout_ms",
                "host_timeout_ms must be greater than 0",
            ));
        } else if section.host_timeout_ms > 30_000 {
            result.add_warning(ValidationWarning::new(
                "introspection.host_timeout_ms",
                "host_timeout_ms is above 30s, a stuck host will stall requests for that long",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.logging.level.to_lowercase();
        if !level.contains('=') && !valid_levels.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
