//! Configuration validation utilities

use super::error::ValidationError;
use super::schema::ContentConfig;

/// Configuration validator with rules beyond the schema's structural checks
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &ContentConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_separator(config)?;
        self.validate_default_name(config)?;

        Ok(())
    }

    /// The separator must split names, so whitespace is rejected
    fn validate_separator(&self, config: &ContentConfig) -> Result<(), ValidationError> {
        let separator = &config.functions.name_separator;
        if separator.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "functions.name_separator",
                "separator must not contain whitespace",
            )
            .with_context(format!("got {:?}", separator)));
        }
        Ok(())
    }

    fn validate_default_name(&self, config: &ContentConfig) -> Result<(), ValidationError> {
        if let Some(name) = &config.agent.default_name {
            if name.trim().is_empty() {
                return Err(ValidationError::invalid_format(
                    "agent.default_name",
                    "default name must not be blank",
                ));
            }
        }
        Ok(())
    }
}
