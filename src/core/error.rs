use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArmoryError {
    #[error("Invalid configuration for {weapon}: {message}")]
    Configuration { weapon: String, message: String },

    #[error("Duplicate name '{name}' (already registered by {existing})")]
    DuplicateName { name: String, existing: String },

    #[error("Weapon not found: {0}")]
    NotFound(String),

    #[error("Definition error: {0}")]
    Definition(String),

    #[error("Resolver config error: {0}")]
    Config(String),
}

impl ArmoryError {
    pub fn configuration(weapon: impl Into<String>, message: impl Into<String>) -> Self {
        ArmoryError::Configuration {
            weapon: weapon.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ArmoryError {
    fn from(e: toml::de::Error) -> Self {
        ArmoryError::Definition(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArmoryError>;
