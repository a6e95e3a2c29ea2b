//! Error types for scoping and configuration
//!
//! - [`ScopeError`]: a class (or the configured prefix) has no resolvable package
//! - [`ConfigError`]: loading, serializing or re-checking a configuration failed

use fieldmark_model::NameError;

/// The filter cannot determine whether a class is in scope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// Class name is not a well-formed qualified name
    #[error("cannot resolve package of class '{class}': {source}")]
    MalformedClassName {
        /// Class name as reported by the descriptor
        class: String,
        /// Parse failure
        #[source]
        source: NameError,
    },

    /// Configured package prefix is not a well-formed qualified name
    #[error("invalid package prefix '{prefix}': {source}")]
    MalformedPrefix {
        /// Configured prefix
        prefix: String,
        /// Parse failure
        #[source]
        source: NameError,
    },
}

impl ScopeError {
    /// Create malformed class name error
    pub fn malformed_class(class: impl Into<String>, source: NameError) -> Self {
        Self::MalformedClassName {
            class: class.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON input could not be parsed
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// YAML input could not be parsed
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Configuration could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Stored fingerprint differs from the current configuration
    #[error(
        "the configuration has changed (was {previous}, now {current}); \
         clean and rebuild before annotating again"
    )]
    ConfigurationChanged {
        /// Stored fingerprint
        previous: String,
        /// Fingerprint of the current configuration
        current: String,
    },
}
