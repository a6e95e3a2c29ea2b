//! fieldmark configuration
//!
//! Decides which classes are annotated and how.
//!
//! # Core Concepts
//!
//! - [`ClassFilter`]: Package prefix, marker and ignore rules for classes
//! - [`ClassOptions`]: Type-driven policy plus validation/JPA inference switches
//! - [`AnnotatorConfig`]: Both of the above, loadable from JSON or YAML
//!
//! # Example
//!
//! ```rust
//! use fieldmark_config::AnnotatorConfig;
//!
//! let config = AnnotatorConfig::from_yaml("class_filter:\n  package_prefix: com.example\n").unwrap();
//! assert_eq!(config.class_filter.package_prefix, "com.example");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod filter;
pub mod options;

// Re-exports
pub use config::{AnnotatorConfig, ConfigFingerprint};
pub use error::{ConfigError, ScopeError};
pub use filter::ClassFilter;
pub use options::{
    ClassOptions, JpaAnnotations, TypeAnnotationPolicy, ValidationAnnotations, NOT_BLANK_REGEXP,
    PRIMITIVE_TYPES,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
