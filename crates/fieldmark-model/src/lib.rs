//! fieldmark descriptor model
//!
//! An explicit metadata model for classes, fields and annotations, decoupled
//! from whatever mechanism parses or writes the underlying class files.
//!
//! # Core Concepts
//!
//! - [`AnnotationDescriptor`]: Immutable annotation value (kind + attributes)
//! - [`FieldDescriptor`]: Declared type and current annotations of one field
//! - [`ClassDescriptor`]: Owns fields; the only entry point for mutation
//! - [`QualifiedName`]: Dotted class/package names with segment-wise prefixes
//!
//! # Example
//!
//! ```rust
//! use fieldmark_model::{kinds, AnnotationDescriptor, ClassDescriptor, FieldDescriptor};
//!
//! let class = ClassDescriptor::new("com.example.Order")
//!     .with_annotation(AnnotationDescriptor::new(kinds::ENTITY))
//!     .with_field(FieldDescriptor::new("note", "java.lang.String"));
//!
//! assert_eq!(class.fields().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod annotation;
pub mod descriptor;
pub mod name;

// Re-exports
pub use annotation::{kinds, AnnotationDescriptor, AnnotationKind, AttributeValue};
pub use descriptor::{ClassDescriptor, FieldDescriptor, MutationError};
pub use name::{NameError, QualifiedName};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building descriptors
    pub use crate::{
        kinds, AnnotationDescriptor, AnnotationKind, AttributeValue, ClassDescriptor,
        FieldDescriptor, MutationError, QualifiedName,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
