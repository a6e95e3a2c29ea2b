//! fieldmark annotation engine
//!
//! Infers nullability for the fields of in-scope classes and adds the
//! validation and persistence annotations it implies, without ever modifying
//! an annotation that was already present.
//!
//! # Core Concepts
//!
//! - [`PackageAnnotator`]: Root engine; filters classes and runs the field pass
//! - [`ClassAnnotator`]: Field pass for one class, enforcing the non-overwrite law
//! - [`NullabilityResolver`]: Decides non-null / nullable / undetermined per field
//! - [`AnnotationReport`]: Per-field before/after record of one run
//!
//! # Example
//!
//! ```rust
//! use fieldmark_core::prelude::*;
//!
//! let mut classes = vec![ClassDescriptor::new("com.example.Order")
//!     .with_annotation(
//!         AnnotationDescriptor::new(kinds::AUTO_ANNOTATED)
//!             .with_attribute(kinds::FIELDS_ARE_NONNULL_BY_DEFAULT, true),
//!     )
//!     .with_field(FieldDescriptor::new("code", "java.lang.String"))];
//!
//! let mut annotator = PackageAnnotator::new(&mut classes, ClassFilter::new("com.example"), ClassOptions::default());
//! let report = annotator.annotate().unwrap();
//! assert_eq!(report.changes().len(), 1);
//!
//! // A second run finds nothing left to do
//! assert!(annotator.annotate().unwrap().is_empty());
//!
//! let code = classes[0].field("code").unwrap();
//! assert!(code.has_annotation(kinds::NOT_NULL));
//! assert!(code.has_annotation(kinds::NOT_BLANK));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod class_annotator;
pub mod error;
pub mod nullability;
pub mod package;
pub mod report;

// Re-exports
pub use class_annotator::ClassAnnotator;
pub use error::{AnnotateError, AnnotateResult};
pub use nullability::{Nullability, NullabilityMarker, NullabilityResolver};
pub use package::PackageAnnotator;
pub use report::{AnnotationReport, FieldChange};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the engine
    pub use crate::{AnnotateError, AnnotateResult, AnnotationReport, PackageAnnotator};
    pub use fieldmark_config::{AnnotatorConfig, ClassFilter, ClassOptions};
    pub use fieldmark_model::{kinds, AnnotationDescriptor, ClassDescriptor, FieldDescriptor};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
