//! Package annotator (root engine)
//!
//! [`PackageAnnotator`] filters a set of class descriptors and runs a
//! [`ClassAnnotator`] over every class in scope.
//!
//! # Example
//!
//! ```rust
//! use fieldmark_config::{ClassFilter, ClassOptions};
//! use fieldmark_core::PackageAnnotator;
//! use fieldmark_model::{kinds, ClassDescriptor, FieldDescriptor};
//!
//! let mut classes = vec![
//!     ClassDescriptor::new("com.example.Order").with_field(FieldDescriptor::new("note", "java.lang.String")),
//! ];
//!
//! let report = PackageAnnotator::new(&mut classes, ClassFilter::new("com.example"), ClassOptions::default())
//!     .annotate()
//!     .unwrap();
//!
//! assert_eq!(report.changed_classes().len(), 1);
//! assert!(classes[0].field("note").unwrap().has_annotation(kinds::PATTERN));
//! ```

use crate::class_annotator::ClassAnnotator;
use crate::error::AnnotateResult;
use crate::report::AnnotationReport;
use fieldmark_config::{AnnotatorConfig, ClassFilter, ClassOptions};
use fieldmark_model::ClassDescriptor;

/// Annotates every in-scope class of a package
///
/// Holds an exclusive borrow of the descriptors for its whole lifetime, so two
/// runs over the same set cannot overlap.
#[derive(Debug)]
pub struct PackageAnnotator<'a> {
    classes: &'a mut [ClassDescriptor],
    filter: ClassFilter,
    options: ClassOptions,
}

impl<'a> PackageAnnotator<'a> {
    /// Create annotator over `classes`
    #[inline]
    #[must_use]
    pub fn new(classes: &'a mut [ClassDescriptor], filter: ClassFilter, options: ClassOptions) -> Self {
        Self {
            classes,
            filter,
            options,
        }
    }

    /// Create annotator from a loaded configuration
    #[inline]
    #[must_use]
    pub fn from_config(classes: &'a mut [ClassDescriptor], config: AnnotatorConfig) -> Self {
        Self::new(classes, config.class_filter, config.class_options)
    }

    /// Class filter in use
    #[inline]
    #[must_use]
    pub fn filter(&self) -> &ClassFilter {
        &self.filter
    }

    /// Class options in use
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ClassOptions {
        &self.options
    }

    /// Descriptors, in their current state
    #[inline]
    #[must_use]
    pub fn classes(&self) -> &[ClassDescriptor] {
        self.classes
    }

    /// Annotate all in-scope classes in input order
    ///
    /// Stops at the first error; classes already processed keep their new
    /// annotations.
    ///
    /// # Errors
    /// - [`crate::AnnotateError::ScopeResolution`] if a class name cannot be scoped
    /// - [`crate::AnnotateError::InconsistentNullability`] for contradicting markers
    /// - [`crate::AnnotateError::DescriptorUnavailable`] if a class rejects a mutation
    pub fn annotate(&mut self) -> AnnotateResult<AnnotationReport> {
        tracing::info!(
            "Annotating classes in package '{}' (markers: {:?})",
            self.filter.package_prefix,
            self.filter.marker_annotations
        );

        let mut report = AnnotationReport::new();
        for class in self.classes.iter_mut() {
            if !self.filter.is_in_scope(class)? {
                let reason = if self.filter.is_ignored(class) {
                    "ignored"
                } else {
                    "out of scope"
                };
                tracing::debug!("Skipping class {} ({})", class.name(), reason);
                report.classes_skipped += 1;
                continue;
            }

            tracing::debug!("Visiting class {}", class.name());
            report.classes_visited += 1;
            for change in ClassAnnotator::new(class, &self.options).annotate()? {
                report.record(change);
            }
        }

        tracing::info!(
            "Annotated {} class(es), {} field(s) changed",
            report.changed_classes().len(),
            report.changes().len()
        );
        Ok(report)
    }
}
