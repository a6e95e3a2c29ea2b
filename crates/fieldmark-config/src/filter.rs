//! Class scoping
//!
//! [`ClassFilter`] decides which classes the engine visits at all.

use crate::error::ScopeError;
use fieldmark_model::{kinds, ClassDescriptor, QualifiedName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Determines which classes get annotated
///
/// A class is in scope iff
/// 1. its package lies within `package_prefix` (segment-wise; empty = all),
/// 2. it carries one of `marker_annotations`, when that set is non-empty, and
/// 3. it carries none of `ignored_annotations`.
///
/// Ignored classes are excluded entirely, whatever their fields carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassFilter {
    /// Package containing the classes to annotate
    pub package_prefix: String,

    /// Class annotations required for inclusion (empty = no requirement)
    pub marker_annotations: BTreeSet<String>,

    /// Class annotations that exclude a class
    pub ignored_annotations: BTreeSet<String>,
}

impl ClassFilter {
    /// Filter for every class within `package_prefix`
    #[inline]
    #[must_use]
    pub fn new(package_prefix: impl Into<String>) -> Self {
        Self {
            package_prefix: package_prefix.into(),
            ..Self::default()
        }
    }

    /// Require one of the given class annotations
    #[must_use]
    pub fn with_marker_annotations<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marker_annotations = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Require a JPA class annotation or the auto-annotated marker
    #[must_use]
    pub fn with_default_markers(self) -> Self {
        let markers = kinds::DEFAULT_JPA_CLASS
            .iter()
            .copied()
            .chain(std::iter::once(kinds::AUTO_ANNOTATED));
        self.with_marker_annotations(markers)
    }

    /// Replace the set of annotations that exclude a class
    #[must_use]
    pub fn with_ignored_annotations<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_annotations = ignored.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the class should be annotated
    ///
    /// # Errors
    /// [`ScopeError`] if the class name or the configured prefix is malformed
    pub fn is_in_scope(&self, class: &ClassDescriptor) -> Result<bool, ScopeError> {
        Ok(self.in_package(class)? && self.carries_marker(class) && !self.is_ignored(class))
    }

    /// Whether the class lies within the configured package
    ///
    /// # Errors
    /// [`ScopeError`] if the class name or the configured prefix is malformed
    pub fn in_package(&self, class: &ClassDescriptor) -> Result<bool, ScopeError> {
        let prefix: QualifiedName =
            self.package_prefix
                .parse()
                .map_err(|source| ScopeError::MalformedPrefix {
                    prefix: self.package_prefix.clone(),
                    source,
                })?;

        let name: QualifiedName = class
            .name()
            .parse()
            .map_err(|source| ScopeError::malformed_class(class.name(), source))?;

        if name.is_empty() {
            return Err(ScopeError::malformed_class(
                class.name(),
                fieldmark_model::NameError::EmptySegment(class.name().to_string()),
            ));
        }

        Ok(prefix.is_prefix_of(&name.package()))
    }

    /// Whether the class carries a required marker (always true without markers)
    #[inline]
    #[must_use]
    pub fn carries_marker(&self, class: &ClassDescriptor) -> bool {
        self.marker_annotations.is_empty() || class.has_any_annotation(&self.marker_annotations)
    }

    /// Whether the class carries an ignore marker
    #[inline]
    #[must_use]
    pub fn is_ignored(&self, class: &ClassDescriptor) -> bool {
        class.has_any_annotation(&self.ignored_annotations)
    }
}

impl Default for ClassFilter {
    fn default() -> Self {
        Self {
            package_prefix: String::new(),
            marker_annotations: BTreeSet::new(),
            ignored_annotations: BTreeSet::from([kinds::IGNORED.to_string()]),
        }
    }
}
