//! Nullability resolution
//!
//! Decides whether a field may hold an absent value:
//!
//! 1. Primitive types are [`Nullability::Undetermined`]; they cannot be absent
//!    and receive no nullability-driven annotations. Their markers are not
//!    inspected, so contradicting markers on a primitive pass unreported.
//! 2. A field carrying both a non-null and a nullable marker is an error.
//! 3. An explicit marker wins.
//! 4. Otherwise the class default applies: non-null when the class carries
//!    the auto-annotated marker with `fieldsAreNonnullByDefault = true`,
//!    nullable in every other case.

use crate::error::{AnnotateError, AnnotateResult};
use fieldmark_config::ClassOptions;
use fieldmark_model::{kinds, ClassDescriptor, FieldDescriptor};
use std::fmt::{self, Display, Formatter};

/// Resolved nullability of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullability {
    /// Field never holds an absent value
    NonNull,
    /// Field may hold an absent value
    Nullable,
    /// Nullability does not apply (primitive types)
    Undetermined,
}

impl Nullability {
    /// Whether the field is non-null
    #[inline]
    #[must_use]
    pub fn is_non_null(self) -> bool {
        matches!(self, Self::NonNull)
    }

    /// Whether the field is nullable
    #[inline]
    #[must_use]
    pub fn is_nullable(self) -> bool {
        matches!(self, Self::Nullable)
    }
}

impl Display for Nullability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NonNull => "non-null",
            Self::Nullable => "nullable",
            Self::Undetermined => "undetermined",
        };
        f.write_str(s)
    }
}

/// Explicit nullability marker found on a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullabilityMarker {
    /// One of the configured non-null annotations
    ExplicitNonNull,
    /// One of the configured nullable annotations
    ExplicitNullable,
}

/// Resolves field nullability against the configured marker sets
#[derive(Debug, Clone, Copy)]
pub struct NullabilityResolver<'a> {
    options: &'a ClassOptions,
}

impl<'a> NullabilityResolver<'a> {
    /// Create resolver over the given options
    #[inline]
    #[must_use]
    pub fn new(options: &'a ClassOptions) -> Self {
        Self { options }
    }

    /// Resolve nullability of `field` declared in `class`
    ///
    /// # Errors
    /// [`AnnotateError::InconsistentNullability`] if the field carries
    /// markers of both kinds
    pub fn resolve(&self, class: &ClassDescriptor, field: &FieldDescriptor) -> AnnotateResult<Nullability> {
        if ClassOptions::is_primitive_type(field.type_name()) {
            return Ok(Nullability::Undetermined);
        }

        let resolved = match self.explicit_marker(class, field)? {
            Some(NullabilityMarker::ExplicitNonNull) => Nullability::NonNull,
            Some(NullabilityMarker::ExplicitNullable) => Nullability::Nullable,
            None if Self::non_null_by_default(class) => Nullability::NonNull,
            None => Nullability::Nullable,
        };
        Ok(resolved)
    }

    /// Explicit marker on the field, if any
    ///
    /// # Errors
    /// [`AnnotateError::InconsistentNullability`] if markers of both kinds are present
    pub fn explicit_marker(
        &self,
        class: &ClassDescriptor,
        field: &FieldDescriptor,
    ) -> AnnotateResult<Option<NullabilityMarker>> {
        let non_null = field.has_any_annotation(&self.options.non_null_annotations);
        let nullable = field.has_any_annotation(&self.options.nullable_annotations);

        match (non_null, nullable) {
            (true, true) => Err(AnnotateError::InconsistentNullability {
                class: class.name().to_string(),
                field: field.name().to_string(),
                annotations: self.markers_on(field),
            }),
            (true, false) => Ok(Some(NullabilityMarker::ExplicitNonNull)),
            (false, true) => Ok(Some(NullabilityMarker::ExplicitNullable)),
            (false, false) => Ok(None),
        }
    }

    /// Whether unmarked fields of `class` default to non-null
    #[must_use]
    pub fn non_null_by_default(class: &ClassDescriptor) -> bool {
        class
            .annotation(kinds::AUTO_ANNOTATED)
            .and_then(|a| a.attribute(kinds::FIELDS_ARE_NONNULL_BY_DEFAULT))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn markers_on(&self, field: &FieldDescriptor) -> Vec<String> {
        field
            .annotations()
            .iter()
            .map(|a| a.kind().as_str())
            .filter(|kind| {
                self.options.non_null_annotations.contains(*kind)
                    || self.options.nullable_annotations.contains(*kind)
            })
            .map(str::to_string)
            .collect()
    }
}
