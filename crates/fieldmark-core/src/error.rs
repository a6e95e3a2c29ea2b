//! Error types for the annotation engine
//!
//! Every variant is fatal for an `annotate()` call: the run stops at the
//! first error and the caller decides whether to retry, skip the offending
//! class or halt the build. Classes processed before the error keep their
//! new annotations.

use fieldmark_config::ScopeError;
use fieldmark_model::MutationError;

/// Main engine error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    /// Filter could not determine a class's package
    #[error("scope resolution failed: {0}")]
    ScopeResolution(#[from] ScopeError),

    /// Collaborator's descriptor rejected a mutation
    #[error("descriptor unavailable: {0}")]
    DescriptorUnavailable(#[from] MutationError),

    /// Field is explicitly marked both non-null and nullable
    #[error(
        "field {class}.{field} is annotated with an annotation that signals non-nullability \
         and an annotation that signals nullability: {annotations:?}"
    )]
    InconsistentNullability {
        /// Fully qualified class name
        class: String,
        /// Offending field
        field: String,
        /// Marker kinds found on the field, in declaration order
        annotations: Vec<String>,
    },
}

impl AnnotateError {
    /// Class the error is attributed to, when known
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::ScopeResolution(ScopeError::MalformedClassName { class, .. }) => Some(class),
            Self::ScopeResolution(ScopeError::MalformedPrefix { .. }) => None,
            Self::DescriptorUnavailable(err) => Some(err.class()),
            Self::InconsistentNullability { class, .. } => Some(class),
        }
    }

    /// Field the error is attributed to, when known
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ScopeResolution(_) => None,
            Self::DescriptorUnavailable(err) => Some(err.field()),
            Self::InconsistentNullability { field, .. } => Some(field),
        }
    }
}

/// Result type alias for engine operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_model::NameError;

    #[test]
    fn mutation_error_converts() {
        let err: AnnotateError = MutationError::Frozen {
            class: "com.example.Order".into(),
            field: "note".into(),
        }
        .into();

        assert!(matches!(err, AnnotateError::DescriptorUnavailable(_)));
        assert_eq!(err.class(), Some("com.example.Order"));
        assert_eq!(err.field(), Some("note"));
        assert!(err.to_string().starts_with("descriptor unavailable: class com.example.Order is frozen"));
    }

    #[test]
    fn scope_error_converts() {
        let err: AnnotateError =
            ScopeError::malformed_class("com..X", NameError::EmptySegment("com..X".into())).into();

        assert!(matches!(err, AnnotateError::ScopeResolution(_)));
        assert_eq!(err.class(), Some("com..X"));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn inconsistent_nullability_display() {
        let err = AnnotateError::InconsistentNullability {
            class: "com.example.Order".into(),
            field: "note".into(),
            annotations: vec!["javax.annotation.Nonnull".into(), "javax.annotation.Nullable".into()],
        };
        assert!(err.to_string().contains("com.example.Order.note"));
        assert!(err.to_string().contains("javax.annotation.Nullable"));
    }
}
