//! Per-class annotation options
//!
//! [`ClassOptions`] carries the type-driven policy plus the switches that
//! control nullability-driven and JPA-driven inference.

use fieldmark_model::{kinds, AnnotationDescriptor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Field type name → annotations to ensure on every field of that type
///
/// Keys are declared type names as the collaborator reports them, e.g.
/// `java.time.ZonedDateTime` or `int`. A missing key means no type-driven
/// injection for that type.
pub type TypeAnnotationPolicy = IndexMap<String, Vec<AnnotationDescriptor>>;

/// Primitive types that can never hold an absent value
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Regular expression accepting any value with a non-whitespace character
pub const NOT_BLANK_REGEXP: &str = r"(?s).*\S.*";

/// Options for annotating the fields of in-scope classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassOptions {
    /// Annotations added depending on the declared field type
    pub annotations_by_field_type: TypeAnnotationPolicy,

    /// `javax.validation.constraints.*` inference
    pub validation_annotations: ValidationAnnotations,

    /// `javax.persistence.*` inference
    pub jpa_annotations: JpaAnnotations,

    /// Field annotations that exclude a field from annotation
    pub ignored_field_annotations: BTreeSet<String>,

    /// Annotations that explicitly mark a field non-null
    pub non_null_annotations: BTreeSet<String>,

    /// Annotations that explicitly mark a field nullable
    pub nullable_annotations: BTreeSet<String>,

    /// Declared types treated as text (eligible for blank checks)
    pub text_types: BTreeSet<String>,
}

impl ClassOptions {
    /// Default options with the given type-driven policy
    #[inline]
    #[must_use]
    pub fn with_policy(policy: TypeAnnotationPolicy) -> Self {
        Self {
            annotations_by_field_type: policy,
            ..Self::default()
        }
    }

    /// Add one type-driven annotation
    #[must_use]
    pub fn with_type_annotation(mut self, type_name: impl Into<String>, annotation: AnnotationDescriptor) -> Self {
        self.annotations_by_field_type
            .entry(type_name.into())
            .or_default()
            .push(annotation);
        self
    }

    /// Replace validation options
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationAnnotations) -> Self {
        self.validation_annotations = validation;
        self
    }

    /// Replace JPA options
    #[inline]
    #[must_use]
    pub fn with_jpa(mut self, jpa: JpaAnnotations) -> Self {
        self.jpa_annotations = jpa;
        self
    }

    /// Annotations configured for a field type (empty on a policy miss)
    #[inline]
    #[must_use]
    pub fn annotations_for_type(&self, type_name: &str) -> &[AnnotationDescriptor] {
        self.annotations_by_field_type
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a declared type is textual
    #[inline]
    #[must_use]
    pub fn is_text_type(&self, type_name: &str) -> bool {
        self.text_types.contains(type_name)
    }

    /// Whether a declared type is a primitive
    #[inline]
    #[must_use]
    pub fn is_primitive_type(type_name: &str) -> bool {
        PRIMITIVE_TYPES.contains(&type_name)
    }
}

impl Default for ClassOptions {
    fn default() -> Self {
        Self {
            annotations_by_field_type: IndexMap::new(),
            validation_annotations: ValidationAnnotations::default(),
            jpa_annotations: JpaAnnotations::default(),
            ignored_field_annotations: BTreeSet::from([kinds::IGNORED.to_string()]),
            non_null_annotations: to_set(kinds::DEFAULT_NON_NULL),
            nullable_annotations: to_set(kinds::DEFAULT_NULLABLE),
            text_types: BTreeSet::from(["java.lang.String".to_string()]),
        }
    }
}

/// Options for `javax.validation.constraints.*` inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationAnnotations {
    /// Add `@NotNull` to fields resolved non-null
    pub infer_not_null_constraint: bool,

    /// For text fields add `@NotBlank` (non-null) or
    /// [`Self::null_or_not_blank_annotation`] (nullable)
    pub infer_strings_not_blank_constraints: bool,

    /// Constraint for nullable text that must not be blank when present
    pub null_or_not_blank_annotation: AnnotationDescriptor,
}

impl ValidationAnnotations {
    /// All validation inference switched off
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            infer_not_null_constraint: false,
            infer_strings_not_blank_constraints: false,
            ..Self::default()
        }
    }
}

impl Default for ValidationAnnotations {
    fn default() -> Self {
        Self {
            infer_not_null_constraint: true,
            infer_strings_not_blank_constraints: true,
            null_or_not_blank_annotation: AnnotationDescriptor::new(kinds::PATTERN)
                .with_attribute("regexp", NOT_BLANK_REGEXP)
                .with_attribute("message", "must be null or not blank"),
        }
    }
}

/// Options for `javax.persistence.*` inference
///
/// Off by default: with Hibernate's `apply_to_ddl` the validation constraints
/// already drive the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpaAnnotations {
    /// For JPA classes, infer `@Column(nullable = false)` from non-nullability
    pub infer_column_nullable: bool,

    /// For JPA classes, infer `@Column(length = n)` from `@Size(max = n)`
    pub infer_column_length: bool,

    /// Class annotations marking a class as JPA-managed
    pub jpa_class_annotations: BTreeSet<String>,

    /// Field annotations under which no `@Column` may be added
    pub annotations_that_preclude_column_annotation: BTreeSet<String>,
}

impl JpaAnnotations {
    /// Both column inferences switched on
    #[inline]
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            infer_column_nullable: true,
            infer_column_length: true,
            ..Self::default()
        }
    }

    /// Whether any column inference is active
    #[inline]
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        self.infer_column_nullable || self.infer_column_length
    }
}

impl Default for JpaAnnotations {
    fn default() -> Self {
        Self {
            infer_column_nullable: false,
            infer_column_length: false,
            jpa_class_annotations: to_set(kinds::DEFAULT_JPA_CLASS),
            annotations_that_preclude_column_annotation: BTreeSet::from([kinds::MANY_TO_ONE.to_string()]),
        }
    }
}

fn to_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_model::AttributeValue;

    #[test]
    fn defaults_match_documented_values() {
        let options = ClassOptions::default();

        assert!(options.annotations_by_field_type.is_empty());
        assert!(options.ignored_field_annotations.contains(kinds::IGNORED));
        assert!(options.non_null_annotations.contains("org.jetbrains.annotations.NotNull"));
        assert!(options.nullable_annotations.contains("javax.annotation.CheckForNull"));
        assert!(options.is_text_type("java.lang.String"));
        assert!(!options.is_text_type("java.time.ZonedDateTime"));

        let validation = &options.validation_annotations;
        assert!(validation.infer_not_null_constraint);
        assert!(validation.infer_strings_not_blank_constraints);
        assert_eq!(
            validation
                .null_or_not_blank_annotation
                .attribute("regexp")
                .and_then(AttributeValue::as_str),
            Some(NOT_BLANK_REGEXP)
        );

        assert!(!options.jpa_annotations.any_enabled());
    }

    #[test]
    fn policy_lookup_miss_is_empty() {
        let options = ClassOptions::default().with_type_annotation(
            "java.time.ZonedDateTime",
            AnnotationDescriptor::new(kinds::COLUMN).with_attribute("columnDefinition", "timestamp with time zone"),
        );

        assert_eq!(options.annotations_for_type("java.time.ZonedDateTime").len(), 1);
        assert!(options.annotations_for_type("java.lang.String").is_empty());
    }

    #[test]
    fn type_annotations_accumulate_per_type() {
        let options = ClassOptions::default()
            .with_type_annotation("java.util.UUID", AnnotationDescriptor::new(kinds::COLUMN))
            .with_type_annotation("java.util.UUID", AnnotationDescriptor::new("com.example.Uuid"));

        let names: Vec<_> = options
            .annotations_for_type("java.util.UUID")
            .iter()
            .map(|a| a.kind().as_str())
            .collect();
        assert_eq!(names, vec![kinds::COLUMN, "com.example.Uuid"]);
    }

    #[test]
    fn primitive_types() {
        assert!(ClassOptions::is_primitive_type("int"));
        assert!(ClassOptions::is_primitive_type("boolean"));
        assert!(!ClassOptions::is_primitive_type("java.lang.Integer"));
    }

    #[test]
    fn switches() {
        let validation = ValidationAnnotations::disabled();
        assert!(!validation.infer_not_null_constraint);
        assert!(!validation.infer_strings_not_blank_constraints);

        let jpa = JpaAnnotations::enabled();
        assert!(jpa.infer_column_nullable && jpa.infer_column_length);
        assert!(jpa.jpa_class_annotations.contains(kinds::ENTITY));
    }
}
