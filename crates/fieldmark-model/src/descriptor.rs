//! Class and field descriptors
//!
//! Mutable views of classes supplied by the collaborator that parsed them.
//! Fields are never mutated directly: every change goes through the owning
//! [`ClassDescriptor`], which enforces that annotations are only ever
//! appended and that frozen (read-only) snapshots reject mutation.

use crate::annotation::{AnnotationDescriptor, AttributeValue};
use serde::{Deserialize, Serialize};

/// One field of a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,

    /// Declared type, e.g. `java.lang.String` or `int`
    #[serde(rename = "type")]
    type_name: String,

    #[serde(default)]
    annotations: Vec<AnnotationDescriptor>,
}

impl FieldDescriptor {
    /// Create field without annotations
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            annotations: Vec::new(),
        }
    }

    /// Attach a pre-existing annotation while building the descriptor
    #[inline]
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Annotations in the order they were attached
    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationDescriptor] {
        &self.annotations
    }

    /// Annotation of the given kind, if present
    #[must_use]
    pub fn annotation(&self, kind: &str) -> Option<&AnnotationDescriptor> {
        self.annotations.iter().find(|a| a.kind() == kind)
    }

    /// Whether an annotation of the given kind is present
    #[inline]
    #[must_use]
    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotation(kind).is_some()
    }

    /// Whether any of the given kinds is present
    #[must_use]
    pub fn has_any_annotation<I, S>(&self, kinds: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        kinds.into_iter().any(|k| self.has_annotation(k.as_ref()))
    }

    fn annotation_mut(&mut self, kind: &str) -> Option<&mut AnnotationDescriptor> {
        self.annotations.iter_mut().find(|a| a.kind() == kind)
    }
}

/// One class: its name, its own annotations and its declared fields
///
/// # Lifecycle
/// Built by the collaborator, mutated by the engine (annotations appended
/// only), then frozen or written back by the collaborator. A frozen class
/// rejects every mutation with [`MutationError::Frozen`].
///
/// # Example
/// ```
/// use fieldmark_model::{kinds, AnnotationDescriptor, ClassDescriptor, FieldDescriptor};
///
/// let mut class = ClassDescriptor::new("com.example.Order")
///     .with_field(FieldDescriptor::new("note", "java.lang.String"));
///
/// class
///     .add_field_annotation("note", AnnotationDescriptor::new(kinds::NOT_BLANK))
///     .unwrap();
/// assert!(class.field("note").unwrap().has_annotation(kinds::NOT_BLANK));
///
/// class.freeze();
/// assert!(class
///     .add_field_annotation("note", AnnotationDescriptor::new(kinds::NOT_NULL))
///     .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    name: String,

    #[serde(default)]
    annotations: Vec<AnnotationDescriptor>,

    #[serde(default)]
    fields: Vec<FieldDescriptor>,

    #[serde(default)]
    frozen: bool,
}

impl ClassDescriptor {
    /// Create class without annotations or fields
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            fields: Vec::new(),
            frozen: false,
        }
    }

    /// Attach a class-level annotation while building the descriptor
    #[inline]
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Declare a field while building the descriptor
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Fully-qualified name as supplied by the collaborator
    ///
    /// Not validated here; see `QualifiedName` for parsing.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class-level annotations
    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationDescriptor] {
        &self.annotations
    }

    /// Class-level annotation of the given kind, if present
    #[must_use]
    pub fn annotation(&self, kind: &str) -> Option<&AnnotationDescriptor> {
        self.annotations.iter().find(|a| a.kind() == kind)
    }

    /// Whether a class-level annotation of the given kind is present
    #[inline]
    #[must_use]
    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotation(kind).is_some()
    }

    /// Whether any of the given class-level kinds is present
    #[must_use]
    pub fn has_any_annotation<I, S>(&self, kinds: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        kinds.into_iter().any(|k| self.has_annotation(k.as_ref()))
    }

    /// Fields in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the snapshot is read-only
    #[inline]
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Make the snapshot read-only
    #[inline]
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Append an annotation to a field
    ///
    /// # Errors
    /// - [`MutationError::Frozen`] if the class is read-only
    /// - [`MutationError::FieldNotFound`] if no such field is declared
    /// - [`MutationError::DuplicateAnnotation`] if the kind is already present;
    ///   existing annotations are never replaced
    pub fn add_field_annotation(
        &mut self,
        field: &str,
        annotation: AnnotationDescriptor,
    ) -> Result<(), MutationError> {
        let class = self.name.clone();
        let target = self.writable_field(field)?;

        if target.has_annotation(annotation.kind().as_str()) {
            return Err(MutationError::DuplicateAnnotation {
                class,
                field: field.to_string(),
                kind: annotation.kind().to_string(),
            });
        }

        target.annotations.push(annotation);
        Ok(())
    }

    /// Set an attribute on an existing field annotation, unless already set
    ///
    /// Returns `true` if the attribute was added, `false` if it was already
    /// present (the existing value is kept).
    ///
    /// # Errors
    /// - [`MutationError::Frozen`] if the class is read-only
    /// - [`MutationError::FieldNotFound`] if no such field is declared
    /// - [`MutationError::AnnotationNotFound`] if the field lacks the annotation
    pub fn add_field_annotation_attribute(
        &mut self,
        field: &str,
        kind: &str,
        name: &str,
        value: AttributeValue,
    ) -> Result<bool, MutationError> {
        let class = self.name.clone();
        let target = self.writable_field(field)?;

        let annotation =
            target
                .annotation_mut(kind)
                .ok_or_else(|| MutationError::AnnotationNotFound {
                    class,
                    field: field.to_string(),
                    kind: kind.to_string(),
                })?;

        if annotation.has_attribute(name) {
            return Ok(false);
        }
        annotation.insert_attribute(name.to_string(), value);
        Ok(true)
    }

    fn writable_field(&mut self, field: &str) -> Result<&mut FieldDescriptor, MutationError> {
        if self.frozen {
            return Err(MutationError::Frozen {
                class: self.name.clone(),
                field: field.to_string(),
            });
        }

        let class = &self.name;
        self.fields
            .iter_mut()
            .find(|f| f.name == field)
            .ok_or_else(|| MutationError::FieldNotFound {
                class: class.clone(),
                field: field.to_string(),
            })
    }
}

/// A descriptor rejected a requested mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// Class snapshot is read-only
    #[error("class {class} is frozen; cannot modify field {field}")]
    Frozen {
        /// Fully qualified class name
        class: String,
        /// Field the mutation targeted
        field: String,
    },

    /// Field lookup failed
    #[error("field {class}.{field} not found")]
    FieldNotFound {
        /// Fully qualified class name
        class: String,
        /// Field that was looked up
        field: String,
    },

    /// Annotation of the same kind already exists
    #[error("field {class}.{field} already carries @{kind}")]
    DuplicateAnnotation {
        /// Fully qualified class name
        class: String,
        /// Field the mutation targeted
        field: String,
        /// Kind already present
        kind: String,
    },

    /// Annotation to extend does not exist
    #[error("field {class}.{field} does not carry @{kind}")]
    AnnotationNotFound {
        /// Fully qualified class name
        class: String,
        /// Field the mutation targeted
        field: String,
        /// Kind that was expected
        kind: String,
    },
}

impl MutationError {
    /// Name of the class the mutation targeted
    #[must_use]
    pub fn class(&self) -> &str {
        match self {
            Self::Frozen { class, .. }
            | Self::FieldNotFound { class, .. }
            | Self::DuplicateAnnotation { class, .. }
            | Self::AnnotationNotFound { class, .. } => class,
        }
    }

    /// Name of the field the mutation targeted
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Frozen { field, .. }
            | Self::FieldNotFound { field, .. }
            | Self::DuplicateAnnotation { field, .. }
            | Self::AnnotationNotFound { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::kinds;

    fn order() -> ClassDescriptor {
        ClassDescriptor::new("com.example.Order")
            .with_annotation(AnnotationDescriptor::new(kinds::ENTITY))
            .with_field(FieldDescriptor::new("id", "long"))
            .with_field(
                FieldDescriptor::new("note", "java.lang.String")
                    .with_annotation(AnnotationDescriptor::new(kinds::COLUMN).with_attribute("name", "n")),
            )
    }

    #[test]
    fn fields_keep_declaration_order() {
        let class = order();
        let names: Vec<_> = class.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, vec!["id", "note"]);
        assert!(class.has_annotation(kinds::ENTITY));
        assert!(class.has_any_annotation(kinds::DEFAULT_JPA_CLASS));
    }

    #[test]
    fn add_annotation_appends() {
        let mut class = order();
        class
            .add_field_annotation("id", AnnotationDescriptor::new(kinds::NOT_NULL))
            .unwrap();

        let id = class.field("id").unwrap();
        assert_eq!(id.annotations().len(), 1);
        assert!(id.has_annotation(kinds::NOT_NULL));
    }

    #[test]
    fn add_annotation_rejects_duplicate_kind() {
        let mut class = order();
        let result = class.add_field_annotation(
            "note",
            AnnotationDescriptor::new(kinds::COLUMN).with_attribute("name", "other"),
        );

        assert!(matches!(result, Err(MutationError::DuplicateAnnotation { .. })));
        let column = class.field("note").unwrap().annotation(kinds::COLUMN).unwrap();
        assert_eq!(column.attribute("name").and_then(AttributeValue::as_str), Some("n"));
    }

    #[test]
    fn add_annotation_unknown_field() {
        let mut class = order();
        let err = class
            .add_field_annotation("missing", AnnotationDescriptor::new(kinds::NOT_NULL))
            .unwrap_err();

        assert!(matches!(err, MutationError::FieldNotFound { .. }));
        assert_eq!(err.class(), "com.example.Order");
        assert_eq!(err.field(), "missing");
    }

    #[test]
    fn frozen_class_rejects_mutation() {
        let mut class = order();
        class.freeze();
        assert!(class.is_frozen());

        let err = class
            .add_field_annotation("id", AnnotationDescriptor::new(kinds::NOT_NULL))
            .unwrap_err();
        assert!(matches!(err, MutationError::Frozen { .. }));
        assert_eq!(err.to_string(), "class com.example.Order is frozen; cannot modify field id");

        let attr = class.add_field_annotation_attribute("note", kinds::COLUMN, "length", 3.into());
        assert!(matches!(attr, Err(MutationError::Frozen { .. })));
        assert!(class.field("id").unwrap().annotations().is_empty());
    }

    #[test]
    fn add_attribute_only_if_missing() {
        let mut class = order();

        let added = class
            .add_field_annotation_attribute("note", kinds::COLUMN, "length", 12.into())
            .unwrap();
        assert!(added);

        let kept = class
            .add_field_annotation_attribute("note", kinds::COLUMN, "name", "overwritten".into())
            .unwrap();
        assert!(!kept);

        let column = class.field("note").unwrap().annotation(kinds::COLUMN).unwrap();
        assert_eq!(column.attribute("length"), Some(&AttributeValue::Int(12)));
        assert_eq!(column.attribute("name").and_then(AttributeValue::as_str), Some("n"));
    }

    #[test]
    fn add_attribute_requires_annotation() {
        let mut class = order();
        let result = class.add_field_annotation_attribute("id", kinds::COLUMN, "length", 1.into());
        assert!(matches!(result, Err(MutationError::AnnotationNotFound { .. })));
    }

    #[test]
    fn descriptor_snapshot_from_json() {
        let json = r#"{
            "name": "com.example.Person",
            "annotations": [{ "kind": "fieldmark.AutoAnnotated" }],
            "fields": [
                { "name": "email", "type": "java.lang.String",
                  "annotations": [{ "kind": "org.jetbrains.annotations.Nullable" }] }
            ]
        }"#;
        let class: ClassDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(class.name(), "com.example.Person");
        assert!(!class.is_frozen());
        assert!(class.has_annotation(kinds::AUTO_ANNOTATED));
        let email = class.field("email").unwrap();
        assert_eq!(email.type_name(), "java.lang.String");
        assert!(email.has_any_annotation(kinds::DEFAULT_NULLABLE));
    }
}
