//! Annotation descriptors
//!
//! Provides [`AnnotationDescriptor`], an immutable value naming an annotation
//! kind together with its attribute values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Opaque identity of an annotation
///
/// A namespaced string such as `javax.validation.constraints.NotNull`.
/// Two kinds are the same annotation iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationKind(String);

impl AnnotationKind {
    /// Create kind from its qualified name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Qualified name of the kind
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment, e.g. `NotNull`
    #[inline]
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl Display for AnnotationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AnnotationKind {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for AnnotationKind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AnnotationKind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Value of a single annotation attribute
///
/// Deserializes untagged, so config files can write plain JSON/YAML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean attribute, e.g. `nullable = false`
    Bool(bool),

    /// Integral attribute, e.g. `length = 255`
    Int(i64),

    /// Floating point attribute
    Float(f64),

    /// String attribute, e.g. `regexp = "..."`
    Str(String),

    /// Array attribute
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// String payload, if this is a string attribute
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if this is an integral attribute
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean attribute
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// One annotation: its kind plus named attribute values
///
/// Attribute order is preserved for stable diagnostics; equality ignores it.
///
/// # Example
/// ```
/// use fieldmark_model::{AnnotationDescriptor, kinds};
///
/// let column = AnnotationDescriptor::new(kinds::COLUMN)
///     .with_attribute("columnDefinition", "timestamp with time zone");
/// assert_eq!(
///     column.attribute("columnDefinition").and_then(|v| v.as_str()),
///     Some("timestamp with time zone")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDescriptor {
    kind: AnnotationKind,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, AttributeValue>,
}

impl AnnotationDescriptor {
    /// Marker annotation without attributes
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<AnnotationKind>) -> Self {
        Self {
            kind: kind.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Add or replace an attribute, returning the updated descriptor
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Annotation kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &AnnotationKind {
        &self.kind
    }

    /// Attribute by name
    #[inline]
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Whether the attribute is set
    #[inline]
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// All attributes in insertion order
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
        &self.attributes
    }

    pub(crate) fn insert_attribute(&mut self, name: String, value: AttributeValue) {
        self.attributes.insert(name, value);
    }
}

impl Display for AnnotationDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.kind)?;
        if self.attributes.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

/// Well-known annotation kinds
pub mod kinds {
    /// `javax.validation.constraints.NotNull`
    pub const NOT_NULL: &str = "javax.validation.constraints.NotNull";
    /// `javax.validation.constraints.NotBlank`
    pub const NOT_BLANK: &str = "javax.validation.constraints.NotBlank";
    /// `javax.validation.constraints.Pattern`
    pub const PATTERN: &str = "javax.validation.constraints.Pattern";
    /// `javax.validation.constraints.Size`
    pub const SIZE: &str = "javax.validation.constraints.Size";

    /// `javax.persistence.Column`
    pub const COLUMN: &str = "javax.persistence.Column";
    /// `javax.persistence.Transient`
    pub const TRANSIENT: &str = "javax.persistence.Transient";
    /// `javax.persistence.ManyToOne`
    pub const MANY_TO_ONE: &str = "javax.persistence.ManyToOne";
    /// `javax.persistence.Entity`
    pub const ENTITY: &str = "javax.persistence.Entity";
    /// `javax.persistence.Embeddable`
    pub const EMBEDDABLE: &str = "javax.persistence.Embeddable";
    /// `javax.persistence.MappedSuperclass`
    pub const MAPPED_SUPERCLASS: &str = "javax.persistence.MappedSuperclass";

    /// Excludes a class or field from annotation
    pub const IGNORED: &str = "fieldmark.Ignored";
    /// Opts a class in; carries `fieldsAreNonnullByDefault`
    pub const AUTO_ANNOTATED: &str = "fieldmark.AutoAnnotated";
    /// Attribute of [`AUTO_ANNOTATED`] making unmarked fields non-null
    pub const FIELDS_ARE_NONNULL_BY_DEFAULT: &str = "fieldsAreNonnullByDefault";

    /// Annotations that signal non-nullability
    pub const DEFAULT_NON_NULL: &[&str] = &[
        "org.jetbrains.annotations.NotNull",
        "javax.annotation.Nonnull",
        "edu.umd.cs.findbugs.annotations.NonNull",
        "android.support.annotation.NonNull",
        "androidx.annotation.NonNull",
        "androidx.annotation.RecentlyNonNull",
        "org.checkerframework.checker.nullness.qual.NonNull",
        "org.checkerframework.checker.nullness.compatqual.NonNullDecl",
        "org.checkerframework.checker.nullness.compatqual.NonNullType",
        "com.android.annotations.NonNull",
        NOT_NULL,
        "javax.validation.constraints.NotNull.List",
    ];

    /// Annotations that signal nullability
    pub const DEFAULT_NULLABLE: &[&str] = &[
        "org.jetbrains.annotations.Nullable",
        "javax.annotation.Nullable",
        "javax.annotation.CheckForNull",
        "edu.umd.cs.findbugs.annotations.Nullable",
        "android.support.annotation.Nullable",
        "androidx.annotation.Nullable",
        "androidx.annotation.RecentlyNullable",
        "org.checkerframework.checker.nullness.qual.Nullable",
        "org.checkerframework.checker.nullness.compatqual.NullableDecl",
        "org.checkerframework.checker.nullness.compatqual.NullableType",
        "com.android.annotations.Nullable",
    ];

    /// Class annotations marking JPA-managed types
    pub const DEFAULT_JPA_CLASS: &[&str] = &[ENTITY, EMBEDDABLE, MAPPED_SUPERCLASS];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_simple_name() {
        let kind = AnnotationKind::from(kinds::NOT_NULL);
        assert_eq!(kind.simple_name(), "NotNull");
        assert_eq!(AnnotationKind::new("Bare").simple_name(), "Bare");
        assert!(kind == kinds::NOT_NULL);
    }

    #[test]
    fn descriptor_builder() {
        let pattern = AnnotationDescriptor::new(kinds::PATTERN)
            .with_attribute("regexp", "(?s).*\\S.*")
            .with_attribute("flags", AttributeValue::List(vec![]));

        assert_eq!(pattern.kind(), &AnnotationKind::from(kinds::PATTERN));
        assert!(pattern.has_attribute("regexp"));
        assert!(!pattern.has_attribute("message"));
        assert_eq!(
            pattern.attribute("regexp").and_then(AttributeValue::as_str),
            Some("(?s).*\\S.*")
        );
    }

    #[test]
    fn equality_ignores_attribute_order() {
        let a = AnnotationDescriptor::new(kinds::COLUMN)
            .with_attribute("nullable", false)
            .with_attribute("length", 42);
        let b = AnnotationDescriptor::new(kinds::COLUMN)
            .with_attribute("length", 42)
            .with_attribute("nullable", false);
        assert_eq!(a, b);
    }

    #[test]
    fn display_formats_attributes() {
        let column = AnnotationDescriptor::new(kinds::COLUMN)
            .with_attribute("name", "originalName")
            .with_attribute("nullable", false);
        assert_eq!(
            column.to_string(),
            "@javax.persistence.Column(name=\"originalName\", nullable=false)"
        );
        assert_eq!(
            AnnotationDescriptor::new(kinds::IGNORED).to_string(),
            "@fieldmark.Ignored"
        );
    }

    #[test]
    fn attribute_value_accessors() {
        assert_eq!(AttributeValue::from(7).as_int(), Some(7));
        assert_eq!(AttributeValue::from(true).as_bool(), Some(true));
        assert_eq!(AttributeValue::from("x").as_int(), None);
        assert_eq!(
            AttributeValue::List(vec![1.into(), "a".into()]).to_string(),
            "{1, \"a\"}"
        );
    }

    #[test]
    fn descriptor_deserializes_untagged_values() {
        let json = r#"{
            "kind": "javax.persistence.Column",
            "attributes": { "columnDefinition": "timestamp with time zone", "nullable": false, "length": 12 }
        }"#;
        let column: AnnotationDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(column.kind().as_str(), kinds::COLUMN);
        assert_eq!(column.attribute("nullable"), Some(&AttributeValue::Bool(false)));
        assert_eq!(column.attribute("length"), Some(&AttributeValue::Int(12)));
    }

    #[test]
    fn descriptor_attributes_default_to_empty() {
        let marker: AnnotationDescriptor =
            serde_json::from_str(r#"{ "kind": "javax.persistence.Transient" }"#).unwrap();
        assert!(marker.attributes().is_empty());
    }
}
