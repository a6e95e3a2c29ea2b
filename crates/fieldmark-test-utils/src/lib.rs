//! Testing utilities for the fieldmark workspace
//!
//! Shared class fixtures, option builders and tracing setup.

#![allow(missing_docs)]

use fieldmark_config::{ClassFilter, ClassOptions, JpaAnnotations, ValidationAnnotations};
use fieldmark_model::{kinds, AnnotationDescriptor, ClassDescriptor, FieldDescriptor};
use tracing_subscriber::EnvFilter;

pub const PACKAGE: &str = "com.example.fixtures";

pub const STRING: &str = "java.lang.String";
pub const ZONED_DATE_TIME: &str = "java.time.ZonedDateTime";

pub const JB_NOT_NULL: &str = "org.jetbrains.annotations.NotNull";
pub const JB_NULLABLE: &str = "org.jetbrains.annotations.Nullable";

pub const TIMESTAMP_WITH_TIME_ZONE: &str = "timestamp with time zone";

/// Install a test-writer subscriber honouring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fieldmark_core=debug")))
        .with_test_writer()
        .try_init();
}

pub fn class_name(simple: &str) -> String {
    format!("{PACKAGE}.{simple}")
}

pub fn marker(kind: &str) -> AnnotationDescriptor {
    AnnotationDescriptor::new(kind)
}

pub fn non_null_string(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, STRING).with_annotation(marker(JB_NOT_NULL))
}

pub fn nullable_string(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, STRING).with_annotation(marker(JB_NULLABLE))
}

pub fn size(max: i64) -> AnnotationDescriptor {
    AnnotationDescriptor::new(kinds::SIZE).with_attribute("max", max)
}

/// Entity with one field per basic rule; only `nonNullString` carries a marker
pub fn annotated() -> ClassDescriptor {
    ClassDescriptor::new(class_name("Annotated"))
        .with_annotation(marker(kinds::ENTITY))
        .with_field(non_null_string("nonNullString"))
        .with_field(FieldDescriptor::new("nullableString", STRING))
        .with_field(
            FieldDescriptor::new("nullableStringWithExplicitPattern", STRING)
                .with_annotation(AnnotationDescriptor::new(kinds::PATTERN).with_attribute("regexp", "originalRegexp")),
        )
        .with_field(FieldDescriptor::new("zonedDateTime", ZONED_DATE_TIME))
        .with_field(FieldDescriptor::new("ignoredString", STRING).with_annotation(marker(kinds::IGNORED)))
}

/// Opted-in class whose unmarked fields default to non-null
pub fn annotated_non_null_by_default() -> ClassDescriptor {
    ClassDescriptor::new(class_name("Annotated2"))
        .with_annotation(
            AnnotationDescriptor::new(kinds::AUTO_ANNOTATED).with_attribute(kinds::FIELDS_ARE_NONNULL_BY_DEFAULT, true),
        )
        .with_field(FieldDescriptor::new("nonNullString", STRING))
        .with_field(nullable_string("nullableString"))
        .with_field(FieldDescriptor::new("count", "int"))
}

/// Entity carrying the class-level ignore marker
pub fn ignored() -> ClassDescriptor {
    ClassDescriptor::new(class_name("Ignored"))
        .with_annotation(marker(kinds::IGNORED))
        .with_annotation(marker(kinds::ENTITY))
        .with_field(non_null_string("nonNullString"))
}

/// Entity exercising column inference
pub fn jpa_entity() -> ClassDescriptor {
    ClassDescriptor::new(class_name("Limited"))
        .with_annotation(marker(kinds::ENTITY))
        .with_field(non_null_string("nonNullString"))
        .with_field(nullable_string("nullableString"))
        .with_field(non_null_string("limitedString").with_annotation(size(1)))
        .with_field(
            non_null_string("limitedStringWithColumnLength")
                .with_annotation(size(1))
                .with_annotation(AnnotationDescriptor::new(kinds::COLUMN).with_attribute("length", 42)),
        )
        .with_field(non_null_string("transientString").with_annotation(marker(kinds::TRANSIENT)))
        .with_field(
            FieldDescriptor::new("parent", class_name("Annotated"))
                .with_annotation(marker(JB_NOT_NULL))
                .with_annotation(marker(kinds::MANY_TO_ONE)),
        )
}

pub fn filter() -> ClassFilter {
    ClassFilter::new(PACKAGE)
}

/// Default options plus `@Column(columnDefinition = "timestamp with time zone")`
/// on every `ZonedDateTime`
pub fn zoned_date_time_options() -> ClassOptions {
    ClassOptions::default().with_type_annotation(
        ZONED_DATE_TIME,
        AnnotationDescriptor::new(kinds::COLUMN).with_attribute("columnDefinition", TIMESTAMP_WITH_TIME_ZONE),
    )
}

/// Column inference only
pub fn jpa_options() -> ClassOptions {
    ClassOptions::default()
        .with_validation(ValidationAnnotations::disabled())
        .with_jpa(JpaAnnotations::enabled())
}

/// Kinds on a field, in order
pub fn kinds_of(class: &ClassDescriptor, field: &str) -> Vec<String> {
    class
        .field(field)
        .map(|f| f.annotations().iter().map(|a| a.kind().to_string()).collect())
        .unwrap_or_default()
}
