//! Column inference on JPA-managed classes

use fieldmark_core::PackageAnnotator;
use fieldmark_model::{kinds, AnnotationDescriptor, AttributeValue, ClassDescriptor};
use fieldmark_test_utils::*;
use pretty_assertions::assert_eq;

fn annotate_jpa_entity() -> ClassDescriptor {
    init_tracing();
    let mut classes = vec![jpa_entity()];
    PackageAnnotator::new(&mut classes, filter(), jpa_options())
        .annotate()
        .unwrap();
    classes.remove(0)
}

fn column(class: &ClassDescriptor, field: &str) -> Option<AnnotationDescriptor> {
    class.field(field).and_then(|f| f.annotation(kinds::COLUMN)).cloned()
}

#[test]
fn non_null_field_gets_column_not_nullable() {
    let class = annotate_jpa_entity();
    assert_eq!(
        column(&class, "nonNullString"),
        Some(AnnotationDescriptor::new(kinds::COLUMN).with_attribute("nullable", false))
    );
}

#[test]
fn nullable_field_gets_nothing() {
    let class = annotate_jpa_entity();
    assert_eq!(kinds_of(&class, "nullableString"), vec![JB_NULLABLE]);
}

#[test]
fn size_max_becomes_column_length() {
    let class = annotate_jpa_entity();
    let column = column(&class, "limitedString").unwrap();

    assert_eq!(column.attribute("nullable"), Some(&AttributeValue::Bool(false)));
    assert_eq!(column.attribute("length"), Some(&AttributeValue::Int(1)));
}

#[test]
fn explicit_column_is_kept_as_is() {
    let class = annotate_jpa_entity();
    assert_eq!(
        column(&class, "limitedStringWithColumnLength"),
        Some(AnnotationDescriptor::new(kinds::COLUMN).with_attribute("length", 42))
    );
}

#[test]
fn transient_and_many_to_one_fields_get_no_column() {
    let class = annotate_jpa_entity();
    assert_eq!(column(&class, "transientString"), None);
    assert_eq!(column(&class, "parent"), None);
}

#[test]
fn column_inference_is_off_by_default() {
    init_tracing();
    let mut classes = vec![jpa_entity()];
    PackageAnnotator::new(&mut classes, filter(), zoned_date_time_options())
        .annotate()
        .unwrap();

    assert_eq!(column(&classes[0], "nonNullString"), None);
    assert_eq!(column(&classes[0], "limitedString"), None);
}

#[test]
fn embeddable_counts_as_jpa_class() {
    init_tracing();
    let embeddable = ClassDescriptor::new(class_name("Address"))
        .with_annotation(marker(kinds::EMBEDDABLE))
        .with_field(non_null_string("street").with_annotation(size(80)));
    let mut classes = vec![embeddable];
    PackageAnnotator::new(&mut classes, filter(), jpa_options())
        .annotate()
        .unwrap();

    assert_eq!(
        column(&classes[0], "street"),
        Some(
            AnnotationDescriptor::new(kinds::COLUMN)
                .with_attribute("nullable", false)
                .with_attribute("length", 80)
        )
    );
}
