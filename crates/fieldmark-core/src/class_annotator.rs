//! Per-class field pass
//!
//! [`ClassAnnotator`] walks the fields of one in-scope class in declaration
//! order and ensures the annotations implied by the type policy, the
//! resolved nullability and the JPA rules.
//!
//! # Non-overwrite law
//!
//! Every rule goes through a single `ensure` step:
//!
//! - absent kind: added with all of its attributes and remembered as
//!   introduced by this pass
//! - kind introduced earlier in this pass: only missing attributes are added,
//!   so the first write wins
//! - kind present before the pass: left untouched
//!
//! Because nothing that existed before a pass is ever modified, a second pass
//! over the same descriptors changes nothing.

use crate::error::AnnotateResult;
use crate::nullability::{Nullability, NullabilityResolver};
use crate::report::FieldChange;
use fieldmark_config::{ClassOptions, JpaAnnotations};
use fieldmark_model::{kinds, AnnotationDescriptor, AttributeValue, ClassDescriptor, FieldDescriptor, MutationError};
use std::collections::HashSet;

/// Annotates the fields of one class
#[derive(Debug)]
pub struct ClassAnnotator<'a> {
    class: &'a mut ClassDescriptor,
    options: &'a ClassOptions,
    resolver: NullabilityResolver<'a>,
}

impl<'a> ClassAnnotator<'a> {
    /// Create annotator for one class
    #[must_use]
    pub fn new(class: &'a mut ClassDescriptor, options: &'a ClassOptions) -> Self {
        Self {
            class,
            options,
            resolver: NullabilityResolver::new(options),
        }
    }

    /// Annotate every field that is not ignored
    ///
    /// Returns the fields whose annotations changed, in declaration order.
    ///
    /// # Errors
    /// - [`crate::AnnotateError::InconsistentNullability`] for contradicting markers
    /// - [`crate::AnnotateError::DescriptorUnavailable`] if the class rejects a mutation
    pub fn annotate(&mut self) -> AnnotateResult<Vec<FieldChange>> {
        let field_names: Vec<String> = self.class.fields().iter().map(|f| f.name().to_string()).collect();
        let is_jpa_class = self
            .class
            .has_any_annotation(&self.options.jpa_annotations.jpa_class_annotations);

        let mut changes = Vec::new();
        for name in &field_names {
            if let Some(change) = self.annotate_field(name, is_jpa_class)? {
                tracing::info!(
                    "Annotated field {}.{}: [{}] -> [{}]",
                    change.class,
                    change.field,
                    describe(&change.before),
                    describe(&change.after)
                );
                changes.push(change);
            }
        }
        Ok(changes)
    }

    fn annotate_field(&mut self, name: &str, is_jpa_class: bool) -> AnnotateResult<Option<FieldChange>> {
        let class_name = self.class.name().to_string();
        let field = field_of(self.class, name)?;

        if field.has_any_annotation(&self.options.ignored_field_annotations) {
            tracing::debug!("Ignoring field {}.{}", class_name, name);
            return Ok(None);
        }
        tracing::debug!("Visiting field {}.{} ({})", class_name, name, field.type_name());

        let before = field.annotations().to_vec();
        let type_name = field.type_name().to_string();
        let options = self.options;
        let mut pass = FieldPass::new(self.class, name);

        for annotation in options.annotations_for_type(&type_name) {
            pass.ensure(annotation)?;
        }

        let nullability = self.resolver.resolve(pass.class(), pass.field()?)?;
        tracing::debug!("Field {}.{} resolved {}", class_name, name, nullability);

        let validation = &options.validation_annotations;
        if validation.infer_not_null_constraint && nullability.is_non_null() {
            pass.ensure(&AnnotationDescriptor::new(kinds::NOT_NULL))?;
        }

        if validation.infer_strings_not_blank_constraints && options.is_text_type(&type_name) {
            match nullability {
                Nullability::NonNull => pass.ensure(&AnnotationDescriptor::new(kinds::NOT_BLANK))?,
                Nullability::Nullable => pass.ensure(&validation.null_or_not_blank_annotation)?,
                Nullability::Undetermined => {}
            }
        }

        if is_jpa_class && options.jpa_annotations.any_enabled() {
            pass.ensure_column(&options.jpa_annotations, nullability)?;
        }

        let after = pass.field()?.annotations().to_vec();
        if after == before {
            return Ok(None);
        }
        Ok(Some(FieldChange {
            class: class_name,
            field: name.to_string(),
            before,
            after,
        }))
    }
}

/// Mutation state for one field within one pass
struct FieldPass<'c> {
    class: &'c mut ClassDescriptor,
    field: &'c str,
    introduced: HashSet<String>,
}

impl<'c> FieldPass<'c> {
    fn new(class: &'c mut ClassDescriptor, field: &'c str) -> Self {
        Self {
            class,
            field,
            introduced: HashSet::new(),
        }
    }

    fn class(&self) -> &ClassDescriptor {
        &*self.class
    }

    fn field(&self) -> AnnotateResult<&FieldDescriptor> {
        field_of(&*self.class, self.field)
    }

    fn ensure(&mut self, annotation: &AnnotationDescriptor) -> AnnotateResult<()> {
        let kind = annotation.kind().as_str();

        if !self.field()?.has_annotation(kind) {
            self.class.add_field_annotation(self.field, annotation.clone())?;
            self.introduced.insert(kind.to_string());
            return Ok(());
        }

        if self.introduced.contains(kind) {
            for (name, value) in annotation.attributes() {
                self.class
                    .add_field_annotation_attribute(self.field, kind, name, value.clone())?;
            }
        } else {
            tracing::debug!(
                "Keeping existing @{} on {}.{}",
                annotation.kind().simple_name(),
                self.class.name(),
                self.field
            );
        }
        Ok(())
    }

    fn ensure_column(&mut self, jpa: &JpaAnnotations, nullability: Nullability) -> AnnotateResult<()> {
        let field = self.field()?;
        if field.has_annotation(kinds::TRANSIENT)
            || field.has_any_annotation(&jpa.annotations_that_preclude_column_annotation)
        {
            return Ok(());
        }

        let max_size = field
            .annotation(kinds::SIZE)
            .and_then(|size| size.attribute("max"))
            .and_then(AttributeValue::as_int);

        if jpa.infer_column_nullable && nullability.is_non_null() {
            self.ensure(&AnnotationDescriptor::new(kinds::COLUMN).with_attribute("nullable", false))?;
        }
        if jpa.infer_column_length {
            if let Some(max) = max_size {
                self.ensure(&AnnotationDescriptor::new(kinds::COLUMN).with_attribute("length", max))?;
            }
        }
        Ok(())
    }
}

fn field_of<'d>(class: &'d ClassDescriptor, name: &str) -> AnnotateResult<&'d FieldDescriptor> {
    class.field(name).ok_or_else(|| {
        MutationError::FieldNotFound {
            class: class.name().to_string(),
            field: name.to_string(),
        }
        .into()
    })
}

fn describe(annotations: &[AnnotationDescriptor]) -> String {
    annotations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
