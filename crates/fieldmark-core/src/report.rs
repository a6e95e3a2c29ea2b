//! Run report
//!
//! Records, per changed field, the annotations before and after a run so
//! callers can log, diff or persist what the engine did.

use fieldmark_model::AnnotationDescriptor;
use std::collections::BTreeSet;

/// Annotation change on one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Fully qualified class name
    pub class: String,
    /// Field name
    pub field: String,
    /// Annotations before the run
    pub before: Vec<AnnotationDescriptor>,
    /// Annotations after the run
    pub after: Vec<AnnotationDescriptor>,
}

impl FieldChange {
    /// Annotations introduced by the run
    ///
    /// Includes annotations that gained attributes, in their final form.
    #[must_use]
    pub fn added(&self) -> Vec<&AnnotationDescriptor> {
        self.after
            .iter()
            .filter(|a| !self.before.contains(a))
            .collect()
    }

    /// Kinds of the annotations introduced by the run
    #[must_use]
    pub fn added_kinds(&self) -> Vec<&str> {
        self.added().into_iter().map(|a| a.kind().as_str()).collect()
    }
}

/// Summary of one `annotate()` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationReport {
    /// In-scope classes that were processed
    pub classes_visited: usize,
    /// Classes rejected by the filter
    pub classes_skipped: usize,
    changes: Vec<FieldChange>,
}

impl AnnotationReport {
    /// Create an empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, change: FieldChange) {
        self.changes.push(change);
    }

    /// All field changes in processing order
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Whether the run changed nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changes made to one class
    pub fn changes_for<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a FieldChange> + 'a {
        self.changes.iter().filter(move |c| c.class == class)
    }

    /// Change made to one field, if any
    #[must_use]
    pub fn change_for(&self, class: &str, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.class == class && c.field == field)
    }

    /// Names of classes with at least one changed field
    #[must_use]
    pub fn changed_classes(&self) -> BTreeSet<&str> {
        self.changes.iter().map(|c| c.class.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_model::kinds;

    fn change(class: &str, field: &str) -> FieldChange {
        FieldChange {
            class: class.into(),
            field: field.into(),
            before: vec![AnnotationDescriptor::new(kinds::SIZE).with_attribute("max", 20)],
            after: vec![
                AnnotationDescriptor::new(kinds::SIZE).with_attribute("max", 20),
                AnnotationDescriptor::new(kinds::NOT_NULL),
            ],
        }
    }

    #[test]
    fn added_excludes_pre_existing() {
        let change = change("com.example.Order", "note");
        assert_eq!(change.added_kinds(), vec![kinds::NOT_NULL]);
    }

    #[test]
    fn report_queries() {
        let mut report = AnnotationReport::new();
        assert!(report.is_empty());

        report.record(change("com.example.Order", "note"));
        report.record(change("com.example.Order", "code"));
        report.record(change("com.example.Line", "sku"));

        assert!(!report.is_empty());
        assert_eq!(report.changes().len(), 3);
        assert_eq!(report.changes_for("com.example.Order").count(), 2);
        assert!(report.change_for("com.example.Line", "sku").is_some());
        assert!(report.change_for("com.example.Line", "note").is_none());
        assert_eq!(
            report.changed_classes().into_iter().collect::<Vec<_>>(),
            vec!["com.example.Line", "com.example.Order"]
        );
    }
}
