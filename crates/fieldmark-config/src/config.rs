//! Annotator configuration
//!
//! [`AnnotatorConfig`] bundles the [`ClassFilter`] and [`ClassOptions`] and
//! loads them from JSON or YAML. Its [`ConfigFingerprint`] lets a build detect
//! that the configuration changed since classes were last annotated: already
//! annotated classes keep their annotations, so a changed config needs a clean
//! rebuild rather than another pass.

use crate::error::ConfigError;
use crate::filter::ClassFilter;
use crate::options::ClassOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{self, Display, Formatter};

/// Complete annotator configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Which classes to annotate
    pub class_filter: ClassFilter,

    /// How to annotate their fields
    pub class_options: ClassOptions,
}

impl AnnotatorConfig {
    /// Create from filter and options
    #[inline]
    #[must_use]
    pub fn new(class_filter: ClassFilter, class_options: ClassOptions) -> Self {
        Self {
            class_filter,
            class_options,
        }
    }

    /// Parse from JSON string; missing keys take their defaults
    ///
    /// # Errors
    /// Returns error if JSON is invalid or does not match the schema
    #[inline]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from YAML string; missing keys take their defaults
    ///
    /// # Errors
    /// Returns error if YAML is invalid or does not match the schema
    #[inline]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Serialize to YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Blake3 digest of the canonical (key-sorted) JSON form
    ///
    /// # Errors
    /// Returns error if the configuration cannot be serialized
    pub fn fingerprint(&self) -> Result<ConfigFingerprint, ConfigError> {
        let value = serde_json::to_value(self).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        let digest = blake3::hash(canonical_json(&value).as_bytes());
        Ok(ConfigFingerprint(hex::encode(digest.as_bytes())))
    }

    /// Fail if a previously stored fingerprint differs from this configuration
    ///
    /// `None` means no fingerprint was stored yet (first run).
    ///
    /// # Errors
    /// [`ConfigError::ConfigurationChanged`] on mismatch
    pub fn ensure_unchanged(&self, previous: Option<&ConfigFingerprint>) -> Result<ConfigFingerprint, ConfigError> {
        let current = self.fingerprint()?;
        match previous {
            Some(previous) if *previous != current => Err(ConfigError::ConfigurationChanged {
                previous: previous.to_string(),
                current: current.to_string(),
            }),
            _ => Ok(current),
        }
    }
}

/// Hex-encoded blake3 digest of a configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigFingerprint(String);

impl ConfigFingerprint {
    /// Wrap a stored hex digest
    #[inline]
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Hex digest
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 hex characters, for log lines
    #[inline]
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Display for ConfigFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical JSON (sorted keys, no whitespace)
fn canonical_json(value: &JsonValue) -> String {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();

            let parts: Vec<_> = keys
                .into_iter()
                .filter_map(|key| {
                    map.get(key)
                        .map(|val| format!("{}:{}", JsonValue::String(key.clone()), canonical_json(val)))
                })
                .collect();
            format!("{{{}}}", parts.join(","))
        }
        JsonValue::Array(arr) => {
            let parts: Vec<_> = arr.iter().map(canonical_json).collect();
            format!("[{}]", parts.join(","))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_model::{kinds, AnnotationDescriptor, AttributeValue};
    use pretty_assertions::assert_eq;

    const YAML: &str = r#"
class_filter:
  package_prefix: com.example
class_options:
  annotations_by_field_type:
    java.time.ZonedDateTime:
      - kind: javax.persistence.Column
        attributes:
          columnDefinition: timestamp with time zone
  jpa_annotations:
    infer_column_length: true
"#;

    #[test]
    fn default_config() {
        let config = AnnotatorConfig::default();
        assert_eq!(config.class_filter, ClassFilter::default());
        assert_eq!(config.class_options, ClassOptions::default());
    }

    #[test]
    fn from_yaml_fills_defaults() {
        let config = AnnotatorConfig::from_yaml(YAML).unwrap();

        assert_eq!(config.class_filter.package_prefix, "com.example");
        assert!(config.class_filter.ignored_annotations.contains(kinds::IGNORED));

        let options = &config.class_options;
        let column = &options.annotations_for_type("java.time.ZonedDateTime")[0];
        assert_eq!(column.kind().as_str(), kinds::COLUMN);
        assert_eq!(
            column.attribute("columnDefinition"),
            Some(&AttributeValue::Str("timestamp with time zone".into()))
        );
        assert!(options.jpa_annotations.infer_column_length);
        assert!(!options.jpa_annotations.infer_column_nullable);
        assert!(options.validation_annotations.infer_not_null_constraint);
    }

    #[test]
    fn from_json_empty_object_is_default() {
        let config = AnnotatorConfig::from_json("{}").unwrap();
        assert_eq!(config, AnnotatorConfig::default());
    }

    #[test]
    fn from_json_rejects_garbage() {
        let result = AnnotatorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));

        let result = AnnotatorConfig::from_yaml("class_filter: [1, 2");
        assert!(matches!(result, Err(ConfigError::InvalidYaml(_))));
    }

    #[test]
    fn json_roundtrip_preserves_policy() {
        let config = AnnotatorConfig::new(
            ClassFilter::new("com.example"),
            ClassOptions::default().with_type_annotation(
                "java.util.UUID",
                AnnotationDescriptor::new(kinds::COLUMN).with_attribute("length", 36),
            ),
        );
        let json = config.to_json().unwrap();
        assert_eq!(AnnotatorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = AnnotatorConfig::from_yaml(YAML).unwrap();
        let b = AnnotatorConfig::from_yaml(YAML).unwrap();
        let fa = a.fingerprint().unwrap();

        assert_eq!(fa, b.fingerprint().unwrap());
        assert_eq!(fa.as_str().len(), 64);
        assert_eq!(fa.short().len(), 8);

        let mut changed = a.clone();
        changed.class_filter.package_prefix = "com.other".into();
        assert_ne!(fa, changed.fingerprint().unwrap());
    }

    #[test]
    fn ensure_unchanged_detects_change() {
        let config = AnnotatorConfig::from_yaml(YAML).unwrap();

        let first = config.ensure_unchanged(None).unwrap();
        assert_eq!(config.ensure_unchanged(Some(&first)).unwrap(), first);

        let stale = ConfigFingerprint::from_hex("00".repeat(32));
        let result = config.ensure_unchanged(Some(&stale));
        assert!(matches!(result, Err(ConfigError::ConfigurationChanged { .. })));
    }

    #[test]
    fn canonical_json_sorts_keys() {
        let value = serde_json::json!({"b": 1, "a": {"d": [true, null], "c": "x"}});
        assert_eq!(canonical_json(&value), r#"{"a":{"c":"x","d":[true,null]},"b":1}"#);
    }
}
