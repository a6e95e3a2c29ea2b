//! Qualified names for classes and packages
//!
//! Provides [`QualifiedName`] for dotted JVM-style names such as
//! `com.example.Order` or `com.example.Outer$Inner`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Dotted, segment-wise name of a class or package
///
/// # Examples
/// - `com.example.Order` → package `com.example`, simple name `Order`
/// - `com.example.Outer$Inner` → package `com.example`, simple name `Outer$Inner`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName(Vec<String>);

impl QualifiedName {
    /// Create new name from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Empty name (the unnamed root package)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get name segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if name is empty (root package)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enclosing package: every segment but the last
    ///
    /// A class in the unnamed package yields [`QualifiedName::root`].
    #[inline]
    #[must_use]
    pub fn package(&self) -> Self {
        match self.0.split_last() {
            Some((_, rest)) => Self(rest.to_vec()),
            None => Self::root(),
        }
    }

    /// Last segment (simple class name)
    #[inline]
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Append a segment, returning new name
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Check if this name is a segment-wise prefix of another
    ///
    /// # Examples
    /// - `com.example` is prefix of `com.example.orders`
    /// - `com.example` is NOT prefix of `com.examples`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(NameError::EmptySegment(s.to_string()))
                } else if seg.contains(|c: char| !c.is_alphanumeric() && c != '_' && c != '$') {
                    Err(NameError::InvalidSegment(seg.to_string()))
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl Default for QualifiedName {
    fn default() -> Self {
        Self::root()
    }
}

/// Errors raised while parsing a qualified name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Empty segment, e.g. `com..Order` or a trailing dot
    #[error("name '{0}' contains an empty segment")]
    EmptySegment(String),

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric, '_' or '$')")]
    InvalidSegment(String),
}
