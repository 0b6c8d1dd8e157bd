//! # Violations and the Composite Validation Error
//!
//! A [`Violation`] is one field-scoped failure: a [`FieldPath`] naming the
//! exact field (through nested records and sequence indices) and a typed
//! [`ReasonKind`]. A validation pass collects them, in evaluation order, into
//! [`ValidationViolations`]; a non-empty collection becomes one
//! [`CompositeValidationError`].
//!
//! Aggregation is pure composition: violations are never deduplicated,
//! reordered, or truncated.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// One step in a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field of a record.
    Field(&'static str),
    /// A zero-based position in a sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Dotted path from the validated record to the failing field,
/// e.g. `admins.2.status`.
///
/// The empty path denotes the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of a top-level field.
    pub fn field(name: &'static str) -> Self {
        Self(vec![PathSegment::Field(name)])
    }

    /// The path of a top-level sequence position.
    pub fn index(i: usize) -> Self {
        Self(vec![PathSegment::Index(i)])
    }

    /// Extend this path by a sequence position.
    pub fn at(mut self, i: usize) -> Self {
        self.0.push(PathSegment::Index(i));
        self
    }

    /// Prepend `prefix` to this path.
    pub fn under(self, prefix: &FieldPath) -> Self {
        let mut segments = Vec::with_capacity(prefix.0.len() + self.0.len());
        segments.extend_from_slice(&prefix.0);
        segments.extend(self.0);
        Self(segments)
    }

    /// The individual segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// True for the path of the record itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasonKind {
    /// The value matched no member of the field's allowed set.
    NotInEnum {
        /// The rejected value, exactly as supplied.
        value: String,
        /// The allowed set, in declaration order.
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInEnum { value, allowed } => {
                write!(f, "{value:?} should be one of [{}]", allowed.join(", "))
            }
        }
    }
}

/// A single path-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path to the failing field.
    pub path: FieldPath,
    /// Typed failure reason.
    pub reason: ReasonKind,
}

impl Violation {
    pub fn new(path: FieldPath, reason: ReasonKind) -> Self {
        Self { path, reason }
    }

    /// Human-readable one-line message, e.g.
    /// `status: "Deleted" should be one of [Active, Inactive, Blocked]`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// Ordered collection of violations from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append every violation of a nested pass, re-pathed under `prefix`.
    pub fn absorb(&mut self, prefix: &FieldPath, nested: ValidationViolations) {
        self.violations.extend(
            nested
                .violations
                .into_iter()
                .map(|v| Violation::new(v.path.under(prefix), v.reason)),
        );
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violations in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// `Ok(())` when empty, otherwise the composite error for `entity`.
    pub fn into_result(self, entity: &'static str) -> Result<(), CompositeValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CompositeValidationError {
                entity,
                violations: self,
            })
        }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

impl Serialize for ValidationViolations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            path: &'a FieldPath,
            reason: &'a ReasonKind,
            message: String,
        }

        serializer.collect_seq(self.violations.iter().map(|v| Entry {
            path: &v.path,
            reason: &v.reason,
            message: v.reason.to_string(),
        }))
    }
}

impl IntoIterator for ValidationViolations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationViolations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl FromIterator<Violation> for ValidationViolations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Every violation found in one validation pass over a record.
///
/// Only constructed non-empty, through [`ValidationViolations::into_result`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for {entity}:\n{violations}")]
pub struct CompositeValidationError {
    entity: &'static str,
    violations: ValidationViolations,
}

impl CompositeValidationError {
    /// Name of the validated record type.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// The violations, in evaluation order.
    pub fn violations(&self) -> &ValidationViolations {
        &self.violations
    }

    /// Consumes self and returns the violations.
    pub fn into_violations(self) -> ValidationViolations {
        self.violations
    }
}
