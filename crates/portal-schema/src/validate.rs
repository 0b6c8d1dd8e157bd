//! # Entity Validator
//!
//! One generic engine drives validation for every record type. Each type
//! implements [`Schema`] by returning a static table of [`FieldRule`]s; the
//! blanket [`Validate`] impl walks that table in declaration order and
//! collects every violation.
//!
//! ## Rule kinds
//!
//! - [`FieldRule::one_of`]: a string field that, when present, must match a
//!   member of an [`EnumSet`].
//! - [`FieldRule::nested`]: an optional sub-record, validated recursively;
//!   its violations are re-pathed under the field name.
//! - [`FieldRule::sequence`]: an optional sequence of optional sub-records;
//!   each present element is validated and re-pathed under `field.index`.
//!
//! Fields without a rule are unconstrained. Absent values (see
//! [`Absent`](crate::constraint::Absent)) never produce a violation.
//!
//! ## Example
//!
//! ```
//! use portal_schema::constraint::EnumSet;
//! use portal_schema::validate::{FieldRule, Schema, Validate};
//!
//! static LEVEL: EnumSet = EnumSet::new(&["Low", "High"]);
//!
//! struct Alarm {
//!     level: Option<String>,
//! }
//!
//! impl Schema for Alarm {
//!     const ENTITY: &'static str = "Alarm";
//!
//!     fn rules() -> &'static [FieldRule<Self>] {
//!         static RULES: [FieldRule<Alarm>; 1] =
//!             [FieldRule::one_of("level", &LEVEL, |a| a.level.as_deref())];
//!         &RULES
//!     }
//! }
//!
//! let alarm = Alarm { level: Some("medium".into()) };
//! let err = alarm.validate().unwrap_err();
//! assert_eq!(err.violations().violations()[0].path, "level");
//! ```

use crate::constraint::{Absent, EnumSet};
use crate::violation::{CompositeValidationError, FieldPath, ValidationViolations, Violation};

/// Present-or-absent elements of a nested sequence, as validators.
pub type Elements<'a> = Vec<Option<&'a dyn Validate>>;

/// How a single field is checked.
pub enum FieldCheck<E> {
    OneOf {
        allowed: &'static EnumSet,
        value: fn(&E) -> Option<&str>,
    },
    Nested(fn(&E) -> Option<&dyn Validate>),
    Sequence(fn(&E) -> Option<Elements<'_>>),
}

/// A named field and its check.
pub struct FieldRule<E> {
    name: &'static str,
    check: FieldCheck<E>,
}

impl<E> FieldRule<E> {
    pub const fn one_of(
        name: &'static str,
        allowed: &'static EnumSet,
        value: fn(&E) -> Option<&str>,
    ) -> Self {
        Self {
            name,
            check: FieldCheck::OneOf { allowed, value },
        }
    }

    pub const fn nested(name: &'static str, get: fn(&E) -> Option<&dyn Validate>) -> Self {
        Self {
            name,
            check: FieldCheck::Nested(get),
        }
    }

    pub const fn sequence(name: &'static str, get: fn(&E) -> Option<Elements<'_>>) -> Self {
        Self {
            name,
            check: FieldCheck::Sequence(get),
        }
    }

    /// The wire name the rule applies to.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self) -> &FieldCheck<E> {
        &self.check
    }

    fn apply(&self, entity: &E, out: &mut ValidationViolations) {
        match &self.check {
            FieldCheck::OneOf { allowed, value } => {
                let Some(value) = value(entity) else { return };
                if value.is_absent() {
                    return;
                }
                if let Err(reason) = allowed.check(value) {
                    out.push(Violation::new(FieldPath::field(self.name), reason));
                }
            }
            FieldCheck::Nested(get) => {
                if let Some(nested) = get(entity) {
                    out.absorb(&FieldPath::field(self.name), nested.violations());
                }
            }
            FieldCheck::Sequence(get) => {
                let Some(items) = get(entity) else { return };
                for (i, item) in items.into_iter().enumerate() {
                    if let Some(item) = item {
                        out.absorb(&FieldPath::field(self.name).at(i), item.violations());
                    }
                }
            }
        }
    }
}

/// A record type with a declarative constraint table.
pub trait Schema: Sized + 'static {
    /// Record type name used in composite errors.
    const ENTITY: &'static str;

    /// Field rules, in evaluation order.
    fn rules() -> &'static [FieldRule<Self>];
}

/// Object-safe validation entry point, implemented for every [`Schema`].
pub trait Validate {
    /// Every violation in the record, in evaluation order. Never fails.
    fn violations(&self) -> ValidationViolations;

    /// `Ok(())` iff [`violations`](Validate::violations) is empty.
    ///
    /// # Errors
    ///
    /// Returns one [`CompositeValidationError`] carrying all violations.
    fn validate(&self) -> Result<(), CompositeValidationError>;
}

impl<T: Schema> Validate for T {
    fn violations(&self) -> ValidationViolations {
        let mut out = ValidationViolations::new();
        for rule in T::rules() {
            rule.apply(self, &mut out);
        }
        out
    }

    fn validate(&self) -> Result<(), CompositeValidationError> {
        self.violations().into_result(T::ENTITY)
    }
}

/// Accessor helper for [`FieldRule::nested`].
pub fn nested<T: Validate>(field: &Option<T>) -> Option<&dyn Validate> {
    field.as_ref().map(|v| v as &dyn Validate)
}

/// Accessor helper for [`FieldRule::sequence`].
pub fn elements<T: Validate>(field: &Option<Vec<Option<T>>>) -> Option<Elements<'_>> {
    field.as_ref().map(|items| {
        items
            .iter()
            .map(|item| item.as_ref().map(|v| v as &dyn Validate))
            .collect()
    })
}
