//! # Field Constraint Evaluators
//!
//! Stateless predicates over a single field value:
//!
//! - [`Absent`]: the zero-value test. An absent field is exempt from every
//!   other check.
//! - [`EnumSet`]: membership in a fixed, ordered set of allowed strings,
//!   compared case-insensitively. The caller's casing is never rewritten.
//!
//! Allowed sets are `static` tables declared next to the entity that uses
//! them.

use crate::violation::ReasonKind;

/// Zero-value test for field types.
///
/// `None`, the empty string, `0.0`, and empty sequences are all absent.
pub trait Absent {
    fn is_absent(&self) -> bool;
}

impl Absent for str {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Absent for String {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Absent for f64 {
    fn is_absent(&self) -> bool {
        *self == 0.0
    }
}

impl Absent for i64 {
    fn is_absent(&self) -> bool {
        *self == 0
    }
}

impl Absent for bool {
    fn is_absent(&self) -> bool {
        !*self
    }
}

impl<T> Absent for [T] {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Absent for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Absent + ?Sized> Absent for &T {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Absent> Absent for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, Absent::is_absent)
    }
}

/// A fixed, ordered set of allowed values for one string field.
#[derive(Debug)]
pub struct EnumSet {
    values: &'static [&'static str],
}

impl EnumSet {
    pub const fn new(values: &'static [&'static str]) -> Self {
        Self { values }
    }

    /// The members, in declaration order.
    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// The member `value` matches, ignoring case.
    pub fn find(&self, value: &str) -> Option<&'static str> {
        self.values
            .iter()
            .copied()
            .find(|member| eq_ignore_case(member, value))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Check a present value against the set.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonKind::NotInEnum`] carrying the value as supplied and
    /// the full allowed set.
    pub fn check(&self, value: &str) -> Result<(), ReasonKind> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ReasonKind::NotInEnum {
                value: value.to_string(),
                allowed: self.values,
            })
        }
    }
}

/// Unicode-aware case-insensitive equality. `"Fixed location"` matches
/// `"FIXED LOCATION"`; whitespace is significant.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
