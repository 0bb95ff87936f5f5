//! Conjunctive filter handed to the persistence layer.

use std::fmt;

use crate::lookup::chain::FieldPath;
use crate::routing::template::PK_CAPTURE;

/// `field == value`, with `value` exactly as captured from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub field: FieldPath,
    pub value: String,
}

/// An ordered AND of constraints. Empty means "every record".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    constraints: Vec<Constraint>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field == value`.
    pub fn and(mut self, field: FieldPath, value: impl Into<String>) -> Self {
        self.constraints.push(Constraint {
            field,
            value: value.into(),
        });
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The value pinned on the primary key, when this is a detail filter.
    pub fn primary_key(&self) -> Option<&str> {
        self.constraints
            .iter()
            .find(|c| c.field.is_single() && c.field.hops()[0] == PK_CAPTURE)
            .map(|c| c.value.as_str())
    }

    /// Fold the constraints over a record. `check` receives each constraint
    /// and reports whether the record satisfies it; evaluation stops at the
    /// first miss or error.
    pub fn try_matches<E, F>(&self, mut check: F) -> Result<bool, E>
    where
        F: FnMut(&Constraint) -> Result<bool, E>,
    {
        for constraint in &self.constraints {
            if !check(constraint)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            return f.write_str("*");
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}={}", c.field, c.value)?;
        }
        Ok(())
    }
}
