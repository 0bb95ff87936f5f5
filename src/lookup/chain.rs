//! Ancestor lookup chains.
//!
//! A chain lists, root first, the fields a nested resource's records must
//! match to sit under the ancestors named in the URL. Descending one level
//! re-roots every inherited field through the new parent relation:
//!
//! ```text
//! developer  []
//! language   [author]
//! version    [language__author, language]
//! ```

use std::fmt;

/// Field traversal across relations, rendered with `__` between hops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    hops: Vec<String>,
}

impl FieldPath {
    pub const SEPARATOR: &'static str = "__";

    /// A single field on the queried record.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            hops: vec![field.into()],
        }
    }

    /// Parse `language__author` into its hops.
    pub fn parse(path: &str) -> Self {
        Self {
            hops: path.split(Self::SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// The same traversal, reached through `relation` first.
    pub fn through(&self, relation: &str) -> Self {
        let mut hops = Vec::with_capacity(self.hops.len() + 1);
        hops.push(relation.to_owned());
        hops.extend(self.hops.iter().cloned());
        Self { hops }
    }

    pub fn hops(&self) -> &[String] {
        &self.hops
    }

    /// Relations to follow, then the field to read at the end.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.hops.split_last() {
            Some((last, relations)) => (relations, last.as_str()),
            None => (&[], ""),
        }
    }

    pub fn is_single(&self) -> bool {
        self.hops.len() == 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hops.join(Self::SEPARATOR))
    }
}

/// One ancestor constraint: `field` must equal the value captured as `capture`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupStep {
    field: FieldPath,
    capture: String,
}

impl LookupStep {
    /// A step whose capture is named after the field traversal itself.
    pub fn new(field: FieldPath) -> Self {
        let capture = field.to_string();
        Self { field, capture }
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn capture(&self) -> &str {
        &self.capture
    }

    fn through(&self, relation: &str) -> Self {
        Self::new(self.field.through(relation))
    }
}

/// Ordered ancestor constraints, root to immediate parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LookupChain {
    steps: Vec<LookupStep>,
}

impl LookupChain {
    /// The chain of a root resource: no ancestors.
    pub fn root() -> Self {
        Self::default()
    }

    /// The chain of a child that reaches this level's resource through its
    /// `parent_field_lookup` field.
    pub fn descend(&self, parent_field_lookup: &str) -> Self {
        let steps = self
            .steps
            .iter()
            .map(|step| step.through(parent_field_lookup))
            .chain(std::iter::once(LookupStep::new(FieldPath::new(
                parent_field_lookup,
            ))))
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[LookupStep] {
        &self.steps
    }

    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(LookupStep::capture)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for LookupChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={{{}}}", step.field, step.capture)?;
        }
        Ok(())
    }
}
