//! Compiled route table: lookup and reversal.
//!
//! # Responsibilities
//! - Store compiled route entries in declaration order
//! - Resolve a request path to the first matching entry
//! - Reverse a route name plus parameters into a path
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(n) scan over entries (acceptable for typical route counts)
//! - First match wins; duplicate names are tolerated here and policed by
//!   the compiler
//! - Explicit `None` on no match rather than a silent default

use std::sync::Arc;

use thiserror::Error;

use crate::lookup::{resolve, FilterSpec, LookupChain, ResolveError};
use crate::resource::{ConfigurationError, HandlerRef, Resource};
use crate::routing::compiler::Compiler;
use crate::routing::matcher::Matcher;
use crate::routing::root::ApiRoot;
use crate::routing::strategy::{DefaultRouter, RouterStrategy};
use crate::routing::template::{PathParams, PathTemplate};

/// Which operation of the handler a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    List,
    Detail,
}

/// What a matched route dispatches to.
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// A resource handler operation.
    Resource { handler: HandlerRef, kind: RouteKind },
    /// The strategy's discovery view.
    ApiRoot(ApiRoot),
}

impl RouteTarget {
    pub fn resource(handler: HandlerRef, kind: RouteKind) -> Self {
        Self::Resource { handler, kind }
    }
}

impl PartialEq for RouteTarget {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Resource { handler: a, kind: ka },
                Self::Resource { handler: b, kind: kb },
            ) => ka == kb && std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (Self::ApiRoot(a), Self::ApiRoot(b)) => a == b,
            _ => false,
        }
    }
}

/// One routable path: template, name, target and ancestor lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    path_template: PathTemplate,
    route_name: String,
    target: RouteTarget,
    lookup_chain: LookupChain,
}

impl RouteEntry {
    pub fn new(
        path_template: PathTemplate,
        route_name: impl Into<String>,
        target: RouteTarget,
        lookup_chain: LookupChain,
    ) -> Self {
        Self {
            path_template,
            route_name: route_name.into(),
            target,
            lookup_chain,
        }
    }

    pub fn path_template(&self) -> &PathTemplate {
        &self.path_template
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn lookup_chain(&self) -> &LookupChain {
        &self.lookup_chain
    }

    /// List or detail for resource routes, `None` for intrinsic views.
    pub fn kind(&self) -> Option<RouteKind> {
        match &self.target {
            RouteTarget::Resource { kind, .. } => Some(*kind),
            RouteTarget::ApiRoot(_) => None,
        }
    }

    /// The filter a request on this route must apply.
    pub fn filter_for(&self, params: &PathParams) -> Result<FilterSpec, ResolveError> {
        resolve(
            &self.lookup_chain,
            self.kind().unwrap_or(RouteKind::List),
            params,
        )
    }
}

/// A request path matched against the table.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: PathParams,
}

/// Failure to turn a route name and parameters into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("missing value for capture `{capture}`")]
    MissingParameter { capture: String },

    #[error("unexpected parameter `{param}`")]
    UnexpectedParameter { param: String },

    #[error("value `{value}` does not fit capture `{capture}`")]
    InvalidValue { capture: String, value: String },
}

/// Ordered, immutable list of compiled routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Build with [`DefaultRouter`] and strict name checking.
    pub fn from_resources(resources: &[Resource]) -> Result<Self, ConfigurationError> {
        build_route_table(resources, &DefaultRouter::new())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry carrying `name`, in table order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RouteEntry> + 'a {
        self.entries.iter().filter(move |e| e.route_name == name)
    }

    /// First entry named `name`.
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.route_name == name)
    }

    /// First entry whose template matches `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            entry
                .path_template
                .match_path(path)
                .map(|params| RouteMatch { entry, params })
        })
    }

    /// Render the path of route `name` with `params`.
    ///
    /// Tries every entry of that name in order and takes the first whose
    /// captures are exactly the keys of `params`, so `api-root` reverses to
    /// `/` without parameters and to `/.json` with `format=json`.
    pub fn reverse(&self, name: &str, params: &PathParams) -> Result<String, ReverseError> {
        let mut first_error = None;
        for entry in self.named(name) {
            match entry.path_template.expand(params) {
                Ok(path) => return Ok(path),
                // captures lined up, only a value was rejected
                Err(error @ ReverseError::InvalidValue { .. }) => return Err(error),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| ReverseError::UnknownRoute(name.to_owned())))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The strategy's intrinsic routes followed by the compiled resource routes.
pub fn build_route_table(
    resources: &[Resource],
    strategy: &dyn RouterStrategy,
) -> Result<RouteTable, ConfigurationError> {
    Compiler::new(strategy).build_table(resources)
}
