//! Route compilation: descriptor forest → flat route list.
//!
//! # Algorithm
//! ```text
//! for each root (declaration order):
//!     emit list + detail over /{segment}/
//!     for each child, depth first:
//!         scope  = parent scope + parent segment + child's parent_field_lookup
//!         path   = /{seg0}/{cap0}/{seg1}/{cap1}/.../{child segment}/
//!         chain  = inherited captures re-rooted through the lookup, lookup appended
//!         emit list + detail, recurse
//! ```
//!
//! # Design Decisions
//! - Recursion carries an immutable `Scope` value; the output vector is the
//!   only thing written to
//! - No sorting or deduplication of entries; order is declaration order
//! - Duplicate route names are rejected unless the compiler is permissive

use std::collections::HashSet;

use crate::lookup::LookupChain;
use crate::resource::{ConfigurationError, Resource};
use crate::routing::router::{RouteEntry, RouteTable};
use crate::routing::strategy::RouterStrategy;
use crate::routing::template::PathTemplate;

/// Position of a resource in the tree: the collection segments of its
/// ancestors and the lookups that scope it to them.
#[derive(Debug, Clone, Default)]
struct Scope {
    ancestor_segments: Vec<String>,
    chain: LookupChain,
}

impl Scope {
    /// Scope of a child of `parent_segment` linked through `parent_field_lookup`.
    fn descend(&self, parent_segment: &str, parent_field_lookup: &str) -> Self {
        let mut ancestor_segments = self.ancestor_segments.clone();
        ancestor_segments.push(parent_segment.to_owned());
        Self {
            ancestor_segments,
            chain: self.chain.descend(parent_field_lookup),
        }
    }

    /// Collection path of a resource at this scope. Each ancestor segment is
    /// followed by the capture identifying the ancestor record.
    fn collection(&self, segment: &str) -> PathTemplate {
        self.ancestor_segments
            .iter()
            .zip(self.chain.captures())
            .fold(PathTemplate::root(), |template, (ancestor, capture)| {
                template.push_static(ancestor.as_str()).push_capture(capture)
            })
            .push_static(segment)
    }
}

/// Compiles resource forests with one router strategy.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    strategy: &'a dyn RouterStrategy,
    allow_duplicate_names: bool,
}

impl<'a> Compiler<'a> {
    /// A strict compiler: duplicate route names are a configuration error.
    pub fn new(strategy: &'a dyn RouterStrategy) -> Self {
        Self {
            strategy,
            allow_duplicate_names: false,
        }
    }

    /// Emit duplicate route names as ambiguous entries instead of failing.
    pub fn permissive(mut self) -> Self {
        self.allow_duplicate_names = true;
        self
    }

    pub fn allow_duplicate_names(mut self, allow: bool) -> Self {
        self.allow_duplicate_names = allow;
        self
    }

    /// Resource routes only: two per descriptor, depth first.
    pub fn compile(&self, resources: &[Resource]) -> Result<Vec<RouteEntry>, ConfigurationError> {
        let mut routes = Vec::new();
        let root = Scope::default();
        for resource in resources {
            self.compile_resource(resource, &root, &mut routes);
        }

        if !self.allow_duplicate_names {
            check_unique_names(&routes)?;
        }

        tracing::debug!(
            roots = resources.len(),
            routes = routes.len(),
            "Compiled resource routes"
        );
        Ok(routes)
    }

    /// Intrinsic routes of the strategy followed by [`Compiler::compile`].
    pub fn build_table(&self, resources: &[Resource]) -> Result<RouteTable, ConfigurationError> {
        let mut entries = self.strategy.intrinsic_routes(resources);
        let routes = self.compile(resources)?;
        if !self.allow_duplicate_names {
            check_disjoint_names(&entries, &routes)?;
        }
        entries.extend(routes);
        Ok(RouteTable::new(entries))
    }

    fn compile_resource(&self, resource: &Resource, scope: &Scope, out: &mut Vec<RouteEntry>) {
        let collection = scope.collection(resource.path_segment());
        out.push(
            self.strategy
                .list_route(resource, collection.clone(), &scope.chain),
        );
        out.push(self.strategy.detail_route(resource, collection, &scope.chain));

        for child in resource.children() {
            let child_scope = scope.descend(resource.path_segment(), child.parent_field_lookup());
            self.compile_resource(child, &child_scope, out);
        }
    }
}

/// Resource routes of `resources` under `strategy`, strict on names.
pub fn compile(
    resources: &[Resource],
    strategy: &dyn RouterStrategy,
) -> Result<Vec<RouteEntry>, ConfigurationError> {
    Compiler::new(strategy).compile(resources)
}

fn check_unique_names(routes: &[RouteEntry]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::with_capacity(routes.len());
    for route in routes {
        if !seen.insert(route.route_name()) {
            return Err(ConfigurationError::DuplicateRouteName(
                route.route_name().to_owned(),
            ));
        }
    }
    Ok(())
}

/// Intrinsic routes may share a name among themselves (`api-root` and its
/// suffixed variant) but never with a resource route.
fn check_disjoint_names(
    intrinsic: &[RouteEntry],
    routes: &[RouteEntry],
) -> Result<(), ConfigurationError> {
    let reserved: HashSet<&str> = intrinsic.iter().map(RouteEntry::route_name).collect();
    match routes.iter().find(|r| reserved.contains(r.route_name())) {
        Some(route) => Err(ConfigurationError::DuplicateRouteName(
            route.route_name().to_owned(),
        )),
        None => Ok(()),
    }
}
