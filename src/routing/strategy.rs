//! Router strategies: the naming and path convention for one resource level.
//!
//! # Design Decisions
//! - The compiler owns nesting; a strategy only decides how a single
//!   collection becomes a list route and a detail route
//! - Intrinsic routes (API root) are a strategy concern, so swapping the
//!   strategy swaps them too
//! - Default methods carry the shared convention; implementors override
//!   only what differs

use std::fmt;

use crate::lookup::LookupChain;
use crate::resource::Resource;
use crate::routing::root::{ApiRoot, ApiRootLink};
use crate::routing::router::{RouteEntry, RouteKind, RouteTarget};
use crate::routing::template::{PathTemplate, PK_CAPTURE};

/// Route name of the API root view unless configured otherwise.
pub const DEFAULT_ROOT_VIEW_NAME: &str = "api-root";

/// Convention turning one resource level into routes.
pub trait RouterStrategy: Send + Sync + fmt::Debug {
    /// Whether non-root paths end with `/`.
    fn trailing_slash(&self) -> bool {
        true
    }

    fn list_name(&self, resource: &Resource) -> String {
        format!("{}-list", resource.name())
    }

    fn detail_name(&self, resource: &Resource) -> String {
        format!("{}-detail", resource.name())
    }

    /// The list route over `collection`, e.g. `/developers/`.
    fn list_route(
        &self,
        resource: &Resource,
        collection: PathTemplate,
        chain: &LookupChain,
    ) -> RouteEntry {
        RouteEntry::new(
            collection.with_trailing_slash(self.trailing_slash()),
            self.list_name(resource),
            RouteTarget::resource(resource.handler().clone(), RouteKind::List),
            chain.clone(),
        )
    }

    /// The detail route below `collection`, e.g. `/developers/{pk}/`.
    fn detail_route(
        &self,
        resource: &Resource,
        collection: PathTemplate,
        chain: &LookupChain,
    ) -> RouteEntry {
        RouteEntry::new(
            collection
                .push_capture(PK_CAPTURE)
                .with_trailing_slash(self.trailing_slash()),
            self.detail_name(resource),
            RouteTarget::resource(resource.handler().clone(), RouteKind::Detail),
            chain.clone(),
        )
    }

    /// Routes the strategy contributes regardless of resources. `roots` are
    /// the top-level descriptors, for discovery views.
    fn intrinsic_routes(&self, _roots: &[Resource]) -> Vec<RouteEntry> {
        Vec::new()
    }
}

/// List and detail routes only.
#[derive(Debug, Clone)]
pub struct SimpleRouter {
    trailing_slash: bool,
}

impl SimpleRouter {
    pub fn new() -> Self {
        Self {
            trailing_slash: true,
        }
    }

    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }
}

impl Default for SimpleRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterStrategy for SimpleRouter {
    fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }
}

/// [`SimpleRouter`] plus an API root view at `/` and `/.{format}`.
#[derive(Debug, Clone)]
pub struct DefaultRouter {
    trailing_slash: bool,
    root_view_name: String,
}

impl DefaultRouter {
    pub fn new() -> Self {
        Self {
            trailing_slash: true,
            root_view_name: DEFAULT_ROOT_VIEW_NAME.to_owned(),
        }
    }

    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    pub fn with_root_view_name(mut self, name: impl Into<String>) -> Self {
        self.root_view_name = name.into();
        self
    }

    pub fn root_view_name(&self) -> &str {
        &self.root_view_name
    }
}

impl Default for DefaultRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterStrategy for DefaultRouter {
    fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    fn intrinsic_routes(&self, roots: &[Resource]) -> Vec<RouteEntry> {
        let api_root = ApiRoot::new(
            roots
                .iter()
                .map(|resource| ApiRootLink {
                    key: resource.path_segment().to_owned(),
                    route_name: self.list_name(resource),
                })
                .collect(),
        );

        vec![
            RouteEntry::new(
                PathTemplate::root(),
                self.root_view_name.clone(),
                RouteTarget::ApiRoot(api_root.clone()),
                LookupChain::root(),
            ),
            RouteEntry::new(
                PathTemplate::root().with_format_suffix(),
                self.root_view_name.clone(),
                RouteTarget::ApiRoot(api_root),
                LookupChain::root(),
            ),
        ]
    }
}
