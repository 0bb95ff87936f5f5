//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every resource declaration, at any depth
//! - Validate addresses and value ranges
//! - Detect route name collisions
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Errors carry the resource's position, e.g. `resources[0].children[1]`
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ApiConfig, ResourceConfig, StrategyKind};
use crate::routing::{FORMAT_CAPTURE, PK_CAPTURE};

/// One semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{at}: name must not be empty")]
    EmptyName { at: String },

    #[error("{at}: path_segment must not be empty")]
    EmptyPathSegment { at: String },

    #[error("{at}: path_segment `{segment}` must not contain `/`, `{{` or `}}`")]
    InvalidPathSegment { at: String, segment: String },

    #[error("{at}: nested resource requires parent_field_lookup")]
    MissingParentFieldLookup { at: String },

    #[error("{at}: top-level resource cannot declare parent_field_lookup")]
    UnexpectedParentFieldLookup { at: String },

    #[error("{at}: parent_field_lookup `{lookup}` is reserved")]
    ReservedParentFieldLookup { at: String, lookup: String },

    #[error("{at}: resource name `{name}` is already used")]
    DuplicateName { at: String, name: String },

    #[error("router.root_view_name must not be empty")]
    EmptyRootViewName,

    #[error("router.root_view_name `{0}` is also a resource route name")]
    RootViewNameCollision(String),

    #[error("server.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.router.strategy == StrategyKind::Default {
        validate_root_view_name(config, &mut errors);
    }

    let mut names = HashSet::new();
    for (i, resource) in config.resources.iter().enumerate() {
        validate_resource(
            resource,
            &format!("resources[{i}]"),
            true,
            !config.router.allow_duplicate_names,
            &mut names,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_root_view_name(config: &ApiConfig, errors: &mut Vec<ValidationError>) {
    let root = config.router.root_view_name.as_str();
    if root.is_empty() {
        errors.push(ValidationError::EmptyRootViewName);
        return;
    }
    if config.router.allow_duplicate_names {
        return;
    }

    let mut names = Vec::new();
    collect_names(&config.resources, &mut names);
    let collides = names.iter().any(|name| {
        root.strip_prefix(*name)
            .is_some_and(|suffix| suffix == "-list" || suffix == "-detail")
    });
    if collides {
        errors.push(ValidationError::RootViewNameCollision(root.to_owned()));
    }
}

fn collect_names<'a>(resources: &'a [ResourceConfig], names: &mut Vec<&'a str>) {
    for resource in resources {
        names.push(&resource.name);
        collect_names(&resource.children, names);
    }
}

fn validate_resource<'a>(
    resource: &'a ResourceConfig,
    at: &str,
    top_level: bool,
    unique_names: bool,
    names: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if resource.name.is_empty() {
        errors.push(ValidationError::EmptyName { at: at.to_owned() });
    } else if unique_names && !names.insert(resource.name.as_str()) {
        errors.push(ValidationError::DuplicateName {
            at: at.to_owned(),
            name: resource.name.clone(),
        });
    }

    if resource.path_segment.is_empty() {
        errors.push(ValidationError::EmptyPathSegment { at: at.to_owned() });
    } else if resource.path_segment.contains(['/', '{', '}']) {
        errors.push(ValidationError::InvalidPathSegment {
            at: at.to_owned(),
            segment: resource.path_segment.clone(),
        });
    }

    match (top_level, resource.parent_field_lookup.as_deref()) {
        (true, Some(_)) => {
            errors.push(ValidationError::UnexpectedParentFieldLookup { at: at.to_owned() });
        }
        (false, None | Some("")) => {
            errors.push(ValidationError::MissingParentFieldLookup { at: at.to_owned() });
        }
        (false, Some(lookup)) if lookup == PK_CAPTURE || lookup == FORMAT_CAPTURE => {
            errors.push(ValidationError::ReservedParentFieldLookup {
                at: at.to_owned(),
                lookup: lookup.to_owned(),
            });
        }
        _ => {}
    }

    for (i, child) in resource.children.iter().enumerate() {
        validate_resource(
            child,
            &format!("{at}.children[{i}]"),
            false,
            unique_names,
            names,
            errors,
        );
    }
}
