//! Turn a validated config into descriptors and a route table.

use crate::config::schema::{ApiConfig, ResourceConfig};
use crate::resource::{ConfigurationError, HandlerRegistry, NestedResource, Resource};
use crate::routing::{Compiler, RouteTable};

/// Build the descriptor forest declared by `configs`, binding handler keys
/// through `registry`.
pub fn build_resources(
    configs: &[ResourceConfig],
    registry: &HandlerRegistry,
) -> Result<Vec<Resource>, ConfigurationError> {
    configs
        .iter()
        .map(|config| build_resource(config, registry))
        .collect()
}

fn build_resource(
    config: &ResourceConfig,
    registry: &HandlerRegistry,
) -> Result<Resource, ConfigurationError> {
    let handler =
        registry
            .get(config.handler_key())
            .ok_or_else(|| ConfigurationError::UnknownHandler {
                name: config.name.clone(),
                handler: config.handler_key().to_owned(),
            })?;

    let children = config
        .children
        .iter()
        .map(|child| {
            let resource = build_resource(child, registry)?;
            NestedResource::from_resource(resource, child.parent_field_lookup.clone())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Resource::new(&config.name, &config.path_segment, handler)?.with_children(children))
}

/// Compile the route table `config` describes.
pub fn build_table(
    config: &ApiConfig,
    registry: &HandlerRegistry,
) -> Result<RouteTable, ConfigurationError> {
    let resources = build_resources(&config.resources, registry)?;
    let strategy = config.router.build_strategy();
    let table = Compiler::new(strategy.as_ref())
        .allow_duplicate_names(config.router.allow_duplicate_names)
        .build_table(&resources)?;

    tracing::info!(
        resources = resources.len(),
        routes = table.len(),
        strategy = ?config.router.strategy,
        "Route table built"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::testing::noop;

    fn config() -> ApiConfig {
        toml::from_str(
            r#"
            [[resources]]
            name = "developer"
            path_segment = "developers"

            [[resources.children]]
            name = "language"
            path_segment = "languages"
            parent_field_lookup = "author"
            "#,
        )
        .unwrap()
    }

    fn registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry.register("developers", noop());
        registry.register("languages", noop());
        registry
    }

    #[test]
    fn test_build_table_from_config() {
        let table = build_table(&config(), &registry()).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(
            table.get("language-detail").unwrap().path_template().to_string(),
            "/developers/{author}/languages/{pk}/"
        );
    }

    #[test]
    fn test_unknown_handler() {
        let mut registry = HandlerRegistry::new();
        registry.register("developers", noop());

        let err = build_table(&config(), &registry).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownHandler {
                name: "language".into(),
                handler: "languages".into()
            }
        );
    }

    #[test]
    fn test_missing_parent_lookup_surfaces_as_configuration_error() {
        let mut config = config();
        config.resources[0].children[0].parent_field_lookup = None;

        let err = build_resources(&config.resources, &registry()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingParentFieldLookup {
                name: "language".into()
            }
        );
    }
}
