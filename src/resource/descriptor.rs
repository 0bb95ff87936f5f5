//! Resource descriptors.
//!
//! A [`Resource`] declares one routable collection; a [`NestedResource`] is a
//! resource whose records are scoped to a parent record through
//! `parent_field_lookup`. Descriptors are validated on construction and never
//! change afterwards.

use std::ops::Deref;

use crate::resource::error::ConfigurationError;
use crate::resource::handler::HandlerRef;
use crate::routing::template::{FORMAT_CAPTURE, PK_CAPTURE};

/// Characters with meaning in path templates.
const FORBIDDEN_SEGMENT_CHARS: [char; 3] = ['/', '{', '}'];

/// A routable collection and the resources nested beneath it.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    path_segment: String,
    handler: HandlerRef,
    children: Vec<NestedResource>,
}

impl Resource {
    /// Declare a resource with no children.
    pub fn new(
        name: impl Into<String>,
        path_segment: impl Into<String>,
        handler: HandlerRef,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let path_segment = path_segment.into();

        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if path_segment.is_empty() {
            return Err(ConfigurationError::EmptyPathSegment { name });
        }
        if let Some(found) = path_segment
            .chars()
            .find(|c| FORBIDDEN_SEGMENT_CHARS.contains(c))
        {
            return Err(ConfigurationError::InvalidPathSegment {
                name,
                segment: path_segment,
                found,
            });
        }

        Ok(Self {
            name,
            path_segment,
            handler,
            children: Vec::new(),
        })
    }

    /// Replace the nested resources.
    pub fn with_children(mut self, children: Vec<NestedResource>) -> Self {
        self.children = children;
        self
    }

    /// Append one nested resource.
    pub fn with_child(mut self, child: NestedResource) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    pub fn children(&self) -> &[NestedResource] {
        &self.children
    }

    /// Number of descriptors in this subtree, this one included.
    pub fn descriptor_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.descriptor_count())
            .sum::<usize>()
    }
}

/// A resource scoped to a parent through one of its own fields.
#[derive(Debug, Clone)]
pub struct NestedResource {
    resource: Resource,
    parent_field_lookup: String,
}

impl NestedResource {
    /// Declare a nested resource whose `parent_field_lookup` field references
    /// the enclosing resource.
    pub fn new(
        name: impl Into<String>,
        path_segment: impl Into<String>,
        handler: HandlerRef,
        parent_field_lookup: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let resource = Resource::new(name, path_segment, handler)?;
        Self::from_resource(resource, Some(parent_field_lookup.into()))
    }

    /// Attach an already validated resource under a parent. `None` or an empty
    /// lookup is rejected: nested descriptors always name their parent field.
    pub fn from_resource(
        resource: Resource,
        parent_field_lookup: Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let parent_field_lookup = match parent_field_lookup {
            Some(lookup) if !lookup.is_empty() => lookup,
            _ => {
                return Err(ConfigurationError::MissingParentFieldLookup {
                    name: resource.name,
                })
            }
        };

        if parent_field_lookup == PK_CAPTURE || parent_field_lookup == FORMAT_CAPTURE {
            return Err(ConfigurationError::ReservedParentFieldLookup {
                name: resource.name,
                lookup: parent_field_lookup,
            });
        }

        Ok(Self {
            resource,
            parent_field_lookup,
        })
    }

    pub fn with_children(mut self, children: Vec<NestedResource>) -> Self {
        self.resource.children = children;
        self
    }

    pub fn with_child(mut self, child: NestedResource) -> Self {
        self.resource.children.push(child);
        self
    }

    pub fn parent_field_lookup(&self) -> &str {
        &self.parent_field_lookup
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Deref for NestedResource {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}
