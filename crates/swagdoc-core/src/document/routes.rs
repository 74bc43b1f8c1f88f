use crate::config::DocConfig;
use crate::error::ConfigError;
use crate::resolve::path::{PathPolicy, ROOT_RESOURCE, resolve};
use crate::tree::endpoint::parse_segments;
use crate::tree::{Endpoint, FrameId, ParamKind, Parameter, Route, RouteTree, Segment};

const INDEX_SUMMARY: &str = "Swagger compatible API description";
const RESOURCE_SUMMARY: &str = "Swagger compatible API description for specific API";

/// The documentation engine's own routes, declared on the root API.
#[derive(Debug, Clone)]
pub struct DocRoutes {
    index: Endpoint,
    resource: Endpoint,
    root: String,
}

impl DocRoutes {
    pub fn new(tree: &RouteTree, config: &DocConfig) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidMountPath(config.mount_path.clone());

        let segments = parse_segments(&config.mount_path).map_err(|_| invalid())?;
        let literals: Vec<&str> = segments.iter().filter_map(Segment::as_literal).collect();
        if literals.is_empty()
            || literals.len() != segments.len()
            || literals.iter().any(|s| s.contains(['.', '(', ')']))
        {
            return Err(invalid());
        }
        let mount_path = format!("/{}", literals.join("/"));

        let index = Endpoint::from_route(
            Route::get(mount_path.as_str()).desc(INDEX_SUMMARY),
            FrameId::ROOT,
        )?;
        let resource = Endpoint::from_route(
            Route::get(format!("{mount_path}/:name"))
                .desc(RESOURCE_SUMMARY)
                .param(
                    Parameter::new("name", "string")
                        .required()
                        .describe("Resource name of mounted API")
                        .kind(ParamKind::Path),
                ),
            FrameId::ROOT,
        )?;

        let chain = tree.chain(FrameId::ROOT);
        for own in [&index, &resource] {
            let pattern = resolve(&chain, own, PathPolicy::default()).pattern;
            let taken = tree
                .patterns()
                .any(|(ep, p)| ep.method() == own.method() && p == pattern);
            if taken {
                return Err(ConfigError::DuplicateRoute {
                    method: own.method().to_string(),
                    pattern,
                });
            }
        }

        let listed = resolve(&chain, &resource, PathPolicy::default());
        if !config.hide_documentation_path
            && listed.resource == ROOT_RESOURCE
            && tree.has_unnamed_resource()
        {
            return Err(ConfigError::ResourceCollision(listed.resource));
        }

        let root = resolve(&chain, &index, PathPolicy { hide_format: true }).path;
        Ok(Self {
            index,
            resource,
            root,
        })
    }

    /// `GET <root>`: serves the index. Never listed anywhere.
    pub fn index(&self) -> &Endpoint {
        &self.index
    }

    /// `GET <root>/:name`: serves one resource document.
    pub fn resource(&self) -> &Endpoint {
        &self.resource
    }

    /// Absolute path of the index, without format suffix: the root API's
    /// prefix and path version followed by the mount path.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Where the document of `resource` is served, as advertised in the index.
    pub fn resource_path(&self, resource: &str, hide_format: bool) -> String {
        if hide_format {
            format!("{}/{}", self.root, resource)
        } else {
            format!("{}/{}.{{format}}", self.root, resource)
        }
    }
}
