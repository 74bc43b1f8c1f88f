use indexmap::{IndexMap, IndexSet};

use super::routes::DocRoutes;
use super::{
    ApiDescription, ApiReference, IndexDocument, OperationDoc, ParameterDoc, ResourceDocument,
    SWAGGER_VERSION,
};
use crate::NotesRenderer;
use crate::config::DocConfig;
use crate::error::DocError;
use crate::resolve::{PathPolicy, RequestContext, ResolvedRoute, nickname, resolve, resolve_base_path};
use crate::tree::{Endpoint, RouteTree};

/// Builds the documents of one API for one request.
///
/// Holds only borrows; every call resolves paths and the base path afresh.
pub struct DocumentAssembler<'a> {
    tree: &'a RouteTree,
    config: &'a DocConfig,
    routes: &'a DocRoutes,
    renderer: &'a dyn NotesRenderer,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        tree: &'a RouteTree,
        config: &'a DocConfig,
        routes: &'a DocRoutes,
        renderer: &'a dyn NotesRenderer,
    ) -> Self {
        Self {
            tree,
            config,
            routes,
            renderer,
        }
    }

    fn policy(&self) -> PathPolicy {
        PathPolicy {
            hide_format: self.config.hide_format,
        }
    }

    /// Declared endpoints followed by the documentation resource route,
    /// unless hidden. The index route is never part of the listing.
    fn documented(&self) -> impl Iterator<Item = (&'a Endpoint, ResolvedRoute)> + '_ {
        let own = (!self.config.hide_documentation_path).then_some(self.routes.resource());
        self.tree.endpoints().iter().chain(own).map(move |ep| {
            let chain = self.tree.chain(ep.frame());
            (ep, resolve(&chain, ep, self.policy()))
        })
    }

    pub fn index(&self, ctx: &RequestContext) -> IndexDocument {
        let resources: IndexSet<String> = self
            .documented()
            .map(|(_, route)| route.resource)
            .collect();
        log::debug!("index lists {} resources", resources.len());

        IndexDocument {
            api_version: self.config.api_version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: resolve_base_path(self.config.base_path.as_ref(), ctx),
            models: serde_json::Map::new(),
            operations: Vec::new(),
            apis: resources
                .iter()
                .map(|name| ApiReference {
                    path: self.routes.resource_path(name, self.config.hide_format),
                })
                .collect(),
        }
    }

    pub fn resource(&self, name: &str, ctx: &RequestContext) -> Result<ResourceDocument, DocError> {
        let mut apis: IndexMap<String, Vec<OperationDoc>> = IndexMap::new();
        for (ep, route) in self.documented() {
            if route.resource != name {
                continue;
            }
            if let Some(decl) = self.tree.version_of(ep) {
                log::debug!(
                    "{} {}: version {} by {:?}, in path: {}",
                    ep.method(),
                    route.pattern,
                    decl.primary(),
                    decl.strategy(),
                    route.version.as_deref().unwrap_or("none")
                );
            }
            let operation = self.operation(ep, &route);
            apis.entry(route.path).or_default().push(operation);
        }
        if apis.is_empty() {
            return Err(DocError::ResourceNotFound(name.to_string()));
        }
        log::debug!("resource {name}: {} paths", apis.len());

        Ok(ResourceDocument {
            api_version: self.config.api_version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: resolve_base_path(self.config.base_path.as_ref(), ctx),
            resource_path: String::new(),
            apis: apis
                .into_iter()
                .map(|(path, operations)| ApiDescription { path, operations })
                .collect(),
        })
    }

    fn operation(&self, ep: &Endpoint, route: &ResolvedRoute) -> OperationDoc {
        OperationDoc {
            http_method: ep.method().to_string(),
            nickname: nickname(ep.method(), &route.pattern),
            summary: ep.description().unwrap_or_default().to_string(),
            notes: ep.notes().map(|raw| self.render_notes(raw, route)),
            parameters: ep
                .parameters()
                .iter()
                .map(|p| ParameterDoc {
                    param_type: ep.param_kind(p).as_str().to_string(),
                    name: p.name.clone(),
                    description: p.description.clone(),
                    data_type: p.data_type.clone(),
                    required: p.required,
                })
                .collect(),
        }
    }

    /// A note that fails to render is documented raw; the rest of the
    /// document is unaffected.
    fn render_notes(&self, raw: &str, route: &ResolvedRoute) -> String {
        match self.renderer.render(raw) {
            Ok(rendered) => rendered,
            Err(err) => {
                log::warn!("notes of {} left unrendered: {err}", route.pattern);
                raw.to_string()
            }
        }
    }
}
