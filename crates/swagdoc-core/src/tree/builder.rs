use std::collections::HashSet;

use super::endpoint::{Endpoint, Route, parse_segments};
use super::mount::{FrameId, MountFrame, VersionDecl, VersioningStrategy};
use crate::error::ConfigError;
use crate::resolve::path::{PathPolicy, ROOT_RESOURCE, resolve};

#[derive(Debug, Clone)]
enum Item {
    Route(Route),
    Mount { at: String, api: ApiBuilder },
}

/// Declares one API: its prefix, version, routes and mounted sub-APIs.
///
/// Mounting consumes the child builder, so an API can be attached at most
/// once and never inside itself; the resulting mount graph is always a tree.
#[derive(Debug, Clone, Default)]
pub struct ApiBuilder {
    prefix: String,
    version: Option<(Vec<String>, VersioningStrategy)>,
    items: Vec<Item>,
}

impl ApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    /// Declare the version(s) of this API. Applies to every route of this API
    /// and of the APIs mounted into it.
    pub fn version<I, S>(&mut self, versions: I, strategy: VersioningStrategy) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version = Some((versions.into_iter().map(Into::into).collect(), strategy));
        self
    }

    pub fn endpoint(&mut self, route: Route) -> &mut Self {
        self.items.push(Item::Route(route));
        self
    }

    /// Attach `api` under `at` (`""` or `"/"` mounts in place).
    pub fn mount(&mut self, api: ApiBuilder, at: impl Into<String>) -> &mut Self {
        self.items.push(Item::Mount { at: at.into(), api });
        self
    }

    /// Freeze the declarations into a [`RouteTree`].
    pub fn build(self) -> Result<RouteTree, ConfigError> {
        let mut tree = RouteTree {
            frames: Vec::new(),
            endpoints: Vec::new(),
        };
        self.flatten(None, "", &mut tree)?;
        tree.check_duplicates()?;
        tree.check_unnamed_resource()?;
        log::debug!(
            "built route tree: {} frames, {} endpoints",
            tree.frames.len(),
            tree.endpoints.len()
        );
        Ok(tree)
    }

    fn flatten(
        self,
        parent: Option<FrameId>,
        at: &str,
        tree: &mut RouteTree,
    ) -> Result<(), ConfigError> {
        let version = match self.version {
            Some((versions, strategy)) => Some(VersionDecl::new(versions, strategy)?),
            None => None,
        };
        let id = FrameId(tree.frames.len());
        tree.frames.push(MountFrame {
            parent,
            at: parse_segments(at)?,
            prefix: parse_segments(&self.prefix)?,
            version,
        });

        for item in self.items {
            match item {
                Item::Route(route) => tree.endpoints.push(Endpoint::from_route(route, id)?),
                Item::Mount { at, api } => api.flatten(Some(id), &at, tree)?,
            }
        }
        Ok(())
    }
}

/// Every route of an API and its mounted sub-APIs. Read-only once built.
#[derive(Debug, Clone)]
pub struct RouteTree {
    frames: Vec<MountFrame>,
    endpoints: Vec<Endpoint>,
}

impl RouteTree {
    pub fn root(&self) -> &MountFrame {
        &self.frames[FrameId::ROOT.0]
    }

    pub fn frame(&self, id: FrameId) -> &MountFrame {
        &self.frames[id.0]
    }

    pub fn frames(&self) -> &[MountFrame] {
        &self.frames
    }

    /// Endpoints in declaration order, mounted APIs expanded in place.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Frames from the root down to `id`, inclusive.
    pub fn chain(&self, id: FrameId) -> Vec<&MountFrame> {
        let mut chain = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            let frame = self.frame(current);
            chain.push(frame);
            next = frame.parent;
        }
        chain.reverse();
        chain
    }

    /// The innermost version declaration that applies to `endpoint`, whatever
    /// its strategy.
    pub fn version_of(&self, endpoint: &Endpoint) -> Option<&VersionDecl> {
        self.chain(endpoint.frame())
            .into_iter()
            .rev()
            .find_map(MountFrame::version)
    }

    /// Dispatch patterns of every endpoint, as `(method, pattern)`.
    pub fn patterns(&self) -> impl Iterator<Item = (&Endpoint, String)> {
        self.endpoints.iter().map(|ep| {
            let chain = self.chain(ep.frame());
            (ep, resolve(&chain, ep, PathPolicy::default()).pattern)
        })
    }

    /// Whether some route has no literal segment and is documented under
    /// [`ROOT_RESOURCE`].
    pub(crate) fn has_unnamed_resource(&self) -> bool {
        self.endpoints
            .iter()
            .any(|ep| resolve(&self.chain(ep.frame()), ep, PathPolicy::default()).unnamed)
    }

    /// Routes without a literal segment and routes under a literal `root`
    /// segment would share one resource document.
    fn check_unnamed_resource(&self) -> Result<(), ConfigError> {
        if !self.has_unnamed_resource() {
            return Ok(());
        }
        let named_root = self.endpoints.iter().any(|ep| {
            let route = resolve(&self.chain(ep.frame()), ep, PathPolicy::default());
            !route.unnamed && route.resource == ROOT_RESOURCE
        });
        if named_root {
            return Err(ConfigError::ResourceCollision(ROOT_RESOURCE.to_string()));
        }
        Ok(())
    }

    fn check_duplicates(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (ep, pattern) in self.patterns() {
            if !seen.insert((ep.method(), pattern.clone())) {
                return Err(ConfigError::DuplicateRoute {
                    method: ep.method().to_string(),
                    pattern,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::endpoint::Segment;

    #[test]
    fn test_mounts_expand_in_declaration_order() {
        let mut users = ApiBuilder::new();
        users.endpoint(Route::get("/users"));

        let mut root = ApiBuilder::new();
        root.endpoint(Route::get("/health"))
            .mount(users, "/admin")
            .endpoint(Route::get("/status"));

        let tree = root.build().unwrap();
        let paths: Vec<&str> = tree.endpoints().iter().map(|e| e.template().raw()).collect();
        assert_eq!(paths, vec!["/health", "/users", "/status"]);
        assert_eq!(tree.frames().len(), 2);

        let chain = tree.chain(tree.endpoints()[1].frame());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].at(), &[Segment::Literal("admin".into())]);
        assert_eq!(chain[1].parent(), Some(FrameId::ROOT));
    }

    #[test]
    fn test_version_inherited_from_ancestor() {
        let mut child = ApiBuilder::new();
        child.endpoint(Route::get("/something"));

        let mut root = ApiBuilder::new();
        root.version(["v1"], VersioningStrategy::Header).mount(child, "");

        let tree = root.build().unwrap();
        let decl = tree.version_of(&tree.endpoints()[0]).unwrap();
        assert_eq!(decl.versions(), &["v1".to_string()]);
        assert_eq!(decl.strategy(), VersioningStrategy::Header);
    }

    #[test]
    fn test_malformed_version_is_rejected() {
        let mut root = ApiBuilder::new();
        root.version(["v 1"], VersioningStrategy::Path);
        assert_eq!(
            root.build().unwrap_err(),
            ConfigError::MalformedVersion("v 1".into())
        );
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let mut a = ApiBuilder::new();
        a.endpoint(Route::get("/things"));
        let mut b = ApiBuilder::new();
        b.endpoint(Route::get("/things"));

        let mut root = ApiBuilder::new();
        root.mount(a, "/").mount(b, "");
        assert!(matches!(
            root.build().unwrap_err(),
            ConfigError::DuplicateRoute { .. }
        ));
    }

    #[test]
    fn test_same_local_path_under_sibling_mounts_is_distinct() {
        let mut a = ApiBuilder::new();
        a.endpoint(Route::get("/things"));
        let mut b = ApiBuilder::new();
        b.endpoint(Route::get("/things"));

        let mut root = ApiBuilder::new();
        root.mount(a, "/a").mount(b, "/b");
        let tree = root.build().unwrap();
        let patterns: Vec<String> = tree.patterns().map(|(_, p)| p).collect();
        assert_eq!(patterns, vec!["/a/things(.:format)", "/b/things(.:format)"]);
    }

    #[test]
    fn test_unnamed_routes_cannot_share_root_resource() {
        let mut root = ApiBuilder::new();
        root.endpoint(Route::get("/"))
            .endpoint(Route::get("/root/settings"));
        assert_eq!(
            root.build().unwrap_err(),
            ConfigError::ResourceCollision("root".into())
        );

        let mut root = ApiBuilder::new();
        root.endpoint(Route::get("/:id"))
            .endpoint(Route::get("/settings"));
        assert!(root.build().unwrap().has_unnamed_resource());
    }
}
