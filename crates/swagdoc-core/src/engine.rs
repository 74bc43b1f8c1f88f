use crate::config::DocConfig;
use crate::document::{DocRoutes, Document, DocumentAssembler};
use crate::error::{ConfigError, DocError};
use crate::resolve::RequestContext;
use crate::tree::RouteTree;
use crate::{NotesRenderer, PlainNotes};

/// Format token accepted in documentation request paths.
pub const JSON_FORMAT: &str = "json";

/// A documented API: its route tree, presentation policy and notes renderer.
///
/// Immutable once constructed and safe to share between request handlers.
pub struct Documentation {
    tree: RouteTree,
    config: DocConfig,
    routes: DocRoutes,
    renderer: Box<dyn NotesRenderer + Send + Sync>,
}

impl Documentation {
    /// Validate `config` against `tree`. Notes are passed through verbatim
    /// until a renderer is installed with [`with_notes_renderer`].
    ///
    /// [`with_notes_renderer`]: Documentation::with_notes_renderer
    pub fn new(tree: RouteTree, config: DocConfig) -> Result<Self, ConfigError> {
        let routes = DocRoutes::new(&tree, &config)?;
        log::debug!("documentation served under {}", routes.root());
        Ok(Self {
            tree,
            config,
            routes,
            renderer: Box::new(PlainNotes),
        })
    }

    /// Install the renderer used for notes. Only takes effect when
    /// `markdown` is enabled; otherwise notes stay verbatim.
    pub fn with_notes_renderer<R>(mut self, renderer: R) -> Self
    where
        R: NotesRenderer + Send + Sync + 'static,
    {
        if self.config.markdown {
            self.renderer = Box::new(renderer);
        } else {
            log::debug!("markdown disabled, notes renderer ignored");
        }
        self
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    pub fn routes(&self) -> &DocRoutes {
        &self.routes
    }

    pub fn assembler(&self) -> DocumentAssembler<'_> {
        DocumentAssembler::new(&self.tree, &self.config, &self.routes, self.renderer.as_ref())
    }

    /// Answer a documentation request for `path`:
    /// `<root>[.json]` is the index, `<root>/<resource>[.json]` a resource.
    ///
    /// Resource names may themselves contain dots, so a trailing `.<format>`
    /// is only taken as a format when it is `json` or when the whole name
    /// matches no resource.
    pub fn handle(&self, path: &str, ctx: &RequestContext) -> Result<Document, DocError> {
        let not_found = || DocError::RouteNotFound(path.to_string());
        let rest = path.strip_prefix(self.routes.root()).ok_or_else(not_found)?;

        if rest.is_empty() || rest.starts_with('.') {
            match rest.strip_prefix('.') {
                Some("") => return Err(not_found()),
                format => check_format(format)?,
            }
            log::debug!("{path}: index");
            return Ok(self.assembler().index(ctx).into());
        }

        let name = rest.strip_prefix('/').ok_or_else(not_found)?;
        if name.is_empty() || name.contains('/') {
            return Err(not_found());
        }

        let assembler = self.assembler();
        let doc = match name.rsplit_once('.') {
            None => assembler.resource(name, ctx),
            Some(("", _) | (_, "")) => return Err(not_found()),
            Some((stem, JSON_FORMAT)) => match assembler.resource(stem, ctx) {
                Err(DocError::ResourceNotFound(_)) => assembler
                    .resource(name, ctx)
                    .map_err(|_| DocError::ResourceNotFound(stem.to_string())),
                found => found,
            },
            Some((_, format)) => match assembler.resource(name, ctx) {
                Err(DocError::ResourceNotFound(_)) => {
                    return Err(DocError::UnsupportedFormat(format.to_string()));
                }
                found => found,
            },
        }?;
        log::debug!("{path}: resource document with {} paths", doc.apis.len());
        Ok(doc.into())
    }
}

fn check_format(format: Option<&str>) -> Result<(), DocError> {
    match format {
        None | Some(JSON_FORMAT) => Ok(()),
        Some(other) => Err(DocError::UnsupportedFormat(other.to_string())),
    }
}
