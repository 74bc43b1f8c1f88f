use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mount::FrameId;
use crate::error::{ConfigError, ParseError};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(ParseError::UnknownMethod(s.to_string())),
        }
    }
}

/// One piece of a path between slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(s) => Some(s),
            Segment::Param(_) => None,
        }
    }
}

/// Split a raw path into segments. Placeholders may be written `:name` or
/// `{name}`; empty pieces are dropped so `"/"`, `""` and `"//a/"` behave.
pub fn parse_segments(raw: &str) -> Result<Vec<Segment>, ConfigError> {
    let malformed = || ConfigError::MalformedTemplate(raw.to_string());

    raw.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Some(name) = s.strip_prefix(':') {
                if name.is_empty() || name.contains([':', '{', '}']) {
                    return Err(malformed());
                }
                Ok(Segment::Param(name.to_string()))
            } else if let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                if inner.is_empty() || inner.contains([':', '{', '}']) {
                    return Err(malformed());
                }
                Ok(Segment::Param(inner.to_string()))
            } else if s.contains(['{', '}']) {
                Err(malformed())
            } else {
                Ok(Segment::Literal(s.to_string()))
            }
        })
        .collect()
}

/// A parsed local path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

/// Placeholder name reserved for the version segment the resolver injects.
pub const VERSION_PLACEHOLDER: &str = "version";

impl PathTemplate {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let segments = parse_segments(raw)?;
        let reserved = segments
            .iter()
            .any(|s| matches!(s, Segment::Param(name) if name == VERSION_PLACEHOLDER));
        if reserved {
            return Err(ConfigError::ReservedPlaceholder {
                template: raw.to_string(),
                name: VERSION_PLACEHOLDER.to_string(),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(p) if p == name))
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Path,
    Query,
    Body,
    Header,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Path => "path",
            ParamKind::Query => "query",
            ParamKind::Body => "body",
            ParamKind::Header => "header",
        }
    }
}

/// A declared parameter. `kind: None` is inferred from the owning route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub data_type: String,
    pub required: bool,
    pub description: Option<String>,
    pub kind: Option<ParamKind>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            required: false,
            description: None,
            kind: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// A route as declared on an [`ApiBuilder`](super::ApiBuilder), before it is
/// frozen into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub params: Vec<Parameter>,
}

impl Route {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            description: None,
            notes: None,
            params: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }
}

/// A route frozen into a [`RouteTree`](super::RouteTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: HttpMethod,
    template: PathTemplate,
    description: Option<String>,
    notes: Option<String>,
    parameters: Vec<Parameter>,
    frame: FrameId,
}

impl Endpoint {
    pub(crate) fn from_route(route: Route, frame: FrameId) -> Result<Self, ConfigError> {
        Ok(Self {
            method: route.method,
            template: PathTemplate::parse(&route.path)?,
            description: route.description,
            notes: route.notes,
            parameters: route.params,
            frame,
        })
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The mount frame that declared this endpoint.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Declared kind, or: `path` when the template names it, `body` for POST,
    /// `query` otherwise.
    pub fn param_kind(&self, param: &Parameter) -> ParamKind {
        if let Some(kind) = param.kind {
            return kind;
        }
        if self.template.has_param(&param.name) {
            ParamKind::Path
        } else if self.method == HttpMethod::Post {
            ParamKind::Body
        } else {
            ParamKind::Query
        }
    }
}
