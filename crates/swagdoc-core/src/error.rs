use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),
}

/// Errors detected while defining an API or its documentation. These are
/// fatal: nothing should be served from a definition that produced one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed version declaration: {0:?}")]
    MalformedVersion(String),

    #[error("path template {template:?} uses the reserved placeholder `{name}`")]
    ReservedPlaceholder { template: String, name: String },

    #[error("malformed path template {0:?}")]
    MalformedTemplate(String),

    #[error("route {method} {pattern} is declared more than once")]
    DuplicateRoute { method: String, pattern: String },

    #[error("resource {0:?} is named by a path segment and also holds routes without one")]
    ResourceCollision(String),

    #[error("invalid documentation mount path {0:?}")]
    InvalidMountPath(String),

    #[error("invalid base path template: {0}")]
    InvalidBasePathTemplate(String),
}

/// Errors answering a single documentation request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("no documentation route matches {0}")]
    RouteNotFound(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Error)]
#[error("failed to render notes: {0}")]
pub struct RenderError(pub String);
