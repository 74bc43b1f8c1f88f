use serde::Deserialize;

use super::endpoint::Segment;
use crate::error::ConfigError;

/// Index of a frame inside its [`RouteTree`](super::RouteTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    pub const ROOT: FrameId = FrameId(0);
}

/// How an API expects clients to select a version. Only `Path` changes the
/// documented paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersioningStrategy {
    #[default]
    Path,
    Header,
    Param,
    AcceptVersionHeader,
}

/// A version declaration: one or more identifiers and a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDecl {
    versions: Vec<String>,
    strategy: VersioningStrategy,
}

impl VersionDecl {
    pub fn new<I, S>(versions: I, strategy: VersioningStrategy) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        if versions.is_empty() {
            return Err(ConfigError::MalformedVersion(String::new()));
        }
        for v in &versions {
            let bad = v.is_empty()
                || v
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '{' | '}' | '(' | ')'));
            if bad {
                return Err(ConfigError::MalformedVersion(v.clone()));
            }
        }
        Ok(Self { versions, strategy })
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// The version that appears in documented paths.
    pub fn primary(&self) -> &str {
        &self.versions[0]
    }

    pub fn strategy(&self) -> VersioningStrategy {
        self.strategy
    }
}

/// One API in the mount tree: where it is attached, its own prefix, and its
/// version declaration if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountFrame {
    pub(crate) parent: Option<FrameId>,
    pub(crate) at: Vec<Segment>,
    pub(crate) prefix: Vec<Segment>,
    pub(crate) version: Option<VersionDecl>,
}

impl MountFrame {
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// Mount point inside the parent. Empty for the root.
    pub fn at(&self) -> &[Segment] {
        &self.at
    }

    pub fn prefix(&self) -> &[Segment] {
        &self.prefix
    }

    pub fn version(&self) -> Option<&VersionDecl> {
        self.version.as_ref()
    }

    /// The version token this frame embeds in paths, if it versions by path.
    pub fn path_version(&self) -> Option<&str> {
        self.version
            .as_ref()
            .filter(|v| v.strategy == VersioningStrategy::Path)
            .map(VersionDecl::primary)
    }
}
