use crate::tree::{Endpoint, MountFrame, Segment};

/// Presentation switches that change documented paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathPolicy {
    pub hide_format: bool,
}

/// Resource name used when a route has no literal segment of its own.
pub const ROOT_RESOURCE: &str = "root";

/// The composed location of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Documentation path, e.g. `/v1/users/{id}.{format}`.
    pub path: String,
    /// Dispatch pattern, e.g. `/v1/users/:id(.:format)`. Always carries the
    /// format group, whatever the policy.
    pub pattern: String,
    /// Resource the endpoint is documented under.
    pub resource: String,
    /// No literal segment names the resource; it fell back to
    /// [`ROOT_RESOURCE`].
    pub unnamed: bool,
    /// Version token embedded in the path, if any.
    pub version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Mount,
    Prefix,
    Version,
    Local,
}

/// Compose the absolute path of `endpoint` declared at the end of `chain`
/// (root first).
///
/// Each frame contributes its mount point then its prefix. A path version is
/// injected once, right after the outermost frame that versions by path; the
/// token comes from the innermost such frame.
pub fn resolve(chain: &[&MountFrame], endpoint: &Endpoint, policy: PathPolicy) -> ResolvedRoute {
    let introduced_at = chain.iter().position(|f| f.path_version().is_some());
    let version = chain.iter().rev().find_map(|f| f.path_version());

    let mut parts: Vec<(Role, Segment)> = Vec::new();
    for (i, frame) in chain.iter().enumerate() {
        parts.extend(frame.at().iter().cloned().map(|s| (Role::Mount, s)));
        parts.extend(frame.prefix().iter().cloned().map(|s| (Role::Prefix, s)));
        if introduced_at == Some(i) {
            if let Some(v) = version {
                parts.push((Role::Version, Segment::Literal(v.to_string())));
            }
        }
    }
    parts.extend(
        endpoint
            .template()
            .segments()
            .iter()
            .cloned()
            .map(|s| (Role::Local, s)),
    );

    let named = parts
        .iter()
        .filter(|(role, _)| matches!(role, Role::Mount | Role::Local))
        .find_map(|(_, seg)| seg.as_literal());
    let resource = named.unwrap_or(ROOT_RESOURCE).to_string();
    let unnamed = named.is_none();

    let mut path = String::new();
    let mut pattern = String::new();
    for (_, seg) in &parts {
        path.push('/');
        pattern.push('/');
        match seg {
            Segment::Literal(s) => {
                path.push_str(s);
                pattern.push_str(s);
            }
            Segment::Param(name) => {
                path.push('{');
                path.push_str(name);
                path.push('}');
                pattern.push(':');
                pattern.push_str(name);
            }
        }
    }
    if parts.is_empty() {
        path.push('/');
        pattern.push('/');
    }
    if !policy.hide_format {
        path.push_str(".{format}");
    }
    pattern.push_str("(.:format)");

    ResolvedRoute {
        path,
        pattern,
        resource,
        unnamed,
        version: version.map(str::to_string),
    }
}
