use std::fmt;
use std::sync::Arc;

use minijinja::{Environment, context};

use crate::error::ConfigError;

/// What the documentation engine knows about the inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    scheme: String,
    host: String,
    port: u16,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
            host: host.into(),
            port,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `scheme://host[:port]`, the port omitted only when it is the default
    /// for the scheme.
    pub fn base_url(&self) -> String {
        let default_port = match self.scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };
        if default_port == Some(self.port) {
            format!("{}://{}", self.scheme, self.host)
        } else {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}

type BasePathFn = dyn Fn(&RequestContext) -> String + Send + Sync;

/// Configured `basePath` of the documents.
#[derive(Clone)]
pub enum BasePath {
    Literal(String),
    Dynamic(Arc<BasePathFn>),
}

impl BasePath {
    pub fn literal(value: impl Into<String>) -> Self {
        BasePath::Literal(value.into())
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&RequestContext) -> String + Send + Sync + 'static,
    {
        BasePath::Dynamic(Arc::new(f))
    }

    /// A dynamic base path rendered from a minijinja template with `scheme`,
    /// `host`, `port` and `base_url` in scope, e.g. `{{ base_url }}/api`.
    pub fn template(source: &str) -> Result<Self, ConfigError> {
        let env = Environment::new();
        env.template_from_str(source)
            .map_err(|e| ConfigError::InvalidBasePathTemplate(e.to_string()))?;
        let source = source.to_string();

        Ok(BasePath::dynamic(move |ctx| {
            let rendered = env.render_str(
                &source,
                context! {
                    scheme => ctx.scheme(),
                    host => ctx.host(),
                    port => ctx.port(),
                    base_url => ctx.base_url(),
                },
            );
            match rendered {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("base path template failed, using request base url: {err}");
                    ctx.base_url()
                }
            }
        }))
    }
}

impl fmt::Debug for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePath::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            BasePath::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Resolve the `basePath` for one request. Never cached: the same
/// configuration may yield different values behind different proxies.
pub fn resolve_base_path(configured: Option<&BasePath>, ctx: &RequestContext) -> String {
    match configured {
        Some(BasePath::Literal(value)) => value.clone(),
        Some(BasePath::Dynamic(f)) => f(ctx),
        None => ctx.base_url(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_omits_default_ports() {
        assert_eq!(
            RequestContext::new("http", "example.org", 80).base_url(),
            "http://example.org"
        );
        assert_eq!(
            RequestContext::new("https", "example.org", 443).base_url(),
            "https://example.org"
        );
        assert_eq!(
            RequestContext::new("https", "example.org", 80).base_url(),
            "https://example.org:80"
        );
        assert_eq!(
            RequestContext::new("HTTP", "localhost", 8080).base_url(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_literal_ignores_request() {
        let base = BasePath::literal("http://www.breakcoregivesmewood.com");
        for ctx in [
            RequestContext::new("http", "example.org", 80),
            RequestContext::new("https", "other.test", 8443),
        ] {
            assert_eq!(
                resolve_base_path(Some(&base), &ctx),
                "http://www.breakcoregivesmewood.com"
            );
        }
    }

    #[test]
    fn test_dynamic_is_evaluated_per_request() {
        let base = BasePath::dynamic(|ctx| format!("{}/some_value", ctx.base_url()));
        assert_eq!(
            resolve_base_path(Some(&base), &RequestContext::new("http", "example.org", 80)),
            "http://example.org/some_value"
        );
        assert_eq!(
            resolve_base_path(Some(&base), &RequestContext::new("https", "api.test", 8443)),
            "https://api.test:8443/some_value"
        );
    }

    #[test]
    fn test_absent_derives_from_request() {
        let ctx = RequestContext::new("https", "example.org", 80);
        assert_eq!(resolve_base_path(None, &ctx), "https://example.org:80");
    }

    #[test]
    fn test_template_base_path() {
        let base = BasePath::template("{{ base_url }}/some_value").unwrap();
        assert_eq!(
            resolve_base_path(Some(&base), &RequestContext::new("http", "example.org", 80)),
            "http://example.org/some_value"
        );

        let base = BasePath::template("{{ scheme }}://docs.{{ host }}").unwrap();
        assert_eq!(
            resolve_base_path(Some(&base), &RequestContext::new("https", "example.org", 443)),
            "https://docs.example.org"
        );
    }

    #[test]
    fn test_invalid_template_is_a_config_error() {
        let err = BasePath::template("{{ base_url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBasePathTemplate(_)));
    }
}
