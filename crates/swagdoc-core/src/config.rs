use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::resolve::BasePath;

/// Where documentation is served unless overridden.
pub const DEFAULT_MOUNT_PATH: &str = "/swagger_doc";

/// Reported `apiVersion` unless overridden.
pub const DEFAULT_API_VERSION: &str = "0.1";

/// Presentation policy of one documented API.
#[derive(Debug, Clone)]
pub struct DocConfig {
    pub mount_path: String,
    pub api_version: String,
    pub base_path: Option<BasePath>,
    pub hide_documentation_path: bool,
    pub hide_format: bool,
    pub markdown: bool,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_path: None,
            hide_documentation_path: false,
            hide_format: false,
            markdown: false,
        }
    }
}

/// Documentation settings loaded from `.swagdoc.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocSettings {
    pub input: String,
    pub mount_path: String,
    pub api_version: String,
    /// A literal URL, or a template such as `{{ base_url }}/api`.
    pub base_path: Option<String>,
    pub hide_documentation_path: bool,
    pub hide_format: bool,
    pub markdown: bool,
}

impl Default for DocSettings {
    fn default() -> Self {
        Self {
            input: "api.yaml".to_string(),
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_path: None,
            hide_documentation_path: false,
            hide_format: false,
            markdown: false,
        }
    }
}

impl DocSettings {
    pub fn into_config(self) -> Result<DocConfig, ConfigError> {
        let base_path = match self.base_path {
            Some(raw) if raw.contains("{{") => Some(BasePath::template(&raw)?),
            Some(raw) => Some(BasePath::Literal(raw)),
            None => None,
        };
        Ok(DocConfig {
            mount_path: self.mount_path,
            api_version: self.api_version,
            base_path,
            hide_documentation_path: self.hide_documentation_path,
            hide_format: self.hide_format,
            markdown: self.markdown,
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagdoc.yaml";

/// Load settings from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DocSettings>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let settings: DocSettings = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(settings))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagdoc configuration
input: api.yaml                  # API definition (YAML or JSON)

mount_path: /swagger_doc         # where the documentation is served
api_version: "0.1"               # reported apiVersion
# base_path: https://api.example.com
# base_path: "{{ base_url }}/api"  # rendered per request (scheme, host, port, base_url)

hide_documentation_path: false   # leave the documentation route out of the index
hide_format: false               # drop the .{format} suffix from documented paths
markdown: false                  # render notes as CommonMark
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{RequestContext, resolve_base_path};

    #[test]
    fn test_default_config() {
        let config = DocConfig::default();
        assert_eq!(config.mount_path, "/swagger_doc");
        assert_eq!(config.api_version, "0.1");
        assert!(config.base_path.is_none());
        assert!(!config.hide_documentation_path);
        assert!(!config.hide_format);
        assert!(!config.markdown);
    }

    #[test]
    fn test_parse_settings_yaml() {
        let yaml = r#"
input: routes.yaml
mount_path: /api_doc
api_version: "101"
base_path: http://www.breakcoregivesmewood.com
hide_documentation_path: true
hide_format: true
markdown: true
"#;
        let settings: DocSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(settings.input, "routes.yaml");
        assert_eq!(settings.mount_path, "/api_doc");
        assert_eq!(settings.api_version, "101");

        let config = settings.into_config().unwrap();
        assert!(matches!(
            config.base_path,
            Some(BasePath::Literal(ref s)) if s == "http://www.breakcoregivesmewood.com"
        ));
        assert!(config.hide_documentation_path);
        assert!(config.hide_format);
        assert!(config.markdown);
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings: DocSettings = serde_yaml_ng::from_str("markdown: true\n").unwrap();
        assert!(settings.markdown);
        // Defaults applied
        assert_eq!(settings.input, "api.yaml");
        assert_eq!(settings.mount_path, "/swagger_doc");
        assert_eq!(settings.api_version, "0.1");
    }

    #[test]
    fn test_templated_base_path_becomes_dynamic() {
        let settings = DocSettings {
            base_path: Some("{{ base_url }}/some_value".to_string()),
            ..DocSettings::default()
        };
        let config = settings.into_config().unwrap();
        let ctx = RequestContext::new("http", "example.org", 80);
        assert_eq!(
            resolve_base_path(config.base_path.as_ref(), &ctx),
            "http://example.org/some_value"
        );
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let settings: DocSettings = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(settings, DocSettings::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(load_config(&path).unwrap(), None);

        fs::write(&path, "mount_path: /docs\nhide_format: true\n").unwrap();
        let settings = load_config(&path).unwrap().unwrap();
        assert_eq!(settings.mount_path, "/docs");
        assert!(settings.hide_format);

        fs::write(&path, "hide_format: [nope\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
