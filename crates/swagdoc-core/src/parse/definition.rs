use serde::Deserialize;

use crate::error::ParseError;
use crate::tree::{ApiBuilder, HttpMethod, ParamKind, Parameter, Route, VersioningStrategy};

/// One API as written in a definition file. Mounted APIs nest recursively.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiDefinition {
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub version: Option<OneOrMany>,

    #[serde(default)]
    pub versioning: VersioningStrategy,

    #[serde(default)]
    pub endpoints: Vec<EndpointDefinition>,

    #[serde(default)]
    pub mounts: Vec<MountDefinition>,
}

/// A version written either as `v1` or as `[v1, v2]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointDefinition {
    pub method: String,
    pub path: String,

    #[serde(default, alias = "desc")]
    pub description: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub params: Vec<ParamDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamDefinition {
    pub name: String,

    #[serde(rename = "type", default = "default_data_type")]
    pub data_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub kind: Option<ParamKind>,
}

fn default_data_type() -> String {
    "String".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MountDefinition {
    #[serde(default)]
    pub at: String,

    pub api: ApiDefinition,
}

impl ApiDefinition {
    /// Turn the definition into a builder, ready for [`ApiBuilder::build`].
    pub fn into_builder(self) -> Result<ApiBuilder, ParseError> {
        let mut api = ApiBuilder::new();
        if let Some(prefix) = self.prefix {
            api.prefix(prefix);
        }
        if let Some(version) = self.version {
            api.version(version.into_vec(), self.versioning);
        }
        for ep in self.endpoints {
            api.endpoint(ep.into_route()?);
        }
        for mount in self.mounts {
            api.mount(mount.api.into_builder()?, mount.at);
        }
        Ok(api)
    }
}

impl EndpointDefinition {
    fn into_route(self) -> Result<Route, ParseError> {
        let method: HttpMethod = self.method.parse()?;
        let mut route = Route::new(method, self.path);
        route.description = self.description;
        route.notes = self.notes;
        route.params = self
            .params
            .into_iter()
            .map(|p| Parameter {
                name: p.name,
                data_type: p.data_type,
                required: p.required,
                description: p.description,
                kind: p.kind,
            })
            .collect();
        Ok(route)
    }
}
