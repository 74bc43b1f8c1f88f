pub mod assembler;
pub mod routes;

pub use assembler::DocumentAssembler;
pub use routes::DocRoutes;

use serde::{Deserialize, Serialize};

/// Swagger schema version the documents conform to.
pub const SWAGGER_VERSION: &str = "1.1";

/// The top-level listing of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    pub models: serde_json::Map<String, serde_json::Value>,
    pub operations: Vec<serde_json::Value>,
    pub apis: Vec<ApiReference>,
}

/// An index entry pointing at one resource document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReference {
    pub path: String,
}

/// All operations of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    pub resource_path: String,
    pub apis: Vec<ApiDescription>,
}

/// Operations sharing one documented path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescription {
    pub path: String,
    pub operations: Vec<OperationDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDoc {
    pub http_method: String,
    pub nickname: String,
    pub summary: String,
    pub notes: Option<String>,
    pub parameters: Vec<ParameterDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    pub param_type: String,
    pub name: String,
    pub description: Option<String>,
    pub data_type: String,
    pub required: bool,
}

/// Either kind of document, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Index(IndexDocument),
    Resource(ResourceDocument),
}

impl From<IndexDocument> for Document {
    fn from(doc: IndexDocument) -> Self {
        Document::Index(doc)
    }
}

impl From<ResourceDocument> for Document {
    fn from(doc: ResourceDocument) -> Self {
        Document::Resource(doc)
    }
}
