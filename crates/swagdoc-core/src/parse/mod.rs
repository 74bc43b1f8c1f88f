pub mod definition;

use crate::error::ParseError;
use definition::ApiDefinition;

/// Parse an API definition from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDefinition, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse an API definition from JSON.
pub fn from_json(input: &str) -> Result<ApiDefinition, ParseError> {
    Ok(serde_json::from_str(input)?)
}
