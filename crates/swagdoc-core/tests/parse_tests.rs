use swagdoc_core::error::{ConfigError, ParseError};
use swagdoc_core::parse;
use swagdoc_core::parse::definition::OneOrMany;
use swagdoc_core::tree::{HttpMethod, VersioningStrategy};

const VERSIONED: &str = include_str!("fixtures/versioned.yaml");
const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const INVALID_METHOD: &str = include_str!("fixtures/invalid-method.yaml");

#[test]
fn parse_versioned_yaml() {
    let def = parse::from_yaml(VERSIONED).expect("should parse versioned.yaml");
    assert_eq!(def.version, Some(OneOrMany::One("v1".into())));
    assert_eq!(def.versioning, VersioningStrategy::Path);
    assert!(def.endpoints.is_empty());
    assert_eq!(def.mounts.len(), 1);
    assert_eq!(def.mounts[0].at, "");
    assert_eq!(def.mounts[0].api.endpoints[0].path, "/something");
}

#[test]
fn parse_petstore_yaml() {
    let def = parse::from_yaml(PETSTORE).expect("should parse petstore.yaml");
    assert_eq!(def.prefix.as_deref(), Some("api"));
    assert_eq!(
        def.version.clone().map(OneOrMany::into_vec),
        Some(vec!["v2".to_string(), "v1".to_string()])
    );
    assert_eq!(def.mounts.len(), 2);

    let pets = &def.mounts[0].api;
    assert_eq!(pets.endpoints.len(), 4);
    // `desc` is accepted as an alias
    assert_eq!(pets.endpoints[2].description.as_deref(), Some("Get a pet"));
    // `type` defaults to String
    assert_eq!(pets.endpoints[1].params[0].data_type, "String");

    let store = &def.mounts[1].api;
    assert_eq!(store.versioning, VersioningStrategy::Header);
}

#[test]
fn petstore_builds_into_a_tree() {
    let tree = parse::from_yaml(PETSTORE)
        .unwrap()
        .into_builder()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(tree.frames().len(), 3);
    assert_eq!(tree.endpoints().len(), 6);
    assert_eq!(tree.endpoints()[4].method(), HttpMethod::Delete);

    let inventory = &tree.endpoints()[5];
    let decl = tree.version_of(inventory).unwrap();
    assert_eq!(decl.versions(), &["v3".to_string()]);
    assert_eq!(decl.strategy(), VersioningStrategy::Header);
}

#[test]
fn parse_json_definition() {
    let json = r#"{
        "endpoints": [
            { "method": "put", "path": "/things/{id}", "params": [{ "name": "id" }] }
        ]
    }"#;
    let def = parse::from_json(json).unwrap();
    assert_eq!(def.endpoints[0].method, "put");
    let tree = def.into_builder().unwrap().build().unwrap();
    assert_eq!(tree.endpoints()[0].method(), HttpMethod::Put);
}

#[test]
fn parse_unknown_method() {
    let def = parse::from_yaml(INVALID_METHOD).unwrap();
    let err = def.into_builder().unwrap_err();
    assert!(matches!(err, ParseError::UnknownMethod(ref m) if m == "FETCH"));
}

#[test]
fn parse_invalid_yaml() {
    let err = parse::from_yaml("endpoints: [").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}

#[test]
fn reserved_version_placeholder_fails_build() {
    let yaml = r#"
endpoints:
  - method: GET
    path: /:version/something
"#;
    let err = parse::from_yaml(yaml)
        .unwrap()
        .into_builder()
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ReservedPlaceholder { .. }));
}
