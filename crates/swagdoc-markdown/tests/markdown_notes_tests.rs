use serde_json::json;

use swagdoc_core::Documentation;
use swagdoc_core::config::DocConfig;
use swagdoc_core::resolve::RequestContext;
use swagdoc_core::tree::{ApiBuilder, Route};
use swagdoc_markdown::MarkdownNotes;

fn documentation(markdown: bool) -> Documentation {
    let mut mounted = ApiBuilder::new();
    mounted.endpoint(
        Route::get("/something")
            .desc("This gets something.")
            .notes("_test_"),
    );
    let mut root = ApiBuilder::new();
    root.mount(mounted, "");

    let config = DocConfig {
        markdown,
        ..DocConfig::default()
    };
    Documentation::new(root.build().unwrap(), config)
        .unwrap()
        .with_notes_renderer(MarkdownNotes::new())
}

fn resource(docs: &Documentation) -> serde_json::Value {
    let ctx = RequestContext::new("http", "example.org", 80);
    serde_json::to_value(docs.handle("/swagger_doc/something.json", &ctx).unwrap()).unwrap()
}

#[test]
fn markdown_notes_are_rendered() {
    assert_eq!(
        resource(&documentation(true)),
        json!({
            "apiVersion": "0.1",
            "swaggerVersion": "1.1",
            "basePath": "http://example.org",
            "resourcePath": "",
            "apis": [{
                "path": "/something.{format}",
                "operations": [{
                    "notes": "<p><em>test</em></p>\n",
                    "summary": "This gets something.",
                    "nickname": "GET-something---format-",
                    "httpMethod": "GET",
                    "parameters": []
                }]
            }]
        })
    );
}

#[test]
fn notes_pass_through_without_markdown() {
    let doc = resource(&documentation(false));
    assert_eq!(doc["apis"][0]["operations"][0]["notes"], "_test_");
}
