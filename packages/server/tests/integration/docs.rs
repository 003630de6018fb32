use crate::common::TestApp;

#[tokio::test]
async fn openapi_document_lists_every_endpoint() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"]
        .as_object()
        .expect("document should contain paths");
    for path in ["/v1/picday", "/v1/stored", "/v1/storage"] {
        assert!(paths.contains_key(path), "{path} missing from document");
    }
}
