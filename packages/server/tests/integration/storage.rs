use crate::common::{IMAGE_BYTES, TestApp, routes};

#[tokio::test]
async fn serves_stored_bytes_with_image_content_type() {
    let app = TestApp::spawn().await;
    app.seed("2022-01-01", "png").await;

    let res = app.get(&routes::storage("2022-01-01.png")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.content_type.as_deref(), Some("image/png"));
    assert_eq!(res.bytes, IMAGE_BYTES);
}

#[tokio::test]
async fn jpeg_names_are_served_as_image_jpeg() {
    let app = TestApp::spawn().await;
    app.seed("2022-01-03", "jpeg").await;

    let res = app.get(&routes::storage("2022-01-03.jpeg")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::storage("2022-01-01.jpg")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_name_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::STORAGE).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let app = TestApp::spawn().await;

    for name in ["2022-01-01.gif", "2022-01-01", "notes.txt"] {
        let res = app.get(&routes::storage(name)).await;
        assert_eq!(res.status, 400, "name {name:?} should be rejected");
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn path_traversal_is_rejected() {
    let app = TestApp::spawn().await;

    for name in ["..%2Fsecret.png", "sub%2F2022-01-01.png", ".hidden.png"] {
        let res = app.get(&routes::storage(name)).await;
        assert_eq!(res.status, 400, "name {name:?} should be rejected");
    }
}
