use template_share::TemplateKind;
use template_share_remote::{ServerClient, ServerConfig, ServerError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ServerClient {
    ServerClient::new(ServerConfig::new(server.uri(), "test-key")).unwrap()
}

fn archive_on_disk(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("templates.tar.gz");
    std::fs::write(&path, b"archive bytes").unwrap();
    path
}

#[tokio::test]
async fn list_parses_descriptor_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/list"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[
                {"fileName":"a1.tar.gz","displayName":"Service skeleton","type":"file","createTime":1700000000},
                {"fileName":"b2.tar.gz","displayName":"Kotlin snippets","type":"live"}
            ]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let templates = client_for(&server).list(None).await.unwrap();

    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].display_name, "Service skeleton");
    assert_eq!(templates[0].kind, TemplateKind::File);
    assert_eq!(templates[0].create_time, 1700000000);
    // createTime omitted by the server defaults to 0
    assert_eq!(templates[1].create_time, 0);
}

#[tokio::test]
async fn list_passes_kind_filter_as_type_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/list"))
        .and(query_param("type", "live"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let templates = client_for(&server)
        .list(Some(TemplateKind::Live))
        .await
        .unwrap();
    assert!(templates.is_empty());
}

#[tokio::test]
async fn download_writes_payload_into_dest_dir() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/file/a1.tar.gz"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"archive bytes".to_vec()))
        .mount(&server)
        .await;

    let dest = tempfile::tempdir().unwrap();
    let path = client_for(&server)
        .download(TemplateKind::File, "a1.tar.gz", Some(dest.path()))
        .await
        .unwrap();

    assert_eq!(path, dest.path().join("a1.tar.gz"));
    assert_eq!(std::fs::read(&path).unwrap(), b"archive bytes");
}

#[tokio::test]
async fn download_rejects_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/file/empty.tar.gz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dest = tempfile::tempdir().unwrap();
    let result = client_for(&server)
        .download(TemplateKind::File, "empty.tar.gz", Some(dest.path()))
        .await;

    assert!(matches!(result, Err(ServerError::Transfer(_))));
}

#[tokio::test]
async fn download_404_is_a_failed_transfer_not_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/file/gone.tar.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dest = tempfile::tempdir().unwrap();
    let result = client_for(&server)
        .download(TemplateKind::File, "gone.tar.gz", Some(dest.path()))
        .await;

    assert!(matches!(result, Err(ServerError::Transfer(_))));
}

#[tokio::test]
async fn upload_posts_multipart_to_the_kind_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/templates/upload/file"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    client_for(&server)
        .upload(TemplateKind::File, "Service skeleton", &archive_on_disk(&dir))
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_maps_401_to_auth_with_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/templates/upload/file"))
        .respond_with(ResponseTemplate::new(401).set_body_string("api key expired"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = client_for(&server)
        .upload(TemplateKind::File, "X", &archive_on_disk(&dir))
        .await;

    match result {
        Err(ServerError::Auth(body)) => assert_eq!(body, "api key expired"),
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_maps_403_to_permission() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/templates/upload/live"))
        .respond_with(ResponseTemplate::new(403).set_body_string("read-only key"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = client_for(&server)
        .upload(TemplateKind::Live, "X", &archive_on_disk(&dir))
        .await;

    match result {
        Err(ServerError::Permission(body)) => assert_eq!(body, "read-only key"),
        other => panic!("expected Permission, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_maps_other_failures_to_transfer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/templates/upload/file"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = client_for(&server)
        .upload(TemplateKind::File, "X", &archive_on_disk(&dir))
        .await;

    match result {
        Err(ServerError::Transfer(msg)) => assert!(msg.contains("disk full")),
        other => panic!("expected Transfer, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_hits_the_kind_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/templates/live/b2.tar.gz"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete(TemplateKind::Live, "b2.tar.gz")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/templates/file/gone.tar.gz"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such template"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .delete(TemplateKind::File, "gone.tar.gz")
        .await;

    match result {
        Err(ServerError::NotFound(body)) => assert_eq!(body, "no such template"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_is_refused_locally_under_the_default_config() {
    let client = ServerClient::new(ServerConfig::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let result = client
        .upload(TemplateKind::File, "X", &archive_on_disk(&dir))
        .await;

    assert!(matches!(result, Err(ServerError::ReadOnlyConfig)));
}

#[tokio::test]
async fn delete_is_refused_locally_under_the_default_config() {
    let client = ServerClient::new(ServerConfig::default()).unwrap();
    let result = client.delete(TemplateKind::File, "a1.tar.gz").await;
    assert!(matches!(result, Err(ServerError::ReadOnlyConfig)));
}

#[tokio::test]
async fn blank_config_is_rejected_before_any_request() {
    let client = ServerClient::new(ServerConfig::new("", "")).unwrap();
    let result = client.list(None).await;
    assert!(matches!(result, Err(ServerError::MissingConfig)));
}
