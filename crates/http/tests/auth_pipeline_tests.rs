//! Bearer attachment and refresh-and-retry behaviour against a mock backend

use pawhaven_core::{CredentialStore, MemoryCredentialStore, TokenPair};
use pawhaven_http::client::error::ClientError;
use pawhaven_http::{ApiRequest, FileUpload, MultipartForm, PawClient};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFRESH_PATH: &str = "/user/token/refresh/";

fn client_with(server: &MockServer, tokens: TokenPair) -> (PawClient, Arc<MemoryCredentialStore>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let store = Arc::new(MemoryCredentialStore::with_tokens(tokens));
    let client = PawClient::builder()
        .base_url(server.uri())
        .credentials(store.clone())
        .build()
        .unwrap();
    (client, store)
}

fn pair(access: &str, refresh: Option<&str>) -> TokenPair {
    TokenPair::new(access, refresh.map(str::to_string))
}

async fn mount_refresh(server: &MockServer, new_access: &str, delay: Duration, times: u64) {
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(body_json(json!({ "refresh": "R1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access": new_access }))
                .set_delay(delay),
        )
        .expect(times)
        .named("token refresh")
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bearer_header_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, pair("A1", Some("R1")));
    let me = client.users().me().await.unwrap();
    assert_eq!(me["id"], 7);
}

#[tokio::test]
async fn test_no_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/countries/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, TokenPair::default());
    client.addresses().countries().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_unauthorized_refreshes_and_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/12/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pet/12/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 12, "name": "Luna" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 1).await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));
    let pet = client.pets().detail(12).await.unwrap();

    assert_eq!(pet.name, "Luna");
    assert_eq!(store.access_token().unwrap().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_refresh_request_is_not_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 1).await;

    let (client, _) = client_with(&server, pair("A1", Some("R1")));
    let response = client.send(&ApiRequest::get("/pet/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let refresh = requests
        .iter()
        .find(|r| r.url.path() == REFRESH_PATH)
        .unwrap();
    assert!(refresh.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_concurrent_unauthorized_share_one_refresh() {
    let server = MockServer::start().await;
    for pet in ["/pet/1/", "/pet/2/"] {
        Mock::given(method("GET"))
            .and(path(pet))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::from_millis(300), 1).await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));
    let first = ApiRequest::get("/pet/1/");
    let second = ApiRequest::get("/pet/2/");
    let (x, y) = tokio::join!(client.send(&first), client.send(&second));

    assert_eq!(x.unwrap().status(), StatusCode::OK);
    assert_eq!(y.unwrap().status(), StatusCode::OK);
    assert_eq!(store.access_token().unwrap().as_deref(), Some("A2"));
}

#[tokio::test]
async fn test_unauthorized_without_refresh_token_clears_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/notifications/unread_count/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 0).await;

    let (client, store) = client_with(&server, pair("A1", None));
    let result = client.notifications().unread_count().await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert_eq!(store.access_token().unwrap(), None);
    assert!(!client.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_refresh_failure_is_shared_and_clears_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/ticket/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Token is invalid or expired" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));
    let first = ApiRequest::get("/pet/ticket/");
    let second = ApiRequest::get("/pet/ticket/");
    let (x, y) = tokio::join!(client.send(&first), client.send(&second));

    let (Err(ClientError::RefreshFailed(x)), Err(ClientError::RefreshFailed(y))) = (x, y) else {
        panic!("both callers should see the refresh failure");
    };
    assert!(Arc::ptr_eq(&x, &y));
    assert!(x.to_string().contains("Token is invalid"));
    assert_eq!(store.access_token().unwrap(), None);
    assert_eq!(store.refresh_token().unwrap(), None);
}

#[tokio::test]
async fn test_retried_request_is_not_retried_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/holiday-family/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 1).await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));
    let response = client
        .send(&ApiRequest::get("/holiday-family/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // the retry's 401 is handed back; the refreshed pair stays in place
    assert_eq!(store.access_token().unwrap().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/articles/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/category/"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 0).await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));

    let response = client
        .send(&ApiRequest::get("/blog/articles/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let result = client.blog().categories().await;
    assert!(matches!(result, Err(ClientError::Forbidden(_))));
    assert_eq!(store.access_token().unwrap().as_deref(), Some("A1"));
}

#[tokio::test]
async fn test_multipart_body_resent_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pet/lost/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pet/lost/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 1).await;

    let (client, _) = client_with(&server, pair("A1", Some("R1")));
    let form = MultipartForm::new()
        .text("species", "cat")
        .file("photo", FileUpload::new("tom.jpg", b"jpeg-bytes".to_vec()));
    let response = client
        .send(&ApiRequest::post("/pet/lost/").multipart(form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let uploads: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/pet/lost/")
        .collect();
    assert_eq!(uploads.len(), 2);
    for upload in uploads {
        let body = String::from_utf8_lossy(&upload.body);
        assert!(body.contains("name=\"species\""));
        assert!(body.contains("jpeg-bytes"));
    }
}

#[tokio::test]
async fn test_sequential_invalidations_refresh_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_refresh(&server, "A2", Duration::ZERO, 2).await;

    let (client, store) = client_with(&server, pair("A1", Some("R1")));
    client.send(&ApiRequest::get("/pet/")).await.unwrap();

    // server-side revocation of A2 is simulated by putting A1 back
    store.set_access_token("A1").unwrap();
    let response = client.send(&ApiRequest::get("/pet/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_replaced_meanwhile_is_used_without_refresh() {
    use pawhaven_core::MockCredentialStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pet/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "A3", Duration::ZERO, 0).await;

    // another caller's refresh lands between sending and reading the 401
    let reads = AtomicUsize::new(0);
    let mut store = MockCredentialStore::new();
    store.expect_access_token().returning(move || {
        let token = if reads.fetch_add(1, Ordering::SeqCst) == 0 { "A1" } else { "A2" };
        Ok(Some(token.to_string()))
    });
    store.expect_refresh_token().never();
    store.expect_clear().never();

    let client = PawClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(store))
        .build()
        .unwrap();
    let response = client.send(&ApiRequest::get("/pet/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
