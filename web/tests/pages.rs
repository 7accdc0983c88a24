use std::io;
use std::sync::{Arc, Mutex};

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_core::{HttpMethod, StubTransport, TodoClient};
use todo_web::{app, AppState, UreqTransport};
use tower::ServiceExt;

const API_URL: &str = "http://backend.test/api";

fn stub_app(stub: &Arc<StubTransport>) -> axum::Router {
    app(AppState::new(TodoClient::new(API_URL), Arc::clone(stub)))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn page_request() -> Request<String> {
    Request::builder().uri("/").body(String::new()).unwrap()
}

fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[http::header::LOCATION].to_str().unwrap()
}

/// Collects formatted log output for the current thread.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn lines_containing(&self, needle: &str) -> usize {
        let text = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        text.lines().filter(|line| line.contains(needle)).count()
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

// --- page ---

#[tokio::test]
async fn index_renders_backend_collection() {
    let stub = Arc::new(StubTransport::new().respond(200, r#"[{"id":1,"title":"a","completed":false}]"#));

    let resp = stub_app(&stub).oneshot(page_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<span>a</span>"));
    assert!(html.contains("name=\"id\" value=\"1\""));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "http://backend.test/api/todos/");
}

#[tokio::test]
async fn index_renders_empty_list_when_backend_is_down() {
    let stub = Arc::new(StubTransport::new().fail("connection refused"));

    let resp = stub_app(&stub).oneshot(page_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<ul>\n</ul>"));
    assert!(!html.contains("role=\"alert\""));
}

// --- actions ---

#[tokio::test]
async fn create_posts_and_redirects_home() {
    let stub = Arc::new(StubTransport::new().respond(201, r#"{"id":1,"title":"buy milk","completed":false}"#));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=create&title=buy+milk"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "http://backend.test/api/todos/");
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"title": "buy milk", "completed": false}));
}

#[tokio::test]
async fn toggle_patches_negated_value() {
    let stub = Arc::new(StubTransport::new().respond(200, "{}"));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=update&id=1&completed=false"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].path, "http://backend.test/api/todos/1/");
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"completed":true}"#));
}

#[tokio::test]
async fn failed_delete_renders_error_over_reloaded_list() {
    let stub = Arc::new(
        StubTransport::new()
            .respond(500, "internal error")
            .respond(200, r#"[{"id":1,"title":"still here","completed":false}]"#),
    );

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=delete&id=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(resp).await;
    assert!(html.contains("Failed to delete todo"));
    assert!(html.contains("still here"));

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].path, "http://backend.test/api/todos/1/");
    assert_eq!(requests[1].method, HttpMethod::Get);
}

#[tokio::test]
async fn empty_title_is_rejected_without_posting() {
    let stub = Arc::new(StubTransport::new().respond(200, "[]"));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=create&title="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Invalid input"));

    // Only the reload reached the backend.
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let stub = Arc::new(StubTransport::new().respond(200, "[]"));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=archive&id=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(stub.requests().iter().all(|r| r.method == HttpMethod::Get));
}

#[tokio::test]
async fn non_form_body_is_rejected_with_banner() {
    let stub = Arc::new(StubTransport::new().respond(200, r#"[{"id":1,"title":"a","completed":false}]"#));

    let resp = stub_app(&stub)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body("_action=delete&id=1".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("role=\"alert\">Invalid input"));
    assert!(html.contains("<span>a</span>"));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
}

// --- logging ---

#[tokio::test]
async fn remote_failure_is_logged_once() {
    let (logs, _guard) = capture_logs();
    let stub = Arc::new(StubTransport::new().respond(500, "internal error").respond(200, "[]"));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=delete&id=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(logs.lines_containing("delete todo"), 1);
}

#[tokio::test]
async fn invalid_input_is_logged_once() {
    let (logs, _guard) = capture_logs();
    let stub = Arc::new(StubTransport::new().respond(200, "[]"));

    let resp = stub_app(&stub)
        .oneshot(form_request("_action=create&title="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(logs.lines_containing("rejected form submission"), 1);
    assert_eq!(logs.lines_containing("title must not be empty"), 1);
}

// --- against the mock backend ---

async fn render(router: axum::Router) -> String {
    let resp = router.oneshot(page_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_text(resp).await
}

async fn submit(router: axum::Router, body: &str) -> StatusCode {
    router.oneshot(form_request(body)).await.unwrap().status()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn round_trip_through_mock_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));

    let state = AppState::new(
        TodoClient::new(&format!("http://{addr}/api")),
        Arc::new(UreqTransport::new()),
    );
    assert_eq!(submit(app(state.clone()), "_action=create&title=water+plants").await, StatusCode::SEE_OTHER);
    let html = render(app(state.clone())).await;
    assert!(html.contains("<span>water plants</span>"));

    assert_eq!(submit(app(state.clone()), "_action=update&id=1&completed=false").await, StatusCode::SEE_OTHER);
    assert!(render(app(state.clone())).await.contains("<span class=\"done\">water plants</span>"));

    assert_eq!(submit(app(state.clone()), "_action=update&id=1&completed=true").await, StatusCode::SEE_OTHER);
    assert!(render(app(state.clone())).await.contains("<span>water plants</span>"));

    assert_eq!(submit(app(state.clone()), "_action=delete&id=1").await, StatusCode::SEE_OTHER);
    assert!(!render(app(state.clone())).await.contains("water plants"));

    assert_eq!(submit(app(state.clone()), "_action=delete&id=1").await, StatusCode::INTERNAL_SERVER_ERROR);
}
