//! Integration tests for the Assistants API adapter.
//!
//! An in-process axum server fakes the hosted API so the reqwest client runs
//! over real HTTP:
//! 1. Request paths, bodies and headers
//! 2. Response decoding into domain types
//! 3. HTTP status to port error mapping

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use assistant_relay::adapters::ai::{OpenAIAssistantService, OpenAIAssistantsConfig};
use assistant_relay::adapters::document::PulldownMarkdownRenderer;
use assistant_relay::application::{AskHandlerConfig, AskQuestionCommand, AskQuestionHandler};
use assistant_relay::domain::assistant::{
    AssistantId, MessageContent, MessageRole, RunId, RunStatus, ThreadId,
};
use assistant_relay::ports::{AssistantService, AssistantServiceError};

// =============================================================================
// Fake Assistants API
// =============================================================================

#[derive(Debug, Clone)]
struct Recorded {
    method: &'static str,
    path: String,
    authorization: Option<String>,
    beta: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct FakeApi {
    requests: Arc<Mutex<Vec<Recorded>>>,
    polls: Arc<Mutex<u32>>,
}

impl FakeApi {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            authorization: header("authorization"),
            beta: header("openai-beta"),
            body,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list_assistants(State(api): State<FakeApi>, headers: HeaderMap) -> Json<Value> {
    api.record("GET", "/assistants".into(), &headers, None);
    Json(json!({
        "object": "list",
        "data": [
            {"id": "asst_first", "object": "assistant"},
            {"id": "asst_second", "object": "assistant"}
        ],
        "has_more": false
    }))
}

async fn create_thread(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    api.record("POST", "/threads".into(), &headers, Some(body));
    Json(json!({"id": "thread_abc", "object": "thread"}))
}

async fn create_message(
    State(api): State<FakeApi>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    api.record("POST", format!("/threads/{}/messages", thread_id), &headers, Some(body));
    Json(json!({"id": "msg_user", "object": "thread.message"}))
}

async fn create_run(
    State(api): State<FakeApi>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    api.record("POST", format!("/threads/{}/runs", thread_id), &headers, Some(body));
    Json(json!({"id": "run_xyz", "object": "thread.run", "status": "queued", "last_error": null}))
}

async fn retrieve_run(
    State(api): State<FakeApi>,
    Path((thread_id, run_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    api.record("GET", format!("/threads/{}/runs/{}", thread_id, run_id), &headers, None);
    let mut polls = api.polls.lock().unwrap();
    *polls += 1;
    let status = if *polls < 2 { "in_progress" } else { "completed" };
    Json(json!({"id": run_id, "object": "thread.run", "status": status}))
}

async fn list_messages(
    State(api): State<FakeApi>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    api.record("GET", format!("/threads/{}/messages", thread_id), &headers, None);
    Json(json!({
        "object": "list",
        "data": [
            {
                "id": "msg_answer",
                "role": "assistant",
                "content": [{"type": "text", "text": {"value": "*Hola*", "annotations": []}}]
            },
            {
                "id": "msg_user",
                "role": "user",
                "content": [{"type": "text", "text": {"value": "¿Qué tal?", "annotations": []}}]
            }
        ]
    }))
}

fn fake_api_router(api: FakeApi) -> Router {
    Router::new()
        .route("/v1/assistants", get(list_assistants))
        .route("/v1/threads", post(create_thread))
        .route(
            "/v1/threads/:thread_id/messages",
            post(create_message).get(list_messages),
        )
        .route("/v1/threads/:thread_id/runs", post(create_run))
        .route("/v1/threads/:thread_id/runs/:run_id", get(retrieve_run))
        .with_state(api)
}

/// Serves `router` on an ephemeral port and returns its `/v1` base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1/", addr)
}

fn client(base_url: &str) -> OpenAIAssistantService {
    OpenAIAssistantService::new(
        OpenAIAssistantsConfig::new("sk-test")
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

/// A fake API answering every assistant listing with `status` and `body`.
async fn failing_api(
    status: StatusCode,
    headers: Vec<(&'static str, &'static str)>,
    body: Value,
) -> String {
    let router = Router::new().route(
        "/v1/assistants",
        get(move || {
            let headers = headers.clone();
            let body = body.clone();
            async move {
                let mut map = HeaderMap::new();
                for (name, value) in headers {
                    map.insert(name, value.parse().unwrap());
                }
                (status, map, Json(body)).into_response()
            }
        }),
    );
    serve(router).await
}

// =============================================================================
// Requests and decoding
// =============================================================================

#[tokio::test]
async fn every_call_sends_bearer_and_beta_headers() {
    let api = FakeApi::default();
    let service = client(&serve(fake_api_router(api.clone())).await);

    service.list_assistants().await.unwrap();
    service.create_thread().await.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(request.beta.as_deref(), Some("assistants=v2"));
    }
}

#[tokio::test]
async fn decodes_each_operation() {
    let api = FakeApi::default();
    let service = client(&serve(fake_api_router(api.clone())).await);

    let assistants = service.list_assistants().await.unwrap();
    assert_eq!(
        assistants,
        vec![AssistantId::new("asst_first"), AssistantId::new("asst_second")]
    );

    let thread_id = service.create_thread().await.unwrap();
    assert_eq!(thread_id, ThreadId::new("thread_abc"));

    service.add_user_message(&thread_id, "¿Qué tal?").await.unwrap();

    let run = service.create_run(&thread_id, &assistants[0]).await.unwrap();
    assert_eq!(run.id, RunId::new("run_xyz"));
    assert_eq!(run.status, RunStatus::Queued);

    let polled = service.retrieve_run(&thread_id, &run.id).await.unwrap();
    assert_eq!(polled.status, RunStatus::InProgress);

    let messages = service.list_messages(&thread_id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::Assistant);
    assert_eq!(messages[0].content, vec![MessageContent::text("*Hola*")]);
    assert_eq!(messages[1].role, MessageRole::User);

    let requests = api.requests();
    assert_eq!(requests[1].body, Some(json!({})));
    assert_eq!(
        requests[2].body,
        Some(json!({"role": "user", "content": "¿Qué tal?"}))
    );
    assert_eq!(requests[3].body, Some(json!({"assistant_id": "asst_first"})));
    assert_eq!(requests[4].path, "/threads/thread_abc/runs/run_xyz");
}

#[tokio::test]
async fn ask_handler_runs_against_http_adapter() {
    let api = FakeApi::default();
    let service = client(&serve(fake_api_router(api.clone())).await);
    let handler = AskQuestionHandler::with_config(
        Arc::new(service),
        Arc::new(PulldownMarkdownRenderer::new()),
        AskHandlerConfig {
            poll_interval: Duration::from_millis(1),
        },
    );

    let answer = handler
        .handle(AskQuestionCommand::new("¿Qué tal?"))
        .await
        .unwrap();

    assert_eq!(answer.markdown, "*Hola*");
    assert_eq!(answer.html, "<p><em>Hola</em></p>\n");

    let paths: Vec<(&str, String)> = api
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("GET", "/assistants".to_string()),
            ("POST", "/threads".to_string()),
            ("POST", "/threads/thread_abc/messages".to_string()),
            ("POST", "/threads/thread_abc/runs".to_string()),
            ("GET", "/threads/thread_abc/runs/run_xyz".to_string()),
            ("GET", "/threads/thread_abc/runs/run_xyz".to_string()),
            ("GET", "/threads/thread_abc/messages".to_string()),
        ]
    );
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let base = failing_api(
        StatusCode::UNAUTHORIZED,
        vec![],
        json!({"error": {"message": "Incorrect API key provided"}}),
    )
    .await;

    let result = client(&base).list_assistants().await;

    assert_eq!(result, Err(AssistantServiceError::AuthenticationFailed));
}

#[tokio::test]
async fn rate_limit_uses_retry_after_header() {
    let base = failing_api(
        StatusCode::TOO_MANY_REQUESTS,
        vec![("retry-after", "7")],
        json!({"error": {"message": "Rate limit reached"}}),
    )
    .await;

    let result = client(&base).list_assistants().await;

    assert_eq!(
        result,
        Err(AssistantServiceError::RateLimited { retry_after_secs: 7 })
    );
}

#[tokio::test]
async fn rate_limit_falls_back_to_error_message() {
    let base = failing_api(
        StatusCode::TOO_MANY_REQUESTS,
        vec![],
        json!({"error": {"message": "Rate limit reached. Please try again in 12s."}}),
    )
    .await;

    let result = client(&base).list_assistants().await;

    assert_eq!(
        result,
        Err(AssistantServiceError::RateLimited { retry_after_secs: 12 })
    );
}

#[tokio::test]
async fn server_error_maps_to_unavailable() {
    let base = failing_api(
        StatusCode::BAD_GATEWAY,
        vec![],
        json!({"error": {"message": "upstream"}}),
    )
    .await;

    let result = client(&base).list_assistants().await;

    assert!(matches!(result, Err(AssistantServiceError::Unavailable(_))));
}

#[tokio::test]
async fn unknown_path_maps_to_not_found() {
    let base = serve(Router::new()).await;

    let result = client(&base).create_thread().await;

    assert!(matches!(result, Err(AssistantServiceError::NotFound(_))));
}

#[tokio::test]
async fn undecodable_body_maps_to_parse_error() {
    let base = failing_api(StatusCode::OK, vec![], json!({"unexpected": true})).await;

    let result = client(&base).list_assistants().await;

    assert!(matches!(result, Err(AssistantServiceError::Parse(_))));
}

#[tokio::test]
async fn refused_connection_maps_to_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{}/v1", addr)).list_assistants().await;

    assert!(matches!(result, Err(AssistantServiceError::Network(_))));
}
