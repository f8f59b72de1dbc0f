//! Integration tests: generation endpoint with a canned completion backend.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use aura_gen::{GenerationClient, ModelId, TokenUsage};
use aura_server::{
    BackendError, Completion, CompletionBackend, CompletionRequest, Reply, Service, serve,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tiny_http::Server;

/// Replies with fixed content and records the requests it saw.
struct Canned {
    reply: Result<String, BackendError>,
    seen: Mutex<Vec<(ModelId, String)>>,
}

impl Canned {
    fn ok(content: &str) -> Self {
        Self {
            reply: Ok(content.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: BackendError) -> Self {
        Self {
            reply: Err(err),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionBackend for Canned {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, BackendError> {
        self.seen
            .lock()
            .unwrap()
            .push((request.model, request.prompt.to_string()));
        let content = self.reply.clone()?;
        Ok(Completion {
            content,
            usage: TokenUsage {
                input: 11,
                output: 22,
                total: 33,
            },
        })
    }
}

async fn post(service: &Service<Canned>, body: serde_json::Value) -> Reply {
    service
        .handle("POST", "/api/ai-generate", &body.to_string())
        .await
}

fn error_of(reply: &Reply) -> &str {
    reply.body.error.as_deref().unwrap_or_default()
}

// ─── Validation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_or_blank_prompt_is_400() {
    let service = Service::new(Some(Canned::ok("{}")));
    for body in [
        json!({"model": "gpt-4o"}),
        json!({"model": "gpt-4o", "prompt": "   "}),
        json!({"model": "gpt-4o", "prompt": 42}),
    ] {
        let reply = post(&service, body).await;
        assert_eq!(reply.status, 400);
        assert_eq!(error_of(&reply), "Prompt is required and must be non-empty");
        assert!(!reply.body.success);
    }

    let reply = service.handle("POST", "/api/ai-generate", "not json").await;
    assert_eq!(reply.status, 400);
}

#[tokio::test]
async fn unknown_model_is_400() {
    let service = Service::new(Some(Canned::ok("{}")));
    let reply = post(&service, json!({"model": "gpt-5", "prompt": "card"})).await;
    assert_eq!(reply.status, 400);
    assert_eq!(error_of(&reply), "Invalid model specified");

    let reply = post(&service, json!({"prompt": "card"})).await;
    assert_eq!(reply.status, 400);
}

#[tokio::test]
async fn missing_credentials_is_500() {
    let service: Service<Canned> = Service::new(None);
    let reply = post(&service, json!({"model": "gpt-4o", "prompt": "card"})).await;
    assert_eq!(reply.status, 500);
    assert_eq!(
        error_of(&reply),
        "OpenAI API key not configured. Please set OPENAI_API_KEY environment variable."
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let service = Service::new(Some(Canned::ok("{}")));
    let reply = service.handle("GET", "/api/ai-generate", "").await;
    assert_eq!(reply.status, 404);
    assert_eq!(error_of(&reply), "Not found");

    let reply = service.handle("POST", "/api/other", "{}").await;
    assert_eq!(reply.status, 404);
}

// ─── Upstream results ───────────────────────────────────────────────────

#[tokio::test]
async fn success_returns_design_and_tokens() {
    let service = Service::new(Some(Canned::ok(
        "```json\n{\"elementTag\": \"section\", \"opacity\": 90}\n```",
    )));
    let reply = post(
        &service,
        json!({"model": "gpt-4-turbo", "prompt": "a hero", "timestamp": "2024-01-01T00:00:00.000Z"}),
    )
    .await;

    assert_eq!(reply.status, 200);
    assert!(reply.body.success);
    assert_eq!(
        reply.body.design,
        Some(json!({"elementTag": "section", "opacity": 90}))
    );
    assert_eq!(
        reply.body.explanation.as_deref(),
        Some("Generated design using gpt-4-turbo")
    );
    assert_eq!(reply.body.tokens.map(|t| t.total), Some(33));
}

#[tokio::test]
async fn backend_receives_model_and_untrimmed_prompt() {
    let service = Service::new(Some(Canned::ok(r#"{"blur": 2}"#)));
    post(&service, json!({"model": "gpt-3.5-turbo", "prompt": " soft "})).await;
    post(&service, json!({"model": "gpt-5", "prompt": "never sent"})).await;

    let seen = service.backend().unwrap().seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(ModelId::Gpt35Turbo, " soft ".to_string())]);
}

#[tokio::test]
async fn upstream_failure_is_502() {
    let service = Service::new(Some(Canned::failing(BackendError::Status {
        status: 429,
        body: "rate limited".into(),
    })));
    let reply = post(&service, json!({"model": "gpt-4o", "prompt": "card"})).await;
    assert_eq!(reply.status, 502);
    assert!(error_of(&reply).starts_with("OpenAI API error"));
}

#[tokio::test]
async fn empty_completion_is_500() {
    let service = Service::new(Some(Canned::ok("")));
    let reply = post(&service, json!({"model": "gpt-4o", "prompt": "card"})).await;
    assert_eq!(reply.status, 500);
    assert_eq!(error_of(&reply), "Empty response from OpenAI");
}

#[tokio::test]
async fn unparseable_completion_is_500() {
    let service = Service::new(Some(Canned::ok("Sorry, I can't do that.")));
    let reply = post(&service, json!({"model": "gpt-4o", "prompt": "card"})).await;
    assert_eq!(reply.status, 500);
    assert_eq!(
        error_of(&reply),
        "Failed to parse AI response: No valid JSON found in AI response"
    );
}

#[tokio::test]
async fn unrecognized_design_is_500() {
    let service = Service::new(Some(Canned::ok(r#"{"shadow": "lg", "textContent": ""}"#)));
    let reply = post(&service, json!({"model": "gpt-4o", "prompt": "card"})).await;
    assert_eq!(reply.status, 500);
    assert_eq!(error_of(&reply), "Generated design data is invalid");
}

// ─── End to end ─────────────────────────────────────────────────────────

#[tokio::test]
async fn client_round_trip_over_http() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let backend = Canned::ok(r#"{"textContent": "Pricing", "padding": {"top": "6"}}"#);
    tokio::spawn(serve(server, Service::new(Some(backend))));

    let client = GenerationClient::new(format!("http://127.0.0.1:{port}"));
    let generation = client.generate("pricing header", ModelId::Gpt4o).await.unwrap();
    let design = generation.design.unwrap();
    assert_eq!(design.text_content.as_deref(), Some("Pricing"));
    assert_eq!(generation.tokens.map(|t| t.input), Some(11));

    let mut doc = aura_core::Document::default();
    doc.merge(&design);
    assert_eq!(doc.padding.top, "6");
    assert_eq!(doc.padding.bottom, "3");
}

/// Holds replies to the prompt "slow" for a while.
struct Sluggish;

impl CompletionBackend for Sluggish {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, BackendError> {
        if request.prompt == "slow" {
            tokio::time::sleep(Duration::from_millis(1500)).await;
        }
        Ok(Completion {
            content: r#"{"blur": 1}"#.to_string(),
            usage: TokenUsage::default(),
        })
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_generation_does_not_block_others() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    tokio::spawn(serve(server, Service::new(Some(Sluggish))));
    let base = format!("http://127.0.0.1:{port}");

    let slow_client = GenerationClient::new(base.clone());
    let slow = tokio::spawn(async move { slow_client.generate("slow", ModelId::Gpt4o).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    let fast = GenerationClient::new(base)
        .generate("fast", ModelId::Gpt4o)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(fast.design.and_then(|d| d.blur), Some(1.0));
    assert!(elapsed < Duration::from_millis(1000), "fast request took {elapsed:?}");
    assert!(slow.await.unwrap().is_ok());
}
