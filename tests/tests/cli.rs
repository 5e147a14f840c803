use clap::Parser;
use infrastructure::config::Config;
use presentation::cli::{Cli, CliApp};
use serde_json::json;
use shared::error::RagError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANSWER_SSE: &str = concat!(
    "data: {\"choices\":[{\"delta\":{\"content\":\"Hold the \"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"reset button.\"}}]}\n\n",
    "data: [DONE]\n\n"
);

async fn mock_services() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/embed/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2, 0.3]}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexes/support-docs/docs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"chunk": "Press and hold reset for ten seconds.", "title": "Guide A", "parent_id": "p1"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/chat/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(ANSWER_SSE),
        )
        .mount(&server)
        .await;
    server
}

fn app(server: &MockServer) -> CliApp {
    let settings = json!({
        "AzureSearch": {
            "ServiceUrl": server.uri(),
            "IndexName": "support-docs",
            "ApiKey": "search-key"
        },
        "AzureOpenAI": {
            "Endpoint": server.uri(),
            "EmbeddingDeployment": "embed",
            "ChatDeployment": "chat",
            "ApiKey": "openai-key"
        }
    });
    CliApp::new(Config::from_json(&settings.to_string()).unwrap())
}

async fn run(server: &MockServer, args: &[&str]) -> (String, Result<(), RagError>) {
    let mut out = Vec::new();
    let cli = Cli::parse_from(args);
    let outcome = app(server).run_with(cli, &mut out).await;
    (String::from_utf8(out).unwrap(), outcome)
}

#[tokio::test]
async fn answers_question_words_with_banner_and_citations() {
    let server = mock_services().await;

    let (output, outcome) = run(&server, &["rag-demo", "how", "do", "I", "reset?"]).await;
    outcome.unwrap();

    assert!(output.contains("Response:"));
    assert!(output.contains("Hold the reset button.\n"));
    assert!(output.ends_with("Citations:\nTitle: Guide A\nParent ID: p1\n\n"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let chat_body: serde_json::Value = serde_json::from_slice(&requests[2].body).unwrap();
    let prompt = chat_body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("USER QUESTION:\nhow do I reset?"));
    assert!(prompt.contains("Press and hold reset for ten seconds."));
}

#[tokio::test]
async fn no_citations_flag_drops_the_citation_block() {
    let server = mock_services().await;

    let (output, outcome) = run(&server, &["rag-demo", "--no-citations", "reset", "router"]).await;
    outcome.unwrap();

    assert!(output.ends_with("Hold the reset button.\n"));
    assert!(!output.contains("Citations:"));
}

#[tokio::test]
async fn blank_question_sends_no_requests() {
    let server = mock_services().await;

    let (output, outcome) = run(&server, &["rag-demo", "   "]).await;

    assert!(matches!(outcome, Err(RagError::EmptyQuestion)));
    assert!(output.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
