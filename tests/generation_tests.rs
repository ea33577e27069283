use anyhow::Result;
use httpmock::prelude::*;
use libris::generation::{ChatGenerator, Generator};
use libris::openai::create_client_with_key;
use libris::LibrisError;
use serde_json::{json, Value};
use std::time::Duration;

fn generator(server: &MockServer) -> ChatGenerator {
    let client =
        create_client_with_key(&server.base_url(), "test-key", Duration::from_secs(5)).unwrap();
    ChatGenerator::with_client(client, "gemini-test", 0.5)
}

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gemini-test",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content, "refusal": null },
                "finish_reason": "stop",
                "logprobs": null
            }
        ]
    })
}

#[tokio::test]
async fn sends_prompt_and_returns_trimmed_text() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{ "model": "gemini-test", "temperature": 0.5 }"#)
                .body_contains("quiero libros de dragones")
                .body_contains(r#""role":"user""#);
            then.status(200)
                .json_body(completion(json!("\n- El Hobbit, J.R.R. Tolkien\n")));
        })
        .await;

    let text = generator(&server).generate("quiero libros de dragones").await?;

    mock.assert_async().await;
    assert_eq!(text.as_deref(), Some("- El Hobbit, J.R.R. Tolkien"));
    Ok(())
}

#[tokio::test]
async fn system_prompt_is_sent_first() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains(r#""role":"system""#)
                .body_contains("Responde en español.");
            then.status(200).json_body(completion(json!("ok")));
        })
        .await;

    let text = generator(&server)
        .with_system_prompt("Responde en español.")
        .generate("hola")
        .await?;

    mock.assert_async().await;
    assert_eq!(text.as_deref(), Some("ok"));
    Ok(())
}

#[tokio::test]
async fn blank_completion_is_none() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion(json!("   ")));
        })
        .await;

    let text = generator(&server).generate("algo de terror").await?;
    assert!(text.is_none());
    Ok(())
}

#[tokio::test]
async fn server_error_is_generation_error() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).json_body(json!({
                "error": {
                    "message": "backend unavailable",
                    "type": "server_error",
                    "param": null,
                    "code": null
                }
            }));
        })
        .await;

    let result = generator(&server).generate("algo de terror").await;
    assert!(matches!(result, Err(LibrisError::Generation(_))));
    Ok(())
}
