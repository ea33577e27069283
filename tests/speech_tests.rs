use anyhow::Result;
use httpmock::prelude::*;
use libris::speech::{DeepgramTranscriber, SpeechToText};
use libris::LibrisError;
use std::time::Duration;

fn transcriber(server: &MockServer) -> DeepgramTranscriber {
    DeepgramTranscriber::new(
        &server.url("/v1/listen"),
        "test-key",
        "nova-2",
        "es",
        true,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn sends_audio_with_token_and_query() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/listen")
                .query_param("model", "nova-2")
                .query_param("language", "es")
                .query_param("smart_format", "true")
                .header("authorization", "Token test-key")
                .header("content-type", "audio/wav")
                .body("RIFF-fake-audio");
            then.status(200).json_body(serde_json::json!({
                "metadata": { "request_id": "abc" },
                "results": {
                    "channels": [
                        { "alternatives": [ { "transcript": "  Me gustan los dragones  ", "confidence": 0.98 } ] }
                    ]
                }
            }));
        })
        .await;

    let text = transcriber(&server)
        .transcribe(b"RIFF-fake-audio".to_vec(), "audio/wav")
        .await?;

    mock.assert_async().await;
    assert_eq!(text, "Me gustan los dragones");
    Ok(())
}

#[tokio::test]
async fn m4a_files_are_sent_as_mp4() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/listen")
                .header("content-type", "audio/mp4");
            then.status(200).json_body(serde_json::json!({
                "results": { "channels": [ { "alternatives": [ { "transcript": "hola" } ] } ] }
            }));
        })
        .await;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nota.m4a");
    std::fs::write(&path, b"fake")?;

    let text = transcriber(&server).transcribe_file(&path).await?;

    mock.assert_async().await;
    assert_eq!(text, "hola");
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_reported() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/listen");
            then.status(401).body("invalid credentials");
        })
        .await;

    let err = transcriber(&server)
        .transcribe(b"x".to_vec(), "audio/mp3")
        .await
        .unwrap_err();

    match err {
        LibrisError::Speech(msg) => assert!(msg.contains("401")),
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn missing_channels_is_an_error() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/listen");
            then.status(200)
                .json_body(serde_json::json!({ "results": { "channels": [] } }));
        })
        .await;

    let result = transcriber(&server).transcribe(b"x".to_vec(), "audio/wav").await;
    assert!(matches!(result, Err(LibrisError::Speech(_))));
    Ok(())
}

#[tokio::test]
async fn unsupported_extension_never_hits_the_api() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/listen");
            then.status(200);
        })
        .await;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nota.flac");
    std::fs::write(&path, b"fake")?;

    let result = transcriber(&server).transcribe_file(&path).await;
    assert!(matches!(result, Err(LibrisError::UnsupportedFormat(_))));
    assert_eq!(mock.hits_async().await, 0);
    Ok(())
}
