use super::fixtures;
use crate::client::Pocket;
use crate::error::PocketError;
use anyhow::Result;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// The blocking client has to run outside the runtime, so the mock server is
// driven with block_on and requests are made from the test thread.
fn start_server() -> (Runtime, MockServer) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn pocket_for(server: &MockServer) -> Result<Pocket> {
    // Trailing slash is trimmed before endpoints are appended
    Ok(Pocket::new("key-123", "token-456")?.with_base_url(format!("{}/", server.uri())))
}

#[test]
fn test_get_posts_credentials() -> Result<()> {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/v3/get"))
            .and(header("X-Accept", "application/json"))
            .and(body_json(json!({
                "consumer_key": "key-123",
                "access_token": "token-456"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(fixtures::load_json_fixture("retrieve_two")),
            )
            .expect(1)
            .mount(&server),
    );

    let articles = pocket_for(&server)?.get()?;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title(), "The Massive Ryder Cup Preview");
    Ok(())
}

#[test]
fn test_delete_commit_sends_actions() -> Result<()> {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/v3/send"))
            .and(header("X-Accept", "application/json"))
            .and(body_json(json!({
                "consumer_key": "key-123",
                "access_token": "token-456",
                "actions": [
                    {"action": "delete", "item_id": "229279689"},
                    {"action": "delete", "item_id": "229279690"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(fixtures::load_json_fixture("send_ok")),
            )
            .expect(1)
            .mount(&server),
    );

    let mut pocket = pocket_for(&server)?;
    let response = pocket.delete("229279689").delete("229279690").commit()?;

    assert_eq!(response.status, 1);
    assert!(pocket.pending_actions().is_empty());
    Ok(())
}

#[test]
fn test_x_error_header_becomes_api_error() -> Result<()> {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/v3/get"))
            .respond_with(
                ResponseTemplate::new(401)
                    .insert_header("X-Error-Code", "152")
                    .insert_header("X-Error", "Invalid consumer key."),
            )
            .expect(1)
            .mount(&server),
    );

    match pocket_for(&server)?.get() {
        Err(PocketError::Api {
            endpoint,
            status,
            message,
        }) => {
            assert_eq!(endpoint, "/v3/get");
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid consumer key.");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_rejected_delete_is_an_error() -> Result<()> {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/v3/send"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(fixtures::load_json_fixture("send_rejected")),
            )
            .mount(&server),
    );

    let mut pocket = pocket_for(&server)?;
    let err = pocket.delete("1").delete("2").commit().unwrap_err();

    assert!(
        matches!(err, PocketError::ActionsRejected { rejected: 1, total: 2 }),
        "got {:?}",
        err
    );
    Ok(())
}
