//! End-to-end dispatch tests: caller argument map → registry →
//! normalizer → tool → serialized wire value, against a mock backend.

use serde_json::json;

use crewlink_core::{CallContext, ToolError};
use crewlink_tools::default_registry;

fn ctx(host: &str) -> CallContext {
    CallContext::new(host, "t24", "bob")
}

#[tokio::test]
async fn unknown_tool_name_is_not_found() {
    let registry = default_registry();
    let err = registry
        .dispatch("no_such_tool", json!({}), &ctx("localhost:8000"))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound(name) if name == "no_such_tool"));
}

#[tokio::test]
async fn version_tool_unwraps_to_single_object() {
    let registry = default_registry();
    let wire = registry
        .dispatch("get_version", json!({}), &ctx("localhost:8000"))
        .await
        .unwrap();
    // Singleton content unwraps to the payload itself, not a list
    assert!(wire.is_object());
    assert!(wire["version"].is_string());
}

#[tokio::test]
async fn legacy_from_user_relocates_into_filter_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/team/t24/messages/query")
        .match_body(mockito::Matcher::PartialJson(json!({"user": "alice"})))
        .with_status(200)
        .with_body(json!({"messages": []}).to_string())
        .create_async()
        .await;

    let registry = default_registry();
    registry
        .dispatch(
            "get_unread_messages",
            json!({"from_user": "alice"}),
            &ctx(&server.host_with_port()),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn nested_filter_user_wins_over_legacy_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/team/t24/messages/query")
        .match_body(mockito::Matcher::PartialJson(json!({"user": "carol"})))
        .with_status(200)
        .with_body(json!({"messages": []}).to_string())
        .create_async()
        .await;

    let registry = default_registry();
    registry
        .dispatch(
            "get_unread_messages",
            json!({"from_user": "alice", "filters": {"user": "carol"}}),
            &ctx(&server.host_with_port()),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unknown_fields_and_quoted_integers_are_normalized() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/team/t24/messages")
        .match_query(mockito::Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_status(200)
        .with_body(json!({"messages": []}).to_string())
        .create_async()
        .await;

    let registry = default_registry();
    registry
        .dispatch(
            "get_recent_messages",
            json!({"limit": "5", "totally_unknown": {"x": 1}}),
            &ctx(&server.host_with_port()),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn string_boolean_reaches_get_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/team/t24/messages")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("dm_only".into(), "true".into()),
            mockito::Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_body(json!({"messages": []}).to_string())
        .create_async()
        .await;

    let registry = default_registry();
    registry
        .dispatch(
            "get_unread_messages",
            json!({"dm_only": "TRUE"}),
            &ctx(&server.host_with_port()),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn send_tool_failure_is_a_structured_result_not_an_error() {
    let registry = default_registry();
    let wire = registry
        .dispatch(
            "send_message",
            json!({"message": "hello", "reply_to_user": "alice"}),
            &ctx("127.0.0.1:1"),
        )
        .await
        .unwrap();
    assert_eq!(wire["status"], "error");
}
