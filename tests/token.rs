mod common;

use common::{fast_client, pairs, reply, token_reply, FakeTransport, TOKEN_URL};
use terna::{ApiClient, Error};

#[test]
fn valid_token_is_reused_without_network() {
    let client = fast_client(FakeTransport::default());

    let first = client.obtain_token().unwrap();
    let second = client.obtain_token().unwrap();

    assert_eq!(first.secret(), second.secret());
    assert_eq!(client.transport().post_count(), 1);
}

#[test]
fn token_close_to_expiry_is_renewed_once() {
    let transport = FakeTransport::default()
        .with_token(token_reply("short-lived", 3))
        .with_token(token_reply("fresh", 3600));
    let client = fast_client(transport);

    assert_eq!(client.obtain_token().unwrap().secret(), "short-lived");
    assert_eq!(client.obtain_token().unwrap().secret(), "fresh");
    assert_eq!(client.transport().post_count(), 2);

    assert_eq!(client.obtain_token().unwrap().secret(), "fresh");
    assert_eq!(client.transport().post_count(), 2);
}

#[test]
fn token_request_sends_client_credentials() {
    let client = fast_client(FakeTransport::default());
    client.obtain_token().unwrap();

    let posts = client.transport().posts.borrow();
    assert_eq!(posts[0].url, TOKEN_URL);
    assert_eq!(
        posts[0].params,
        pairs(&[
            ("client_id", "my-api-key"),
            ("client_secret", "my-api-secret"),
            ("grant_type", "client_credentials"),
        ])
    );
}

#[test]
fn data_requests_carry_the_bearer_token() {
    let transport = FakeTransport::default().with_token(token_reply("abc123", 3600));
    let client = fast_client(transport);

    client.fetch("load/v2.0/total-load", &[]).unwrap();
    client.fetch("load/v2.0/market-load", &[]).unwrap();

    let gets = client.transport().gets.borrow();
    assert_eq!(gets.len(), 2);
    assert!(gets.iter().all(|g| g.bearer.as_deref() == Some("abc123")));
    assert_eq!(client.transport().post_count(), 1);
}

#[test]
fn non_200_success_is_an_auth_failure_and_blocks_the_fetch() {
    let transport = FakeTransport::default().with_token(reply(202, ""));
    let client = fast_client(transport);

    let err = client.fetch("load/v2.0/total-load", &[]).unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(client.transport().get_count(), 0);
}

#[test]
fn token_without_expiry_is_rejected() {
    let transport = FakeTransport::default().with_token(reply(200, r#"{"access_token":"x"}"#));
    let client = fast_client(transport);
    assert!(matches!(client.obtain_token(), Err(Error::Auth(_))));
}

#[test]
fn oversized_expiry_is_an_auth_failure() {
    let transport = FakeTransport::default().with_token(reply(
        200,
        r#"{"access_token":"x","expires_in":18446744073709551615}"#,
    ));
    let client = fast_client(transport);
    assert!(matches!(client.obtain_token(), Err(Error::Auth(_))));
}

#[test]
fn float_expiry_is_accepted() {
    let transport = FakeTransport::default()
        .with_token(reply(200, r#"{"access_token":"x","expires_in":3599.0}"#));
    let client = fast_client(transport);

    assert_eq!(client.obtain_token().unwrap().secret(), "x");
    client.obtain_token().unwrap();
    assert_eq!(client.transport().post_count(), 1);
}

#[test]
fn string_expiry_is_an_auth_failure() {
    let transport = FakeTransport::default()
        .with_token(reply(200, r#"{"access_token":"x","expires_in":"3600"}"#));
    let client = fast_client(transport);
    assert!(matches!(client.obtain_token(), Err(Error::Auth(_))));
}

#[test]
fn rejected_credentials_propagate_status() {
    let transport = FakeTransport::default().with_token(reply(401, "invalid_client"));
    let client = fast_client(transport);

    let err = client.obtain_token().unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_retryable());
}

#[test]
fn server_errors_are_retryable_but_not_retried() {
    let transport = FakeTransport::default().with_token(reply(503, "busy"));
    let client = fast_client(transport);

    let err = client.obtain_token().unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(client.transport().post_count(), 1);
}
