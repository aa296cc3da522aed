//! 401 handling: the session is cleared and later calls fail before the network.

use crate::common::fake_transport::FakeTransport;
use crate::common::init_logging;
use backoffice_core::ids::TaskId;
use backoffice_core::models::TaskStatus;
use backoffice_core::{ApiClient, ApiError, Config, ListQuery, MemorySessionStore, Session, SessionKey, SessionStore};

fn logged_in_client(transport: FakeTransport) -> ApiClient<FakeTransport, MemorySessionStore> {
    init_logging();
    let store = MemorySessionStore::new();
    Session {
        token: "tok-1".to_string(),
        user_id: Some("5".to_string()),
        role: Some("OPERATOR".to_string()),
        company_id: Some("9".to_string()),
    }
    .persist(&store)
    .unwrap();
    ApiClient::new(transport, store, Config::default())
}

#[test]
fn unauthorized_clears_session_and_next_call_fails_fast() {
    let transport = FakeTransport::new();
    transport.respond(401, r#"{"error":"token expired"}"#);
    let api = logged_in_client(transport.clone());

    let err = api.list_agents(&ListQuery::default()).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(err.user_message(), "Your session has expired. Please sign in again.");
    assert_eq!(api.session().get(SessionKey::Token).unwrap(), None);
    assert_eq!(api.session().get(SessionKey::CompanyId).unwrap(), None);
    assert_eq!(transport.request_count(), 1);

    let err = api
        .change_task_status(TaskId::new(3).unwrap(), TaskStatus::Closed)
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn other_failures_keep_the_session() {
    let transport = FakeTransport::new();
    transport
        .respond(403, "nope")
        .respond(404, "missing")
        .respond(500, "boom")
        .respond(418, "teapot");
    let api = logged_in_client(transport.clone());

    let q = ListQuery::default();
    assert!(matches!(api.list_tasks(&q), Err(ApiError::Forbidden(_))));
    assert!(matches!(api.list_tasks(&q), Err(ApiError::NotFound(_))));
    assert!(matches!(api.list_tasks(&q), Err(ApiError::Server(_))));
    assert!(matches!(
        api.list_tasks(&q),
        Err(ApiError::Http { status: 418, .. })
    ));
    assert!(api.is_logged_in());
    assert_eq!(transport.request_count(), 4);
}

#[test]
fn bearer_token_and_company_are_sent() {
    let transport = FakeTransport::new();
    transport.respond(200, r#"{"items":[],"total":0}"#);
    let api = logged_in_client(transport.clone());

    let query = ListQuery {
        search: Some("rossi".to_string()),
        ..Default::default()
    };
    api.list_agents(&query).unwrap();

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("tok-1"));
    assert_eq!(
        sent[0].url,
        "http://localhost:8080/api/agents?company_id=9&search=rossi"
    );
}

#[test]
fn logout_clears_session_even_if_server_fails() {
    let transport = FakeTransport::new();
    transport.fail_network("connection refused");
    let api = logged_in_client(transport.clone());

    api.logout().unwrap();
    assert!(!api.is_logged_in());
    assert_eq!(transport.request_count(), 1);

    // No token left, so a second logout sends nothing.
    api.logout().unwrap();
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn rejected_login_is_not_a_session_expiry() {
    let transport = FakeTransport::new();
    transport.respond(401, r#"{"error":"bad credentials"}"#);
    let api = logged_in_client(transport.clone());

    let err = api.login("admin", "wrong").unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(err.user_message(), "Wrong username or password.");
    assert!(transport.requests()[0].bearer.is_none());
    // The previous session is left alone.
    assert_eq!(api.session().get(SessionKey::Token).unwrap().as_deref(), Some("tok-1"));
}
