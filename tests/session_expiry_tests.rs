mod common;

use common::{user_json, FakeBackend, SLOW_REPLY, TOKEN};
use mockall::mock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use synapse_console::navigation::Navigator;
use synapse_console::transport::{UnauthorizedEvent, UnauthorizedHandler};
use synapse_console::types::UserProfile;
use synapse_console::ConsoleError;

mock! {
    pub Hook {}

    impl UnauthorizedHandler for Hook {
        fn on_unauthorized(&self, event: &UnauthorizedEvent);
    }
}

#[tokio::test]
async fn test_rejected_token_clears_session_and_runs_hook_once() {
    let backend = FakeBackend::start().await;
    let client = backend.client(None);
    let profile: UserProfile = serde_json::from_value(user_json(1, "admin", "admin")).unwrap();
    client.session().save("stale", &profile).unwrap();
    assert!(client.session().is_admin());

    let session = client.session().clone();
    let cleared_before_hook = Arc::new(AtomicBool::new(false));
    let observed = cleared_before_hook.clone();

    let mut hook = MockHook::new();
    hook.expect_on_unauthorized()
        .withf(|event: &UnauthorizedEvent| event.path == "/api/v1/dashboard/stats")
        .times(1)
        .returning(move |_| observed.store(!session.is_authenticated(), Ordering::SeqCst));
    client.on_unauthorized(hook);

    let err = client.dashboard().stats().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Unauthorized));
    assert!(!client.session().is_authenticated());
    assert!(!client.session().is_admin());
    assert!(client.session().current_profile().is_none());
    assert!(cleared_before_hook.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_public_rejection_does_not_run_hook() {
    let backend = FakeBackend::start().await;
    let client = backend.client(Some(TOKEN));

    let mut hook = MockHook::new();
    hook.expect_on_unauthorized().times(0);
    client.on_unauthorized(hook);

    let err = client.auth().login("admin", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_unauthorized());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_other_failures_leave_session_alone() {
    let backend = FakeBackend::start().await;
    let client = backend.client(Some(TOKEN));

    let mut hook = MockHook::new();
    hook.expect_on_unauthorized().times(0);
    client.on_unauthorized(hook);

    assert!(client.services().list().await.is_err());
    assert!(client.combinations().get(42).await.is_err());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_navigator_returns_to_login_on_expiry() {
    let backend = FakeBackend::start().await;
    let client = backend.client(None);
    client.auth().login("admin", "secret").await.unwrap();

    let navigator = Navigator::console(client.session().clone());
    client.on_unauthorized(navigator.clone());
    assert_eq!(navigator.navigate("/users").unwrap().path, "/users");

    // the server forgets the token
    client.session().save_token("revoked").unwrap();
    let err = client.auth().current_user().await.unwrap_err();
    assert!(err.is_unauthorized());

    let current = navigator.current();
    assert!(current.is_login());
    assert_eq!(current.query_value("redirect"), Some("/users"));

    // signing in again resumes where the user was
    client.auth().login("admin", "secret").await.unwrap();
    assert_eq!(navigator.after_login().unwrap().path, "/users");
}

#[tokio::test]
async fn test_closure_hook() {
    let backend = FakeBackend::start().await;
    let client = backend.client(Some("stale"));

    let fired = Arc::new(AtomicBool::new(false));
    let flag = fired.clone();
    client.on_unauthorized(move |event: &UnauthorizedEvent| {
        assert_eq!(event.path, "/api/v1/users");
        flag.store(true, Ordering::SeqCst);
    });

    let err = client.users().list(None, None).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_cleared_hook_no_longer_runs() {
    let backend = FakeBackend::start().await;
    let client = backend.client(Some("stale"));

    let fired = Arc::new(AtomicBool::new(false));
    let flag = fired.clone();
    client.on_unauthorized(move |_: &UnauthorizedEvent| flag.store(true, Ordering::SeqCst));
    client.transport().clear_unauthorized_handler();

    let err = client.dashboard().stats().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
    assert!(!fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_expiry_does_not_fail_requests_already_in_flight() {
    let backend = FakeBackend::start().await;
    let client = backend.client(Some(TOKEN));

    let mut hook = MockHook::new();
    hook.expect_on_unauthorized()
        .withf(|event: &UnauthorizedEvent| event.path == "/api/v1/mcp-servers")
        .times(1)
        .return_const(());
    client.on_unauthorized(hook);

    let started = std::time::Instant::now();
    let servers = client.mcp_servers();
    let (listed, fetched) = tokio::join!(servers.list(), servers.get(1));

    // the slow request was sent with the token before the 401 arrived
    assert!(started.elapsed() >= SLOW_REPLY);
    assert!(listed.unwrap_err().is_unauthorized());
    let fetched = fetched.unwrap();
    assert_eq!(fetched.id, 1);
    assert_eq!(fetched.prefix, "pets");
    assert!(!client.session().is_authenticated());

    let sent = backend.state.requests_to("/api/v1/mcp-servers/1");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer T"));
}
