//! Integration tests for the session service over in-memory ports.

mod support;

use std::time::Duration;

use informado_core::{AccessDecision, AuthApiError, LoginError, RefreshOutcome, TokenStore};
use informado_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use informado_domain::{CredentialPair, Destination, Role};
use support::mocks::{harness, token_pair, MockTokenStore};

fn citizen_session() -> CredentialPair {
    CredentialPair::new("a1", "r1", "CIUDADANO")
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_stores_pair_and_routes_to_dashboard() {
    let (service, api, store, navigator) = harness(MockTokenStore::default());
    api.push_login(Ok(CredentialPair::new("a1", "r1", "SUPERVISOR")));

    let pair = service.login("ana@trujillo.pe", "secret").await.unwrap();

    assert_eq!(pair.role, "SUPERVISOR");
    assert_eq!(store.access_token().as_deref(), Some("a1"));
    assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    assert_eq!(navigator.visits(), vec![Destination::Dashboard(Role::Supervisor)]);
    assert!(service.is_authenticated());
}

#[tokio::test]
async fn rejected_login_clears_store() {
    let (service, api, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));
    api.push_login(Err(AuthApiError::Rejected { status: 401, message: "bad".to_string() }));

    let err = service.login("ana@trujillo.pe", "wrong").await.unwrap_err();

    assert!(matches!(err, LoginError::InvalidCredentials(_)));
    assert!(store.is_empty());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn unreachable_backend_reports_unavailable_without_fallback() {
    let (service, api, store, _) = harness(MockTokenStore::default());
    api.push_login(Err(AuthApiError::Transport("connection refused".to_string())));

    let err = service.login("ciudadano@local", "pass").await.unwrap_err();

    assert!(matches!(err, LoginError::Unavailable(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn dev_fallback_signs_in_known_user_when_backend_is_down() {
    let (service, api, store, navigator) = harness(MockTokenStore::default());
    let service = service.with_dev_fallback(true);
    api.push_login(Err(AuthApiError::Transport("connection refused".to_string())));

    let pair = service.login("trabajador@local", "pass").await.unwrap();

    assert_eq!(pair.access_token, "dev-access-token");
    assert_eq!(store.role().as_deref(), Some("TRABAJADOR"));
    assert_eq!(navigator.visits(), vec![Destination::Dashboard(Role::Worker)]);
}

#[tokio::test]
async fn dev_fallback_ignores_backend_rejections() {
    let (service, api, store, _) = harness(MockTokenStore::default());
    let service = service.with_dev_fallback(true);
    api.push_login(Err(AuthApiError::Rejected { status: 401, message: String::new() }));

    assert!(service.login("ciudadano@local", "pass").await.is_err());
    assert!(store.is_empty());
}

#[tokio::test]
async fn login_storage_failure_is_reported() {
    let store = MockTokenStore::default();
    store.fail_saves(true);
    let (service, api, store, navigator) = harness(store);
    api.push_login(Ok(citizen_session()));

    let err = service.login("ana@trujillo.pe", "secret").await.unwrap_err();

    assert!(matches!(err, LoginError::Storage(_)));
    assert!(store.is_empty());
    assert!(navigator.visits().is_empty());
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn logout_twice_leaves_store_empty() {
    let (service, _, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));

    service.logout();
    service.logout();

    assert!(store.is_empty());
    assert_eq!(navigator.logins(), 2);
    assert!(!service.is_authenticated());
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn refresh_replaces_tokens_and_keeps_role_bytes() {
    // Mixed case on purpose: the stored string must survive untouched.
    let (service, api, store, navigator) =
        harness(MockTokenStore::with_pair(&CredentialPair::new("a1", "r1", "Supervisor")));
    api.push_refresh(Ok(token_pair("a2", "r2")));

    let outcome = service.refresh().await;

    assert_eq!(outcome, RefreshOutcome::Refreshed);
    assert_eq!(api.last_refresh_token().as_deref(), Some("r1"));
    assert_eq!(store.access_token().as_deref(), Some("a2"));
    assert_eq!(store.refresh_token().as_deref(), Some("r2"));
    assert_eq!(store.role().as_deref(), Some("Supervisor"));
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn refresh_without_refresh_token_ends_session() {
    let store = MockTokenStore::default();
    store.set_raw(ACCESS_TOKEN_KEY, "a1");
    let (service, api, store, navigator) = harness(store);

    let outcome = service.refresh().await;

    assert_eq!(outcome, RefreshOutcome::SessionEnded);
    assert_eq!(api.refresh_calls(), 0);
    assert!(store.is_empty());
    assert_eq!(navigator.visits(), vec![Destination::Login]);
}

#[tokio::test]
async fn rejected_refresh_ends_session() {
    let (service, api, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));
    api.push_refresh(Err(AuthApiError::Rejected { status: 403, message: "expired".to_string() }));

    assert_eq!(service.refresh().await, RefreshOutcome::SessionEnded);
    assert!(store.is_empty());
    assert_eq!(navigator.logins(), 1);
}

#[tokio::test]
async fn transport_and_decode_failures_end_session() {
    for failure in [
        AuthApiError::Transport("timed out".to_string()),
        AuthApiError::Decode("missing field `accessToken`".to_string()),
    ] {
        let (service, api, store, _) = harness(MockTokenStore::with_pair(&citizen_session()));
        api.push_refresh(Err(failure));

        assert_eq!(service.refresh().await, RefreshOutcome::SessionEnded);
        assert!(store.is_empty());
    }
}

#[tokio::test]
async fn refresh_without_stored_role_ends_session() {
    let store = MockTokenStore::default();
    store.set_raw(ACCESS_TOKEN_KEY, "a1");
    store.set_raw(REFRESH_TOKEN_KEY, "r1");
    let (service, api, store, _) = harness(store);
    api.push_refresh(Ok(token_pair("a2", "r2")));

    assert_eq!(service.refresh().await, RefreshOutcome::SessionEnded);
    assert!(store.is_empty());
}

#[tokio::test]
async fn refresh_store_failure_ends_session() {
    let (service, api, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));
    store.fail_saves(true);
    api.push_refresh(Ok(token_pair("a2", "r2")));

    assert_eq!(service.refresh().await, RefreshOutcome::SessionEnded);
    assert!(store.is_empty());
    assert_eq!(navigator.logins(), 1);
}

#[tokio::test]
async fn concurrent_rejections_share_one_refresh() {
    let (service, api, store, _) = harness(MockTokenStore::with_pair(&citizen_session()));
    api.delay_refresh(Duration::from_millis(50));
    api.push_refresh(Ok(token_pair("a2", "r2")));

    let (first, second, third) = futures::join!(
        service.refresh_rejected("a1"),
        service.refresh_rejected("a1"),
        service.refresh_rejected("a1"),
    );

    assert_eq!(api.refresh_calls(), 1);
    assert!(first.is_refreshed() && second.is_refreshed() && third.is_refreshed());
    assert_eq!(store.access_token().as_deref(), Some("a2"));
}

#[tokio::test]
async fn waiters_after_failed_refresh_do_not_log_out_again() {
    let (service, api, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));
    api.delay_refresh(Duration::from_millis(20));
    api.push_refresh(Err(AuthApiError::Rejected { status: 401, message: String::new() }));

    let (first, second) =
        futures::join!(service.refresh_rejected("a1"), service.refresh_rejected("a1"));

    assert_eq!(first, RefreshOutcome::SessionEnded);
    assert_eq!(second, RefreshOutcome::SessionEnded);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(navigator.logins(), 1);
    assert_eq!(store.clear_count(), 1);
}

// ============================================================================
// Access checks and current user
// ============================================================================

#[tokio::test]
async fn check_access_grants_matching_role_ignoring_case() {
    let (service, _, _, navigator) =
        harness(MockTokenStore::with_pair(&CredentialPair::new("a1", "r1", "supervisor")));

    assert_eq!(
        service.check_access(Role::Supervisor),
        AccessDecision::Granted("supervisor".to_string())
    );
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn check_access_redirects_other_roles() {
    let (service, _, store, navigator) = harness(MockTokenStore::with_pair(&citizen_session()));

    assert_eq!(
        service.check_access(Role::Worker),
        AccessDecision::Redirected("CIUDADANO".to_string())
    );
    assert_eq!(navigator.visits(), vec![Destination::Dashboard(Role::Citizen)]);
    assert!(!store.is_empty());
}

#[tokio::test]
async fn check_access_without_session_logs_out() {
    let (service, _, _, navigator) = harness(MockTokenStore::default());

    assert_eq!(service.check_access(Role::Citizen), AccessDecision::Denied);
    assert_eq!(navigator.visits(), vec![Destination::Login]);
}

#[tokio::test]
async fn current_user_falls_back_to_stored_role() {
    let (service, _, _, _) = harness(MockTokenStore::with_pair(&citizen_session()));

    let user = service.current_user();

    assert_eq!(user.role.as_deref(), Some("CIUDADANO"));
    assert!(user.id.is_none());
}
