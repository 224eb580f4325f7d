//! Login and token issuance scenarios.

mod common;

use common::{TestHarness, TEST_PASSWORD};

use tenanthub_auth::jwt::JwtDecoder;
use tenanthub_core::config::AuthConfig;
use tenanthub_core::ErrorKind;
use tenanthub_database::store::PrincipalStore;
use tenanthub_entity::principal::AccountRole;

#[tokio::test]
async fn test_login_returns_a_decodable_token() {
    let harness = TestHarness::new();
    let company = harness.seed_company("Acme").await;
    let member = harness
        .seed("member", AccountRole::CustomerAdmin, Some(company))
        .await;

    let outcome = harness
        .auth
        .login("member", TEST_PASSWORD)
        .await
        .expect("valid credentials log in");

    let claims = JwtDecoder::new(&AuthConfig::default())
        .decode(&outcome.token.token)
        .expect("issued token validates");

    assert_eq!(claims.sub, member.id.into_uuid());
    assert_eq!(claims.roles, vec![AccountRole::CustomerAdmin]);
    assert_eq!(claims.company, Some(company.into_uuid()));
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_username() {
    let harness = TestHarness::new();
    harness.seed("Member", AccountRole::StaffAdmin, None).await;

    assert!(harness.auth.login("member", TEST_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let harness = TestHarness::new();
    harness.seed("member", AccountRole::StaffAdmin, None).await;

    let wrong_password = harness
        .auth
        .login("member", "WrongPassword9")
        .await
        .expect_err("wrong password fails");
    let unknown_user = harness
        .auth
        .login("nobody", TEST_PASSWORD)
        .await
        .expect_err("unknown user fails");

    assert_eq!(wrong_password.kind, ErrorKind::Authentication);
    assert_eq!(wrong_password.message, unknown_user.message);
}

#[tokio::test]
async fn test_deleted_principal_cannot_login() {
    let harness = TestHarness::new();
    let member = harness.seed("member", AccountRole::StaffAdmin, None).await;

    PrincipalStore::soft_delete(harness.store.as_ref(), member.id)
        .await
        .unwrap();

    let err = harness
        .auth
        .login("member", TEST_PASSWORD)
        .await
        .expect_err("deleted principal must not log in");
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_login_stamps_last_login() {
    let harness = TestHarness::new();
    let member = harness.seed("member", AccountRole::StaffAdmin, None).await;
    assert!(member.last_login_at.is_none());

    harness.auth.login("member", TEST_PASSWORD).await.unwrap();

    let reloaded = PrincipalStore::find_by_id(harness.store.as_ref(), member.id)
        .await
        .unwrap()
        .expect("principal still present");
    assert!(reloaded.last_login_at.is_some());
}
