//! Company provisioning scenarios.

mod common;

use common::{TestHarness, TEST_PASSWORD};

use tenanthub_core::ErrorKind;
use tenanthub_database::store::{CompanyStore, PrincipalStore};
use tenanthub_entity::principal::AccountRole;
use tenanthub_service::CreateCompanyRequest;

fn acme_request() -> CreateCompanyRequest {
    CreateCompanyRequest {
        name: "Acme".to_string(),
        super_user_username: "AcmeSu".to_string(),
        super_user_email: "AcmeSu@email.com".to_string(),
        super_user_password: TEST_PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_staff_admin_creates_company_with_super_user() {
    let harness = TestHarness::new();
    let admin = harness.seed("root", AccountRole::StaffAdmin, None).await;

    let (company, super_user) = harness
        .companies
        .create_company(&harness.ctx(&admin), acme_request())
        .await
        .expect("staff-admin creates companies");

    assert_eq!(company.name, "Acme");
    assert_eq!(super_user.roles, vec![AccountRole::CustomerSuperUser]);
    assert_eq!(super_user.company_id, Some(company.id));
    assert_eq!(super_user.email, "acmesu@email.com");

    // Both halves are visible in the store.
    assert!(CompanyStore::find_by_id(harness.store.as_ref(), company.id)
        .await
        .unwrap()
        .is_some());
    assert!(PrincipalStore::find_by_username(harness.store.as_ref(), "AcmeSu")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_staff_employee_creates_company() {
    let harness = TestHarness::new();
    let employee = harness.seed("employee", AccountRole::StaffEmployee, None).await;

    assert!(harness
        .companies
        .create_company(&harness.ctx(&employee), acme_request())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_customer_tiers_cannot_create_companies() {
    let harness = TestHarness::new();
    let home = harness.seed_company("Home").await;

    for (i, role) in [
        AccountRole::CustomerSuperUser,
        AccountRole::CustomerAdmin,
        AccountRole::CustomerUser,
    ]
    .into_iter()
    .enumerate()
    {
        let requester = harness.seed(&format!("member{i}"), role, Some(home)).await;

        let err = harness
            .companies
            .create_company(&harness.ctx(&requester), acme_request())
            .await
            .expect_err("customer tiers must not create companies");

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "Invalid permissions to create a company.");
    }
}

#[tokio::test]
async fn test_duplicate_super_user_rolls_the_company_back() {
    let harness = TestHarness::new();
    let admin = harness.seed("root", AccountRole::StaffAdmin, None).await;

    harness
        .companies
        .create_company(&harness.ctx(&admin), acme_request())
        .await
        .expect("first creation succeeds");

    let mut second = acme_request();
    second.name = "Acme Again".to_string();

    let err = harness
        .companies
        .create_company(&harness.ctx(&admin), second)
        .await
        .expect_err("super-user username is already taken");

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "User already exists.");

    // Exactly one Acme: the failed pair left no company behind.
    assert_eq!(harness.store.company_count(), 1);
}

#[tokio::test]
async fn test_super_user_can_login_after_company_creation() {
    let harness = TestHarness::new();
    let admin = harness.seed("root", AccountRole::StaffAdmin, None).await;

    harness
        .companies
        .create_company(&harness.ctx(&admin), acme_request())
        .await
        .expect("company created");

    let outcome = harness
        .auth
        .login("AcmeSu", TEST_PASSWORD)
        .await
        .expect("fresh super-user logs in");

    assert_eq!(outcome.principal.roles, vec![AccountRole::CustomerSuperUser]);
    assert!(!outcome.token.token.is_empty());
}
