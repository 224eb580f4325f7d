//! Client and customer scoping scenarios.

mod common;

use common::TestHarness;

use tenanthub_core::ErrorKind;
use tenanthub_entity::client::{ContactDetails, CreateClient};
use tenanthub_entity::customer::CreateCustomer;
use tenanthub_entity::principal::AccountRole;

fn client_request(name: &str) -> CreateClient {
    CreateClient {
        name: name.to_string(),
        contact: ContactDetails {
            account_number: "AN12345678".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn test_every_customer_tier_creates_clients_in_own_company() {
    let harness = TestHarness::new();
    let company = harness.seed_company("Acme").await;

    for (i, role) in [
        AccountRole::CustomerSuperUser,
        AccountRole::CustomerAdmin,
        AccountRole::CustomerUser,
    ]
    .into_iter()
    .enumerate()
    {
        let member = harness.seed(&format!("member{i}"), role, Some(company)).await;

        let client = harness
            .clients
            .create_client(&harness.ctx(&member), client_request(&format!("client{i}")))
            .await
            .expect("company members create clients");

        assert_eq!(client.company_id, company);
    }
}

#[tokio::test]
async fn test_staff_cannot_create_clients() {
    let harness = TestHarness::new();

    for (i, role) in [AccountRole::StaffAdmin, AccountRole::StaffEmployee]
        .into_iter()
        .enumerate()
    {
        let staff = harness.seed(&format!("staff{i}"), role, None).await;

        let err = harness
            .clients
            .create_client(&harness.ctx(&staff), client_request("newClient"))
            .await
            .expect_err("staff have no company to create clients in");

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(
            err.message,
            "You must be associated with a company to create a client."
        );
    }
}

#[tokio::test]
async fn test_client_listing_is_company_scoped() {
    let harness = TestHarness::new();
    let acme = harness.seed_company("Acme").await;
    let globex = harness.seed_company("Globex").await;

    let acme_member = harness
        .seed("acme-admin", AccountRole::CustomerAdmin, Some(acme))
        .await;
    let globex_member = harness
        .seed("globex-admin", AccountRole::CustomerAdmin, Some(globex))
        .await;
    let staff = harness.seed("root", AccountRole::StaffAdmin, None).await;

    harness
        .clients
        .create_client(&harness.ctx(&acme_member), client_request("acme-site"))
        .await
        .unwrap();
    harness
        .clients
        .create_client(&harness.ctx(&globex_member), client_request("globex-site"))
        .await
        .unwrap();

    let acme_view = harness.clients.list_clients(&harness.ctx(&acme_member)).await.unwrap();
    assert_eq!(acme_view.len(), 1);
    assert_eq!(acme_view[0].name, "acme-site");

    // Staff see the whole directory.
    let staff_view = harness.clients.list_clients(&harness.ctx(&staff)).await.unwrap();
    assert_eq!(staff_view.len(), 2);
}

#[tokio::test]
async fn test_customer_creation_requires_admin_tier_and_own_client() {
    let harness = TestHarness::new();
    let acme = harness.seed_company("Acme").await;
    let admin = harness.seed("admin", AccountRole::CustomerAdmin, Some(acme)).await;

    let client = harness
        .clients
        .create_client(&harness.ctx(&admin), client_request("site"))
        .await
        .unwrap();

    let create = CreateCustomer {
        client_id: client.id,
        name: "Some Wonderful Customer".to_string(),
        contact: ContactDetails {
            account_number: "W/L141123512".to_string(),
            email: "WonderfulCustomer@email.com".to_string(),
            ..Default::default()
        },
    };

    let customer = harness
        .customers
        .create_customer(&harness.ctx(&admin), create.clone())
        .await
        .expect("admin tier creates customers");
    assert_eq!(customer.client_id, client.id);

    // The user tier holds no customer-creation capability.
    let user = harness.seed("user", AccountRole::CustomerUser, Some(acme)).await;
    let err = harness
        .customers
        .create_customer(&harness.ctx(&user), create.clone())
        .await
        .expect_err("user tier cannot create customers");
    assert_eq!(err.message, "Invalid permissions to create a customer.");

    // Staff have no company at all.
    let staff = harness.seed("root", AccountRole::StaffAdmin, None).await;
    let err = harness
        .customers
        .create_customer(&harness.ctx(&staff), create)
        .await
        .expect_err("staff cannot create customers");
    assert_eq!(
        err.message,
        "You must be associated with a company to create a customer."
    );
}

#[tokio::test]
async fn test_customer_creation_checks_client_ownership() {
    let harness = TestHarness::new();
    let acme = harness.seed_company("Acme").await;
    let globex = harness.seed_company("Globex").await;

    let acme_admin = harness
        .seed("acme-admin", AccountRole::CustomerAdmin, Some(acme))
        .await;
    let globex_admin = harness
        .seed("globex-admin", AccountRole::CustomerAdmin, Some(globex))
        .await;

    let globex_client = harness
        .clients
        .create_client(&harness.ctx(&globex_admin), client_request("globex-site"))
        .await
        .unwrap();

    let mut create = CreateCustomer {
        client_id: globex_client.id,
        name: "Poached".to_string(),
        contact: ContactDetails {
            account_number: "AN1".to_string(),
            email: "poached@example.com".to_string(),
            ..Default::default()
        },
    };

    let err = harness
        .customers
        .create_customer(&harness.ctx(&acme_admin), create.clone())
        .await
        .expect_err("foreign client must be refused");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "Client does not belong to your company.");

    // An id that resolves to nothing is a validation failure instead.
    create.client_id = tenanthub_core::types::ClientId::new();
    let err = harness
        .customers
        .create_customer(&harness.ctx(&acme_admin), create)
        .await
        .expect_err("unknown client must be refused");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Client does not exist.");
}

#[tokio::test]
async fn test_deleted_client_hides_its_customers() {
    let harness = TestHarness::new();
    let acme = harness.seed_company("Acme").await;
    let admin = harness.seed("admin", AccountRole::CustomerAdmin, Some(acme)).await;

    let client = harness
        .clients
        .create_client(&harness.ctx(&admin), client_request("site"))
        .await
        .unwrap();

    harness
        .customers
        .create_customer(
            &harness.ctx(&admin),
            CreateCustomer {
                client_id: client.id,
                name: "cust".to_string(),
                contact: ContactDetails {
                    account_number: "AN1".to_string(),
                    email: "cust@example.com".to_string(),
                    ..Default::default()
                },
            },
        )
        .await
        .unwrap();

    harness
        .clients
        .delete_client(&harness.ctx(&admin), client.id)
        .await
        .expect("own client can be deleted");

    // The client is gone from the directory, and listing its customers now
    // fails because the client no longer resolves.
    let listing = harness.clients.list_clients(&harness.ctx(&admin)).await.unwrap();
    assert!(listing.is_empty());

    let err = harness
        .customers
        .list_customers(&harness.ctx(&admin), client.id)
        .await
        .expect_err("deleted client does not resolve");
    assert_eq!(err.message, "Client does not exist.");
}
