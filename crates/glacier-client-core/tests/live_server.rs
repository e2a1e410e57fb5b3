//! IMPORTANT!!!
//! An API server must be started up on localhost separately with a seeded
//! admin account (email `seed_admin@example.com`, password `f`). Only
//! intended for local testing, which is why the test is `#[ignore]`d: run
//! it with `cargo test -- --ignored` once the server is up.

use std::sync::Arc;

use glacier_client_core::{Client, InMemorySessionStore};
use glacier_shared::req_args::LoginReqArgs;

#[tokio::test]
#[ignore = "requires a locally running API server with a seeded admin account"]
async fn login_validate_logout_round_trip() {
    // Arrange
    // ASSUMING SERVER HAS BEEN STARTED (See module docs comment)
    let client = Client::new_with_store(
        "http://localhost:8789".to_string(),
        Arc::new(InMemorySessionStore::default()),
    );
    assert!(
        client.current_session().is_none(),
        "should not be logged in before logging in"
    );

    // Act - Login
    let session = client
        .login(
            LoginReqArgs::new("seed_admin@example.com", "f".to_string().into()),
            no_cb,
        )
        .await
        .expect("failed to receive on rx")
        .expect("IMPORTANT!!! ensure server is started properly see module doc comment");

    // Assert - Session persisted and admin
    assert!(session.is_admin());
    assert_eq!(client.current_session(), Some(session));

    // Act + Assert - Re-validation succeeds against the live account
    let status = client.validate(no_cb).await.expect("failed to receive on rx");
    assert!(status.is_valid());

    // Act + Assert - Logout clears the stored session
    client.logout();
    assert!(client.current_session().is_none());
}

fn no_cb() {}
