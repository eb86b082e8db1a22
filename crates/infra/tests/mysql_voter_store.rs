//! Runs against a live MySQL when `BALLOTGATE_TEST_MYSQL_URL` is set
//! (e.g. `mysql://root:pw@127.0.0.1:3306/ballotgate_test`); otherwise each
//! test returns early.

use ballotgate_auth::{Password, Role};
use ballotgate_core::VoterId;
use ballotgate_infra::{DatabaseConfig, MySqlVoterStore, VoterRecord, VoterStore, VoterStoreError};

async fn store() -> Option<MySqlVoterStore> {
    let url = std::env::var("BALLOTGATE_TEST_MYSQL_URL").ok()?;
    let (options, max_connections) = DatabaseConfig::Url {
        url,
        max_connections: 4,
    }
    .mysql_options()
    .unwrap()
    .unwrap();
    let store = MySqlVoterStore::connect(options, max_connections).await.unwrap();
    store.ensure_schema().await.unwrap();
    Some(store)
}

/// Ids unique per run so tests can share one table.
fn unique_id(prefix: &str) -> VoterId {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    VoterId::parse(format!("{prefix}-{nanos}")).unwrap()
}

fn record(voter_id: &VoterId, password: &str) -> VoterRecord {
    VoterRecord::new(voter_id.clone(), Password::new(password), Role::VOTER)
}

#[tokio::test]
async fn concurrent_registrations_of_one_id_yield_one_duplicate() {
    let Some(store) = store().await else { return };
    let id = unique_id("race");

    let (a, b) = tokio::join!(
        store.insert(record(&id, "first")),
        store.insert(record(&id, "second")),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1, "{outcomes:?}");
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(VoterStoreError::Duplicate(d)) if d == &id)),
        "{outcomes:?}"
    );

    store.close().await;
}

#[tokio::test]
async fn identity_matching_is_exact() {
    let Some(store) = store().await else { return };
    let upper = unique_id("CaseVoter");
    let lower = VoterId::parse(upper.as_str().to_lowercase()).unwrap();

    store.insert(record(&upper, "pw")).await.unwrap();

    let found = store.find_by_voter_id(&upper).await.unwrap().unwrap();
    assert_eq!(found.voter_id, upper);
    assert!(store.find_by_voter_id(&lower).await.unwrap().is_none());

    // A case variant is a distinct identity.
    store.insert(record(&lower, "pw")).await.unwrap();

    let listed = store.list_all().await.unwrap();
    assert!(listed.iter().any(|v| v.voter_id == upper));
    assert!(listed.iter().any(|v| v.voter_id == lower));

    store.close().await;
}
