//! End-to-end lifecycle tests: membership store over the flat-file record
//! log, including restart/reload behavior.

use std::sync::Arc;

use bloomgate::{
    FilterConfig, FlatFileRecordStore, MembershipApi, MembershipError, SyncedMembershipStore,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn config() -> FilterConfig {
    FilterConfig::new(1000, 5).unwrap()
}

async fn open_store(
    path: &std::path::Path,
) -> SyncedMembershipStore<FlatFileRecordStore> {
    SyncedMembershipStore::open(Arc::new(FlatFileRecordStore::new(path)), config())
        .await
        .unwrap()
}

#[tokio::test]
async fn empty_medium_at_startup_yields_all_false_filter() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir.path().join("usernames.txt")).await;

    assert_eq!(store.config(), config());
    assert!(!store.contains("alice").await.unwrap());
    assert!(!store.contains("anyone-else").await.unwrap());
}

#[tokio::test]
async fn registration_flow_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    let store = open_store(&path).await;

    store.add("alice").await.unwrap();
    store.add("bob").await.unwrap();

    assert!(store.contains("alice").await.unwrap());
    assert!(store.contains("bob").await.unwrap());
    assert!(!store.contains("carol").await.unwrap());

    assert!(store.remove("alice").await.unwrap());
    assert!(!store.contains("alice").await.unwrap());
    assert!(store.contains("bob").await.unwrap());

    // The durable log reflects the removal.
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "bob\n");
}

#[tokio::test]
async fn restart_reloads_surviving_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");

    {
        let store = open_store(&path).await;
        store.add("alice").await.unwrap();
        store.add("bob").await.unwrap();
        store.remove("alice").await.unwrap();
    }

    // A fresh process opens over the same file.
    let store = open_store(&path).await;

    assert!(store.contains("bob").await.unwrap());
    assert!(!store.contains("alice").await.unwrap());
}

#[tokio::test]
async fn blank_input_is_rejected_before_any_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    let store = open_store(&path).await;

    assert!(matches!(
        store.add("").await,
        Err(MembershipError::InvalidInput)
    ));
    assert!(matches!(
        store.add("   ").await,
        Err(MembershipError::InvalidInput)
    ));

    assert!(
        !path.exists(),
        "a rejected add must not create or touch the log file"
    );
}

#[tokio::test]
async fn hand_edited_log_with_blank_lines_loads_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    std::fs::write(&path, "alice\n\n  bob  \n").unwrap();

    let store = open_store(&path).await;

    assert!(store.contains("alice").await.unwrap());
    assert!(store.contains("bob").await.unwrap());
}

#[tokio::test]
async fn explicit_rebuild_follows_external_log_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    let store = open_store(&path).await;
    store.add("alice").await.unwrap();

    // An operator edits the log out-of-band, then asks for a rebuild.
    std::fs::write(&path, "carol\n").unwrap();
    store.rebuild().await.unwrap();

    assert!(store.contains("carol").await.unwrap());
    assert!(!store.contains("alice").await.unwrap());
}

#[tokio::test]
async fn bulk_registration_has_no_false_negatives_through_the_stack() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    let config = FilterConfig::for_capacity(1000, 0.01).unwrap();
    let store = SyncedMembershipStore::open(Arc::new(FlatFileRecordStore::new(&path)), config)
        .await
        .unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let usernames: Vec<String> = (0..500)
        .map(|_| format!("user_{:08x}", rng.gen::<u32>()))
        .collect();

    for name in &usernames {
        store.add(name).await.unwrap();
    }
    for name in &usernames {
        assert!(
            store.contains(name).await.unwrap(),
            "false negative for {} after durable add",
            name
        );
    }

    // Every record made it to the durable log as well.
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk.lines().count(), usernames.len());
}

#[tokio::test]
async fn duplicate_adds_collapse_on_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usernames.txt");
    let store = open_store(&path).await;

    store.add("alice").await.unwrap();
    store.add("alice").await.unwrap();

    assert!(store.remove("alice").await.unwrap());
    assert!(!store.contains("alice").await.unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}
