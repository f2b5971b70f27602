//! Integration tests for the banned-player directory pager

mod common;

use common::*;
use squad_scout::api::{Identity, Profile};
use squad_scout::storage::ProfileStore;
use std::sync::Arc;

#[tokio::test]
async fn test_collects_until_listing_is_exhausted() {
    let profiles = Arc::new(
        FakeProfileApi::new()
            .with_player("B1", &[])
            .with_player("B2", &[])
            .with_player("B3", &[]),
    );
    let listing = Arc::new(FakeBannedListApi::new().with_page(0, &["B1", "B2", "B3"]));
    let pager = pager(memory_store(), profiles, listing.clone(), &banned_config(100, 100));

    let result = pager.gather_banned(10).await;

    assert_eq!(names(&result), vec!["B1", "B2", "B3"]);
    assert_eq!(listing.calls(), vec![0, 1]);
    // An empty page sends the next pass back to the start
    assert_eq!(pager.next_page(), 0);
}

#[tokio::test]
async fn test_never_exceeds_page_ceiling() {
    let listing = Arc::new(FakeBannedListApi::new().endless());
    let pager = pager(
        memory_store(),
        Arc::new(FakeProfileApi::new()),
        listing.clone(),
        &banned_config(100, 5),
    );

    let result = pager.gather_banned(10).await;

    assert!(result.is_empty());
    assert_eq!(listing.calls(), vec![0, 1, 2, 3, 4]);
    assert_eq!(pager.next_page(), 5);
}

#[tokio::test]
async fn test_skips_identities_already_in_store() {
    let store = memory_store();
    store.save(&Profile::new("B1", "known")).unwrap();

    let profiles = Arc::new(
        FakeProfileApi::new()
            .with_player("B1", &[])
            .with_player("B2", &[]),
    );
    let listing = Arc::new(FakeBannedListApi::new().with_page(0, &["B1", "B2"]));
    let pager = pager(store, profiles.clone(), listing, &banned_config(100, 100));

    let result = pager.gather_banned(10).await;

    assert_eq!(names(&result), vec!["B2"]);
    assert_eq!(profiles.calls_for("B1"), 0);
}

#[tokio::test]
async fn test_not_found_and_failures_are_skipped() {
    let profiles = Arc::new(
        FakeProfileApi::new()
            .with_player("B1", &[])
            .with_player("B2", &[])
            .with_failure("broken"),
    );
    let listing = Arc::new(
        FakeBannedListApi::new().with_page(0, &["B1", "missing", "B1", "broken", "B2"]),
    );
    let pager = pager(memory_store(), profiles.clone(), listing, &banned_config(100, 100));

    let result = pager.gather_banned(10).await;

    assert_eq!(names(&result), vec!["B1", "B2"]);
    // In-page duplicates are resolved once
    assert_eq!(profiles.calls_for("B1"), 1);
    assert_eq!(profiles.calls_for("missing"), 1);
    assert_eq!(profiles.calls_for("broken"), 1);
}

#[tokio::test]
async fn test_resumes_partially_processed_page() {
    let profiles = Arc::new(
        FakeProfileApi::new()
            .with_player("B1", &[])
            .with_player("B2", &[])
            .with_player("B3", &[])
            .with_player("B4", &[]),
    );
    let listing = Arc::new(
        FakeBannedListApi::new()
            .with_page(0, &["B1", "B2", "B3"])
            .with_page(1, &["B4"]),
    );
    let pager = pager(memory_store(), profiles, listing.clone(), &banned_config(3, 100));

    let first = pager.gather_banned(2).await;
    assert_eq!(names(&first), vec!["B1", "B2"]);
    assert_eq!(pager.next_page(), 0);

    let second = pager.gather_banned(2).await;
    assert_eq!(names(&second), vec!["B3", "B4"]);
    assert_eq!(pager.next_page(), 2);
    assert_eq!(listing.calls(), vec![0, 0, 1]);
}

#[tokio::test]
async fn test_target_met_at_page_end_advances_cursor() {
    let profiles = Arc::new(
        FakeProfileApi::new()
            .with_player("B1", &[])
            .with_player("B2", &[]),
    );
    let listing = Arc::new(FakeBannedListApi::new().with_page(0, &["B1", "B2"]));
    let pager = pager(memory_store(), profiles, listing.clone(), &banned_config(2, 100));

    let result = pager.gather_banned(2).await;

    assert_eq!(result.len(), 2);
    assert_eq!(pager.next_page(), 1);
    assert_eq!(listing.calls(), vec![0]);
}

#[tokio::test]
async fn test_listing_failure_keeps_resolved_profiles() {
    let store = memory_store();
    let profiles = Arc::new(FakeProfileApi::new().with_player("B1", &[]));
    let listing = Arc::new(
        FakeBannedListApi::new()
            .with_page(0, &["B1"])
            .with_failing_page(1),
    );
    let pager = pager(store.clone(), profiles, listing, &banned_config(1, 100));

    let result = pager.gather_banned(5).await;

    assert_eq!(names(&result), vec!["B1"]);
    assert!(store.exists(&Identity::from("B1")).unwrap());
    // The failing page is retried first on the next pass
    assert_eq!(pager.next_page(), 1);
}

#[tokio::test]
async fn test_start_page_is_honored() {
    let profiles = Arc::new(FakeProfileApi::new().with_player("B9", &[]));
    let listing = Arc::new(FakeBannedListApi::new().with_page(3, &["B9"]));
    let mut config = banned_config(100, 100);
    config.start_page = 3;
    let pager = pager(memory_store(), profiles, listing.clone(), &config);

    let result = pager.gather_banned(5).await;

    assert_eq!(names(&result), vec!["B9"]);
    assert_eq!(listing.calls(), vec![3, 4]);
    assert_eq!(pager.next_page(), 3);
}
