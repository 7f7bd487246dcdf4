//! Behaviour tests for submission, duplicate checks, the review queue and
//! the review transition, run against the in-memory store.

use std::collections::HashSet;
use std::time::Duration;

use assert_matches::assert_matches;
use slangdex_core::catalog::Catalog;
use slangdex_core::content::{ContentStatus, Decision};
use slangdex_core::duplicate_check::DuplicateCheck;
use slangdex_core::error::CoreError;
use slangdex_core::memory::InMemoryStore;
use slangdex_core::pagination::PageRequest;
use slangdex_core::retry::RetryPolicy;
use slangdex_core::review_queue::ReviewQueue;
use slangdex_core::types::DbId;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        multiplier: 2.0,
    }
}

struct Fixture {
    store: InMemoryStore,
    catalog: Catalog<InMemoryStore>,
    queue: ReviewQueue<InMemoryStore>,
    duplicates: DuplicateCheck<InMemoryStore>,
}

fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let catalog = Catalog::new(store.clone(), fast_retry());
    Fixture {
        queue: ReviewQueue::new(catalog.clone()),
        duplicates: DuplicateCheck::new(store.clone(), fast_retry()),
        catalog,
        store,
    }
}

async fn submit(fx: &Fixture, term: &str) -> DbId {
    fx.catalog
        .submit(term, "a definition", None, "contributor1")
        .await
        .expect("submission should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submissions_start_pending_and_unreviewed() {
    let fx = fixture();
    let item = fx
        .catalog
        .submit("Rizz", "Charm or charisma", Some("He has unspoken rizz"), "luna")
        .await
        .unwrap();

    assert_eq!(item.status, ContentStatus::Pending);
    assert_eq!(item.reviewed_by, None);
    assert_eq!(item.review_comment, None);
    assert_eq!(item.submitted_by, "luna");
    assert_eq!(item.example.as_deref(), Some("He has unspoken rizz"));
}

#[tokio::test]
async fn invalid_submissions_are_not_stored() {
    let fx = fixture();
    let err = fx.catalog.submit("  ", "average", None, "kai").await.unwrap_err();
    assert_matches!(err, CoreError::Validation(_));
    assert!(fx.catalog.list_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let fx = fixture();
    assert_matches!(
        fx.catalog.get_by_id(404).await,
        Err(CoreError::NotFound { entity: "Content", id: 404 })
    );
}

// ---------------------------------------------------------------------------
// Review transition
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approving_moves_item_from_queue_to_dictionary() {
    let fx = fixture();
    let item = fx.catalog.submit("mid", "average", None, "kai").await.unwrap();

    let pending = fx.queue.get_pending_page(PageRequest::new(Some(0), Some(10)).unwrap()).await.unwrap();
    assert!(pending.content.iter().any(|c| c.id == item.id));
    assert!(fx.catalog.list_approved().await.unwrap().is_empty());

    let approved = fx.queue.approve(item.id, "mod1", None).await.unwrap();
    assert_eq!(approved.status, ContentStatus::Approved);
    assert_eq!(approved.reviewed_by.as_deref(), Some("mod1"));
    assert!(approved.updated_at >= approved.created_at);

    let dictionary = fx.catalog.list_approved().await.unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary[0].reviewed_by.as_deref(), Some("mod1"));

    let pending = fx.queue.get_pending_page(PageRequest::default()).await.unwrap();
    assert!(pending.content.is_empty());
    assert_eq!(pending.total_elements, 0);
}

#[tokio::test]
async fn rejection_records_reviewer_and_comment() {
    let fx = fixture();
    let id = submit(&fx, "skibidi").await;

    let rejected = fx.queue.reject(id, "mod2", "Needs a clearer definition").await.unwrap();
    assert_eq!(rejected.status, ContentStatus::Rejected);
    assert_eq!(rejected.reviewed_by.as_deref(), Some("mod2"));
    assert_eq!(rejected.review_comment.as_deref(), Some("Needs a clearer definition"));
    assert!(fx.catalog.list_approved().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejection_without_comment_is_a_validation_error() {
    let fx = fixture();
    let id = submit(&fx, "gyatt").await;

    assert_matches!(fx.queue.reject(id, "mod1", "   ").await, Err(CoreError::Validation(_)));
    assert_matches!(
        fx.queue.review(id, "mod1", Decision::Reject, None).await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(fx.catalog.get_by_id(id).await.unwrap().status, ContentStatus::Pending);
}

#[tokio::test]
async fn reviewing_twice_is_an_invalid_state() {
    let fx = fixture();
    let id = submit(&fx, "bussin").await;

    fx.queue.approve(id, "mod1", Some("Great entry")).await.unwrap();

    assert_matches!(fx.queue.approve(id, "mod1", None).await, Err(CoreError::InvalidState(_)));
    assert_matches!(
        fx.queue.reject(id, "mod2", "changed my mind").await,
        Err(CoreError::InvalidState(_))
    );

    let item = fx.catalog.get_by_id(id).await.unwrap();
    assert_eq!(item.status, ContentStatus::Approved);
    assert_eq!(item.review_comment.as_deref(), Some("Great entry"));
}

#[tokio::test]
async fn reviewing_unknown_id_is_not_found() {
    let fx = fixture();
    assert_matches!(
        fx.queue.approve(77, "mod1", None).await,
        Err(CoreError::NotFound { id: 77, .. })
    );
}

#[tokio::test]
async fn concurrent_approvals_apply_exactly_once() {
    let fx = fixture();
    let id = submit(&fx, "cap").await;

    let mut handles = Vec::new();
    for n in 0..8 {
        let queue = fx.queue.clone();
        handles.push(tokio::spawn(async move {
            queue.approve(id, &format!("mod{n}"), None).await
        }));
    }

    let mut applied = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => applied += 1,
            Err(CoreError::InvalidState(_)) => refused += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(applied, 1);
    assert_eq!(refused, 7);
}

// ---------------------------------------------------------------------------
// Pending queue pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_cover_the_queue_without_gaps_or_repeats() {
    let fx = fixture();
    let mut expected = Vec::new();
    for n in 0..23 {
        expected.push(submit(&fx, &format!("term{n}")).await);
    }
    // Reviewed items must not appear in the queue.
    let reviewed = submit(&fx, "reviewed").await;
    fx.queue.approve(reviewed, "mod1", None).await.unwrap();

    let mut seen = Vec::new();
    let mut page = 0;
    loop {
        let request = PageRequest::new(Some(page), Some(5)).unwrap();
        let result = fx.queue.get_pending_page(request).await.unwrap();
        assert_eq!(result.total_elements, 23);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.current_page, page);
        assert_eq!(result.page_size, 5);
        if result.content.is_empty() {
            break;
        }
        seen.extend(result.content.iter().map(|c| c.id));
        page += 1;
    }

    assert_eq!(page, 5);
    assert_eq!(seen, expected, "queue must be oldest-first with no gaps");
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), seen.len());
}

#[tokio::test]
async fn new_submissions_join_the_end_of_the_queue() {
    let fx = fixture();
    let first = submit(&fx, "first").await;
    let second = submit(&fx, "second").await;

    let page0 = fx.queue.get_pending_page(PageRequest::new(Some(0), Some(1)).unwrap()).await.unwrap();
    submit(&fx, "late arrival").await;
    let page1 = fx.queue.get_pending_page(PageRequest::new(Some(1), Some(1)).unwrap()).await.unwrap();

    assert_eq!(page0.content[0].id, first);
    assert_eq!(page1.content[0].id, second);
    assert_eq!(page1.total_elements, 3);
}

#[tokio::test]
async fn unpaginated_pending_list_is_oldest_first() {
    let fx = fixture();
    let a = submit(&fx, "a").await;
    let b = submit(&fx, "b").await;
    let ids: Vec<_> = fx.queue.list_pending().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, b]);
}

// ---------------------------------------------------------------------------
// Duplicate-term check and dictionary search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_check_is_case_insensitive_and_exact() {
    let fx = fixture();
    let rizz = submit(&fx, "Rizz").await;
    fx.queue.approve(rizz, "mod1", None).await.unwrap();
    let rizzler = submit(&fx, "Rizzler").await;
    fx.queue.approve(rizzler, "mod1", None).await.unwrap();

    let upper = fx.duplicates.find_existing_approved("RIZZ").await.unwrap();
    let lower = fx.duplicates.find_existing_approved("  rizz ").await.unwrap();

    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].id, rizz);
}

#[tokio::test]
async fn duplicate_check_ignores_pending_items() {
    let fx = fixture();
    submit(&fx, "delulu").await;
    assert!(fx.duplicates.find_existing_approved("delulu").await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_check_rejects_blank_term() {
    let fx = fixture();
    assert_matches!(
        fx.duplicates.find_existing_approved("   ").await,
        Err(CoreError::Validation(_))
    );
}

#[tokio::test]
async fn search_matches_substrings_of_approved_terms() {
    let fx = fixture();
    for term in ["Rizz", "Rizzler", "Sus"] {
        let id = submit(&fx, term).await;
        fx.queue.approve(id, "mod1", None).await.unwrap();
    }
    submit(&fx, "rizzy pending").await;

    let terms: Vec<_> = fx
        .catalog
        .search_approved("RIZ")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.term)
        .collect();
    assert_eq!(terms, vec!["Rizz", "Rizzler"]);
    assert_eq!(fx.catalog.search_approved(" ").await.unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Read retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transient_read_failures_are_retried() {
    let fx = fixture();
    submit(&fx, "slay").await;

    fx.store.fail_next_reads(2);
    assert_eq!(fx.catalog.list_pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn persistent_read_failures_surface_as_storage_errors() {
    let fx = fixture();
    fx.store.fail_next_reads(10);
    assert_matches!(fx.catalog.list_approved().await, Err(CoreError::Storage(_)));
}

// ---------------------------------------------------------------------------
// Write failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_submission_is_surfaced_without_retry() {
    let fx = fixture();
    // A retry would consume no further failures and succeed.
    fx.store.fail_next_writes(1);

    assert_matches!(
        fx.catalog.submit("ate", "did very well", None, "kai").await,
        Err(CoreError::Storage(_))
    );
    assert!(fx.catalog.list_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_review_is_surfaced_without_retry() {
    let fx = fixture();
    let id = submit(&fx, "lowkey").await;
    fx.store.fail_next_writes(1);

    assert_matches!(fx.queue.approve(id, "mod1", None).await, Err(CoreError::Storage(_)));

    let item = fx.catalog.get_by_id(id).await.unwrap();
    assert_eq!(item.status, ContentStatus::Pending);
    assert_eq!(item.reviewed_by, None);
    assert!(fx.catalog.list_approved().await.unwrap().is_empty());
}
