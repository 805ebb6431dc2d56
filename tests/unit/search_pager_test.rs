//! Unit tests for SearchPager: page accumulation, dedup, and dropping
//! responses that belong to a superseded query.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use collegefinder::managers::search_pager::{PageOutcome, SearchPager};
use collegefinder::types::college::College;
use collegefinder::types::errors::{RemoteError, SearchError};
use collegefinder::types::search::{PageInfo, SearchPage, SearchQuery};

use common::{catalogue, college, MockSearch};

fn pager_over(colleges: Vec<College>, limit: u32) -> (SearchPager, Arc<MockSearch>) {
    let source = Arc::new(MockSearch::new(colleges));
    (SearchPager::new(source.clone(), limit), source)
}

fn ids(pager: &SearchPager) -> Vec<String> {
    pager.results().iter().map(|c| c.id.clone()).collect()
}

fn uncounted(colleges: Vec<College>, limit: u32) -> SearchPage {
    SearchPage { colleges, info: PageInfo::Uncounted { limit } }
}

#[tokio::test]
async fn test_reset_fetch_loads_first_page() {
    let (mut pager, source) = pager_over(catalogue(25), 10);

    let outcome = pager.fetch(true).await.unwrap();
    assert_eq!(outcome, PageOutcome::Applied { added: 10 });
    assert_eq!(pager.page(), 1);
    assert!(pager.has_more());
    assert!(!pager.is_loading());
    assert_eq!(source.requests(), vec![(None, 1, 10)]);
}

#[tokio::test]
async fn test_load_more_walks_to_last_page() {
    let (mut pager, source) = pager_over(catalogue(25), 10);
    pager.fetch(true).await.unwrap();

    assert_eq!(pager.load_more().await.unwrap(), Some(PageOutcome::Applied { added: 10 }));
    assert_eq!(pager.load_more().await.unwrap(), Some(PageOutcome::Applied { added: 5 }));
    assert_eq!(pager.page(), 3);
    assert!(!pager.has_more());

    // Exhausted: no further request is made.
    assert_eq!(pager.load_more().await.unwrap(), None);
    assert_eq!(source.calls(), 3);
    assert_eq!(pager.results().len(), 25);

    let pages: Vec<u32> = source.requests().iter().map(|r| r.1).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_reset_after_paging_starts_from_page_one() {
    let (mut pager, source) = pager_over(catalogue(25), 10);
    pager.fetch(true).await.unwrap();
    pager.load_more().await.unwrap();

    pager.set_query(SearchQuery::text("College 1"));
    pager.fetch(true).await.unwrap();

    assert_eq!(pager.page(), 1);
    let last = source.requests().last().cloned().unwrap();
    assert_eq!(last, (Some("College 1".to_string()), 1, 10));
    assert!(ids(&pager).iter().all(|id| id.starts_with("c1")));
}

#[tokio::test]
async fn test_duplicates_across_pages_are_dropped() {
    let colleges = vec![
        college("a", "A"),
        college("b", "B"),
        college("b", "B again"),
        college("", "No id"),
        college("c", "C"),
    ];
    let (mut pager, _) = pager_over(colleges, 2);

    pager.fetch(true).await.unwrap();
    let second = pager.load_more().await.unwrap();
    let third = pager.load_more().await.unwrap();

    assert_eq!(second, Some(PageOutcome::Applied { added: 0 }));
    assert_eq!(third, Some(PageOutcome::Applied { added: 1 }));
    assert_eq!(ids(&pager), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_failed_page_keeps_results_and_page() {
    let (mut pager, source) = pager_over(catalogue(25), 10);
    pager.fetch(true).await.unwrap();

    source.set_failing(true);
    let err = pager.load_more().await.unwrap_err();
    assert!(matches!(err, SearchError::Remote(_)));
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.results().len(), 10);
    assert!(!pager.is_loading());

    // The same page is requested again once the source recovers.
    source.set_failing(false);
    pager.load_more().await.unwrap();
    let pages: Vec<u32> = source.requests().iter().map(|r| r.1).collect();
    assert_eq!(pages, vec![1, 2, 2]);
}

#[test]
fn test_begin_refuses_while_loading_or_exhausted() {
    let (mut pager, _) = pager_over(Vec::new(), 10);
    let request = pager.begin(true).unwrap();
    assert!(matches!(pager.begin(false), Err(SearchError::AlreadyLoading)));

    pager.complete(&request, Ok(uncounted(Vec::new(), 10))).unwrap();
    assert!(!pager.has_more());
    assert!(matches!(pager.begin(false), Err(SearchError::Exhausted)));
}

#[test]
fn test_uncounted_pages_continue_while_full() {
    let (mut pager, _) = pager_over(Vec::new(), 2);

    let first = pager.begin(true).unwrap();
    pager
        .complete(&first, Ok(uncounted(vec![college("a", "A"), college("b", "B")], 2)))
        .unwrap();
    assert!(pager.has_more());

    let second = pager.begin(false).unwrap();
    assert_eq!(second.page, 2);
    pager.complete(&second, Ok(uncounted(vec![college("c", "C")], 2))).unwrap();
    assert!(!pager.has_more());
}

/// A page that was in flight when the query was reset must not leak into
/// the new list.
#[test]
fn test_stale_response_after_reset_is_dropped() {
    let (mut pager, _) = pager_over(Vec::new(), 2);
    let first = pager.begin(true).unwrap();
    pager
        .complete(&first, Ok(uncounted(vec![college("a", "A"), college("b", "B")], 2)))
        .unwrap();

    let old_more = pager.begin(false).unwrap();
    pager.set_query(SearchQuery::text("new"));
    let fresh = pager.begin(true).unwrap();
    assert!(pager.results().is_empty());

    let outcome = pager
        .complete(&old_more, Ok(uncounted(vec![college("old", "Old")], 2)))
        .unwrap();
    assert_eq!(outcome, PageOutcome::Stale);
    assert!(pager.results().is_empty());
    assert!(pager.is_loading(), "the reset request is still outstanding");

    pager
        .complete(&fresh, Ok(uncounted(vec![college("n", "New")], 2)))
        .unwrap();
    assert_eq!(ids(&pager), vec!["n"]);
    assert_eq!(pager.page(), 1);
}

#[test]
fn test_stale_failure_is_ignored() {
    let (mut pager, _) = pager_over(Vec::new(), 2);
    let old = pager.begin(true).unwrap();
    let _fresh = pager.begin(true).unwrap();

    let outcome = pager
        .complete(&old, Err(RemoteError::Network("late".to_string())))
        .unwrap();
    assert_eq!(outcome, PageOutcome::Stale);
}
