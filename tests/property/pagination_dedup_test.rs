//! Property-based tests for search pagination.
//!
//! Whatever pages a source returns, the accumulated list holds each non-empty
//! id once, in order of first appearance, and stale pages never land.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashSet;
use std::sync::Arc;

use collegefinder::managers::search_pager::{PageOutcome, SearchPager};
use collegefinder::types::college::College;
use collegefinder::types::search::{PageInfo, SearchPage};
use proptest::prelude::*;

use common::{college, MockSearch};

fn arb_page() -> impl Strategy<Value = Vec<String>> {
    // Empty string stands in for a row without an id.
    proptest::collection::vec(prop_oneof![9 => "[a-h]", 1 => Just(String::new())], 0..6)
}

fn page_of(ids: &[String]) -> SearchPage {
    SearchPage {
        colleges: ids.iter().map(|id| college(id, "x")).collect::<Vec<College>>(),
        info: PageInfo::Uncounted { limit: 5 },
    }
}

fn new_pager() -> SearchPager {
    SearchPager::new(Arc::new(MockSearch::new(Vec::new())), 5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(60))]

    #[test]
    fn accumulated_ids_are_unique_first_seen(pages in proptest::collection::vec(arb_page(), 1..6)) {
        let mut pager = new_pager();
        let mut expected: Vec<String> = Vec::new();
        let mut seen = HashSet::new();

        for (i, ids) in pages.iter().enumerate() {
            let request = match pager.begin(i == 0) {
                Ok(r) => r,
                Err(_) => break, // a short page ended the list
            };
            pager.complete(&request, Ok(page_of(ids))).expect("complete");
            for id in ids {
                if !id.is_empty() && seen.insert(id.clone()) {
                    expected.push(id.clone());
                }
            }
        }

        let got: Vec<String> = pager.results().iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn pages_from_before_a_reset_are_dropped(
        before in arb_page(),
        stale in arb_page(),
        after in arb_page(),
    ) {
        let mut pager = new_pager();
        let first = pager.begin(true).expect("begin");
        pager.complete(&first, Ok(page_of(&before))).expect("complete");

        let old = pager.begin(true).expect("begin old");
        let fresh = pager.begin(true).expect("begin fresh");
        prop_assert_eq!(pager.complete(&old, Ok(page_of(&stale))).expect("stale"), PageOutcome::Stale);
        pager.complete(&fresh, Ok(page_of(&after))).expect("fresh");

        let mut seen = HashSet::new();
        let expected: Vec<String> = after
            .iter()
            .filter(|id| !id.is_empty() && seen.insert((*id).clone()))
            .cloned()
            .collect();
        let got: Vec<String> = pager.results().iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(got, expected);
        prop_assert!(!pager.is_loading());
    }
}
