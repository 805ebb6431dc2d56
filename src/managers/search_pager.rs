//! Search result pagination.
//!
//! Accumulates pages from a [`CollegeSearch`] source into one list, keeping
//! ids unique. A fetch is split into [`SearchPager::begin`] and
//! [`SearchPager::complete`] so callers can release the pager while the
//! request is in flight. Each reset starts a new epoch; a response from an
//! older epoch is discarded instead of being appended to the new list.

use std::collections::HashSet;
use std::sync::Arc;

use crate::services::remote::CollegeSearch;
use crate::types::college::College;
use crate::types::errors::{RemoteError, SearchError};
use crate::types::search::{SearchPage, SearchQuery};

/// A page fetch that has been started but not applied.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub epoch: u64,
    pub page: u32,
    pub limit: u32,
    pub reset: bool,
    pub query: SearchQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was appended; `added` counts entries that survived dedup.
    Applied { added: usize },
    /// A reset happened after this request began; the response was dropped.
    Stale,
}

pub struct SearchPager {
    source: Arc<dyn CollegeSearch>,
    query: SearchQuery,
    limit: u32,
    /// Last page applied in the current epoch; 0 before the first.
    page: u32,
    results: Vec<College>,
    seen: HashSet<String>,
    has_more: bool,
    loading: bool,
    epoch: u64,
}

impl SearchPager {
    pub fn new(source: Arc<dyn CollegeSearch>, limit: u32) -> Self {
        Self {
            source,
            query: SearchQuery::default(),
            limit,
            page: 0,
            results: Vec::new(),
            seen: HashSet::new(),
            has_more: true,
            loading: false,
            epoch: 0,
        }
    }

    pub fn source(&self) -> Arc<dyn CollegeSearch> {
        Arc::clone(&self.source)
    }

    /// Replaces the filters used by the next fetch. Does not fetch.
    pub fn set_query(&mut self, query: SearchQuery) {
        self.query = query;
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn results(&self) -> &[College] {
        &self.results
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a fetch.
    ///
    /// With `reset`, the list is cleared and page 1 is requested, even while
    /// another fetch is loading. Without it, the next page is requested;
    /// this fails if a fetch is loading or the last page was reached.
    pub fn begin(&mut self, reset: bool) -> Result<PageRequest, SearchError> {
        if reset {
            self.epoch += 1;
            self.page = 0;
            self.results.clear();
            self.seen.clear();
            self.has_more = true;
        } else if self.loading {
            return Err(SearchError::AlreadyLoading);
        } else if !self.has_more {
            return Err(SearchError::Exhausted);
        }

        self.loading = true;
        Ok(PageRequest {
            epoch: self.epoch,
            page: self.page + 1,
            limit: self.limit,
            reset,
            query: self.query.clone(),
        })
    }

    /// Applies the response to `request`.
    ///
    /// Only a successful response advances the page. A failure leaves the
    /// accumulated list as it was.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        response: Result<SearchPage, RemoteError>,
    ) -> Result<PageOutcome, SearchError> {
        if request.epoch != self.epoch {
            log::debug!(
                "dropping page {} from epoch {} (current {})",
                request.page,
                request.epoch,
                self.epoch
            );
            return Ok(PageOutcome::Stale);
        }
        self.loading = false;

        let page = response?;
        let has_more = page.has_more();
        let added = self.append_unique(page.colleges);
        self.page = request.page;
        self.has_more = has_more;
        Ok(PageOutcome::Applied { added })
    }

    /// Appends entries whose id has not been seen. Later duplicates and
    /// entries without an id are dropped.
    fn append_unique(&mut self, colleges: Vec<College>) -> usize {
        let before = self.results.len();
        for college in colleges {
            if college.id.is_empty() || !self.seen.insert(college.id.clone()) {
                continue;
            }
            self.results.push(college);
        }
        self.results.len() - before
    }

    /// Runs a whole fetch against the pager's own source.
    pub async fn fetch(&mut self, reset: bool) -> Result<PageOutcome, SearchError> {
        let request = self.begin(reset)?;
        let response = self
            .source
            .search(&request.query, request.page, request.limit)
            .await;
        self.complete(&request, response)
    }

    /// Next page for infinite scroll. `Ok(None)` while loading or after the
    /// last page.
    pub async fn load_more(&mut self) -> Result<Option<PageOutcome>, SearchError> {
        if self.loading || !self.has_more {
            return Ok(None);
        }
        self.fetch(false).await.map(Some)
    }
}
