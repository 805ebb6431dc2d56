//! Typeahead suggestions for the search box.
//!
//! Each call waits out a debounce window, then queries the search source.
//! Calls are ticketed: a newer call makes every older one return
//! [`Suggestions::Superseded`], including one whose request is already in
//! flight (the request future is dropped).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::services::remote::CollegeSearch;
use crate::types::college::College;
use crate::types::errors::RemoteError;
use crate::types::search::SearchQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    Results(Vec<College>),
    /// A newer call replaced this one before it finished.
    Superseded,
}

pub struct SuggestionService {
    source: Arc<dyn CollegeSearch>,
    debounce: Duration,
    limit: u32,
    latest: watch::Sender<u64>,
}

impl SuggestionService {
    pub fn new(source: Arc<dyn CollegeSearch>, debounce: Duration, limit: u32) -> Self {
        let (latest, _) = watch::channel(0);
        Self {
            source,
            debounce,
            limit,
            latest,
        }
    }

    /// Returns suggestions for `text`, or `Superseded` if a later call won.
    ///
    /// Blank input clears suggestions immediately without a request.
    pub async fn suggest(&self, text: &str) -> Result<Suggestions, RemoteError> {
        let mut ticket = 0;
        self.latest.send_modify(|v| {
            *v += 1;
            ticket = *v;
        });
        let mut rx = self.latest.subscribe();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Suggestions::Results(Vec::new()));
        }

        tokio::select! {
            _ = tokio::time::sleep(self.debounce) => {}
            _ = superseded(&mut rx, ticket) => return Ok(Suggestions::Superseded),
        }

        let query = SearchQuery::text(trimmed);
        log::debug!("suggest #{} '{}'", ticket, trimmed);
        tokio::select! {
            res = self.source.search(&query, 1, self.limit) => {
                Ok(Suggestions::Results(res?.colleges))
            }
            _ = superseded(&mut rx, ticket) => {
                log::debug!("suggest #{} cancelled in flight", ticket);
                Ok(Suggestions::Superseded)
            }
        }
    }
}

/// Resolves once the latest ticket differs from `ticket`.
async fn superseded(rx: &mut watch::Receiver<u64>, ticket: u64) {
    loop {
        if *rx.borrow_and_update() != ticket {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender lives as long as the service; nothing can supersede us.
            std::future::pending::<()>().await;
        }
    }
}
