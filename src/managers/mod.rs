// State managers
// Each manager owns one client-side collection and keeps it in sync with
// local storage (and, for favorites, the hosted database).

pub mod compare_store;
pub mod deadline_tracker;
pub mod favorites_store;
pub mod preferences_store;
pub mod recent_searches;
pub mod search_pager;
