//! App core for collegefinder.
//!
//! Central struct holding the database, remote clients and every store.

use std::sync::Arc;
use std::time::Duration;

use crate::database::connection::Database;
use crate::managers::compare_store::CompareStore;
use crate::managers::deadline_tracker::DeadlineTracker;
use crate::managers::favorites_store::FavoritesStore;
use crate::managers::preferences_store::PreferencesStore;
use crate::managers::recent_searches::RecentSearches;
use crate::managers::search_pager::SearchPager;
use crate::services::backend_client::BackendClient;
use crate::services::hosted_db::HostedDbClient;
use crate::services::local_storage::LocalStorage;
use crate::services::recommendation_service::{RecommendationService, FEED_LIMIT};
use crate::services::remote::{CollegeSearch, FavoritesRemote, RecommendationSource};
use crate::services::suggestion_service::SuggestionService;
use crate::types::config::AppConfig;
use crate::types::errors::PreferencesError;

/// Remote dependencies of [`App`], separated so they can be substituted.
pub struct Remotes {
    pub backend: Arc<BackendClient>,
    pub hosted_db: Option<Arc<HostedDbClient>>,
    /// Source for the main paginated search.
    pub search: Arc<dyn CollegeSearch>,
    /// Source for typeahead suggestions.
    pub suggest: Arc<dyn CollegeSearch>,
    pub favorites: Arc<dyn FavoritesRemote>,
    /// Source for the recommended and trending feed.
    pub recommend: Arc<dyn RecommendationSource>,
}

impl Remotes {
    /// Builds the clients described by `config`. Favorites, suggestions and
    /// the feed go to the hosted database when it is configured, otherwise to the
    /// backend.
    pub fn from_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let backend = Arc::new(BackendClient::new(&config.backend_url, timeout)?);

        let hosted_db = if config.has_hosted_db() {
            Some(Arc::new(HostedDbClient::new(
                &config.supabase_url,
                &config.supabase_anon_key,
                timeout,
            )?))
        } else {
            None
        };

        let suggest: Arc<dyn CollegeSearch> = match &hosted_db {
            Some(db) => db.clone(),
            None => backend.clone(),
        };
        let favorites: Arc<dyn FavoritesRemote> = match &hosted_db {
            Some(db) => db.clone(),
            None => backend.clone(),
        };
        let recommend: Arc<dyn RecommendationSource> = match &hosted_db {
            Some(db) => db.clone(),
            None => backend.clone(),
        };

        Ok(Self {
            search: backend.clone(),
            backend,
            hosted_db,
            suggest,
            favorites,
            recommend,
        })
    }
}

pub struct App {
    pub config: AppConfig,
    pub db: Arc<Database>,
    pub storage: LocalStorage,
    pub backend: Arc<BackendClient>,
    pub hosted_db: Option<Arc<HostedDbClient>>,
    pub favorites: FavoritesStore,
    pub compare: CompareStore,
    pub preferences: PreferencesStore,
    pub pager: SearchPager,
    pub suggestions: Arc<SuggestionService>,
    pub recommendations: Arc<RecommendationService>,
    pub recent_searches: RecentSearches,
    pub deadlines: DeadlineTracker,
}

impl App {
    /// Opens `<data_dir>/collegefinder.db` and connects the configured remotes.
    pub fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&config.data_dir)?;
        let db_path = config.database_path();
        let db = Arc::new(Database::open(&db_path)?);
        let remotes = Remotes::from_config(&config)?;
        Self::with_remotes(config, db, remotes)
    }

    /// Wires the stores over an already-open database.
    pub fn with_remotes(
        config: AppConfig,
        db: Arc<Database>,
        remotes: Remotes,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = LocalStorage::new(db.clone());

        let favorites = FavoritesStore::new(remotes.favorites, storage.clone());
        let compare = CompareStore::new(storage.clone())
            .map_err(|e| format!("CompareStore init failed: {}", e))?;
        let preferences = PreferencesStore::new(storage.clone());
        let pager = SearchPager::new(remotes.search, config.page_size);
        let suggestions = Arc::new(SuggestionService::new(
            remotes.suggest,
            Duration::from_millis(config.suggestion_debounce_ms),
            config.suggestion_limit,
        ));
        let recommendations = Arc::new(RecommendationService::new(remotes.recommend, FEED_LIMIT));
        let recent_searches = RecentSearches::new(storage.clone())
            .map_err(|e| format!("RecentSearches init failed: {}", e))?;
        let deadlines = DeadlineTracker::new(storage.clone())
            .map_err(|e| format!("DeadlineTracker init failed: {}", e))?;

        log::info!(
            "collegefinder ready (backend {}, hosted db {})",
            remotes.backend.base_url(),
            if remotes.hosted_db.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            db,
            storage,
            backend: remotes.backend,
            hosted_db: remotes.hosted_db,
            favorites,
            compare,
            preferences,
            pager,
            suggestions,
            recommendations,
            recent_searches,
            deadlines,
        })
    }

    pub fn user_id(&self) -> Option<&str> {
        self.favorites.user_id()
    }

    /// Switches identity for every user-scoped store. The favorites list is
    /// cleared; callers refresh it afterwards.
    pub fn set_user(&mut self, user_id: Option<&str>, access_token: Option<String>) -> Result<(), PreferencesError> {
        if let Some(hosted) = &self.hosted_db {
            hosted.set_access_token(access_token);
        }
        self.favorites.set_user(user_id);
        self.preferences.set_user(user_id)
    }
}
