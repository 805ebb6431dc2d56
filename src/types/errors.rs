use std::fmt;

// === StorageError ===

/// Errors from the local key-value store.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite operation failed.
    DatabaseError(String),
    /// A stored value could not be encoded or decoded as JSON.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerializationError(e.to_string())
    }
}

// === RemoteError ===

/// Errors from the backend API or the hosted database.
#[derive(Debug)]
pub enum RemoteError {
    /// The request could not be sent or the connection dropped.
    Network(String),
    /// The server answered with a non-success status.
    Status(u16, String),
    /// The response body did not match the expected shape.
    Decode(String),
    /// The client is missing required configuration.
    NotConfigured(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "Network error: {}", msg),
            RemoteError::Status(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            RemoteError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            RemoteError::NotConfigured(what) => write!(f, "Remote not configured: {}", what),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            RemoteError::Status(status.as_u16(), e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

// === FavoritesError ===

/// Errors related to the favorites store.
#[derive(Debug)]
pub enum FavoritesError {
    /// The operation needs a signed-in user.
    NotSignedIn,
    /// Writing the local snapshot failed.
    Storage(StorageError),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoritesError::NotSignedIn => write!(f, "Favorites require a signed-in user"),
            FavoritesError::Storage(e) => write!(f, "Favorites storage error: {}", e),
        }
    }
}

impl std::error::Error for FavoritesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FavoritesError::Storage(e) => Some(e),
            FavoritesError::NotSignedIn => None,
        }
    }
}

impl From<StorageError> for FavoritesError {
    fn from(e: StorageError) -> Self {
        FavoritesError::Storage(e)
    }
}

// === CompareError ===

/// Errors related to the compare list.
#[derive(Debug)]
pub enum CompareError {
    /// Persisting the compare list failed.
    Storage(StorageError),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Storage(e) => write!(f, "Compare storage error: {}", e),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Storage(e) => Some(e),
        }
    }
}

impl From<StorageError> for CompareError {
    fn from(e: StorageError) -> Self {
        CompareError::Storage(e)
    }
}

// === PreferencesError ===

/// Errors related to preferences and browsing history.
#[derive(Debug)]
pub enum PreferencesError {
    /// The operation needs a signed-in user.
    NotSignedIn,
    /// Reading or writing the stored record failed.
    Storage(StorageError),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesError::NotSignedIn => write!(f, "Preferences require a signed-in user"),
            PreferencesError::Storage(e) => write!(f, "Preferences storage error: {}", e),
        }
    }
}

impl std::error::Error for PreferencesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreferencesError::Storage(e) => Some(e),
            PreferencesError::NotSignedIn => None,
        }
    }
}

impl From<StorageError> for PreferencesError {
    fn from(e: StorageError) -> Self {
        PreferencesError::Storage(e)
    }
}

// === SearchError ===

/// Errors related to search and pagination.
#[derive(Debug)]
pub enum SearchError {
    /// A fetch was requested while another is still loading.
    AlreadyLoading,
    /// No further pages are available.
    Exhausted,
    /// The search source failed.
    Remote(RemoteError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::AlreadyLoading => write!(f, "A search page is already loading"),
            SearchError::Exhausted => write!(f, "No more search results"),
            SearchError::Remote(e) => write!(f, "Search failed: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RemoteError> for SearchError {
    fn from(e: RemoteError) -> Self {
        SearchError::Remote(e)
    }
}

// === DeadlineError ===

/// Errors related to the deadline tracker.
#[derive(Debug)]
pub enum DeadlineError {
    /// Deadline with the given ID was not found.
    NotFound(String),
    /// Persisting deadlines failed.
    Storage(StorageError),
}

impl fmt::Display for DeadlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineError::NotFound(id) => write!(f, "Deadline not found: {}", id),
            DeadlineError::Storage(e) => write!(f, "Deadline storage error: {}", e),
        }
    }
}

impl std::error::Error for DeadlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeadlineError::Storage(e) => Some(e),
            DeadlineError::NotFound(_) => None,
        }
    }
}

impl From<StorageError> for DeadlineError {
    fn from(e: StorageError) -> Self {
        DeadlineError::Storage(e)
    }
}

// === ConfigError ===

/// Errors related to loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// File system I/O error.
    IoError(String),
    /// The config file is not valid JSON for `AppConfig`.
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
