use collegefinder::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::DatabaseError("disk full".to_string()).to_string(),
        "Storage database error: disk full"
    );
    assert_eq!(
        StorageError::SerializationError("expected value".to_string()).to_string(),
        "Storage serialization error: expected value"
    );
}

#[test]
fn storage_error_from_serde_json() {
    let json_err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
    let err: StorageError = json_err.into();
    assert!(matches!(err, StorageError::SerializationError(_)));
}

// === RemoteError Tests ===

#[test]
fn remote_error_display_variants() {
    assert_eq!(
        RemoteError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(
        RemoteError::Status(404, "not found".to_string()).to_string(),
        "HTTP 404: not found"
    );
    assert_eq!(
        RemoteError::Decode("missing field `id`".to_string()).to_string(),
        "Invalid response: missing field `id`"
    );
    assert_eq!(
        RemoteError::NotConfigured("no url".to_string()).to_string(),
        "Remote not configured: no url"
    );
}

// === FavoritesError Tests ===

#[test]
fn favorites_error_display_variants() {
    assert_eq!(
        FavoritesError::NotSignedIn.to_string(),
        "Favorites require a signed-in user"
    );
    let err = FavoritesError::Storage(StorageError::DatabaseError("locked".to_string()));
    assert_eq!(err.to_string(), "Favorites storage error: Storage database error: locked");
}

#[test]
fn favorites_error_exposes_storage_source() {
    let err: Box<dyn std::error::Error> = Box::new(FavoritesError::Storage(
        StorageError::DatabaseError("locked".to_string()),
    ));
    assert!(err.source().is_some());

    let err: Box<dyn std::error::Error> = Box::new(FavoritesError::NotSignedIn);
    assert!(err.source().is_none());
}

// === CompareError / PreferencesError Tests ===

#[test]
fn compare_error_display() {
    let err: CompareError = StorageError::SerializationError("eof".to_string()).into();
    assert_eq!(err.to_string(), "Compare storage error: Storage serialization error: eof");
}

#[test]
fn preferences_error_display_variants() {
    assert_eq!(
        PreferencesError::NotSignedIn.to_string(),
        "Preferences require a signed-in user"
    );
    let err: PreferencesError = StorageError::DatabaseError("io".to_string()).into();
    assert_eq!(err.to_string(), "Preferences storage error: Storage database error: io");
}

// === SearchError Tests ===

#[test]
fn search_error_display_variants() {
    assert_eq!(SearchError::AlreadyLoading.to_string(), "A search page is already loading");
    assert_eq!(SearchError::Exhausted.to_string(), "No more search results");
    let err: SearchError = RemoteError::Status(503, "busy".to_string()).into();
    assert_eq!(err.to_string(), "Search failed: HTTP 503: busy");
}

#[test]
fn search_error_remote_has_source() {
    let err: Box<dyn std::error::Error> =
        Box::new(SearchError::Remote(RemoteError::Network("x".to_string())));
    assert!(err.source().is_some());
}

// === DeadlineError / ConfigError Tests ===

#[test]
fn deadline_error_display_variants() {
    assert_eq!(
        DeadlineError::NotFound("app-c1".to_string()).to_string(),
        "Deadline not found: app-c1"
    );
    let err: DeadlineError = StorageError::DatabaseError("x".to_string()).into();
    assert_eq!(err.to_string(), "Deadline storage error: Storage database error: x");
}

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::IoError("permission denied".to_string()).to_string(),
        "Config I/O error: permission denied"
    );
    assert_eq!(
        ConfigError::ParseError("trailing comma".to_string()).to_string(),
        "Config parse error: trailing comma"
    );
}

#[test]
fn errors_are_debug_printable() {
    let err = RemoteError::Status(500, "boom".to_string());
    let debug = format!("{:?}", err);
    assert!(debug.contains("Status"));
}
