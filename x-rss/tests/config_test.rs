use std::collections::HashMap;
use std::path::PathBuf;
use x_rss::config::{Config, SourceMode};
use x_rss::XRssError;

fn load(vars: &[(&str, &str)]) -> Result<Config, XRssError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_for_live_mode() {
    let config = load(&[("X_SEARCH_KEYWORD", "rust"), ("X_BEARER_TOKEN", "secret-token")]).unwrap();

    assert_eq!(config.keyword, "rust");
    assert_eq!(config.max_results, 10);
    assert!(config.capture_dir.is_none());
    assert_eq!(config.storage.output_name, "x-rss.xml");
    assert_eq!(config.storage.container, "x-rss");
    assert!(config.storage.connection_string.is_none());
    assert_eq!(config.schedule.interval_minutes, 20);
    assert!(!config.schedule.run_on_startup);
    assert_eq!(config.fetch.timeout_seconds, 30);

    match &config.source {
        SourceMode::Live { bearer_token, api_base_url } => {
            assert_eq!(bearer_token.expose(), "secret-token");
            assert_eq!(api_base_url, "https://api.twitter.com");
        }
        other => panic!("expected live mode, got {:?}", other),
    }
}

#[test]
fn test_token_is_redacted_in_debug_output() {
    let config = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("X_BEARER_TOKEN", "secret-token"),
        ("AZURE_STORAGE_CONNECTION_STRING", "AccountName=a;SharedAccessSignature=sig=hidden"),
    ])
    .unwrap();

    let debug = format!("{:?}", config);
    assert!(!debug.contains("secret-token"));
    assert!(!debug.contains("hidden"));
}

#[test]
fn test_missing_keyword_is_a_config_error() {
    assert!(matches!(load(&[("X_BEARER_TOKEN", "t")]), Err(XRssError::Config(_))));
    assert!(matches!(
        load(&[("X_SEARCH_KEYWORD", ""), ("X_BEARER_TOKEN", "t")]),
        Err(XRssError::Config(_))
    ));
}

#[test]
fn test_missing_token_is_a_config_error_in_live_mode() {
    let err = load(&[("X_SEARCH_KEYWORD", "rust")]).unwrap_err();
    assert!(err.to_string().contains("bearer token"));
}

#[test]
fn test_replay_mode_needs_no_token() {
    let config = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("USE_LOCAL_JSON", "true"),
        ("LOCAL_JSON_PATH", "captures/x.json"),
    ])
    .unwrap();

    match config.source {
        SourceMode::Replay { path } => assert_eq!(path, PathBuf::from("captures/x.json")),
        other => panic!("expected replay mode, got {:?}", other),
    }
}

#[test]
fn test_replay_flag_without_path_falls_back_to_live() {
    let config = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("USE_LOCAL_JSON", "true"),
        ("X_BEARER_TOKEN", "t"),
    ])
    .unwrap();
    assert!(matches!(config.source, SourceMode::Live { .. }));
}

#[test]
fn test_overrides_are_applied() {
    let config = load(&[
        ("X_SEARCH_KEYWORD", "桜"),
        ("MAX_RESULTS", "50"),
        ("X_BEARER_TOKEN", "t"),
        ("X_API_BASE_URL", "http://localhost:8080"),
        ("SAVE_JSON_PATH", "debug"),
        ("RSS_FILENAME", "out/feed.xml"),
        ("BLOB_CONTAINER_NAME", "feeds"),
        ("SCHEDULE_INTERVAL_MINUTES", "5"),
        ("NODE_ENV", "development"),
        ("HTTP_TIMEOUT_SECONDS", "3"),
    ])
    .unwrap();

    assert_eq!(config.keyword, "桜");
    assert_eq!(config.max_results, 50);
    assert_eq!(config.capture_dir, Some(PathBuf::from("debug")));
    assert_eq!(config.storage.output_name, "out/feed.xml");
    assert_eq!(config.storage.container, "feeds");
    assert_eq!(config.schedule.interval_minutes, 5);
    assert!(config.schedule.run_on_startup);
    assert_eq!(config.fetch.timeout_seconds, 3);
    assert!(matches!(
        config.source,
        SourceMode::Live { ref api_base_url, .. } if api_base_url == "http://localhost:8080"
    ));
}

#[test]
fn test_app_env_takes_precedence_over_node_env() {
    let config = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("X_BEARER_TOKEN", "t"),
        ("APP_ENV", "production"),
        ("NODE_ENV", "development"),
    ])
    .unwrap();
    assert!(!config.schedule.run_on_startup);
}

#[test]
fn test_invalid_numbers_are_config_errors() {
    let bad_max = load(&[("X_SEARCH_KEYWORD", "rust"), ("X_BEARER_TOKEN", "t"), ("MAX_RESULTS", "ten")]);
    assert!(matches!(bad_max, Err(XRssError::Config(msg)) if msg.contains("MAX_RESULTS")));

    let zero_interval = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("X_BEARER_TOKEN", "t"),
        ("SCHEDULE_INTERVAL_MINUTES", "0"),
    ]);
    assert!(matches!(zero_interval, Err(XRssError::Config(_))));
}

#[test]
fn test_interval_that_overflows_seconds_is_a_config_error() {
    let huge = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("X_BEARER_TOKEN", "t"),
        ("SCHEDULE_INTERVAL_MINUTES", "18446744073709551615"),
    ]);
    assert!(matches!(huge, Err(XRssError::Config(msg)) if msg.contains("too large")));

    let largest = load(&[
        ("X_SEARCH_KEYWORD", "rust"),
        ("X_BEARER_TOKEN", "t"),
        ("SCHEDULE_INTERVAL_MINUTES", &(u64::MAX / 60).to_string()),
    ]);
    assert!(largest.is_ok());
}
