use chrono::NaiveDate;

use crate::config::Config;
use crate::query::{QueryEngine, QueryPart, DEFAULT_VARIATION_COUNT, GOOGLE_SEARCH_URL};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Fresh start: no file → defaults written to config.yaml
#[test]
fn test_creates_default_config() {
    let dir = temp_dir();

    let config = Config::load_with(dir.path()).unwrap();

    assert!(dir.path().join("config.yaml").exists());
    assert_eq!(config.variation_count, DEFAULT_VARIATION_COUNT);
    assert_eq!(config.search_url, GOOGLE_SEARCH_URL);
    assert_eq!(config.reference_date, None);
}

/// Missing keys fall back to defaults and the file is upgraded in place
#[test]
fn test_partial_config_is_upgraded() {
    let dir = temp_dir();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "variation_count: 6\n").unwrap();

    let config = Config::load_with(dir.path()).unwrap();
    assert_eq!(config.variation_count, 6);
    assert_eq!(config.search_url, GOOGLE_SEARCH_URL);

    let upgraded = std::fs::read_to_string(&path).unwrap();
    assert!(upgraded.contains("search_url"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = temp_dir();
    let path = dir.path().join("config.yaml");

    std::fs::write(&path, "variation_count: 0\n").unwrap();
    assert!(Config::load_with(dir.path()).is_err());

    std::fs::write(&path, "variation_count: 1201\n").unwrap();
    assert!(Config::load_with(dir.path()).is_err());

    std::fs::write(&path, "variation_count: 1200\n").unwrap();
    assert_eq!(Config::load_with(dir.path()).unwrap().variation_count, 1200);

    std::fs::write(&path, "search_url: not a url\n").unwrap();
    assert!(Config::load_with(dir.path()).is_err());

    std::fs::write(&path, "variation_count: [\n").unwrap();
    assert!(Config::load_with(dir.path()).is_err());
}

/// Settings flow into the engine
#[test]
fn test_engine_from_config() {
    let dir = temp_dir();
    std::fs::write(
        dir.path().join("config.yaml"),
        "variation_count: 3\nsearch_url: https://www.bing.com/search\nreference_date: 2024-05-10\n",
    )
    .unwrap();

    let config = Config::load_with(dir.path()).unwrap();
    assert_eq!(config.reference_date, NaiveDate::from_ymd_opt(2024, 5, 10));

    let engine = QueryEngine::from_config(&config);

    let variations = engine.get_variations("rust").unwrap();
    assert_eq!(variations.len(), 3);
    assert_eq!(variations[0].label, "April, 2024");

    assert_eq!(
        engine.build_query(&[QueryPart::LastMonth(None), QueryPart::site("lever.co")]).unwrap(),
        "after:2024-04-01 site:lever.co"
    );
    assert!(engine
        .search_url("rust")
        .unwrap()
        .as_str()
        .starts_with("https://www.bing.com/search?q=rust"));
}

#[test]
fn test_save_round_trip() {
    let dir = temp_dir();
    let mut config = Config::load_with(dir.path()).unwrap();

    config.variation_count = 24;
    config.save().unwrap();

    let reloaded = Config::load_with(dir.path()).unwrap();
    assert_eq!(reloaded, config);
}
