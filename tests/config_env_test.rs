//! Environment overrides live in their own test binary: they mutate process env.

use std::env;
use std::fs;

use tempfile::TempDir;

use exprtree::config::Settings;

#[test]
fn given_env_override_when_load_then_env_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exprtree.toml");
    fs::write(&path, "[log]\nfilter = \"info\"\nspan_events = false\n").unwrap();

    env::set_var("EXPRTREE_LOG__FILTER", "exprtree=trace");
    env::set_var("EXPRTREE_LOG__SPAN_EVENTS", "true");
    let settings = Settings::load(Some(&path));
    env::remove_var("EXPRTREE_LOG__FILTER");
    env::remove_var("EXPRTREE_LOG__SPAN_EVENTS");

    let settings = settings.expect("load settings");
    assert_eq!(settings.log.filter, "exprtree=trace");
    assert!(settings.log.span_events);
}
