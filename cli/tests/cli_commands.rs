use clap::Parser;
use moviesearch::{run, Cli};
use moviesearch_core::Error;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const MOVIES: &str = r#"{"movies": [
    {"id": 1, "title": "The Matrix", "description": "A hacker joins the rebels. Sci-fi action."},
    {"id": 2, "title": "Inception", "description": "A thief steals secrets through dreams. Action."},
    {"id": 3, "title": "Amelie", "description": "A shy waitress in Paris."}
]}"#;

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("movies.json"), MOVIES).unwrap();
    fs::write(dir.path().join("stopwords.txt"), "the\na\nin\n").unwrap();
    dir
}

fn invoke(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let movies = dir.join("movies.json");
    let stopwords = dir.join("stopwords.txt");
    let cache = dir.join("cache");
    let mut argv = vec![
        "moviesearch".to_string(),
        "--movies".to_string(),
        movies.display().to_string(),
        "--stopwords".to_string(),
        stopwords.display().to_string(),
        "--cache-dir".to_string(),
        cache.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn search_prints_ranked_titles() {
    let dir = fixture();
    assert_eq!(invoke(dir.path(), &["search", "dreams"]).unwrap(), "2: Inception\n");
    assert_eq!(invoke(dir.path(), &["search", "zebra"]).unwrap(), "No results found.\n");
}

#[test]
fn search_json_and_limit() {
    let dir = fixture();
    let out = invoke(dir.path(), &["search", "action", "--limit", "1", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);

    assert_eq!(invoke(dir.path(), &["search", "action", "--limit", "0"]).unwrap(), "No results found.\n");
    assert_eq!(invoke(dir.path(), &["search", "action", "--limit", "-3"]).unwrap(), "No results found.\n");
}

#[test]
fn blank_search_lists_first_movies() {
    let dir = fixture();
    assert_eq!(invoke(dir.path(), &["search", "", "--limit", "2"]).unwrap(), "1: The Matrix\n2: Inception\n");
}

#[test]
fn index_build_then_lookup_and_stats() {
    let dir = fixture();
    let built = invoke(dir.path(), &["index", "build"]).unwrap();
    assert!(built.starts_with("Indexed 3 documents across "), "{built}");
    assert!(dir.path().join("cache").join("index.json").exists());
    assert!(dir.path().join("cache").join("docmap.json").exists());

    assert_eq!(invoke(dir.path(), &["index", "lookup", "action"]).unwrap(), "1\n2\n");
    assert_eq!(invoke(dir.path(), &["index", "lookup", "sci-fi action", "--format", "json"]).unwrap(), "[1]\n");
    assert_eq!(invoke(dir.path(), &["index", "lookup", "the"]).unwrap(), "No documents found.\n");

    let stats: serde_json::Value =
        serde_json::from_str(&invoke(dir.path(), &["index", "stats", "--format", "json"]).unwrap()).unwrap();
    assert_eq!(stats["document_count"], 3);
    assert!(stats["token_count"].as_u64().unwrap() > 0);
}

#[test]
fn lookup_without_build_is_index_store_error() {
    let dir = fixture();
    let err = invoke(dir.path(), &["index", "stats"]).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::IndexStore { .. })));
}

#[test]
fn missing_movies_file_is_data_access_error() {
    let dir = tempdir().unwrap();
    let err = invoke(dir.path(), &["search", "matrix"]).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::DataAccess { .. })));
}

#[test]
fn malformed_movies_is_data_format_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("movies.json"), r#"{"movies": "nope"}"#).unwrap();
    let err = invoke(dir.path(), &["index", "build"]).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::DataFormat { .. })));
}

#[test]
fn usage_errors_exit_with_two() {
    for argv in [
        vec!["moviesearch"],
        vec!["moviesearch", "index"],
        vec!["moviesearch", "search", "matrix", "--format", "xml"],
        vec!["moviesearch", "search", "matrix", "--k1", "-1"],
    ] {
        let err = Cli::try_parse_from(&argv).unwrap_err();
        assert_eq!(err.exit_code(), 2, "{argv:?}");
    }
}
