use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use kosha::{Lexicon, LexiconConfig, LookupRequest, SourceFilter};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn open(root: &Path) -> Lexicon {
    Lexicon::open(LexiconConfig::new(root)).unwrap()
}

#[test]
fn test_agni_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "sources/kosha1/words.json",
        r#"[{"head":"agni","meaning":"fire"}]"#,
    );
    write(root, "sources/kosha1/more.tsv", "agnikona\tcorner of fire\n");

    let lexicon = open(root);
    let hits = lexicon.lookup(&LookupRequest::new("agni"));

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.source == "kosha1"));

    let agni = hits.iter().find(|h| h.head == "agni").unwrap();
    assert_eq!(agni.gloss, "fire");
    assert!(agni.meta.is_empty());

    let kona = hits.iter().find(|h| h.head == "agnikona").unwrap();
    assert_eq!(kona.gloss, "corner of fire");
}

#[test]
fn test_decomposed_query_matches_precomposed_head() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "names/list.tsv", "r\u{0101}ma\tking of Ayodhya\n");

    let lexicon = open(temp_dir.path());
    let hits = lexicon.lookup(&LookupRequest::new("ra\u{0304}ma"));

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].head, "r\u{0101}ma");
    assert_eq!(hits[0].gloss, "king of Ayodhya");
}

#[test]
fn test_empty_query_returns_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "mw/words.tsv", "agni\tfire\n");
    let lexicon = open(temp_dir.path());

    for query in ["", "   ", "\n\t"] {
        let request = LookupRequest::builder(query).limit(100).source_list("mw").build();
        assert!(lexicon.lookup(&request).is_empty());
    }
}

#[test]
fn test_limit_caps_results_across_sources() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let many: String = (0..10).map(|i| format!("deva{i}\tgod {i}\n")).collect();
    write(root, "a/words.tsv", &many);
    write(root, "b/words.tsv", &many);

    let lexicon = open(root);
    for limit in [1, 5, 10, 15, 20, 50] {
        let hits = lexicon.lookup(&LookupRequest::builder("deva").limit(limit).build());
        assert_eq!(hits.len(), limit.min(20));
    }

    let hits = lexicon.lookup(&LookupRequest::builder("deva").limit(12).build());
    assert!(hits[..10].iter().all(|h| h.source == "a"));
    assert_eq!(hits[10].source, "b");
    assert_eq!(hits[11].head, "deva1");
}

#[test]
fn test_large_limit_is_honored() {
    let temp_dir = TempDir::new().unwrap();
    let many: String = (0..1500).map(|i| format!("deva{i}\tgod {i}\n")).collect();
    write(temp_dir.path(), "mw/words.tsv", &many);

    let lexicon = open(temp_dir.path());
    let hits = lexicon.lookup(&LookupRequest::builder("deva").limit(1200).build());
    assert_eq!(hits.len(), 1200);

    let hits = lexicon.lookup(&LookupRequest::builder("deva").limit(5000).build());
    assert_eq!(hits.len(), 1500);
}

#[test]
fn test_default_limit_is_25() {
    let temp_dir = TempDir::new().unwrap();
    let many: String = (0..40).map(|i| format!("nadi{i}\triver\n")).collect();
    write(temp_dir.path(), "mw/words.tsv", &many);

    let lexicon = open(temp_dir.path());
    assert_eq!(lexicon.lookup(&LookupRequest::new("nadi")).len(), 25);
}

#[test]
fn test_source_filter_order_and_meta() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "apte/words.json",
        r#"[{"head":"soma","gloss":"juice","pos":"noun","refs":[1,2]}]"#,
    );
    write(root, "mw/words.tsv", "soma\tmoon\n");
    write(root, "wilson/words.tsv", "soma\tplant\n");

    let lexicon = open(root);

    let filter = SourceFilter::new(["wilson", "apte", "unknown"]);
    let request = LookupRequest::builder("soma").sources(filter).build();
    let hits = lexicon.lookup(&request);

    let sources: Vec<&str> = hits.iter().map(|h| h.source.as_str()).collect();
    assert_eq!(sources, vec!["wilson", "apte"]);
    assert_eq!(hits[1].meta["pos"], json!("noun"));
    assert_eq!(hits[1].meta["refs"], json!([1, 2]));

    // Without a filter, sources are scanned alphabetically.
    let all = lexicon.lookup(&LookupRequest::new("soma"));
    let sources: Vec<&str> = all.iter().map(|h| h.source.as_str()).collect();
    assert_eq!(sources, vec!["apte", "mw", "wilson"]);
}

#[test]
fn test_no_data_vs_no_match_via_stats() {
    let temp_dir = TempDir::new().unwrap();
    let empty = open(&temp_dir.path().join("missing"));
    assert!(empty.lookup(&LookupRequest::new("agni")).is_empty());
    assert_eq!(empty.stats().sources, 0);
    assert_eq!(empty.stats().entries, 0);
    assert!(empty.sources().is_empty());

    write(temp_dir.path(), "mw/words.tsv", "jala\twater\n");
    let loaded = open(temp_dir.path());
    assert!(loaded.lookup(&LookupRequest::new("agni")).is_empty());
    assert_eq!(loaded.stats().entries, 1);
}

#[test]
fn test_malformed_entries_never_match() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "mw/words.json",
        r#"["agni", 42, null, {"gloss":"headless"}, {"head":"agni"}]"#,
    );

    let lexicon = open(temp_dir.path());
    assert_eq!(lexicon.stats().entries, 5);

    let hits = lexicon.lookup(&LookupRequest::new("agni"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].gloss, "");
}
