//! End-to-end resolution against on-disk indexes.

#![allow(clippy::tests_outside_test_module)]

use std::fs;

use locus_config::{Config, SearchSettings};
use locus_index::{
    Candidate, IndexError, IndexSession, IndexWriter, LocationRecord, Occurrence, QueryBuilder,
    RankingPolicy, Resolver, SessionProvider, TantivySessionProvider,
};
use tantivy::{
    Index,
    schema::{STORED, Schema, TEXT},
};
use tempfile::TempDir;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Writes `records` into a fresh index and opens a resolver over it.
fn resolver_over(records: &[LocationRecord]) -> (TempDir, Resolver<TantivySessionProvider>) {
    init_tracing();
    let temp = TempDir::new().unwrap();
    let mut writer = IndexWriter::open(temp.path()).unwrap();
    writer.add_records(records).unwrap();
    writer.commit().unwrap();

    let resolver = Resolver::open(temp.path(), &Config::default()).unwrap();
    (temp, resolver)
}

fn names(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.record.name.as_str()).collect()
}

fn springfields() -> Vec<LocationRecord> {
    vec![
        LocationRecord::new(1, "Springfield", 167_000).with_country("US"),
        LocationRecord::new(2, "Springfield", 116_000).with_country("US"),
        LocationRecord::new(3, "Springfield", 60_000).with_country("US"),
        LocationRecord::new(4, "Springfield", 60_000).with_country("US"),
        LocationRecord::new(5, "West Springfield", 28_000).with_country("US"),
    ]
}

#[test]
fn phrase_excludes_trailing_qualifiers() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "City of New York", 8_000_000),
        LocationRecord::new(2, "New York Heights", 500),
    ]);

    let candidates = resolver
        .search_with_limit(&Occurrence::new("New York", 0), 10, false)
        .unwrap();

    assert_eq!(names(&candidates), vec!["City of New York"]);
    assert!(!candidates[0].fuzzy);
}

#[test]
fn same_name_ranked_by_population() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(2, "Boston", 9_000).with_country("PH"),
        LocationRecord::new(1, "Boston", 600_000).with_country("US"),
    ]);

    let candidates = resolver.search(&Occurrence::new("Boston", 7), true).unwrap();

    let countries: Vec<_> = candidates
        .iter()
        .map(|c| c.record.country_code.as_deref())
        .collect();
    assert_eq!(countries, vec![Some("US"), Some("PH")]);
    assert!(candidates.iter().all(|c| !c.fuzzy && c.occurrence.position == 7));
}

#[test]
fn misspelling_resolves_through_fuzzy() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Boston", 600_000)]);

    let resolution = resolver
        .resolve(&Occurrence::new("Bosten", 0), 10, true)
        .unwrap();

    assert!(resolution.used_fuzzy);
    assert_eq!(names(&resolution.candidates), vec!["Boston"]);
    assert!(resolution.candidates.iter().all(|c| c.fuzzy));
}

#[test]
fn misspelling_without_fuzzy_is_empty() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Boston", 600_000)]);

    let resolution = resolver
        .resolve(&Occurrence::new("Bosten", 0), 10, false)
        .unwrap();

    assert!(resolution.candidates.is_empty());
    assert!(!resolution.used_fuzzy);
}

#[test]
fn exact_hits_win_over_fuzzy() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "Boston", 600_000),
        LocationRecord::new(2, "Bostan", 9_000_000),
    ]);

    let resolution = resolver
        .resolve(&Occurrence::new("Boston", 0), 10, true)
        .unwrap();

    assert!(!resolution.used_fuzzy);
    assert_eq!(names(&resolution.candidates), vec!["Boston"]);
}

#[test]
fn syntax_characters_match_literally() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "A (B)", 10),
        LocationRecord::new(2, "B", 1_000_000),
    ]);

    let candidates = resolver
        .search_with_limit(&Occurrence::new("A (B)", 0), 10, false)
        .unwrap();

    assert_eq!(names(&candidates), vec!["A (B)"]);
}

#[test]
fn keyword_text_is_not_syntax() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "Or", 100),
        LocationRecord::new(2, "Saint-Denis", 110_000).with_country("FR"),
    ]);

    let or = resolver.search(&Occurrence::new("OR", 0), false).unwrap();
    assert_eq!(names(&or), vec!["Or"]);

    let denis = resolver
        .search(&Occurrence::new("saint-denis", 0), false)
        .unwrap();
    assert_eq!(names(&denis), vec!["Saint-Denis"]);
}

#[test]
fn case_insensitive() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "City of New York", 8_000_000),
        LocationRecord::new(2, "New York", 20_000),
    ]);

    let lower = resolver.search(&Occurrence::new("new york", 0), true).unwrap();
    let mixed = resolver.search(&Occurrence::new("New York", 0), true).unwrap();
    let upper = resolver.search(&Occurrence::new("NEW YORK", 0), true).unwrap();

    assert_eq!(names(&lower), vec!["City of New York", "New York"]);
    assert_eq!(names(&lower), names(&mixed));
    assert_eq!(names(&lower), names(&upper));
}

#[test]
fn diacritics_fold() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Zürich", 400_000)]);

    let candidates = resolver.search(&Occurrence::new("Zurich", 0), false).unwrap();
    assert_eq!(names(&candidates), vec!["Zürich"]);
}

#[test]
fn limit_is_min_of_k_and_total() {
    let (_temp, resolver) = resolver_over(&springfields());
    let occurrence = Occurrence::new("Springfield", 0);

    for k in 0..8 {
        let resolution = resolver.resolve(&occurrence, k, false).unwrap();
        assert_eq!(resolution.total, 5);
        assert_eq!(resolution.candidates.len(), k.min(5), "limit {k}");
    }
}

#[test]
fn ordering_invariant_holds() {
    let (_temp, resolver) = resolver_over(&springfields());

    let candidates = resolver
        .search(&Occurrence::new("Springfield", 0), false)
        .unwrap();

    assert_eq!(candidates.len(), 5);
    for pair in candidates.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.record.population > b.record.population
                || (a.record.population == b.record.population && a.score >= b.score),
            "{} ({}) ranked before {} ({})",
            a.record.id,
            a.record.population,
            b.record.id,
            b.record.population
        );
    }
}

#[test]
fn ranking_policy_is_per_resolver() {
    let records = [
        LocationRecord::new(1, "Portland", 650_000),
        LocationRecord::new(2, "Portland Portland", 10),
    ];
    let (temp, by_population) = resolver_over(&records);
    let by_score = Resolver::open(temp.path(), &Config::default())
        .unwrap()
        .with_ranking(RankingPolicy::Score);

    let occurrence = Occurrence::new("Portland", 0);
    let pop = by_population.search(&occurrence, false).unwrap();
    let score = by_score.search(&occurrence, false).unwrap();

    assert_eq!(pop.len(), 2);
    assert_eq!(score.len(), 2);
    assert_eq!(pop[0].record.id, 1);
    assert!(score[0].score >= score[1].score);
    assert_eq!(by_population.ranking(), RankingPolicy::PopulationThenScore);
}

#[test]
fn attributes_survive_resolution() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Lima", 9_700_000)
        .with_country("PE")
        .with_attribute("admin1", "LMA")
        .with_attribute("lat", -12.04318)]);

    let candidates = resolver.search(&Occurrence::new("Lima", 0), false).unwrap();
    let record = &candidates[0].record;
    assert_eq!(record.country_code.as_deref(), Some("PE"));
    assert_eq!(record.attributes["admin1"], "LMA");
    assert_eq!(record.attributes["lat"], -12.04318);
}

#[test]
fn empty_occurrence_is_empty_result() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Lima", 9_700_000)]);

    for text in ["", "   ", "()"] {
        let resolution = resolver.resolve(&Occurrence::new(text, 0), 10, true).unwrap();
        assert!(resolution.candidates.is_empty(), "{text:?}");
        assert_eq!(resolution.total, 0);
    }
}

#[test]
fn fuzzy_distance_follows_settings() {
    let temp = TempDir::new().unwrap();
    let mut writer = IndexWriter::open(temp.path()).unwrap();
    writer
        .add_record(&LocationRecord::new(1, "Boston", 600_000))
        .unwrap();
    writer.commit().unwrap();

    let config = Config {
        search: SearchSettings {
            fuzzy_distance: 1,
            ..SearchSettings::default()
        },
        ..Config::default()
    };
    let resolver = Resolver::open(temp.path(), &config).unwrap();

    let one_edit = resolver.search(&Occurrence::new("Bosten", 0), true).unwrap();
    assert_eq!(one_edit.len(), 1);
    let two_edits = resolver.search(&Occurrence::new("Bastan", 0), true).unwrap();
    assert!(two_edits.is_empty());
}

#[test]
fn sessions_run_built_queries() {
    let (temp, _resolver) = resolver_over(&[
        LocationRecord::new(1, "Boston", 600_000).with_country("US"),
        LocationRecord::new(2, "Boston", 9_000).with_country("PH"),
    ]);
    let provider =
        TantivySessionProvider::open(temp.path(), &SearchSettings::default()).unwrap();
    let mut session = provider.acquire().unwrap();
    let builder = QueryBuilder::new(2);

    let page = session
        .execute(&builder.exact("BOSTON").unwrap(), 1, RankingPolicy::default())
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].record.id, 1);

    let page = session
        .execute(&builder.fuzzy("Bostn").unwrap(), 10, RankingPolicy::default())
        .unwrap();
    assert_eq!(page.total, 2);
}

#[test]
fn long_names_are_searchable() {
    let village = "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoch";
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, village, 3_000),
        LocationRecord::new(2, "Central Station", 50),
    ]);

    let exact = resolver
        .resolve(&Occurrence::new(village, 0), 10, true)
        .unwrap();
    assert!(!exact.used_fuzzy);
    assert_eq!(names(&exact.candidates), vec![village]);

    let typo = "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoh";
    let fuzzy = resolver.resolve(&Occurrence::new(typo, 0), 10, true).unwrap();
    assert!(fuzzy.used_fuzzy);
    assert_eq!(names(&fuzzy.candidates), vec![village]);
}

#[test]
fn long_words_are_never_dropped_from_phrases() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoch", 3_000),
        LocationRecord::new(2, "Central Station", 50),
    ]);

    let occurrence = Occurrence::new(
        "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoch Station",
        0,
    );
    let resolution = resolver.resolve(&occurrence, 10, true).unwrap();
    assert!(resolution.candidates.is_empty());
    assert_eq!(resolution.total, 0);
}

#[test]
fn unindexable_words_match_nothing() {
    let (_temp, resolver) = resolver_over(&[LocationRecord::new(1, "Central Station", 50)]);

    let overlong = "x".repeat(300);
    for text in [format!("{overlong} Station"), overlong.clone()] {
        let resolution = resolver.resolve(&Occurrence::new(&text, 0), 10, true).unwrap();
        assert!(resolution.candidates.is_empty(), "{} bytes", text.len());
        assert_eq!(resolution.total, 0);
    }
}

#[test]
fn syntax_heavy_text_never_fails() {
    let (_temp, resolver) = resolver_over(&[
        LocationRecord::new(1, "A (B)", 10),
        LocationRecord::new(2, "Saint-Denis", 110_000),
        LocationRecord::new(3, "Or", 100),
    ]);

    for text in [
        "\\",
        "a~",
        "~",
        "~2",
        "-x",
        "k:v",
        "x^2",
        "\"",
        "\"\"",
        "\"unclosed",
        "( (",
        ") OR (",
        "AND OR NOT",
        "*?[]{}",
        "a\\",
        "name:\"x\"~2^3",
    ] {
        let resolution = resolver.resolve(&Occurrence::new(text, 0), 10, true);
        assert!(resolution.is_ok(), "{text:?}: {resolution:?}");
    }
}

#[test]
fn foreign_index_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut builder = Schema::builder();
    builder.add_text_field("name", TEXT);
    builder.add_text_field("population", TEXT | STORED);
    Index::create_in_dir(temp.path(), builder.build()).unwrap();

    let err = Resolver::open(temp.path(), &Config::default()).err().unwrap();
    assert!(matches!(err, IndexError::OpenIndex { .. }));
}

#[test]
fn missing_index_fails_to_open() {
    let temp = TempDir::new().unwrap();
    let err = Resolver::open(&temp.path().join("absent"), &Config::default())
        .err()
        .unwrap();
    assert!(matches!(err, IndexError::OpenIndex { .. }));
}

#[test]
fn vanished_index_fails_to_acquire() {
    let (temp, resolver) = resolver_over(&[LocationRecord::new(1, "Lima", 9_700_000)]);
    fs::remove_dir_all(temp.path()).unwrap();

    let err = resolver
        .resolve(&Occurrence::new("Lima", 0), 10, true)
        .unwrap_err();
    assert!(matches!(err, IndexError::ResourceAcquisition(_)));
}

#[test]
fn open_resolver_uses_configured_directory() {
    let temp = TempDir::new().unwrap();
    let index_dir = temp.path().join(".locus").join("index");
    let mut writer = IndexWriter::open(&index_dir).unwrap();
    writer
        .add_record(&LocationRecord::new(1, "Lima", 9_700_000))
        .unwrap();
    writer.commit().unwrap();

    let config = Config {
        config_root: Some(temp.path().to_path_buf()),
        ..Config::default()
    };
    let resolver = locus_index::open_resolver(&config).unwrap();
    assert_eq!(resolver.provider().path(), index_dir);
    assert_eq!(
        resolver.search(&Occurrence::new("lima", 0), false).unwrap().len(),
        1
    );
}
