use std::collections::BTreeSet;
use std::time::Duration;

use ina_ripper_catalog::RawRow;
use ina_ripper_db::{Database, DatabaseFile, SaveOutcome};
use ina_ripper_import::*;
use ina_ripper_match::{MatchThresholds, plan_downloads};

fn row(date: &str, title: &str, collection: &str, link: Option<&str>) -> RawRow {
    RawRow {
        cells: [
            "1",
            "France Inter",
            date,
            "20:30:00",
            "00:45:00",
            title,
            collection,
            "Les Maîtres du mystère",
            "Fiction",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        link: link.map(str::to_string),
    }
}

#[test]
fn json_sources_read_dumps() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = dir.path().join("search.json");
    std::fs::write(
        &search_path,
        r#"{"Le Train Maîtres": [{"id": "aaaaaaaaaaa", "title": "Le Train", "duration_seconds": 2700},
                                {"video_id": "bbbbbbbbbbb"}]}"#,
    )
    .unwrap();
    let source = JsonCandidateSource::from_path(&search_path).unwrap();
    assert_eq!(source.len(), 1);
    let results = source.search("Le Train Maîtres").unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].id, "bbbbbbbbbbb");
    assert_eq!(results[1].duration_seconds, 0);
    assert!(matches!(
        source.search("unknown"),
        Err(SourceError::NotRecorded(_))
    ));

    let credits_path = dir.path().join("credits.json");
    std::fs::write(&credits_path, r#"{"/notice/1": "AUT,DARD Frédéric ;"}"#).unwrap();
    let credits = JsonCreditsSource::from_path(&credits_path).unwrap();
    assert_eq!(
        credits.fetch_credits("/notice/1").unwrap().as_deref(),
        Some("AUT,DARD Frédéric ;")
    );
    assert_eq!(credits.fetch_credits("/notice/2").unwrap(), None);

    std::fs::write(&credits_path, "not json").unwrap();
    assert!(matches!(
        JsonCreditsSource::from_path(&credits_path),
        Err(SourceError::Json { .. })
    ));
    assert!(matches!(
        JsonCandidateSource::from_path(&dir.path().join("missing.json")),
        Err(SourceError::Io { .. })
    ));
}

#[test]
fn ingest_clean_enrich_save_plan() {
    let rows = vec![
        row("02/01/1976", "Le Train de 8h47", "Les Maîtres du mystère", Some("/notice/2")),
        row("01/01/1976", "L'Affaire Dominici", "Les maîtres du mystère", Some("/notice/1")),
        row("03/01/1976", "Le Train de 8h47", "Les Maîtres du mystère", Some("/notice/3")),
        row("04/01/1976", "Brel", "Radioscopie", None),
    ];
    let filter: BTreeSet<String> = ["les-maitres-du-mystere".to_string()].into();
    let (mut db, ingested) = Database::from_rows(rows, &filter);
    assert_eq!(ingested.added, 3);
    assert_eq!(ingested.ignored, 1);

    let cleaned = consolidate(&mut db, &SilentProgress);
    assert_eq!(cleaned.removed(), 1);

    let search = JsonCandidateSource::new(
        [
            (
                "L'Affaire Dominici Les maîtres du mystère".to_string(),
                vec![ina_ripper_match::RawCandidate::new(
                    "ddddddddddd",
                    "Les Maîtres du mystère - L'Affaire Dominici",
                    2700,
                )],
            ),
            (
                "Le Train de 8h47 Les Maîtres du mystère".to_string(),
                vec![ina_ripper_match::RawCandidate::new("ttttttttttt", "Train", 600)],
            ),
        ]
        .into(),
    );
    let credits = JsonCreditsSource::new(
        [("/notice/1".to_string(), "AUT,DARD Frédéric ; REA,BARMA Claude ;".to_string())].into(),
    );
    let options = EnrichOptions {
        delay: Duration::ZERO,
        ..EnrichOptions::default()
    };
    let stats = enrich_database(&mut db, Some(&credits), &search, &options, &SilentProgress);
    assert_eq!(stats.records_enriched, 2);

    let dir = tempfile::tempdir().unwrap();
    let file = DatabaseFile::new(dir.path().join("database.tsv"));
    assert_eq!(
        file.save(&db, |_| false).unwrap(),
        SaveOutcome::Saved { lines: 3 }
    );
    let reloaded = file.load().unwrap();

    let report = plan_downloads(&reloaded, &MatchThresholds::default(), &BTreeSet::new());
    assert!(report.failures.is_empty());
    let stems: Vec<&str> = report.plans.iter().map(|p| p.file_stem.as_str()).collect();
    assert_eq!(
        stems,
        vec![
            "les-maitres-du-mystere-1-laffaire-dominici",
            "les-maitres-du-mystere-2-le-train-de-8h47",
        ]
    );
    assert!(!report.plans[0].low_confidence);
    assert!(report.plans[0].tags.missing_fields().is_empty());
    assert!(report.plans[1].low_confidence);
    assert_eq!(
        report.plans[1].tags.missing_fields(),
        vec!["artist", "album artist"]
    );
}
