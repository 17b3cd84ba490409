use super::*;
use crate::progress::SilentProgress;

fn broadcast(title: &str, collection: &str, date: &str, duration: &str) -> Record {
    Record::new(title, collection)
        .with_schedule(date, "20:00:00", "France Inter")
        .with_duration(duration)
}

fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

fn assert_consolidated(records: &[Record]) {
    let n = records.len() as u32;
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.category.track_number, Some(i as u32 + 1));
        assert_eq!(record.category.track_total, Some(n));
    }
    for pair in records.windows(2) {
        assert!(pair[0].schedule.datetime <= pair[1].schedule.datetime);
    }
}

// -- Canonical title --

#[test]
fn canonical_title_is_majority_label() {
    let records = vec![
        Record::new("A", "Les nuits magnétiques"),
        Record::new("B", "Les Nuits magnétiques"),
        Record::new("C", "Les Nuits magnétiques"),
    ];
    assert_eq!(
        canonical_title(&records).as_deref(),
        Some("Les Nuits magnétiques")
    );
}

#[test]
fn canonical_title_tie_goes_to_smallest_label() {
    let records = vec![
        Record::new("A", "Radioscopie"),
        Record::new("B", "RADIOSCOPIE"),
        Record::new("C", "RADIOSCOPIE"),
        Record::new("D", "Radioscopie"),
    ];
    assert_eq!(canonical_title(&records).as_deref(), Some("RADIOSCOPIE"));

    let reversed: Vec<Record> = records.into_iter().rev().collect();
    assert_eq!(canonical_title(&reversed).as_deref(), Some("RADIOSCOPIE"));
}

#[test]
fn canonical_title_of_nothing() {
    assert_eq!(canonical_title(&[]), None);
}

// -- Scenario A --

#[test]
fn duplicates_dropped_then_sorted_and_numbered() {
    let mut records = vec![
        broadcast("Météo", "News", "03/01/1980", "00:05:00"),
        broadcast("Journal", "News", "02/01/1980", "00:30:00"),
        broadcast("Flash", "News", "05/01/1980", "00:02:00"),
        broadcast("Journal", "News", "04/01/1980", "00:29:58"),
        broadcast("Édito", "News", "01/01/1980", "00:10:00"),
    ];
    let stats = consolidate_collection("news", &mut records);

    assert_eq!(stats.original, 5);
    assert_eq!(stats.kept, 4);
    assert_eq!(stats.removed(), 1);
    assert_eq!(titles(&records), vec!["Édito", "Journal", "Météo", "Flash"]);
    assert_eq!(records[1].attributes.duration_raw, "00:30:00");
    assert_consolidated(&records);
    assert!(
        records
            .iter()
            .all(|r| r.category.collection_title.as_deref() == Some("News"))
    );
}

#[test]
fn dedup_uses_title_slug() {
    let mut records = vec![
        broadcast("L'Homme qui rit", "Théâtre", "01/01/1966", ""),
        broadcast("l'homme  qui RIT", "Théâtre", "02/01/1966", ""),
        broadcast("L'Homme qui rit !", "Théâtre", "03/01/1966", ""),
    ];
    let stats = consolidate_collection("theatre", &mut records);
    assert_eq!(stats.kept, 1);
    assert_eq!(records[0].schedule.date, "01/01/1966");
}

#[test]
fn undated_records_sort_first_in_original_order() {
    let mut records = vec![
        broadcast("Daté", "C", "01/01/1970", ""),
        Record::new("Sans date 1", "C"),
        Record::new("Sans date 2", "C"),
    ];
    consolidate_collection("c", &mut records);
    assert_eq!(titles(&records), vec!["Sans date 1", "Sans date 2", "Daté"]);
    assert_consolidated(&records);
}

#[test]
fn equal_datetimes_keep_relative_order() {
    let mut records = vec![
        broadcast("B", "C", "01/01/1970", ""),
        broadcast("A", "C", "01/01/1970", ""),
    ];
    consolidate_collection("c", &mut records);
    assert_eq!(titles(&records), vec!["B", "A"]);
}

// -- Whole database --

#[test]
fn consolidate_is_idempotent() {
    let mut db = Database::from_records([
        broadcast("Journal", "News", "02/01/1980", "00:30:00"),
        broadcast("Radioscopie : Brel", "Radioscopie", "21/05/1971", ""),
        broadcast("Journal", "NEWS", "04/01/1980", "00:29:58"),
        broadcast("Édito", "News", "01/01/1980", "00:10:00"),
        broadcast("Radioscopie : Brassens", "Radioscopie", "01/01/1970", ""),
    ]);

    let first = consolidate(&mut db, &SilentProgress);
    assert_eq!(first.removed(), 1);
    assert_eq!(first.kept(), 4);
    assert_eq!(first.collections[0].slug, "news");
    assert_eq!(first.collections[0].canonical_title, "News");

    let snapshot = db.clone();
    let second = consolidate(&mut db, &SilentProgress);
    assert_eq!(second.removed(), 0);
    let before: Vec<&Record> = snapshot.records().collect();
    let after: Vec<&Record> = db.records().collect();
    assert_eq!(before, after);

    for collection in db.collections() {
        assert_consolidated(&collection.records);
    }
}

#[test]
fn consolidate_with_tied_labels_is_idempotent() {
    // First seen order ("News" then "NEWS") is the reverse of date order.
    let mut db = Database::from_records([
        broadcast("Météo", "News", "02/01/1980", "00:05:00"),
        broadcast("Journal", "NEWS", "01/01/1980", "00:30:00"),
    ]);

    let first = consolidate(&mut db, &SilentProgress);
    assert_eq!(first.collections[0].canonical_title, "NEWS");

    let snapshot = db.clone();
    let second = consolidate(&mut db, &SilentProgress);
    assert_eq!(second.collections[0].canonical_title, "NEWS");
    let before: Vec<&Record> = snapshot.records().collect();
    let after: Vec<&Record> = db.records().collect();
    assert_eq!(before, after);
    assert!(
        db.records()
            .all(|r| r.category.collection_title.as_deref() == Some("NEWS"))
    );
}
