use std::cell::Cell;

use ina_ripper_catalog::{Candidate, DELIMITER, Record, header_line};
use ina_ripper_db::*;

fn sample_db() -> Database {
    let mut a = Record::new("Le Fantôme de l'Opéra", "Théâtre de l'étrange")
        .with_schedule("12/05/1965", "21:00:00", "France Inter")
        .with_duration("00:55:00")
        .with_link("http://inatheque.ina.fr/notice/1");
    a.credits.set_text("AUT,LEROUX Gaston ; REA,ROUSSIN Pierre ;");
    a.candidates.push(Candidate {
        video_id: "abcdefghijk".into(),
        title: "Le fantôme de l'opéra - Théâtre de l'étrange".into(),
        duration_seconds: 3290,
        title_error: 0.0,
        duration_error: 0.003_030_303_030_303_03,
    });
    let b = Record::new("Radioscopie : Jacques Brel", "Radioscopie")
        .with_schedule("21/05/1971", "17:00:00", "France Inter")
        .with_duration("01:02:10:12");
    let c = Record::new("L'Homme qui rit", "Théâtre de l'Étrange")
        .with_schedule("03/03/1966", "21:00:00", "France Inter")
        .with_duration("58:30");
    Database::from_records([a, b, c])
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let file = DatabaseFile::new(dir.path().join("database.tsv"));
    let db = sample_db();

    let outcome = file.save(&db, |_| panic!("no prompt for a new file")).unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { lines: 4 });

    let loaded = file.load().unwrap();
    assert_eq!(loaded.collection_count(), 2);
    let original: Vec<&Record> = db.records().collect();
    let reloaded: Vec<&Record> = loaded.records().collect();
    assert_eq!(original, reloaded);
}

#[test]
fn load_preserves_file_order_within_groups() {
    let mut text = header_line(DELIMITER);
    text.push('\n');
    for title in ["Trois", "Un", "Deux"] {
        text.push_str(&Record::new(title, "Coll").serialize(DELIMITER));
        text.push('\n');
    }
    let db = DatabaseFile::new("unused").read_from(text.as_bytes()).unwrap();
    let titles: Vec<&str> = db.records().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Trois", "Un", "Deux"]);
}

#[test]
fn missing_header_is_a_format_error() {
    let file = DatabaseFile::new("unused");
    assert!(matches!(
        file.read_from(&b""[..]),
        Err(DatabaseError::Format(_))
    ));

    let line = Record::new("Titre", "Coll").serialize(DELIMITER);
    assert!(matches!(
        file.read_from(line.as_bytes()),
        Err(DatabaseError::Format(_))
    ));
}

#[test]
fn malformed_line_aborts_the_load() {
    let text = format!(
        "{}\n{}\nnot\ta\trecord\n",
        header_line(DELIMITER),
        Record::new("Titre", "Coll").serialize(DELIMITER)
    );
    let err = DatabaseFile::new("unused")
        .read_from(text.as_bytes())
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Malformed { line: 3, .. }));
}

#[test]
fn legacy_header_and_rows_are_accepted() {
    let header = header_line(DELIMITER)
        .split('\t')
        .take(15)
        .collect::<Vec<_>>()
        .join("\t");
    let row = Record::new("Titre", "Coll").to_fields()[..15].join("\t");
    let text = format!("{header}\n{row}\n");
    let db = DatabaseFile::new("unused").read_from(text.as_bytes()).unwrap();
    assert_eq!(db.len(), 1);
}

#[test]
fn declined_save_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.tsv");
    std::fs::write(&path, "precious").unwrap();

    let asked = Cell::new(false);
    let outcome = DatabaseFile::new(&path)
        .save(&sample_db(), |p| {
            asked.set(true);
            assert_eq!(p, path.as_path());
            false
        })
        .unwrap();
    assert!(asked.get());
    assert_eq!(outcome, SaveOutcome::Declined);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "precious");
}

#[test]
fn confirmed_save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.tsv");
    std::fs::write(&path, "precious").unwrap();

    let outcome = DatabaseFile::new(&path).save(&sample_db(), |_| true).unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { lines: 4 });
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("title\tcollection"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn custom_delimiter_round_trips() {
    let mut records: Vec<Record> = sample_db().records().cloned().collect();
    records[0].candidates.push(Candidate {
        video_id: "zyxwvutsrqp".into(),
        title: "Théâtre de l'étrange : Le Fantôme [1965]".into(),
        duration_seconds: 3312,
        title_error: 0.25,
        duration_error: 0.003_636_363_636_363_636,
    });
    let db = Database::from_records(records);

    let file = DatabaseFile::new("unused").with_delimiter('|').unwrap();
    let mut buf = Vec::new();
    file.write_to(&db, &mut buf).unwrap();
    let loaded = file.read_from(buf.as_slice()).unwrap();
    let original: Vec<&Record> = db.records().collect();
    let reloaded: Vec<&Record> = loaded.records().collect();
    assert_eq!(original, reloaded);
    assert_eq!(reloaded[0].candidates.len(), 2);
}

#[test]
fn delimiter_clashing_with_fields_is_refused() {
    for delimiter in [',', ':', '"', '/', ' ', '§'] {
        assert!(matches!(
            DatabaseFile::new("unused").with_delimiter(delimiter),
            Err(DatabaseError::InvalidDelimiter(d)) if d == delimiter
        ));
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DatabaseFile::new(dir.path().join("absent.tsv"))
        .load()
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Io { .. }));
}
