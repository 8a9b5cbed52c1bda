use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use wordtrainer::session::Direction;
use wordtrainer::session::training::{Phase, TrainingSession};
use wordtrainer::store::json_store::JsonStore;
use wordtrainer::store::schema::{ExportData, WordKey};
use wordtrainer::store::{DEFAULT_LESSON, ErrorKind, LessonFilter};

fn make_test_store() -> (JsonStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().to_path_buf()).unwrap();
    (store, dir)
}

fn load_fixture() -> ExportData {
    let json = fs::read_to_string("tests/fixtures/starter-export.json").unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn duplicate_word_in_same_lesson_conflicts() {
    let (store, _dir) = make_test_store();
    store.save_word("cat", "кіт", "Main").unwrap();
    let err = store.save_word("cat", "кішка", "Main").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // same english in another lesson is a different word
    store.save_word("cat", "кішка", "Animals").unwrap();
    assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 2);
}

#[test]
fn toggle_twice_restores_learned_flag() {
    let (store, _dir) = make_test_store();
    store.save_word("owl", "сова", "Main").unwrap();
    let key = WordKey::new("owl", "Main");
    assert!(store.toggle_learned(&key).unwrap());
    assert!(!store.toggle_learned(&key).unwrap());
    let words = store.load_words(&LessonFilter::lesson("Main"), false).unwrap();
    assert_eq!(words.len(), 1);
    assert!(!words[0].learned);
}

#[test]
fn rename_moves_every_word() {
    let (store, _dir) = make_test_store();
    store.create_lesson("Food", "").unwrap();
    store.save_word("bread", "хліб", "Food").unwrap();
    store.save_word("milk", "молоко", "Food").unwrap();
    store.toggle_learned(&WordKey::new("milk", "Food")).unwrap();

    let before = store.load_words(&LessonFilter::lesson("Food"), false).unwrap();
    store.rename_lesson("Food", "Meals").unwrap();

    let after = store.load_words(&LessonFilter::lesson("Meals"), false).unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.english, new.english);
        assert_eq!(old.translation, new.translation);
        assert_eq!(new.lesson, "Meals");
    }
    assert!(store.load_words(&LessonFilter::lesson("Food"), false).unwrap().is_empty());
    assert!(store.load_words(&LessonFilter::lesson("Food"), true).unwrap().is_empty());
    assert_eq!(store.load_words(&LessonFilter::lesson("Meals"), true).unwrap().len(), 1);

    let names: Vec<String> = store.list_lessons().unwrap().into_iter().map(|l| l.name).collect();
    assert!(names.contains(&"Meals".to_string()));
    assert!(!names.contains(&"Food".to_string()));
}

#[test]
fn rename_onto_existing_lesson_conflicts() {
    let (store, _dir) = make_test_store();
    store.ensure_default_lesson().unwrap();
    store.create_lesson("Food", "").unwrap();
    let err = store.rename_lesson("Food", DEFAULT_LESSON).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let err = store.rename_lesson("Nope", "Other").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn update_keeps_learned_flag() {
    let (store, _dir) = make_test_store();
    store.save_word("cat", "кіт", "Main").unwrap();
    let key = WordKey::new("cat", "Main");
    store.toggle_learned(&key).unwrap();

    let updated = store.update_word(&key, "cat", "кішка", "Main").unwrap();
    assert!(updated.learned);

    let words = store.load_words(&LessonFilter::lesson("Main"), true).unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].translation, "кішка");
    assert!(words[0].learned);
}

#[test]
fn empty_store_loads_nothing() {
    let (store, _dir) = make_test_store();
    assert!(store.load_words(&LessonFilter::All, false).unwrap().is_empty());
    assert!(store.load_words(&LessonFilter::All, true).unwrap().is_empty());
    assert!(store.list_lessons().unwrap().is_empty());
}

#[test]
fn creating_main_twice_conflicts() {
    let (store, _dir) = make_test_store();
    store.create_lesson("Main", "").unwrap();
    let err = store.create_lesson("Main", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn corrupt_words_file_is_a_storage_fault_and_is_kept() {
    let (store, dir) = make_test_store();
    let path = dir.path().join("words.json");
    fs::write(&path, "[[[").unwrap();

    let err = store.load_words(&LessonFilter::All, false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFault);
    let err = store.save_word("cat", "кіт", "Main").unwrap_err();
    assert!(err.is_storage_fault());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[[[");
}

#[test]
fn training_scenario_reports_half_accuracy() {
    let (store, _dir) = make_test_store();
    store.ensure_default_lesson().unwrap();
    store.save_word("cat", "кіт", DEFAULT_LESSON).unwrap();
    store.save_word("dog", "пес", DEFAULT_LESSON).unwrap();

    let mut session = TrainingSession::start(
        &store,
        LessonFilter::lesson(DEFAULT_LESSON),
        Direction::EnglishToNative,
        SmallRng::seed_from_u64(2024),
    )
    .unwrap();

    while session.phase() == Phase::Active {
        let prompt = session.current_item().unwrap().prompt.to_string();
        if prompt == "cat" {
            session.submit_answer("кіт").unwrap();
        } else {
            session.submit_answer("wrong").unwrap();
            assert_eq!(session.score() + session.mistake_count(), session.cursor());
            session.submit_answer("пес").unwrap();
        }
        assert_eq!(session.score() + session.mistake_count(), session.cursor());
    }

    let report = session.report();
    assert_eq!(report.total, 2);
    assert_eq!(report.correct_first_try, 1);
    assert_eq!(report.mistakes, 1);
    assert!((report.accuracy - 50.0).abs() < 1e-9);
}

#[test]
fn import_fixture_then_export_matches() {
    let (store, _dir) = make_test_store();
    let data = load_fixture();
    store.import_all(&data).unwrap();

    let lessons = store.list_lessons().unwrap();
    assert_eq!(lessons[0].name, DEFAULT_LESSON);
    assert_eq!(lessons[1].name, "Animals");

    // the legacy "ukrainian" field and the missing lesson both load
    let main = store.load_words(&LessonFilter::lesson(DEFAULT_LESSON), false).unwrap();
    assert_eq!(main.len(), 2);
    assert_eq!(main[0].english, "bread");
    assert_eq!(main[0].translation, "хліб");

    let exported = store.export_all().unwrap();
    assert_eq!(exported.lessons.len(), 2);
    assert_eq!(exported.words.len(), 4);

    let summaries = store.lesson_summaries().unwrap();
    let animals = summaries.iter().find(|s| s.lesson.name == "Animals").unwrap();
    assert_eq!((animals.total, animals.learned), (2, 1));
}

#[test]
fn import_with_unknown_version_changes_nothing() {
    let (store, dir) = make_test_store();
    store.save_word("cat", "кіт", "Main").unwrap();
    let mut data = load_fixture();
    data.wordtrainer_export_version = 99;

    let err = store.import_all(&data).unwrap_err();
    assert!(err.is_storage_fault());
    assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 1);
    assert!(!dir.path().join("words.json.tmp").exists());
}

#[test]
fn leftover_backup_is_restored_on_open() {
    let dir = TempDir::new().unwrap();
    {
        let store = JsonStore::open(dir.path().to_path_buf()).unwrap();
        store.save_word("cat", "кіт", "Main").unwrap();
    }
    // simulate a crash between backup and rename
    fs::rename(dir.path().join("words.json"), dir.path().join("words.json.bak")).unwrap();
    fs::write(dir.path().join("lessons.json.tmp"), "{}").unwrap();

    let store = JsonStore::open(dir.path().to_path_buf()).unwrap();
    assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 1);
    assert!(!dir.path().join("words.json.bak").exists());
    assert!(!dir.path().join("lessons.json.tmp").exists());
}
