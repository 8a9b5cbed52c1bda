use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, warn};

use crate::store::schema::{
    EXPORT_VERSION, ExportData, Lesson, LessonSummary, LessonsData, SCHEMA_VERSION, Word,
    WordKey, WordsData,
};
use crate::store::{DEFAULT_LESSON, LessonFilter, StoreError, StoreResult};

const LESSONS_FILE: &str = "lessons.json";
const WORDS_FILE: &str = "words.json";
const COLLECTION_FILES: [&str; 2] = [LESSONS_FILE, WORDS_FILE];

/// Lessons and words kept as two JSON documents in one directory.
///
/// Every call reads the documents fresh from disk, so the store holds no
/// state besides its location. Single-document writes go through a `.tmp`
/// file and a rename; writes that touch both documents use a staged commit
/// with `.bak` rollback.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn open_default() -> StoreResult<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordtrainer");
        Self::open(base_dir)
    }

    pub fn open(base_dir: PathBuf) -> StoreResult<Self> {
        fs::create_dir_all(&base_dir).inspect_err(|e| {
            error!(dir = %base_dir.display(), error = %e, "cannot create data directory");
        })?;
        let store = Self { base_dir };
        if store.recover_interrupted_commit() {
            warn!(dir = %store.base_dir.display(), "recovered from an interrupted commit");
        }
        info!(dir = %store.base_dir.display(), "word store opened");
        Ok(store)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// A missing or blank file is an empty collection. A file that exists but
    /// does not parse is an error, never a silent reset.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> StoreResult<T> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> StoreResult<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn read_lessons(&self) -> StoreResult<Vec<Lesson>> {
        Ok(self.load::<LessonsData>(LESSONS_FILE)?.lessons)
    }

    fn read_words(&self) -> StoreResult<Vec<Word>> {
        Ok(self.load::<WordsData>(WORDS_FILE)?.words)
    }

    fn write_lessons(&self, lessons: Vec<Lesson>) -> StoreResult<()> {
        self.save(
            LESSONS_FILE,
            &LessonsData {
                schema_version: SCHEMA_VERSION,
                lessons,
            },
        )
    }

    fn write_words(&self, words: Vec<Word>) -> StoreResult<()> {
        self.save(
            WORDS_FILE,
            &WordsData {
                schema_version: SCHEMA_VERSION,
                words,
            },
        )
    }

    /// All lessons, the default lesson first, the rest oldest first.
    pub fn list_lessons(&self) -> StoreResult<Vec<Lesson>> {
        traced("list_lessons", (|| -> StoreResult<_> {
            let mut lessons = self.read_lessons()?;
            sort_lessons(&mut lessons);
            Ok(lessons)
        })())
    }

    /// Lists lessons, creating the default lesson first if there are none.
    pub fn ensure_default_lesson(&self) -> StoreResult<Vec<Lesson>> {
        traced("ensure_default_lesson", (|| -> StoreResult<_> {
            let mut lessons = self.read_lessons()?;
            if lessons.is_empty() {
                info!(lesson = DEFAULT_LESSON, "no lessons yet, creating the default lesson");
                lessons.push(Lesson::new(DEFAULT_LESSON, ""));
                self.write_lessons(lessons.clone())?;
            }
            sort_lessons(&mut lessons);
            Ok(lessons)
        })())
    }

    /// Words in `filter` whose learned flag equals `include_learned`, ordered
    /// by english (case-insensitive) and then lesson.
    pub fn load_words(&self, filter: &LessonFilter, include_learned: bool) -> StoreResult<Vec<Word>> {
        traced("load_words", (|| -> StoreResult<_> {
            let mut words: Vec<Word> = self
                .read_words()?
                .into_iter()
                .filter(|w| w.learned == include_learned && filter.accepts(&w.lesson))
                .collect();
            words.sort_by(|a, b| {
                a.english
                    .to_lowercase()
                    .cmp(&b.english.to_lowercase())
                    .then_with(|| a.lesson.cmp(&b.lesson))
            });
            Ok(words)
        })())
    }

    pub fn save_word(&self, english: &str, translation: &str, lesson: &str) -> StoreResult<()> {
        traced("save_word", (|| -> StoreResult<_> {
            let mut words = self.read_words()?;
            let key = WordKey::new(english, lesson);
            if words.iter().any(|w| w.matches(&key)) {
                return Err(StoreError::Conflict(key.to_string()));
            }
            words.push(Word::new(english, translation, lesson));
            self.write_words(words)?;
            debug!(english, lesson, "word saved");
            Ok(())
        })())
    }

    pub fn create_lesson(&self, name: &str, description: &str) -> StoreResult<()> {
        traced("create_lesson", (|| -> StoreResult<_> {
            let mut lessons = self.read_lessons()?;
            if lessons.iter().any(|l| l.name == name) {
                return Err(StoreError::Conflict(format!("lesson '{name}'")));
            }
            lessons.push(Lesson::new(name, description));
            self.write_lessons(lessons)?;
            info!(lesson = name, "lesson created");
            Ok(())
        })())
    }

    /// Renames a lesson and moves its words with it. Both documents are
    /// committed together, so no reader sees words under the old name once
    /// this returns `Ok`.
    pub fn rename_lesson(&self, old_name: &str, new_name: &str) -> StoreResult<()> {
        traced("rename_lesson", (|| -> StoreResult<_> {
            if old_name == new_name {
                return Ok(());
            }
            let mut lessons = self.read_lessons()?;
            let Some(pos) = lessons.iter().position(|l| l.name == old_name) else {
                return Err(StoreError::NotFound(format!("lesson '{old_name}'")));
            };
            if lessons.iter().any(|l| l.name == new_name) {
                return Err(StoreError::Conflict(format!("lesson '{new_name}'")));
            }
            lessons[pos].name = new_name.to_string();

            let mut words = self.read_words()?;
            let mut moved = 0usize;
            for word in words.iter_mut().filter(|w| w.lesson == old_name) {
                word.lesson = new_name.to_string();
                moved += 1;
            }

            self.commit(&[
                (
                    LESSONS_FILE,
                    serde_json::to_string_pretty(&LessonsData {
                        schema_version: SCHEMA_VERSION,
                        lessons,
                    })?,
                ),
                (
                    WORDS_FILE,
                    serde_json::to_string_pretty(&WordsData {
                        schema_version: SCHEMA_VERSION,
                        words,
                    })?,
                ),
            ])?;
            info!(from = old_name, to = new_name, words = moved, "lesson renamed");
            Ok(())
        })())
    }

    /// Flips the learned flag and returns the new value.
    pub fn toggle_learned(&self, key: &WordKey) -> StoreResult<bool> {
        traced("toggle_learned", (|| -> StoreResult<_> {
            let mut words = self.read_words()?;
            let word = words
                .iter_mut()
                .find(|w| w.matches(key))
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
            word.learned = !word.learned;
            let learned = word.learned;
            self.write_words(words)?;
            debug!(english = %key.english, lesson = %key.lesson, learned, "learned flag toggled");
            Ok(learned)
        })())
    }

    /// Overwrites english, translation and lesson of the word at `key`. The
    /// learned flag is kept.
    pub fn update_word(
        &self,
        key: &WordKey,
        english: &str,
        translation: &str,
        lesson: &str,
    ) -> StoreResult<Word> {
        traced("update_word", (|| -> StoreResult<_> {
            let mut words = self.read_words()?;
            let idx = words
                .iter()
                .position(|w| w.matches(key))
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

            let new_key = WordKey::new(english, lesson);
            if new_key != *key && words.iter().any(|w| w.matches(&new_key)) {
                return Err(StoreError::Conflict(new_key.to_string()));
            }

            let word = &mut words[idx];
            word.english = english.to_string();
            word.translation = translation.to_string();
            word.lesson = lesson.to_string();
            let updated = word.clone();

            self.write_words(words)?;
            debug!(from = %key, to = %new_key, "word updated");
            Ok(updated)
        })())
    }

    pub fn delete_word(&self, key: &WordKey) -> StoreResult<Word> {
        traced("delete_word", (|| -> StoreResult<_> {
            let mut words = self.read_words()?;
            let idx = words
                .iter()
                .position(|w| w.matches(key))
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
            let removed = words.remove(idx);
            self.write_words(words)?;
            info!(english = %key.english, lesson = %key.lesson, "word deleted");
            Ok(removed)
        })())
    }

    /// Replaces the whole word collection in a single write.
    pub fn replace_all_words(&self, words: Vec<Word>) -> StoreResult<()> {
        traced("replace_all_words", (|| -> StoreResult<_> {
            ensure_unique_keys(&words)?;
            let count = words.len();
            self.write_words(words)?;
            info!(words = count, "word collection replaced");
            Ok(())
        })())
    }

    /// Word counts per lesson, in `list_lessons` order.
    pub fn lesson_summaries(&self) -> StoreResult<Vec<LessonSummary>> {
        traced("lesson_summaries", (|| -> StoreResult<_> {
            let mut lessons = self.read_lessons()?;
            sort_lessons(&mut lessons);
            let words = self.read_words()?;
            Ok(lessons
                .into_iter()
                .map(|lesson| {
                    let in_lesson = words.iter().filter(|w| w.lesson == lesson.name);
                    let (total, learned) =
                        in_lesson.fold((0, 0), |(t, l), w| (t + 1, l + usize::from(w.learned)));
                    LessonSummary {
                        lesson,
                        total,
                        learned,
                    }
                })
                .collect())
        })())
    }

    pub fn export_all(&self) -> StoreResult<ExportData> {
        traced("export_all", (|| -> StoreResult<_> {
            let mut lessons = self.read_lessons()?;
            sort_lessons(&mut lessons);
            Ok(ExportData {
                wordtrainer_export_version: EXPORT_VERSION,
                exported_at: Utc::now(),
                lessons,
                words: self.read_words()?,
            })
        })())
    }

    /// Replaces both collections with the contents of an export bundle.
    pub fn import_all(&self, data: &ExportData) -> StoreResult<()> {
        traced("import_all", (|| -> StoreResult<_> {
            if data.wordtrainer_export_version != EXPORT_VERSION {
                return Err(StoreError::Unsupported(format!(
                    "export version {} (expected {})",
                    data.wordtrainer_export_version, EXPORT_VERSION
                )));
            }
            ensure_unique_keys(&data.words)?;
            let mut names = HashSet::new();
            for lesson in &data.lessons {
                if !names.insert(lesson.name.as_str()) {
                    return Err(StoreError::Conflict(format!("lesson '{}'", lesson.name)));
                }
            }

            self.commit(&[
                (
                    LESSONS_FILE,
                    serde_json::to_string_pretty(&LessonsData {
                        schema_version: SCHEMA_VERSION,
                        lessons: data.lessons.clone(),
                    })?,
                ),
                (
                    WORDS_FILE,
                    serde_json::to_string_pretty(&WordsData {
                        schema_version: SCHEMA_VERSION,
                        words: data.words.clone(),
                    })?,
                ),
            ])?;
            info!(
                lessons = data.lessons.len(),
                words = data.words.len(),
                "import committed"
            );
            Ok(())
        })())
    }

    /// Two-phase commit over several documents.
    ///
    /// Stage phase: write every document to `.json.tmp`. If any write fails,
    /// remove the staged files and bail.
    /// Commit phase: for each document, move the original to `.json.bak`, then
    /// the `.tmp` into place. On failure, restore the `.bak` files and remove
    /// the leftovers. After success, delete the `.bak` files.
    fn commit(&self, files: &[(&str, String)]) -> StoreResult<()> {
        let mut staged: Vec<PathBuf> = Vec::new();
        for (name, json) in files {
            let tmp_path = self.file_path(name).with_extension("json.tmp");
            match (|| -> io::Result<()> {
                let mut file = fs::File::create(&tmp_path)?;
                file.write_all(json.as_bytes())?;
                file.sync_all()?;
                Ok(())
            })() {
                Ok(()) => staged.push(tmp_path),
                Err(e) => {
                    for tmp in &staged {
                        let _ = fs::remove_file(tmp);
                    }
                    let _ = fs::remove_file(&tmp_path);
                    return Err(commit_error("staging", e));
                }
            }
        }

        // (final_path, bak_path, had_original) so rollback can restore absence
        let mut committed: Vec<(PathBuf, PathBuf, bool)> = Vec::new();
        for (i, (name, _)) in files.iter().enumerate() {
            let final_path = self.file_path(name);
            let bak_path = final_path.with_extension("json.bak");
            let had_original = final_path.exists();

            if had_original && let Err(e) = fs::rename(&final_path, &bak_path) {
                rollback(&committed);
                for tmp in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err(commit_error("backup", e));
            }

            if let Err(e) = fs::rename(&staged[i], &final_path) {
                if had_original && bak_path.exists() {
                    let _ = fs::rename(&bak_path, &final_path);
                }
                rollback(&committed);
                for tmp in &staged[i..] {
                    let _ = fs::remove_file(tmp);
                }
                return Err(commit_error("rename", e));
            }

            committed.push((final_path, bak_path, had_original));
        }

        for (_, bak_path, had_original) in &committed {
            if *had_original {
                let _ = fs::remove_file(bak_path);
            }
        }
        Ok(())
    }

    /// Cleans up after a commit that was cut short. A `.bak` whose document is
    /// missing is moved back into place; other `.bak` and `.tmp` files are
    /// removed. Returns true if anything was found.
    pub fn recover_interrupted_commit(&self) -> bool {
        let mut found = false;
        for name in COLLECTION_FILES {
            let final_path = self.file_path(name);
            let bak_path = final_path.with_extension("json.bak");
            let tmp_path = final_path.with_extension("json.tmp");
            if bak_path.exists() {
                found = true;
                if final_path.exists() {
                    let _ = fs::remove_file(&bak_path);
                } else {
                    let _ = fs::rename(&bak_path, &final_path);
                }
            }
            if tmp_path.exists() {
                found = true;
                let _ = fs::remove_file(&tmp_path);
            }
        }
        found
    }
}

fn rollback(committed: &[(PathBuf, PathBuf, bool)]) {
    for (final_path, bak_path, had_original) in committed {
        if *had_original {
            let _ = fs::rename(bak_path, final_path);
        } else {
            let _ = fs::remove_file(final_path);
        }
    }
}

fn commit_error(phase: &str, e: io::Error) -> StoreError {
    StoreError::Io(io::Error::new(
        e.kind(),
        format!("commit failed during {phase}: {e}"),
    ))
}

fn sort_lessons(lessons: &mut [Lesson]) {
    lessons.sort_by(|a, b| {
        b.is_default()
            .cmp(&a.is_default())
            .then(a.created_at.cmp(&b.created_at))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn ensure_unique_keys(words: &[Word]) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for word in words {
        if !seen.insert(word.key()) {
            return Err(StoreError::Conflict(word.key().to_string()));
        }
    }
    Ok(())
}

/// Logs a failed store call at a level matching its kind.
fn traced<T>(op: &'static str, result: StoreResult<T>) -> StoreResult<T> {
    if let Err(e) = &result {
        if e.is_storage_fault() {
            error!(op, error = %e, "storage fault");
        } else {
            debug!(op, error = %e, "store call rejected");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ErrorKind;
    use chrono::Duration;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_reads_as_empty() {
        let (_dir, store) = make_test_store();
        assert!(store.list_lessons().unwrap().is_empty());
        assert!(store.load_words(&LessonFilter::All, false).unwrap().is_empty());
        assert!(store.load_words(&LessonFilter::All, true).unwrap().is_empty());
    }

    #[test]
    fn test_ensure_default_lesson_creates_once() {
        let (_dir, store) = make_test_store();
        let lessons = store.ensure_default_lesson().unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].name, DEFAULT_LESSON);

        store.create_lesson("Verbs", "").unwrap();
        let lessons = store.ensure_default_lesson().unwrap();
        assert_eq!(lessons.len(), 2);
    }

    #[test]
    fn test_default_lesson_sorts_first_then_by_creation() {
        let (_dir, store) = make_test_store();
        let now = Utc::now();
        let mut older = Lesson::new("Older", "");
        older.created_at = now - Duration::days(2);
        let mut newer = Lesson::new("Newer", "");
        newer.created_at = now - Duration::days(1);
        let mut main = Lesson::new(DEFAULT_LESSON, "");
        main.created_at = now;
        store.write_lessons(vec![newer, main, older]).unwrap();

        let names: Vec<String> = store
            .list_lessons()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Main", "Older", "Newer"]);
    }

    #[test]
    fn test_save_word_rejects_duplicate_in_same_lesson_only() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        let err = store.save_word("cat", "кішка", "Main").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        store.save_word("cat", "кіт", "Animals").unwrap();
        assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 2);
    }

    #[test]
    fn test_load_words_filters_lesson_and_learned() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.save_word("run", "бігти", "Verbs").unwrap();
        store.save_word("Apple", "яблуко", "Main").unwrap();
        store.toggle_learned(&WordKey::new("cat", "Main")).unwrap();

        let main = store.load_words(&LessonFilter::lesson("Main"), false).unwrap();
        assert_eq!(main.len(), 1);
        assert_eq!(main[0].english, "Apple");

        let learned = store.load_words(&LessonFilter::All, true).unwrap();
        assert_eq!(learned.len(), 1);
        assert!(learned[0].learned);

        let all: Vec<String> = store
            .load_words(&LessonFilter::All, false)
            .unwrap()
            .into_iter()
            .map(|w| w.english)
            .collect();
        assert_eq!(all, vec!["Apple", "run"]);
    }

    #[test]
    fn test_create_lesson_conflict_is_case_sensitive() {
        let (_dir, store) = make_test_store();
        store.create_lesson("Verbs", "action words").unwrap();
        assert_eq!(
            store.create_lesson("Verbs", "").unwrap_err().kind(),
            ErrorKind::Conflict
        );
        store.create_lesson("verbs", "").unwrap();
        let verbs = store.list_lessons().unwrap();
        assert_eq!(verbs[0].description, "action words");
    }

    #[test]
    fn test_rename_lesson_cascades_to_words() {
        let (_dir, store) = make_test_store();
        store.create_lesson("Animals", "").unwrap();
        store.save_word("cat", "кіт", "Animals").unwrap();
        store.save_word("dog", "пес", "Animals").unwrap();
        store.save_word("run", "бігти", "Main").unwrap();

        store.rename_lesson("Animals", "Pets").unwrap();

        assert!(store.load_words(&LessonFilter::lesson("Animals"), false).unwrap().is_empty());
        let pets = store.load_words(&LessonFilter::lesson("Pets"), false).unwrap();
        assert_eq!(pets.len(), 2);
        assert!(store.list_lessons().unwrap().iter().any(|l| l.name == "Pets"));
        assert_eq!(store.load_words(&LessonFilter::lesson("Main"), false).unwrap().len(), 1);
        assert!(!store.file_path("words.json.bak").exists());
        assert!(!store.file_path("lessons.json.tmp").exists());
    }

    #[test]
    fn test_rename_lesson_rejections() {
        let (_dir, store) = make_test_store();
        store.create_lesson("A", "").unwrap();
        store.create_lesson("B", "").unwrap();
        store.rename_lesson("A", "A").unwrap();
        assert_eq!(store.rename_lesson("A", "B").unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(store.rename_lesson("Z", "Y").unwrap_err().kind(), ErrorKind::NotFound);
        // a missing source wins over a taken target
        assert_eq!(store.rename_lesson("Z", "B").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_toggle_learned_is_keyed_by_lesson() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.save_word("cat", "кіт", "Animals").unwrap();

        assert!(store.toggle_learned(&WordKey::new("cat", "Animals")).unwrap());
        let learned = store.load_words(&LessonFilter::All, true).unwrap();
        assert_eq!(learned.len(), 1);
        assert_eq!(learned[0].lesson, "Animals");

        assert_eq!(
            store.toggle_learned(&WordKey::new("bird", "Main")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_update_word_keeps_learned_and_checks_conflicts() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.save_word("dog", "пес", "Main").unwrap();
        let cat = WordKey::new("cat", "Main");
        store.toggle_learned(&cat).unwrap();

        let err = store.update_word(&cat, "dog", "собака", "Main").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let updated = store.update_word(&cat, "kitten", "кошеня", "Animals").unwrap();
        assert!(updated.learned);
        assert_eq!(updated.lesson, "Animals");

        let learned = store.load_words(&LessonFilter::All, true).unwrap();
        assert_eq!(learned, vec![updated]);
        assert_eq!(
            store.update_word(&cat, "x", "y", "Main").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_update_word_same_key_changes_translation() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        let cat = WordKey::new("cat", "Main");
        store.update_word(&cat, "cat", "кішка", "Main").unwrap();
        let words = store.load_words(&LessonFilter::All, false).unwrap();
        assert_eq!(words[0].translation, "кішка");
    }

    #[test]
    fn test_delete_word_is_targeted() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.save_word("cat", "кіт", "Animals").unwrap();
        let removed = store.delete_word(&WordKey::new("cat", "Main")).unwrap();
        assert_eq!(removed.lesson, "Main");
        let rest = store.load_words(&LessonFilter::All, false).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].lesson, "Animals");
        assert_eq!(
            store.delete_word(&WordKey::new("cat", "Main")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_replace_all_words_rejects_duplicate_keys() {
        let (_dir, store) = make_test_store();
        store.save_word("old", "старий", "Main").unwrap();
        let dup = vec![Word::new("a", "б", "Main"), Word::new("a", "в", "Main")];
        assert_eq!(store.replace_all_words(dup).unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 1);

        store
            .replace_all_words(vec![Word::new("new", "новий", "Main")])
            .unwrap();
        let words = store.load_words(&LessonFilter::All, false).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].english, "new");
    }

    #[test]
    fn test_corrupt_document_is_a_storage_fault() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(WORDS_FILE), "{ not json").unwrap();
        let err = store.load_words(&LessonFilter::All, false).unwrap_err();
        assert!(err.is_storage_fault());
        // the broken file must not be overwritten by a later save
        assert!(store.save_word("cat", "кіт", "Main").unwrap_err().is_storage_fault());
        assert_eq!(
            fs::read_to_string(store.file_path(WORDS_FILE)).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_lesson_summaries_count_words() {
        let (_dir, store) = make_test_store();
        store.ensure_default_lesson().unwrap();
        store.create_lesson("Verbs", "").unwrap();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.save_word("dog", "пес", "Main").unwrap();
        store.toggle_learned(&WordKey::new("dog", "Main")).unwrap();

        let summaries = store.lesson_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].lesson.name, "Main");
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[0].learned, 1);
        assert_eq!(summaries[0].unlearned(), 1);
        assert_eq!(summaries[1].total, 0);
    }

    #[test]
    fn test_round_trip_export_import() {
        let (_dir, store) = make_test_store();
        store.ensure_default_lesson().unwrap();
        store.save_word("cat", "кіт", "Main").unwrap();
        store.toggle_learned(&WordKey::new("cat", "Main")).unwrap();
        let export = store.export_all().unwrap();
        assert_eq!(export.wordtrainer_export_version, EXPORT_VERSION);

        let (_dir2, store2) = make_test_store();
        store2.import_all(&export).unwrap();
        assert_eq!(store2.list_lessons().unwrap(), export.lessons);
        assert_eq!(store2.load_words(&LessonFilter::All, true).unwrap(), export.words);
    }

    #[test]
    fn test_import_version_rejection() {
        let (_dir, store) = make_test_store();
        let mut export = store.export_all().unwrap();
        export.wordtrainer_export_version = 99;
        let err = store.import_all(&export).unwrap_err();
        assert!(err.is_storage_fault());
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_import_staging_failure_preserves_originals() {
        let (dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        let original = fs::read_to_string(store.file_path(WORDS_FILE)).unwrap();

        let bad_dir = dir.path().join("nonexistent_subdir");
        let bad_store = JsonStore {
            base_dir: bad_dir.clone(),
        };
        let export = store.export_all().unwrap();
        let err = bad_store.import_all(&export).unwrap_err();
        assert!(err.to_string().contains("commit failed during staging"));
        assert!(!bad_dir.exists());

        assert_eq!(fs::read_to_string(store.file_path(WORDS_FILE)).unwrap(), original);
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_recover_restores_missing_document_from_bak() {
        let (_dir, store) = make_test_store();
        store.save_word("cat", "кіт", "Main").unwrap();
        fs::rename(store.file_path(WORDS_FILE), store.file_path("words.json.bak")).unwrap();
        fs::write(store.file_path("lessons.json.bak"), "{}").unwrap();
        fs::write(store.file_path("lessons.json"), "{}").unwrap();

        assert!(store.recover_interrupted_commit());
        assert!(!store.file_path("words.json.bak").exists());
        assert!(!store.file_path("lessons.json.bak").exists());
        assert_eq!(store.load_words(&LessonFilter::All, false).unwrap().len(), 1);
        assert!(!store.recover_interrupted_commit());
    }
}
