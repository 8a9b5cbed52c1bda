use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_LESSON;

pub const SCHEMA_VERSION: u32 = 1;
pub const EXPORT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_LESSON
    }
}

fn default_lesson_name() -> String {
    DEFAULT_LESSON.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub english: String,
    #[serde(alias = "ukrainian")]
    pub translation: String,
    #[serde(default)]
    pub learned: bool,
    #[serde(default = "default_lesson_name")]
    pub lesson: String,
}

impl Word {
    pub fn new(english: &str, translation: &str, lesson: &str) -> Self {
        Self {
            english: english.to_string(),
            translation: translation.to_string(),
            learned: false,
            lesson: lesson.to_string(),
        }
    }

    pub fn key(&self) -> WordKey {
        WordKey::new(&self.english, &self.lesson)
    }

    pub fn matches(&self, key: &WordKey) -> bool {
        self.english == key.english && self.lesson == key.lesson
    }
}

/// Identity of a word: the same english term may appear once per lesson.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordKey {
    pub english: String,
    pub lesson: String,
}

impl WordKey {
    pub fn new(english: &str, lesson: &str) -> Self {
        Self {
            english: english.to_string(),
            lesson: lesson.to_string(),
        }
    }
}

impl std::fmt::Display for WordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' in lesson '{}'", self.english, self.lesson)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonsData {
    #[serde(default = "schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordsData {
    #[serde(default = "schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub words: Vec<Word>,
}

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for LessonsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            lessons: Vec::new(),
        }
    }
}

impl Default for WordsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            words: Vec::new(),
        }
    }
}

/// Word counts for one lesson, shown next to lesson names in pickers.
#[derive(Clone, Debug, PartialEq)]
pub struct LessonSummary {
    pub lesson: Lesson,
    pub total: usize,
    pub learned: usize,
}

impl LessonSummary {
    pub fn unlearned(&self) -> usize {
        self.total - self.learned
    }
}

/// Backup bundle holding both collections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub wordtrainer_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub lessons: Vec<Lesson>,
    pub words: Vec<Word>,
}
