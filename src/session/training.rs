use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::session::answer;
use crate::session::result::SessionReport;
use crate::session::{Direction, SessionError};
use crate::store::json_store::JsonStore;
use crate::store::schema::Word;
use crate::store::LessonFilter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingItem {
    pub english: String,
    pub translation: String,
    pub lesson: String,
}

impl From<Word> for TrainingItem {
    fn from(word: Word) -> Self {
        Self {
            english: word.english,
            translation: word.translation,
            lesson: word.lesson,
        }
    }
}

/// The current question, oriented by the session direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub prompt: &'a str,
    pub expected: &'a str,
    pub lesson: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Reporting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { first_try: bool, finished: bool },
    Incorrect { attempts: usize },
}

/// One run through a shuffled set of unlearned words.
///
/// Every item behind the cursor was eventually answered correctly, so
/// `score + mistake_count == cursor` holds after every call.
pub struct TrainingSession {
    pub mode: Direction,
    items: Vec<TrainingItem>,
    cursor: usize,
    attempts: usize,
    score: usize,
    mistake_count: usize,
    rng: SmallRng,
}

impl TrainingSession {
    /// Loads the unlearned words under `filter` and starts drilling them.
    pub fn start(
        store: &JsonStore,
        filter: LessonFilter,
        mode: Direction,
        rng: SmallRng,
    ) -> Result<Self, SessionError> {
        let words = store.load_words(&filter, false)?;
        if words.is_empty() {
            return Err(SessionError::EmptySet {
                lesson: filter.name().unwrap_or("all lessons").to_string(),
            });
        }
        let items = words.into_iter().map(TrainingItem::from).collect();
        Self::new(items, mode, rng)
    }

    pub fn new(
        items: Vec<TrainingItem>,
        mode: Direction,
        rng: SmallRng,
    ) -> Result<Self, SessionError> {
        if items.is_empty() {
            return Err(SessionError::EmptySet {
                lesson: "all lessons".to_string(),
            });
        }
        let mut session = Self {
            mode,
            items,
            cursor: 0,
            attempts: 0,
            score: 0,
            mistake_count: 0,
            rng,
        };
        session.restart();
        debug!(items = session.items.len(), mode = mode.as_str(), "training session started");
        Ok(session)
    }

    /// Reshuffles the same items and starts over.
    pub fn restart(&mut self) {
        self.items.shuffle(&mut self.rng);
        self.cursor = 0;
        self.attempts = 0;
        self.score = 0;
        self.mistake_count = 0;
    }

    pub fn phase(&self) -> Phase {
        if self.cursor >= self.items.len() {
            Phase::Reporting
        } else {
            Phase::Active
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Reporting
    }

    pub fn current_item(&self) -> Option<Prompt<'_>> {
        let item = self.items.get(self.cursor)?;
        let (prompt, expected) = match self.mode {
            Direction::EnglishToNative => (item.english.as_str(), item.translation.as_str()),
            Direction::NativeToEnglish => (item.translation.as_str(), item.english.as_str()),
        };
        Some(Prompt {
            prompt,
            expected,
            lesson: &item.lesson,
        })
    }

    pub fn submit_answer(&mut self, text: &str) -> Result<AnswerOutcome, SessionError> {
        let expected = self.current_item().ok_or(SessionError::Finished)?.expected;
        if !answer::is_match(text, expected) {
            self.attempts += 1;
            return Ok(AnswerOutcome::Incorrect {
                attempts: self.attempts,
            });
        }

        let first_try = self.attempts == 0;
        if first_try {
            self.score += 1;
        } else {
            self.mistake_count += 1;
        }
        self.cursor += 1;
        self.attempts = 0;
        Ok(AnswerOutcome::Correct {
            first_try,
            finished: self.is_complete(),
        })
    }

    /// Leading characters of the expected answer revealed after repeated
    /// misses.
    pub fn hint(&self) -> Option<String> {
        let item = self.current_item()?;
        answer::hint(item.expected, self.attempts)
    }

    pub fn report(&self) -> SessionReport {
        SessionReport::new(self.items.len(), self.score, self.mistake_count)
    }

    pub fn items(&self) -> &[TrainingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn mistake_count(&self) -> usize {
        self.mistake_count
    }

    pub fn progress(&self) -> f64 {
        self.cursor as f64 / self.items.len() as f64
    }

    /// One-based index of the current word and the total, for "Word i of n".
    pub fn position(&self) -> (usize, usize) {
        let total = self.items.len();
        ((self.cursor + 1).min(total), total)
    }
}
