use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rust_i18n::t;
use tracing::{info, warn};

use crate::config::{Config, LOCALES};
use crate::session::training::{AnswerOutcome, TrainingSession};
use crate::session::{Direction, SessionError};
use crate::store::json_store::JsonStore;
use crate::store::schema::{Lesson, LessonSummary, Word, WordKey};
use crate::store::{DEFAULT_LESSON, LessonFilter, StoreError};
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    AddWord,
    Dictionary,
    TrainingSelect,
    Training,
    TrainingResult,
    Learned,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    English,
    Translation,
    Lesson,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::English => FormField::Translation,
            FormField::Translation => FormField::Lesson,
            FormField::Lesson => FormField::English,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::English => FormField::Lesson,
            FormField::Translation => FormField::English,
            FormField::Lesson => FormField::Translation,
        }
    }
}

/// Add-word form, also used to edit an existing word when `editing` is set.
pub struct WordForm {
    pub english: LineInput,
    pub translation: LineInput,
    pub lesson: String,
    pub focus: FormField,
    pub editing: Option<WordKey>,
}

impl WordForm {
    fn blank(lesson: &str) -> Self {
        Self {
            english: LineInput::default(),
            translation: LineInput::default(),
            lesson: lesson.to_string(),
            focus: FormField::English,
            editing: None,
        }
    }

    fn for_word(word: &Word) -> Self {
        Self {
            english: LineInput::new(&word.english),
            translation: LineInput::new(&word.translation),
            lesson: word.lesson.clone(),
            focus: FormField::English,
            editing: Some(word.key()),
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut LineInput> {
        match self.focus {
            FormField::English => Some(&mut self.english),
            FormField::Translation => Some(&mut self.translation),
            FormField::Lesson => None,
        }
    }
}

pub enum Popup {
    NewLesson(LineInput),
    RenameLesson { from: String, input: LineInput },
    ConfirmDelete(WordKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    Locale,
    Direction,
    Hints,
}

pub const SETTINGS_ROWS: [SettingsRow; 4] = [
    SettingsRow::Theme,
    SettingsRow::Locale,
    SettingsRow::Direction,
    SettingsRow::Hints,
];

pub fn store_error_message(err: &StoreError) -> String {
    match err {
        StoreError::Conflict(detail) => t!("error.conflict", detail = detail).to_string(),
        StoreError::NotFound(detail) => t!("error.not_found", detail = detail).to_string(),
        other => t!("error.storage", detail = other.to_string()).to_string(),
    }
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: JsonStore,
    pub lessons: Vec<Lesson>,
    pub summaries: Vec<LessonSummary>,
    /// Words shown by the dictionary or learned-words screen.
    pub words: Vec<Word>,
    /// 0 is "all lessons", `i` is `lessons[i - 1]`.
    pub filter_index: usize,
    pub list_selected: usize,
    pub form: WordForm,
    pub form_return: AppScreen,
    pub popup: Option<Popup>,
    pub training_filter_index: usize,
    pub training_direction: Direction,
    pub session: Option<TrainingSession>,
    pub answer: LineInput,
    pub feedback: Option<AnswerOutcome>,
    pub status: Option<StatusMessage>,
    pub settings_selected: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, store: JsonStore, theme: &'static Theme) -> Self {
        Self::with_rng(config, store, theme, SmallRng::from_entropy())
    }

    pub fn with_rng(config: Config, store: JsonStore, theme: &'static Theme, rng: SmallRng) -> Self {
        let training_direction = config.default_direction;
        let mut app = Self {
            screen: AppScreen::Menu,
            menu: Menu::new(theme),
            theme,
            config,
            store,
            lessons: Vec::new(),
            summaries: Vec::new(),
            words: Vec::new(),
            filter_index: 0,
            list_selected: 0,
            form: WordForm::blank(DEFAULT_LESSON),
            form_return: AppScreen::Menu,
            popup: None,
            training_filter_index: 0,
            training_direction,
            session: None,
            answer: LineInput::default(),
            feedback: None,
            status: None,
            settings_selected: 0,
            should_quit: false,
            rng,
        };

        match app.store.ensure_default_lesson() {
            Ok(lessons) => app.lessons = lessons,
            Err(e) => app.report_store_error(&e),
        }
        app.refresh_summaries();
        app
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }

    fn report_store_error(&mut self, err: &StoreError) {
        self.set_status(StatusLevel::Error, store_error_message(err));
    }

    fn refresh_lessons(&mut self) {
        match self.store.list_lessons() {
            Ok(lessons) => self.lessons = lessons,
            Err(e) => self.report_store_error(&e),
        }
        self.filter_index = self.filter_index.min(self.lessons.len());
        self.training_filter_index = self.training_filter_index.min(self.lessons.len());
        self.refresh_summaries();
    }

    fn refresh_summaries(&mut self) {
        match self.store.lesson_summaries() {
            Ok(summaries) => self.summaries = summaries,
            Err(e) => self.report_store_error(&e),
        }
    }

    pub fn filter_at(&self, index: usize) -> LessonFilter {
        match index.checked_sub(1).and_then(|i| self.lessons.get(i)) {
            Some(lesson) => LessonFilter::lesson(&lesson.name),
            None => LessonFilter::All,
        }
    }

    pub fn current_filter(&self) -> LessonFilter {
        self.filter_at(self.filter_index)
    }

    pub fn summary_for(&self, filter: &LessonFilter) -> (usize, usize) {
        self.summaries
            .iter()
            .filter(|s| filter.accepts(&s.lesson.name))
            .fold((0, 0), |(total, learned), s| (total + s.total, learned + s.learned))
    }

    pub fn filter_name(&self, index: usize) -> String {
        match self.filter_at(index).name() {
            Some(name) => name.to_string(),
            None => t!("lessons.all").to_string(),
        }
    }

    /// "Verbs (3)"-style label, counting unlearned or learned words.
    pub fn filter_label(&self, index: usize, learned: bool) -> String {
        let (total, learned_count) = self.summary_for(&self.filter_at(index));
        let count = if learned { learned_count } else { total - learned_count };
        format!("{} ({count})", self.filter_name(index))
    }

    fn cycle_index(index: usize, len: usize, forward: bool) -> usize {
        if len == 0 {
            0
        } else if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        }
    }

    // --- navigation ---

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.popup = None;
        self.session = None;
        self.feedback = None;
    }

    pub fn go_to_add_word(&mut self) {
        self.refresh_lessons();
        let lesson = self.form_default_lesson();
        self.form = WordForm::blank(&lesson);
        self.form_return = AppScreen::Menu;
        self.screen = AppScreen::AddWord;
    }

    /// The filtered lesson, else the first listed one. The default lesson can
    /// be renamed, so its name is only used when no lessons could be read.
    fn form_default_lesson(&self) -> String {
        self.current_filter()
            .name()
            .or_else(|| self.lessons.first().map(|l| l.name.as_str()))
            .unwrap_or(DEFAULT_LESSON)
            .to_string()
    }

    pub fn go_to_dictionary(&mut self) {
        self.screen = AppScreen::Dictionary;
        self.list_selected = 0;
        self.refresh_lessons();
        self.reload_words();
    }

    pub fn go_to_learned(&mut self) {
        self.screen = AppScreen::Learned;
        self.list_selected = 0;
        self.refresh_lessons();
        self.reload_words();
    }

    pub fn go_to_training_select(&mut self) {
        self.screen = AppScreen::TrainingSelect;
        self.session = None;
        self.training_direction = self.config.default_direction;
        self.refresh_lessons();
    }

    pub fn go_to_settings(&mut self) {
        self.screen = AppScreen::Settings;
        self.settings_selected = 0;
    }

    pub fn leave_settings(&mut self) {
        if let Err(e) = self.config.save() {
            warn!(error = %e, "failed to save config");
            self.set_status(StatusLevel::Error, t!("settings.save_failed", detail = e.to_string()).to_string());
        }
        self.go_to_menu();
    }

    // --- word lists ---

    pub fn reload_words(&mut self) {
        let filter = self.current_filter();
        let learned_screen = self.screen == AppScreen::Learned;
        match self.store.load_words(&filter, learned_screen) {
            Ok(words) => self.words = words,
            Err(e) => {
                self.words.clear();
                self.report_store_error(&e);
            }
        }
        self.refresh_summaries();
        self.list_selected = self.list_selected.min(self.words.len().saturating_sub(1));
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        self.filter_index = Self::cycle_index(self.filter_index, self.lessons.len() + 1, forward);
        self.list_selected = 0;
        self.reload_words();
    }

    pub fn list_next(&mut self) {
        if !self.words.is_empty() {
            self.list_selected = (self.list_selected + 1).min(self.words.len() - 1);
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn selected_word(&self) -> Option<&Word> {
        self.words.get(self.list_selected)
    }

    pub fn toggle_selected_learned(&mut self) {
        let Some(key) = self.selected_word().map(Word::key) else {
            return;
        };
        match self.store.toggle_learned(&key) {
            Ok(true) => {
                self.set_status(StatusLevel::Success, t!("status.marked_learned", word = key.english).to_string());
            }
            Ok(false) => {
                self.set_status(StatusLevel::Success, t!("status.returned", word = key.english).to_string());
            }
            Err(e) => self.report_store_error(&e),
        }
        self.reload_words();
    }

    pub fn begin_edit_selected(&mut self) {
        let Some(word) = self.selected_word().cloned() else {
            return;
        };
        self.form = WordForm::for_word(&word);
        self.form_return = self.screen;
        self.screen = AppScreen::AddWord;
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(key) = self.selected_word().map(Word::key) {
            self.popup = Some(Popup::ConfirmDelete(key));
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(Popup::ConfirmDelete(key)) = self.popup.take() else {
            return;
        };
        match self.store.delete_word(&key) {
            Ok(word) => {
                self.set_status(StatusLevel::Success, t!("status.deleted", word = word.english).to_string());
            }
            Err(e) => self.report_store_error(&e),
        }
        self.reload_words();
    }

    pub fn begin_rename_lesson(&mut self) {
        match self.current_filter() {
            LessonFilter::Only(name) => {
                self.popup = Some(Popup::RenameLesson {
                    input: LineInput::new(&name),
                    from: name,
                });
            }
            LessonFilter::All => {
                self.set_status(StatusLevel::Info, t!("status.pick_lesson_to_rename").to_string());
            }
        }
    }

    pub fn submit_rename(&mut self) {
        let Some(Popup::RenameLesson { from, input }) = self.popup.take() else {
            return;
        };
        let to = input.value().trim().to_string();
        if to.is_empty() {
            self.set_status(StatusLevel::Error, t!("status.name_required").to_string());
            self.popup = Some(Popup::RenameLesson { from, input });
            return;
        }
        match self.store.rename_lesson(&from, &to) {
            Ok(()) => {
                info!(from = %from, to = %to, "lesson renamed");
                self.set_status(StatusLevel::Success, t!("status.renamed", from = &from, to = &to).to_string());
                self.refresh_lessons();
                if let Some(pos) = self.lessons.iter().position(|l| l.name == to) {
                    self.filter_index = pos + 1;
                }
            }
            Err(e) => self.report_store_error(&e),
        }
        self.reload_words();
    }

    // --- add / edit form ---

    pub fn form_cycle_lesson(&mut self, forward: bool) {
        if self.lessons.is_empty() {
            return;
        }
        let next = match self.lessons.iter().position(|l| l.name == self.form.lesson) {
            Some(pos) => Self::cycle_index(pos, self.lessons.len(), forward),
            None => 0,
        };
        self.form.lesson = self.lessons[next].name.clone();
    }

    pub fn submit_form(&mut self) {
        if self.form.english.is_blank() || self.form.translation.is_blank() {
            self.set_status(StatusLevel::Error, t!("status.fields_required").to_string());
            return;
        }
        let english = self.form.english.value().trim().to_string();
        let translation = self.form.translation.value().trim().to_string();
        let lesson = self.form.lesson.clone();

        match self.form.editing.clone() {
            Some(key) => match self.store.update_word(&key, &english, &translation, &lesson) {
                Ok(_) => {
                    self.set_status(StatusLevel::Success, t!("status.updated", word = english).to_string());
                    self.screen = self.form_return;
                    self.reload_words();
                }
                Err(e) => self.report_store_error(&e),
            },
            None => match self.store.save_word(&english, &translation, &lesson) {
                Ok(()) => {
                    self.set_status(
                        StatusLevel::Success,
                        t!("status.saved", word = english, lesson = lesson).to_string(),
                    );
                    self.form.english.clear();
                    self.form.translation.clear();
                    self.form.focus = FormField::English;
                    self.refresh_summaries();
                }
                Err(e) => self.report_store_error(&e),
            },
        }
    }

    pub fn cancel_form(&mut self) {
        self.screen = self.form_return;
        if matches!(self.screen, AppScreen::Dictionary | AppScreen::Learned) {
            self.reload_words();
        }
    }

    pub fn begin_new_lesson(&mut self) {
        self.popup = Some(Popup::NewLesson(LineInput::default()));
    }

    pub fn submit_new_lesson(&mut self) {
        let Some(Popup::NewLesson(input)) = self.popup.take() else {
            return;
        };
        let name = input.value().trim().to_string();
        if name.is_empty() {
            self.set_status(StatusLevel::Error, t!("status.name_required").to_string());
            self.popup = Some(Popup::NewLesson(input));
            return;
        }
        match self.store.create_lesson(&name, "") {
            Ok(()) => {
                self.set_status(StatusLevel::Success, t!("status.lesson_created", lesson = &name).to_string());
                self.refresh_lessons();
                self.form.lesson = name;
            }
            Err(e) => self.report_store_error(&e),
        }
    }

    // --- training ---

    pub fn cycle_training_lesson(&mut self, forward: bool) {
        self.training_filter_index =
            Self::cycle_index(self.training_filter_index, self.lessons.len() + 1, forward);
    }

    pub fn toggle_training_direction(&mut self) {
        self.training_direction = self.training_direction.flipped();
    }

    pub fn start_training(&mut self) {
        let filter = self.filter_at(self.training_filter_index);
        let lesson_name = self.filter_name(self.training_filter_index);
        let rng = SmallRng::seed_from_u64(self.rng.next_u64());
        match TrainingSession::start(&self.store, filter, self.training_direction, rng) {
            Ok(session) => {
                info!(words = session.len(), mode = session.mode.as_str(), "training started");
                self.session = Some(session);
                self.answer.clear();
                self.feedback = None;
                self.screen = AppScreen::Training;
            }
            Err(SessionError::EmptySet { .. }) => {
                self.set_status(
                    StatusLevel::Success,
                    t!("training.all_learned", lesson = lesson_name).to_string(),
                );
            }
            Err(SessionError::Store(e)) => self.report_store_error(&e),
            Err(SessionError::Finished) => {}
        }
    }

    pub fn submit_answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit_answer(self.answer.value()) {
            Ok(outcome) => {
                self.feedback = Some(outcome);
                self.answer.clear();
                if let AnswerOutcome::Correct { finished: true, .. } = outcome {
                    let report = session.report();
                    info!(
                        total = report.total,
                        first_try = report.correct_first_try,
                        mistakes = report.mistakes,
                        "training finished"
                    );
                    self.screen = AppScreen::TrainingResult;
                }
            }
            Err(SessionError::Finished) => self.screen = AppScreen::TrainingResult,
            Err(e) => warn!(error = %e, "answer rejected"),
        }
    }

    pub fn restart_training(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restart();
            self.answer.clear();
            self.feedback = None;
            self.screen = AppScreen::Training;
        }
    }

    // --- settings ---

    pub fn settings_cycle(&mut self, forward: bool) {
        match SETTINGS_ROWS[self.settings_selected.min(SETTINGS_ROWS.len() - 1)] {
            SettingsRow::Theme => {
                let themes = Theme::available_themes();
                let pos = themes.iter().position(|t| t == &self.config.theme).unwrap_or(0);
                let next = Self::cycle_index(pos, themes.len(), forward);
                if let Some(name) = themes.get(next) {
                    if let Some(theme) = Theme::load(name) {
                        let theme: &'static Theme = Box::leak(Box::new(theme));
                        self.theme = theme;
                        self.menu.theme = theme;
                        self.config.theme = name.clone();
                    }
                }
            }
            SettingsRow::Locale => {
                let pos = LOCALES
                    .iter()
                    .position(|l| *l == self.config.locale)
                    .unwrap_or(0);
                let next = LOCALES[Self::cycle_index(pos, LOCALES.len(), forward)];
                self.config.locale = next.to_string();
                rust_i18n::set_locale(next);
                let selected = self.menu.selected;
                self.menu = Menu::new(self.theme);
                self.menu.selected = selected;
            }
            SettingsRow::Direction => {
                self.config.default_direction = self.config.default_direction.flipped();
            }
            SettingsRow::Hints => {
                self.config.show_hints = !self.config.show_hints;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().to_path_buf()).unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let app = App::with_rng(Config::default(), store, theme, SmallRng::seed_from_u64(42));
        (app, dir)
    }

    fn fill_form(app: &mut App, english: &str, translation: &str) {
        app.form.english.set(english);
        app.form.translation.set(translation);
    }

    #[test]
    fn test_new_app_creates_default_lesson() {
        let (app, _dir) = make_test_app();
        assert_eq!(app.lessons.len(), 1);
        assert_eq!(app.lessons[0].name, DEFAULT_LESSON);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_add_word_and_duplicate_conflict() {
        let (mut app, _dir) = make_test_app();
        app.go_to_add_word();
        fill_form(&mut app, "cat", "кіт");
        app.submit_form();
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Success);
        assert!(app.form.english.value().is_empty());

        fill_form(&mut app, "cat", "кішка");
        app.submit_form();
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
        assert_eq!(app.form.english.value(), "cat");
    }

    #[test]
    fn test_add_word_after_renaming_default_lesson() {
        let (mut app, _dir) = make_test_app();
        app.store.rename_lesson(DEFAULT_LESSON, "Basics").unwrap();
        app.go_to_add_word();
        assert_eq!(app.form.lesson, "Basics");

        fill_form(&mut app, "cat", "кіт");
        app.submit_form();
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Success);
        let words = app.store.load_words(&LessonFilter::lesson("Basics"), false).unwrap();
        assert_eq!(words.len(), 1);
        assert!(app.store.load_words(&LessonFilter::lesson(DEFAULT_LESSON), false).unwrap().is_empty());
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let (mut app, _dir) = make_test_app();
        app.go_to_add_word();
        fill_form(&mut app, "  ", "кіт");
        app.submit_form();
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
        app.go_to_dictionary();
        assert!(app.words.is_empty());
    }

    #[test]
    fn test_new_lesson_becomes_form_lesson() {
        let (mut app, _dir) = make_test_app();
        app.go_to_add_word();
        app.begin_new_lesson();
        if let Some(Popup::NewLesson(input)) = app.popup.as_mut() {
            input.set("Verbs");
        }
        app.submit_new_lesson();
        assert_eq!(app.form.lesson, "Verbs");
        assert_eq!(app.lessons.len(), 2);

        app.form_cycle_lesson(true);
        assert_eq!(app.form.lesson, DEFAULT_LESSON);
    }

    #[test]
    fn test_dictionary_toggle_moves_word_to_learned() {
        let (mut app, _dir) = make_test_app();
        app.store.save_word("dog", "пес", DEFAULT_LESSON).unwrap();
        app.store.save_word("Cat", "кіт", DEFAULT_LESSON).unwrap();
        app.go_to_dictionary();
        assert_eq!(app.words.len(), 2);
        assert_eq!(app.words[0].english, "Cat");

        app.toggle_selected_learned();
        assert_eq!(app.words.len(), 1);
        assert_eq!(app.words[0].english, "dog");

        app.go_to_learned();
        assert_eq!(app.words.len(), 1);
        assert_eq!(app.words[0].english, "Cat");
        app.toggle_selected_learned();
        assert!(app.words.is_empty());
    }

    #[test]
    fn test_edit_keeps_learned_and_returns() {
        let (mut app, _dir) = make_test_app();
        app.store.save_word("cat", "кіт", DEFAULT_LESSON).unwrap();
        app.go_to_dictionary();
        app.begin_edit_selected();
        assert_eq!(app.screen, AppScreen::AddWord);
        fill_form(&mut app, "cat", "кішка");
        app.submit_form();
        assert_eq!(app.screen, AppScreen::Dictionary);
        assert_eq!(app.words[0].translation, "кішка");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, _dir) = make_test_app();
        app.store.save_word("cat", "кіт", DEFAULT_LESSON).unwrap();
        app.go_to_dictionary();
        app.request_delete_selected();
        assert!(matches!(app.popup, Some(Popup::ConfirmDelete(_))));
        app.popup = None;
        app.reload_words();
        assert_eq!(app.words.len(), 1);

        app.request_delete_selected();
        app.confirm_delete();
        assert!(app.words.is_empty());
    }

    #[test]
    fn test_rename_rejected_on_all_and_applied_on_lesson() {
        let (mut app, _dir) = make_test_app();
        app.store.create_lesson("Food", "").unwrap();
        app.store.save_word("bread", "хліб", "Food").unwrap();
        app.go_to_dictionary();

        app.begin_rename_lesson();
        assert!(app.popup.is_none());
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Info);

        app.cycle_filter(true);
        app.cycle_filter(true);
        assert_eq!(app.current_filter(), LessonFilter::lesson("Food"));
        app.begin_rename_lesson();
        if let Some(Popup::RenameLesson { input, .. }) = app.popup.as_mut() {
            input.set("Meals");
        }
        app.submit_rename();
        assert_eq!(app.current_filter(), LessonFilter::lesson("Meals"));
        assert_eq!(app.words.len(), 1);
        assert_eq!(app.words[0].lesson, "Meals");
    }

    #[test]
    fn test_training_flow_reaches_results() {
        let (mut app, _dir) = make_test_app();
        app.store.save_word("cat", "кіт", DEFAULT_LESSON).unwrap();
        app.go_to_training_select();
        app.start_training();
        assert_eq!(app.screen, AppScreen::Training);

        app.answer.set("wrong");
        app.submit_answer();
        assert_eq!(app.feedback, Some(AnswerOutcome::Incorrect { attempts: 1 }));
        app.answer.set("Кіт");
        app.submit_answer();
        assert_eq!(app.screen, AppScreen::TrainingResult);
        assert_eq!(app.session.as_ref().unwrap().report().mistakes, 1);

        app.restart_training();
        assert_eq!(app.screen, AppScreen::Training);
        assert_eq!(app.session.as_ref().unwrap().cursor(), 0);
    }

    #[test]
    fn test_training_on_learned_lesson_stays_on_select() {
        let (mut app, _dir) = make_test_app();
        app.go_to_training_select();
        app.start_training();
        assert_eq!(app.screen, AppScreen::TrainingSelect);
        assert!(app.session.is_none());
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Success);
    }

    #[test]
    fn test_filter_labels_count_words() {
        let (mut app, _dir) = make_test_app();
        app.store.save_word("cat", "кіт", DEFAULT_LESSON).unwrap();
        app.store.save_word("dog", "пес", DEFAULT_LESSON).unwrap();
        app.store
            .toggle_learned(&WordKey::new("dog", DEFAULT_LESSON))
            .unwrap();
        app.go_to_dictionary();
        assert!(app.filter_label(1, false).ends_with("(1)"));
        assert!(app.filter_label(0, true).ends_with("(1)"));
    }

    #[test]
    fn test_settings_toggle_direction_and_hints() {
        let (mut app, _dir) = make_test_app();
        app.settings_selected = 2;
        app.settings_cycle(true);
        assert_eq!(app.config.default_direction, Direction::NativeToEnglish);
        app.settings_selected = 3;
        app.settings_cycle(true);
        assert!(!app.config.show_hints);
    }

    #[test]
    fn test_storage_fault_becomes_error_status() {
        let (mut app, dir) = make_test_app();
        std::fs::write(dir.path().join("words.json"), "{ not json").unwrap();
        app.go_to_dictionary();
        assert!(app.words.is_empty());
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
    }
}
