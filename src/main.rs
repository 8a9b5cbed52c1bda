use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use wordtrainer::app::{App, AppScreen, FormField, Popup, SETTINGS_ROWS};
use wordtrainer::config::{Config, LOCALES};
use wordtrainer::event::{AppEvent, EventHandler};
use wordtrainer::logging;
use wordtrainer::store::json_store::JsonStore;
use wordtrainer::store::schema::ExportData;
use wordtrainer::ui::components::menu::MenuAction;
use wordtrainer::ui::line_input::InputResult;
use wordtrainer::ui::screens;
use wordtrainer::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "wordtrainer", version, about = "Terminal vocabulary trainer with lessons and translation drills")]
struct Cli {
    #[arg(long, help = "Directory holding lessons.json and words.json")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (en, uk)")]
    locale: Option<String>,

    #[arg(long, value_name = "FILE", conflicts_with = "import", help = "Write all lessons and words to FILE and exit")]
    export: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Replace all lessons and words with the contents of FILE and exit")]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(locale) = cli.locale {
        if !LOCALES.contains(&locale.as_str()) {
            bail!("unknown locale '{locale}', expected one of: {}", LOCALES.join(", "));
        }
        config.locale = locale;
    }
    config.normalize(&Theme::available_themes());
    rust_i18n::set_locale(&config.locale);

    let data_dir = config.resolved_data_dir();
    let _log_guard = logging::init_tracing(&data_dir, &config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "wordtrainer starting");

    let store = JsonStore::open(data_dir)?;

    if let Some(path) = cli.export {
        return export_to(&store, &path);
    }
    if let Some(path) = cli.import {
        return import_from(&store, &path);
    }

    let theme: &'static Theme = Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));
    let mut app = App::new(config, store, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "terminal loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn export_to(store: &JsonStore, path: &Path) -> Result<()> {
    let data = store.export_all()?;
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(path, json)?;
    info!(path = %path.display(), words = data.words.len(), "exported");
    println!(
        "Exported {} lessons and {} words to {}",
        data.lessons.len(),
        data.words.len(),
        path.display()
    );
    Ok(())
}

fn import_from(store: &JsonStore, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let data: ExportData = match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(e) => bail!("{} is not a wordtrainer export: {e}", path.display()),
    };
    store.import_all(&data)?;
    info!(path = %path.display(), words = data.words.len(), "imported");
    println!(
        "Imported {} lessons and {} words from {}",
        data.lessons.len(),
        data.words.len(),
        path.display()
    );
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| screens::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            if let Err(e) = app.config.save() {
                error!(error = %e, "failed to save config on exit");
            }
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.status = None;

    if app.popup.is_some() {
        handle_popup_key(app, key);
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::AddWord => handle_form_key(app, key),
        AppScreen::Dictionary | AppScreen::Learned => handle_list_key(app, key),
        AppScreen::TrainingSelect => handle_training_select_key(app, key),
        AppScreen::Training => handle_training_key(app, key),
        AppScreen::TrainingResult => handle_result_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn run_menu_action(app: &mut App, action: MenuAction) {
    match action {
        MenuAction::AddWord => app.go_to_add_word(),
        MenuAction::Dictionary => app.go_to_dictionary(),
        MenuAction::Training => app.go_to_training_select(),
        MenuAction::Learned => app.go_to_learned(),
        MenuAction::Settings => app.go_to_settings(),
        MenuAction::Quit => app.should_quit = true,
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            if let Some(action) = app.menu.selected_action() {
                run_menu_action(app, action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                run_menu_action(app, action);
            }
        }
        _ => {}
    }
}

fn handle_popup_key(app: &mut App, key: KeyEvent) {
    match app.popup.as_mut() {
        Some(Popup::ConfirmDelete(_)) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.popup = None,
            _ => {}
        },
        Some(Popup::NewLesson(input)) => match input.handle(key) {
            InputResult::Submit => app.submit_new_lesson(),
            InputResult::Cancel => app.popup = None,
            InputResult::Continue => {}
        },
        Some(Popup::RenameLesson { input, .. }) => match input.handle(key) {
            InputResult::Submit => app.submit_rename(),
            InputResult::Cancel => app.popup = None,
            InputResult::Continue => {}
        },
        None => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
        app.begin_new_lesson();
        return;
    }

    match key.code {
        KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::Up | KeyCode::BackTab if app.form.focus != FormField::Lesson => {
            app.form.focus = app.form.focus.prev();
        }
        KeyCode::Tab if app.form.focus != FormField::Lesson => {
            app.form.focus = app.form.focus.next();
        }
        _ if app.form.focus == FormField::Lesson => match key.code {
            KeyCode::Tab | KeyCode::Right => app.form_cycle_lesson(true),
            KeyCode::BackTab | KeyCode::Left => app.form_cycle_lesson(false),
            KeyCode::Up => app.form.focus = app.form.focus.prev(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_form(),
            _ => {}
        },
        _ => {
            let Some(input) = app.form.focused_input() else {
                return;
            };
            match input.handle(key) {
                InputResult::Submit => {
                    if app.form.focus == FormField::English {
                        app.form.focus = FormField::Translation;
                    } else {
                        app.submit_form();
                    }
                }
                InputResult::Cancel => app.cancel_form(),
                InputResult::Continue => {}
            }
        }
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    let learned_screen = app.screen == AppScreen::Learned;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Left | KeyCode::Char('h') => app.cycle_filter(false),
        KeyCode::Right => app.cycle_filter(true),
        KeyCode::Char('l') => app.toggle_selected_learned(),
        KeyCode::Char('e') if !learned_screen => app.begin_edit_selected(),
        KeyCode::Char('x') if !learned_screen => app.request_delete_selected(),
        KeyCode::Char('r') if !learned_screen => app.begin_rename_lesson(),
        _ => {}
    }
}

fn handle_training_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => app.cycle_training_lesson(false),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => app.cycle_training_lesson(true),
        KeyCode::Tab | KeyCode::Char('d') => app.toggle_training_direction(),
        KeyCode::Enter => app.start_training(),
        _ => {}
    }
}

fn handle_training_key(app: &mut App, key: KeyEvent) {
    match app.answer.handle(key) {
        InputResult::Submit => app.submit_answer(),
        InputResult::Cancel => app.go_to_training_select(),
        InputResult::Continue => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart_training(),
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => app.go_to_menu(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1).min(SETTINGS_ROWS.len() - 1);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle(true),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle(false),
        _ => {}
    }
}
