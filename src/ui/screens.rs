use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::app::{App, AppScreen, FormField, Popup, SETTINGS_ROWS, SettingsRow, StatusLevel};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::report::ReportView;
use crate::ui::components::training_card::{TrainingCard, direction_label};
use crate::ui::components::word_list::WordList;
use crate::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use crate::ui::line_input::LineInput;

fn hint(keys: &str, label: impl std::fmt::Display) -> String {
    format!("[{keys}] {label}")
}

fn screen_hints(app: &App) -> Vec<String> {
    match app.screen {
        AppScreen::Menu => vec![
            hint("\u{2191}/\u{2193}", t!("hints.move")),
            hint("Enter", t!("hints.open")),
            hint("q", t!("hints.quit")),
        ],
        AppScreen::AddWord => vec![
            hint("\u{2191}/\u{2193}", t!("hints.field")),
            hint("Tab", t!("hints.cycle_lesson")),
            hint("Ctrl-N", t!("hints.new_lesson")),
            hint("Enter", t!("hints.save")),
            hint("Esc", t!("hints.back")),
        ],
        AppScreen::Dictionary => vec![
            hint("\u{2190}/\u{2192}", t!("hints.lesson")),
            hint("l", t!("hints.mark_learned")),
            hint("e", t!("hints.edit")),
            hint("x", t!("hints.delete")),
            hint("r", t!("hints.rename")),
            hint("Esc", t!("hints.back")),
        ],
        AppScreen::Learned => vec![
            hint("\u{2190}/\u{2192}", t!("hints.lesson")),
            hint("l", t!("hints.return_word")),
            hint("Esc", t!("hints.back")),
        ],
        AppScreen::TrainingSelect => vec![
            hint("\u{2190}/\u{2192}", t!("hints.lesson")),
            hint("Tab", t!("hints.direction")),
            hint("Enter", t!("hints.start")),
            hint("Esc", t!("hints.back")),
        ],
        AppScreen::Training => vec![
            hint("Enter", t!("hints.check")),
            hint("Esc", t!("hints.stop")),
        ],
        AppScreen::TrainingResult => vec![
            hint("r", t!("hints.restart")),
            hint("q", t!("hints.menu")),
        ],
        AppScreen::Settings => vec![
            hint("\u{2191}/\u{2193}", t!("hints.move")),
            hint("\u{2190}/\u{2192}", t!("hints.change")),
            hint("Esc", t!("hints.save_back")),
        ],
    }
}

fn screen_title(screen: AppScreen) -> String {
    let title = match screen {
        AppScreen::Menu => t!("menu.subtitle"),
        AppScreen::AddWord => t!("menu.add_word"),
        AppScreen::Dictionary => t!("menu.dictionary"),
        AppScreen::TrainingSelect | AppScreen::Training | AppScreen::TrainingResult => {
            t!("menu.training")
        }
        AppScreen::Learned => t!("menu.learned"),
        AppScreen::Settings => t!("menu.settings"),
    };
    title.to_string()
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg())),
        area,
    );

    let hints = screen_hints(app);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let hint_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16 + 1);

    let header = Line::from(vec![
        Span::styled(
            " wordtrainer ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", screen_title(app.screen)),
            Style::default().fg(colors.accent()),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), layout.header);

    match app.screen {
        AppScreen::Menu => {
            let rect = centered_rect(50, 80, layout.main);
            frame.render_widget(&app.menu, rect);
        }
        AppScreen::AddWord => render_form(frame, app, layout.main),
        AppScreen::Dictionary | AppScreen::Learned => render_word_list(frame, app, layout.main),
        AppScreen::TrainingSelect => render_training_select(frame, app, layout.main),
        AppScreen::Training => render_training(frame, app, layout.main),
        AppScreen::TrainingResult => render_result(frame, app, layout.main),
        AppScreen::Settings => render_settings(frame, app, layout.main),
    }

    render_footer(frame, app, layout.footer, hint_lines);

    if let Some(popup) = app.popup.as_ref() {
        render_popup(frame, app, popup, layout.main);
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect, hint_lines: Vec<String>) {
    let colors = &app.theme.colors;
    let mut lines = Vec::with_capacity(hint_lines.len() + 1);
    lines.push(match app.status.as_ref() {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => colors.accent(),
                StatusLevel::Success => colors.success(),
                StatusLevel::Error => colors.error(),
            };
            Line::from(Span::styled(
                format!("  {}", status.text),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(""),
    });
    lines.extend(
        hint_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.hint())))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn input_line<'a>(input: &'a LineInput, focused: bool, app: &App) -> Vec<Span<'a>> {
    let colors = &app.theme.colors;
    let (before, cursor, after) = input.render_parts();
    let text_style = Style::default().fg(colors.fg());
    let mut spans = vec![Span::styled(before, text_style)];
    if focused {
        let cursor_style = Style::default()
            .fg(colors.selection_fg())
            .bg(colors.selection_bg());
        spans.push(Span::styled(
            cursor.map(String::from).unwrap_or_else(|| " ".to_string()),
            cursor_style,
        ));
    } else if let Some(ch) = cursor {
        spans.push(Span::styled(ch.to_string(), text_style));
    }
    spans.push(Span::styled(after, text_style));
    spans
}

fn field_label(label: String, focused: bool, app: &App) -> Span<'static> {
    let colors = &app.theme.colors;
    let indicator = if focused { " > " } else { "   " };
    let style = if focused {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg())
    };
    Span::styled(format!("{indicator}{label:<14}"), style)
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let form = &app.form;
    let title = if form.editing.is_some() {
        t!("form.edit_title")
    } else {
        t!("form.add_title")
    };

    let rect = centered_rect(60, 50, area);
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut english = vec![field_label(
        t!("form.english").to_string(),
        form.focus == FormField::English,
        app,
    )];
    english.extend(input_line(&form.english, form.focus == FormField::English, app));

    let mut translation = vec![field_label(
        t!("form.translation").to_string(),
        form.focus == FormField::Translation,
        app,
    )];
    translation.extend(input_line(
        &form.translation,
        form.focus == FormField::Translation,
        app,
    ));

    let lesson_focused = form.focus == FormField::Lesson;
    let lesson = vec![
        field_label(t!("form.lesson").to_string(), lesson_focused, app),
        Span::styled(
            format!("< {} >", form.lesson),
            Style::default().fg(if lesson_focused {
                colors.prompt()
            } else {
                colors.hint()
            }),
        ),
    ];

    let lines = vec![
        Line::from(""),
        Line::from(english),
        Line::from(""),
        Line::from(translation),
        Line::from(""),
        Line::from(lesson),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_word_list(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let learned = app.screen == AppScreen::Learned;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let filter_line = Line::from(vec![
        Span::styled(
            format!("  {} ", t!("lessons.label")),
            Style::default().fg(colors.fg()),
        ),
        Span::styled(
            format!("< {} >", app.filter_label(app.filter_index, learned)),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(filter_line), layout[0]);

    let (title, empty_text) = if learned {
        (t!("list.learned_title"), t!("list.learned_empty"))
    } else {
        (t!("list.dictionary_title"), t!("list.dictionary_empty"))
    };
    let list = WordList {
        title: title.to_string(),
        words: &app.words,
        selected: app.list_selected,
        show_lesson: app.current_filter().name().is_none(),
        empty_text: empty_text.to_string(),
        theme: app.theme,
    };
    frame.render_widget(list, layout[1]);
}

fn render_training_select(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let rect = centered_rect(50, 40, area);
    let block = Block::bordered()
        .title(format!(" {} ", t!("training.select_title")))
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let value_style = Style::default()
        .fg(colors.accent())
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            field_label(t!("form.lesson").to_string(), false, app),
            Span::styled(
                format!("< {} >", app.filter_label(app.training_filter_index, false)),
                value_style,
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            field_label(t!("training.direction").to_string(), false, app),
            Span::styled(
                format!("< {} >", direction_label(app.training_direction)),
                value_style,
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_training(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let (index, total) = session.position();
    let caption = t!("training.position", index = index, total = total).to_string();
    frame.render_widget(
        ProgressBar::new(&t!("training.progress"), &caption, session.progress(), app.theme),
        layout[0],
    );

    let card = TrainingCard {
        session,
        answer: &app.answer,
        feedback: app.feedback,
        show_hints: app.config.show_hints,
        theme: app.theme,
    };
    frame.render_widget(card, layout[1]);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let report = session.report();
    let lesson = app.filter_name(app.training_filter_index);
    let rect = centered_rect(50, 60, area);
    frame.render_widget(ReportView::new(&report, &lesson, app.theme), rect);
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let rect = centered_rect(50, 60, area);
    let block = Block::bordered()
        .title(format!(" {} ", t!("menu.settings")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            SETTINGS_ROWS
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (row, rect)) in SETTINGS_ROWS.iter().zip(rows.iter()).enumerate() {
        let (label, value) = match row {
            SettingsRow::Theme => (t!("settings.theme"), app.config.theme.clone()),
            SettingsRow::Locale => (t!("settings.locale"), app.config.locale.clone()),
            SettingsRow::Direction => (
                t!("settings.direction"),
                direction_label(app.config.default_direction),
            ),
            SettingsRow::Hints => (
                t!("settings.hints"),
                if app.config.show_hints {
                    t!("settings.on").to_string()
                } else {
                    t!("settings.off").to_string()
                },
            ),
        };
        let is_selected = i == app.settings_selected;
        let value_style = Style::default().fg(if is_selected {
            colors.prompt()
        } else {
            colors.hint()
        });
        let lines = vec![
            Line::from(field_label(label.to_string(), is_selected, app)),
            Line::from(Span::styled(format!("     < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(*rect, frame.buffer_mut());
    }
}

fn render_popup(frame: &mut Frame, app: &App, popup: &Popup, area: Rect) {
    let colors = &app.theme.colors;
    let rect = centered_rect(40, 20, area);
    frame.render_widget(Clear, rect);

    let (title, lines) = match popup {
        Popup::ConfirmDelete(key) => (
            t!("popup.delete_title").to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", t!("popup.delete_confirm", word = &key.english)),
                    Style::default().fg(colors.warning()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "  [y] / [n]",
                    Style::default().fg(colors.accent()),
                )),
            ],
        ),
        Popup::NewLesson(input) => (
            t!("popup.new_lesson_title").to_string(),
            vec![
                Line::from(""),
                Line::from(
                    std::iter::once(field_label(t!("form.lesson").to_string(), true, app))
                        .chain(input_line(input, true, app))
                        .collect::<Vec<_>>(),
                ),
            ],
        ),
        Popup::RenameLesson { from, input } => (
            t!("popup.rename_title", lesson = from).to_string(),
            vec![
                Line::from(""),
                Line::from(
                    std::iter::once(field_label(t!("popup.new_name").to_string(), true, app))
                        .chain(input_line(input, true, app))
                        .collect::<Vec<_>>(),
                ),
            ],
        ),
    };

    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    frame.render_widget(Paragraph::new(lines), inner);
}
