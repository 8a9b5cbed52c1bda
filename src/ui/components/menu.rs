use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    AddWord,
    Dictionary,
    Training,
    Learned,
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub action: MenuAction,
    pub label: String,
    pub description: String,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    /// Labels are read from the active locale, so rebuild after switching it.
    pub fn new(theme: &'a Theme) -> Self {
        let item = |key: char, action: MenuAction, label: String, description: String| MenuItem {
            key,
            action,
            label,
            description,
        };
        Self {
            items: vec![
                item('a', MenuAction::AddWord, t!("menu.add_word").to_string(), t!("menu.add_word_desc").to_string()),
                item('d', MenuAction::Dictionary, t!("menu.dictionary").to_string(), t!("menu.dictionary_desc").to_string()),
                item('t', MenuAction::Training, t!("menu.training").to_string(), t!("menu.training_desc").to_string()),
                item('l', MenuAction::Learned, t!("menu.learned").to_string(), t!("menu.learned_desc").to_string()),
                item('s', MenuAction::Settings, t!("menu.settings").to_string(), t!("menu.settings_desc").to_string()),
                item('q', MenuAction::Quit, t!("menu.quit").to_string(), t!("menu.quit_desc").to_string()),
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|i| i.action)
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|i| i.key == key).map(|i| i.action)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "wordtrainer",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("menu.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, (item, row)) in self.items.iter().zip(menu_layout.iter()).enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.hint()),
                )),
            ];
            Paragraph::new(lines).render(*row, buf);
        }
    }
}
