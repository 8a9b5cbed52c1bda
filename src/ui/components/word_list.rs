use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::Word;
use crate::ui::theme::Theme;

/// Scrolling word table used by the dictionary and learned-words screens.
pub struct WordList<'a> {
    pub title: String,
    pub words: &'a [Word],
    pub selected: usize,
    pub show_lesson: bool,
    pub empty_text: String,
    pub theme: &'a Theme,
}

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let half = visible / 2;
    selected.saturating_sub(half).min(total - visible)
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('\u{2026}');
        out
    }
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.words.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", self.empty_text),
                Style::default().fg(colors.hint()),
            )))
            .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lesson_w = if self.show_lesson { (width / 4).min(20) } else { 0 };
        let col_w = width.saturating_sub(lesson_w + 4) / 2;

        let visible = inner.height as usize;
        let offset = scroll_offset(self.selected, visible, self.words.len());

        let lines: Vec<Line> = self
            .words
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, word)| {
                let is_selected = i == self.selected;
                let base = if is_selected {
                    Style::default()
                        .fg(colors.selection_fg())
                        .bg(colors.selection_bg())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                let mut spans = vec![
                    Span::styled(if is_selected { " > " } else { "   " }, base),
                    Span::styled(fit(&word.english, col_w), base),
                    Span::styled(" ", base),
                    Span::styled(fit(&word.translation, col_w), base),
                ];
                if self.show_lesson {
                    let lesson_style = if is_selected { base } else { base.fg(colors.hint()) };
                    spans.push(Span::styled(fit(&word.lesson, lesson_w), lesson_style));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
