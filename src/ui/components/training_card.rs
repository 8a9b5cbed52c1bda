use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::Direction;
use crate::session::training::{AnswerOutcome, TrainingSession};
use crate::store::DEFAULT_LESSON;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub fn direction_label(direction: Direction) -> String {
    match direction {
        Direction::EnglishToNative => t!("direction.english_to_native").to_string(),
        Direction::NativeToEnglish => t!("direction.native_to_english").to_string(),
    }
}

/// The prompt, optional hint and the answer being typed.
pub struct TrainingCard<'a> {
    pub session: &'a TrainingSession,
    pub answer: &'a LineInput,
    pub feedback: Option<AnswerOutcome>,
    pub show_hints: bool,
    pub theme: &'a Theme,
}

impl Widget for TrainingCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", direction_label(self.session.mode)))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(item) = self.session.current_item() else {
            return;
        };

        let mut lines = vec![Line::from("")];
        if item.lesson != DEFAULT_LESSON {
            lines.push(Line::from(Span::styled(
                t!("training.lesson", lesson = item.lesson).to_string(),
                Style::default().fg(colors.hint()),
            )));
        }
        lines.push(Line::from(Span::styled(
            item.prompt.to_string(),
            Style::default()
                .fg(colors.prompt())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        if self.show_hints {
            if let Some(hint) = self.session.hint() {
                lines.push(Line::from(Span::styled(
                    t!("training.hint", hint = hint).to_string(),
                    Style::default().fg(colors.hint()),
                )));
            }
        }

        let (before, cursor, after) = self.answer.render_parts();
        let cursor_style = Style::default()
            .fg(colors.selection_fg())
            .bg(colors.selection_bg());
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.accent())),
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            Span::styled(cursor.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
        ]));
        lines.push(Line::from(""));

        match self.feedback {
            Some(AnswerOutcome::Incorrect { attempts }) => {
                lines.push(Line::from(Span::styled(
                    t!("training.incorrect", attempts = attempts).to_string(),
                    Style::default().fg(colors.error()),
                )));
            }
            Some(AnswerOutcome::Correct { first_try, .. }) => {
                let text = if first_try {
                    t!("training.correct")
                } else {
                    t!("training.correct_late")
                };
                lines.push(Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(colors.success()),
                )));
            }
            None => {}
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
