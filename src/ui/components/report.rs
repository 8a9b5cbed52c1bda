use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::result::SessionReport;
use crate::ui::theme::Theme;

/// Results screen shown once every word in the session is answered.
pub struct ReportView<'a> {
    pub report: &'a SessionReport,
    pub lesson: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a SessionReport, lesson: &'a str, theme: &'a Theme) -> Self {
        Self {
            report,
            lesson,
            theme,
        }
    }
}

impl Widget for ReportView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("report.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let headline = if self.report.is_perfect() {
            t!("report.perfect").to_string()
        } else {
            t!("report.done", lesson = self.lesson).to_string()
        };
        Paragraph::new(Line::from(Span::styled(
            headline,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let label = |text: String| Span::styled(format!("  {text:<16}"), Style::default().fg(colors.fg()));

        Paragraph::new(Line::from(vec![
            label(t!("report.total").to_string()),
            Span::styled(
                self.report.total.to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            label(t!("report.first_try").to_string()),
            Span::styled(
                self.report.correct_first_try.to_string(),
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[2], buf);

        let mistakes_color = if self.report.mistakes == 0 {
            colors.success()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(vec![
            label(t!("report.mistakes").to_string()),
            Span::styled(
                self.report.mistakes.to_string(),
                Style::default().fg(mistakes_color),
            ),
        ]))
        .render(layout[3], buf);

        let acc_color = if self.report.accuracy >= 90.0 {
            colors.success()
        } else if self.report.accuracy >= 70.0 {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(vec![
            label(t!("report.accuracy").to_string()),
            Span::styled(
                format!("{:.1}%", self.report.accuracy),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[4], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("  [r] {}  ", t!("report.restart")),
                Style::default().fg(colors.accent()),
            ),
            Span::styled(
                format!("[q] {}", t!("report.menu")),
                Style::default().fg(colors.accent()),
            ),
        ]))
        .render(layout[6], buf);
    }
}
