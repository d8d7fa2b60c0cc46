use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Scratch notes. Kept entirely in memory; the panel's lifecycle decides how
/// long they live.
pub struct QuickNotesWidget {
    notes: Vec<String>,
    input: String,
}

impl QuickNotesWidget {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            input: String::new(),
        }
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl Default for QuickNotesWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QuickNotesWidget {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut lines: Vec<Line> = Vec::new();
        let cursor = if ctx.focused() { "_" } else { "" };
        lines.push(Line::styled(
            format!("> {}{cursor}", self.input),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        // newest note first, directly under the input line
        let visible = area.height.saturating_sub(1) as usize;
        for note in self.notes.iter().rev().take(visible) {
            lines.push(Line::from(format!("• {note}")));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match key.code {
            KeyCode::Enter => {
                if !self.input.is_empty() {
                    self.notes.push(std::mem::take(&mut self.input));
                }
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.input.push(c);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_and_enter_appends_a_note() {
        let mut w = QuickNotesWidget::new();
        let ctx = ComponentContext::default();
        for c in "milk".chars() {
            assert!(w.handle_event(&key(KeyCode::Char(c)), &ctx));
        }
        w.handle_event(&key(KeyCode::Enter), &ctx);
        assert_eq!(w.notes(), ["milk"]);
        assert!(w.input.is_empty());
    }

    #[test]
    fn enter_with_empty_input_adds_nothing() {
        let mut w = QuickNotesWidget::new();
        let ctx = ComponentContext::default();
        w.handle_event(&key(KeyCode::Enter), &ctx);
        assert!(w.notes().is_empty());
    }

    #[test]
    fn backspace_edits_the_input_line() {
        let mut w = QuickNotesWidget::new();
        let ctx = ComponentContext::default();
        w.handle_event(&key(KeyCode::Char('a')), &ctx);
        w.handle_event(&key(KeyCode::Char('b')), &ctx);
        w.handle_event(&key(KeyCode::Backspace), &ctx);
        assert_eq!(w.input, "a");
    }
}
