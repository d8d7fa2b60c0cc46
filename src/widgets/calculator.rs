use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Left-to-right arithmetic over `+ - * /`; no precedence, like a pocket
/// calculator.
pub struct CalculatorWidget {
    expr: String,
    result: Option<f64>,
}

impl CalculatorWidget {
    pub fn new() -> Self {
        Self {
            expr: String::new(),
            result: None,
        }
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    fn evaluate(expr: &str) -> Option<f64> {
        let mut acc: Option<f64> = None;
        let mut pending_op = '+';
        let mut number = String::new();
        for ch in expr.chars().chain(std::iter::once('+')) {
            match ch {
                '0'..='9' | '.' => number.push(ch),
                '+' | '-' | '*' | '/' => {
                    if number.is_empty() {
                        // allow a leading minus
                        if ch == '-' && acc.is_none() {
                            number.push('-');
                            continue;
                        }
                        return None;
                    }
                    let value: f64 = number.parse().ok()?;
                    number.clear();
                    acc = Some(match (acc, pending_op) {
                        (None, _) => value,
                        (Some(a), '+') => a + value,
                        (Some(a), '-') => a - value,
                        (Some(a), '*') => a * value,
                        (Some(a), '/') => {
                            if value == 0.0 {
                                return None;
                            }
                            a / value
                        }
                        _ => return None,
                    });
                    pending_op = ch;
                }
                ' ' => {}
                _ => return None,
            }
        }
        acc
    }
}

impl Default for CalculatorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CalculatorWidget {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let result_line = match self.result {
            Some(value) => Line::styled(
                format!("= {value}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            None => Line::from(""),
        };
        let lines = vec![
            Line::from(format!("{}_", self.expr)),
            result_line,
            Line::from(""),
            Line::styled(
                "Enter = eval   c = clear",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match key.code {
            KeyCode::Enter => {
                self.result = Self::evaluate(&self.expr);
                true
            }
            KeyCode::Backspace => {
                self.expr.pop();
                true
            }
            KeyCode::Char('c') if key.modifiers.is_empty() => {
                self.expr.clear();
                self.result = None;
                true
            }
            KeyCode::Char(c)
                if matches!(c, '0'..='9' | '.' | '+' | '-' | '*' | '/' | ' ')
                    && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) =>
            {
                self.expr.push(c);
                true
            }
            _ => false,
        }
    }
}
