use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

// Fixed reference rates; live quotes are outside this widget's remit.
const RATES: [(&str, &str, f64); 4] = [
    ("USD", "EUR", 0.92),
    ("USD", "GBP", 0.79),
    ("EUR", "JPY", 162.40),
    ("USD", "CAD", 1.36),
];

const AMOUNT_STEP: f64 = 10.0;

pub struct CurrencyWidget {
    pair: usize,
    amount: f64,
}

impl CurrencyWidget {
    pub fn new() -> Self {
        Self {
            pair: 0,
            amount: 100.0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    fn converted(&self) -> (&'static str, &'static str, f64) {
        let (from, to, rate) = RATES[self.pair];
        (from, to, self.amount * rate)
    }
}

impl Default for CurrencyWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CurrencyWidget {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (from, to, result) = self.converted();
        let lines = vec![
            Line::from(format!("{:.2} {from}", self.amount)),
            Line::styled(
                format!("= {result:.2} {to}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(
                "↑/↓ pair  ←/→ amount",
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
            KeyCode::Up => {
                self.pair = self.pair.checked_sub(1).unwrap_or(RATES.len() - 1);
                true
            }
            KeyCode::Down => {
                self.pair = (self.pair + 1) % RATES.len();
                true
            }
            KeyCode::Left => {
                self.amount = (self.amount - AMOUNT_STEP).max(0.0);
                true
            }
            KeyCode::Right => {
                self.amount += AMOUNT_STEP;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn amount_adjusts_and_floors_at_zero() {
        let mut w = CurrencyWidget::new();
        let ctx = ComponentContext::default();
        assert!(w.handle_event(&key(KeyCode::Right), &ctx));
        assert_eq!(w.amount(), 110.0);
        for _ in 0..20 {
            w.handle_event(&key(KeyCode::Left), &ctx);
        }
        assert_eq!(w.amount(), 0.0);
    }

    #[test]
    fn pair_selection_wraps_both_ways() {
        let mut w = CurrencyWidget::new();
        let ctx = ComponentContext::default();
        w.handle_event(&key(KeyCode::Up), &ctx);
        assert_eq!(w.pair, RATES.len() - 1);
        w.handle_event(&key(KeyCode::Down), &ctx);
        assert_eq!(w.pair, 0);
    }
}
