use crossterm::event::{Event, KeyCode};
use indoc::indoc;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme;
use crate::ui::UiFrame;

const HELP_BODY: &str = indoc! {"
    Ctrl+K        command palette
    Ctrl+W        widget picker
    Ctrl+T        new tab        Tab  switch tab
    Ctrl+N        new file       Ctrl+Shift+N  new folder
    Ctrl+H        toggle hidden  F5   refresh
    Enter         open folder    Backspace  parent folder

    Drag a widget by its title bar; click ✕ to close it.
    Esc leaves a focused widget.

    Esc / Enter / q to close this window.
"};

pub struct HelpOverlayComponent {
    visible: bool,
}

impl HelpOverlayComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.visible {
            return false;
        }
        match event {
            Event::Key(key) => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.visible = false;
                }
                true
            }
            Event::Mouse(_) => true,
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.visible || area.width < 10 || area.height < 6 {
            return;
        }
        let width = area.width.saturating_sub(4).min(60).max(30).min(area.width);
        let height = area.height.saturating_sub(2).min(15);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::overlay_border()))
            .style(Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()));
        let paragraph = Paragraph::new(HELP_BODY)
            .block(block)
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, rect);
    }
}

impl Default for HelpOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}
