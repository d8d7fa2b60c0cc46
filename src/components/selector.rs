//! Widget picker: the full catalog with a toggle control per entry.
//!
//! The selector holds no catalog state of its own; it renders from the
//! registry reference handed to it and emits toggle intents for the owner
//! to apply.

use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::registry::WidgetRegistry;
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorIntent {
    Toggle(&'static str),
    Close,
}

pub struct WidgetSelectorComponent {
    open: bool,
    selected: usize,
    intents: Vec<SelectorIntent>,
    panel_rect: Rect,
    list_origin: (u16, u16),
    rows: usize,
}

impl WidgetSelectorComponent {
    pub fn new() -> Self {
        Self {
            open: false,
            selected: 0,
            intents: Vec::new(),
            panel_rect: Rect::default(),
            list_origin: (0, 0),
            rows: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn take_intents(&mut self) -> Vec<SelectorIntent> {
        std::mem::take(&mut self.intents)
    }

    fn close(&mut self) {
        self.open = false;
        self.selected = 0;
        self.intents.push(SelectorIntent::Close);
    }

    /// Handle an event while open. `registry` supplies the catalog length
    /// and ids; the selector never mutates it directly.
    pub fn handle_event(&mut self, event: &Event, registry: &WidgetRegistry) -> bool {
        if !self.open {
            return false;
        }
        let len = registry.list().len();
        match event {
            Event::Key(key) => {
                match key.code {
                    KeyCode::Esc => self.close(),
                    KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                    KeyCode::Down => {
                        if len > 0 {
                            self.selected = (self.selected + 1).min(len - 1);
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if let Some(def) = registry.list().get(self.selected) {
                            self.intents.push(SelectorIntent::Toggle(def.id));
                        }
                    }
                    _ => {}
                }
                true
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, registry),
            _ => false,
        }
    }

    fn row_index_at(&self, column: u16, row: u16) -> Option<usize> {
        let (list_x, list_y) = self.list_origin;
        if column < list_x || row < list_y {
            return None;
        }
        let offset = (row - list_y) as usize;
        (offset < self.rows).then_some(offset)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, registry: &WidgetRegistry) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !rect_contains(self.panel_rect, mouse.column, mouse.row) {
                    self.close();
                    return true;
                }
                if let Some(index) = self.row_index_at(mouse.column, mouse.row)
                    && let Some(def) = registry.list().get(index)
                {
                    self.selected = index;
                    self.intents.push(SelectorIntent::Toggle(def.id));
                }
                true
            }
            MouseEventKind::Moved => {
                if let Some(index) = self.row_index_at(mouse.column, mouse.row) {
                    self.selected = index;
                    return true;
                }
                rect_contains(self.panel_rect, mouse.column, mouse.row)
            }
            _ => rect_contains(self.panel_rect, mouse.column, mouse.row),
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, registry: &WidgetRegistry) {
        if !self.open || area.width < 8 || area.height < 6 {
            return;
        }
        let defs = registry.list();
        self.rows = defs.len();

        let width = area.width.saturating_sub(4).min(52).max(24).min(area.width);
        let height = (defs.len() as u16 + 2).min(area.height.saturating_sub(2));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 3;
        let panel = Rect {
            x,
            y,
            width,
            height,
        };
        self.panel_rect = panel;

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(" Widgets ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::overlay_border()))
            .style(Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        self.list_origin = (inner.x, inner.y);

        for (index, def) in defs.iter().enumerate().take(inner.height as usize) {
            let marker = if def.active { "[x]" } else { "[ ]" };
            let style = if index == self.selected {
                Style::default()
                    .bg(theme::overlay_selected_bg())
                    .fg(theme::overlay_selected_fg())
            } else {
                Style::default().fg(theme::overlay_fg())
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker} {:<14}", def.name), style),
                Span::styled(def.description, style.add_modifier(Modifier::DIM)),
            ]);
            frame.render_widget(
                Paragraph::new(line),
                Rect {
                    x: inner.x,
                    y: inner.y + index as u16,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }
}

impl Default for WidgetSelectorComponent {
    fn default() -> Self {
        Self::new()
    }
}
