//! Toolbar: app title, shell status, and one toggle cell per widget.
//!
//! Clicking a widget cell is one of the two toggle surfaces (the other is
//! the selector); both go through the same intent path so every reader of
//! the registry observes the mutation before the event handler returns.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::registry::WidgetRegistry;
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarIntent {
    Toggle(&'static str),
}

pub struct Toolbar {
    cells: Vec<(Rect, &'static str)>,
    intents: Vec<ToolbarIntent>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            intents: Vec::new(),
        }
    }

    pub fn take_intents(&mut self) -> Vec<ToolbarIntent> {
        std::mem::take(&mut self.intents)
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        for (rect, id) in &self.cells {
            if rect_contains(*rect, mouse.column, mouse.row) {
                self.intents.push(ToolbarIntent::Toggle(id));
                return true;
            }
        }
        false
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        registry: &WidgetRegistry,
        left: &str,
        hint: &str,
    ) {
        self.cells.clear();
        if area.height == 0 || area.width == 0 {
            return;
        }
        let bar_style = Style::default()
            .bg(theme::toolbar_bg())
            .fg(theme::toolbar_fg());
        let active_style = Style::default()
            .bg(theme::toolbar_active_bg())
            .fg(theme::toolbar_active_fg());
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let y = area.y;
        for x in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(bar_style);
            }
        }

        safe_set_string(
            buffer,
            bounds,
            area.x.saturating_add(1),
            y,
            &truncate_to_width(left, area.width.saturating_sub(2) as usize),
            bar_style,
        );

        // widget toggle cells, then the key hint, right-aligned
        let mut right_x = area.x.saturating_add(area.width);
        let hint_width = hint.chars().count() as u16;
        if hint_width + 2 < right_x {
            right_x = right_x.saturating_sub(hint_width + 1);
            safe_set_string(buffer, bounds, right_x, y, hint, bar_style);
            right_x = right_x.saturating_sub(1);
        }
        for def in registry.list().iter().rev() {
            let label = format!("[{}]", def.name.chars().next().unwrap_or('?'));
            let width = label.chars().count() as u16;
            if right_x < area.x.saturating_add(width) {
                break;
            }
            right_x -= width;
            let style = if def.active { active_style } else { bar_style };
            safe_set_string(buffer, bounds, right_x, y, &label, style);
            self.cells.push((
                Rect {
                    x: right_x,
                    y,
                    width,
                    height: 1,
                },
                def.id,
            ));
            right_x = right_x.saturating_sub(1);
        }
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}
