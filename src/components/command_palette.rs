//! Keyboard-first command launcher.
//!
//! Open/close is externally controlled; the palette owns its query and the
//! shared selection cursor (keyboard and hover move the same cursor). The
//! cursor is re-clamped on every filter change, so the in-range invariant
//! holds across query edits as well as navigation.

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::commands::{Command, catalog};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

/// Message from the palette to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteIntent {
    Execute(&'static Command),
    Close,
}

pub struct CommandPaletteComponent {
    open: bool,
    query: String,
    selected: usize,
    intents: Vec<PaletteIntent>,
    // geometry from the last render, for pointer hit-testing
    panel_rect: Rect,
    list_origin: (u16, u16),
    visible_rows: usize,
    scroll: usize,
}

impl CommandPaletteComponent {
    pub fn new() -> Self {
        Self {
            open: false,
            query: String::new(),
            selected: 0,
            intents: Vec::new(),
            panel_rect: Rect::default(),
            list_origin: (0, 0),
            visible_rows: 0,
            scroll: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn take_intents(&mut self) -> Vec<PaletteIntent> {
        std::mem::take(&mut self.intents)
    }

    /// The catalog subsequence matching `query` case-insensitively in name
    /// or shortcut label, original order preserved. An empty query matches
    /// everything.
    pub fn filter(query: &str) -> Vec<&'static Command> {
        if query.is_empty() {
            return catalog().iter().collect();
        }
        let query = query.to_lowercase();
        catalog()
            .iter()
            .filter(|command| {
                command.name.to_lowercase().contains(&query)
                    || command
                        .shortcut
                        .is_some_and(|s| s.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn filtered(&self) -> Vec<&'static Command> {
        Self::filter(&self.query)
    }

    fn reclamp(&mut self) {
        let len = self.filtered().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.intents.push(PaletteIntent::Close);
    }

    fn execute_selected(&mut self) {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return;
        }
        let command = filtered[self.selected];
        tracing::debug!(command = command.id, "palette executing command");
        self.intents.push(PaletteIntent::Execute(command));
        self.close();
    }

    /// Handle an event while open. Key events are modal (always consumed);
    /// a click on the backdrop closes without executing.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.open {
            return false;
        }
        match event {
            Event::Key(key) => {
                match key.code {
                    KeyCode::Esc => self.close(),
                    KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                    KeyCode::Down => {
                        let len = self.filtered().len();
                        if len > 0 {
                            self.selected = (self.selected + 1).min(len - 1);
                        }
                    }
                    KeyCode::Enter => self.execute_selected(),
                    KeyCode::Backspace => {
                        self.query.pop();
                        self.reclamp();
                    }
                    KeyCode::Char(c)
                        if key.modifiers.is_empty()
                            || key.modifiers == KeyModifiers::SHIFT =>
                    {
                        self.query.push(c);
                        self.reclamp();
                    }
                    _ => {}
                }
                true
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => false,
        }
    }

    fn row_index_at(&self, column: u16, row: u16) -> Option<usize> {
        let (list_x, list_y) = self.list_origin;
        if column < list_x || row < list_y {
            return None;
        }
        let offset = (row - list_y) as usize;
        if offset >= self.visible_rows {
            return None;
        }
        let index = self.scroll + offset;
        (index < self.filtered().len()).then_some(index)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !rect_contains(self.panel_rect, mouse.column, mouse.row) {
                    // backdrop click: close without executing
                    self.close();
                    return true;
                }
                if let Some(index) = self.row_index_at(mouse.column, mouse.row) {
                    self.selected = index;
                    self.execute_selected();
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
            MouseEventKind::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            MouseEventKind::ScrollDown => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                true
            }
            _ => rect_contains(self.panel_rect, mouse.column, mouse.row),
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.open || area.width < 8 || area.height < 6 {
            return;
        }
        let filtered = self.filtered();

        let width = area.width.saturating_sub(4).min(56).max(20).min(area.width);
        let rows = filtered.len().max(1) as u16;
        let height = (rows + 4).min(16).min(area.height.saturating_sub(2));
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
            .title(" Command Palette ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::overlay_border()))
            .style(Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        if inner.height < 3 {
            return;
        }

        let query_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(theme::overlay_border())),
            Span::raw(self.query.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        frame.render_widget(
            Paragraph::new(query_line),
            Rect {
                x: inner.x,
                y: inner.y,
                width: inner.width,
                height: 1,
            },
        );
        frame.render_widget(
            Paragraph::new(Line::styled(
                "─".repeat(inner.width as usize),
                Style::default().fg(theme::overlay_dim_fg()),
            )),
            Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            },
        );

        self.visible_rows = inner.height.saturating_sub(2) as usize;
        self.list_origin = (inner.x, inner.y + 2);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.visible_rows > 0 && self.selected >= self.scroll + self.visible_rows {
            self.scroll = self.selected + 1 - self.visible_rows;
        }

        if filtered.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "  no matching commands",
                    Style::default().fg(theme::overlay_dim_fg()),
                )),
                Rect {
                    x: inner.x,
                    y: inner.y + 2,
                    width: inner.width,
                    height: 1,
                },
            );
            return;
        }

        for (row, (index, command)) in filtered
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.visible_rows)
            .enumerate()
        {
            let selected = index == self.selected;
            let style = if selected {
                Style::default()
                    .bg(theme::overlay_selected_bg())
                    .fg(theme::overlay_selected_fg())
            } else {
                Style::default().fg(theme::overlay_fg())
            };
            let marker = if selected { "› " } else { "  " };
            let shortcut = command.shortcut.unwrap_or("");
            let name_width = inner.width.saturating_sub(6 + shortcut.len() as u16) as usize;
            let line = Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{} ", command.icon), style),
                Span::styled(format!("{:<name_width$}", command.name), style),
                Span::styled(shortcut, style.add_modifier(Modifier::DIM)),
            ]);
            frame.render_widget(
                Paragraph::new(line),
                Rect {
                    x: inner.x,
                    y: inner.y + 2 + row as u16,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }
}

impl Default for CommandPaletteComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ShellCommand;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(palette: &mut CommandPaletteComponent, text: &str) {
        for c in text.chars() {
            palette.handle_event(&key(KeyCode::Char(c)));
        }
    }

    fn render_into(palette: &mut CommandPaletteComponent, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        palette.render(&mut frame, area);
        buf
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn empty_query_returns_the_full_catalog_in_order() {
        let filtered = CommandPaletteComponent::filter("");
        let ids: Vec<&str> = filtered.iter().map(|c| c.id).collect();
        let catalog_ids: Vec<&str> = catalog().iter().map(|c| c.id).collect();
        assert_eq!(ids, catalog_ids);
    }

    #[test]
    fn query_new_yields_the_three_new_commands_in_order() {
        let names: Vec<&str> = CommandPaletteComponent::filter("new")
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["New Folder", "New File", "New Tab"]);
    }

    #[test]
    fn filter_matches_shortcut_labels_case_insensitively() {
        let ids: Vec<&str> = CommandPaletteComponent::filter("ctrl+t")
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["new-tab"]);
    }

    #[test]
    fn every_match_contains_the_query_and_preserves_order() {
        for query in ["n", "e", "f", "ctrl", "F5", "TAB"] {
            let filtered = CommandPaletteComponent::filter(query);
            let q = query.to_lowercase();
            let mut last_pos = 0;
            for command in filtered {
                assert!(
                    command.name.to_lowercase().contains(&q)
                        || command.shortcut.is_some_and(|s| s.to_lowercase().contains(&q))
                );
                let pos = catalog().iter().position(|c| c.id == command.id).unwrap();
                assert!(pos >= last_pos);
                last_pos = pos;
            }
        }
    }

    #[test]
    fn arrows_clamp_and_never_wrap() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        palette.handle_event(&key(KeyCode::Up));
        assert_eq!(palette.selected(), 0);
        let len = catalog().len();
        for _ in 0..len + 5 {
            palette.handle_event(&key(KeyCode::Down));
        }
        assert_eq!(palette.selected(), len - 1);
    }

    #[test]
    fn selection_reclamps_when_the_filter_shrinks() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        for _ in 0..catalog().len() {
            palette.handle_event(&key(KeyCode::Down));
        }
        assert_eq!(palette.selected(), catalog().len() - 1);
        type_str(&mut palette, "new");
        let len = palette.filtered().len();
        assert_eq!(len, 3);
        assert!(palette.selected() < len);
        // shrink to empty: cursor pins to zero
        type_str(&mut palette, "zzz");
        assert!(palette.filtered().is_empty());
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn enter_executes_exactly_once_then_closes_and_resets() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        type_str(&mut palette, "new");
        palette.handle_event(&key(KeyCode::Down));
        palette.handle_event(&key(KeyCode::Enter));
        let intents = palette.take_intents();
        let executes: Vec<_> = intents
            .iter()
            .filter_map(|i| match i {
                PaletteIntent::Execute(c) => Some(*c),
                PaletteIntent::Close => None,
            })
            .collect();
        assert_eq!(executes.len(), 1);
        assert_eq!(executes[0].action, ShellCommand::NewFile);
        assert!(intents.contains(&PaletteIntent::Close));
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert_eq!(palette.selected(), 0);
        assert!(palette.take_intents().is_empty());
    }

    #[test]
    fn enter_on_an_empty_filter_executes_nothing() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        type_str(&mut palette, "zzzzz");
        palette.handle_event(&key(KeyCode::Enter));
        assert!(palette.take_intents().is_empty());
        assert!(palette.is_open());
    }

    #[test]
    fn escape_is_bound_inside_the_palette() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        type_str(&mut palette, "ref");
        assert!(palette.handle_event(&key(KeyCode::Esc)));
        assert_eq!(palette.take_intents(), vec![PaletteIntent::Close]);
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn hover_moves_the_shared_selection_cursor() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        let _ = render_into(&mut palette, AREA);
        let (x, y) = palette.list_origin;
        let hover = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: x + 2,
            row: y + 3,
            modifiers: KeyModifiers::NONE,
        });
        assert!(palette.handle_event(&hover));
        assert_eq!(palette.selected(), 3);
        // keyboard continues from the hover cursor
        palette.handle_event(&key(KeyCode::Down));
        assert_eq!(palette.selected(), 4);
    }

    #[test]
    fn backdrop_click_closes_without_executing() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        type_str(&mut palette, "new");
        let _ = render_into(&mut palette, AREA);
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 23,
            modifiers: KeyModifiers::NONE,
        });
        assert!(palette.handle_event(&click));
        let intents = palette.take_intents();
        assert_eq!(intents, vec![PaletteIntent::Close]);
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
    }

    #[test]
    fn click_on_a_row_executes_that_command() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        let _ = render_into(&mut palette, AREA);
        let (x, y) = palette.list_origin;
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x + 1,
            row: y + 2,
            modifiers: KeyModifiers::NONE,
        });
        palette.handle_event(&click);
        let intents = palette.take_intents();
        assert!(
            intents
                .iter()
                .any(|i| *i == PaletteIntent::Execute(&catalog()[2]))
        );
    }

    #[test]
    fn selection_invariant_holds_under_random_walks() {
        let mut palette = CommandPaletteComponent::new();
        palette.open();
        let moves = [
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Up,
            KeyCode::Up,
            KeyCode::Down,
        ];
        for (i, code) in moves.iter().cycle().take(50).enumerate() {
            palette.handle_event(&key(*code));
            if i % 7 == 0 {
                palette.handle_event(&key(KeyCode::Char('e')));
            }
            if i % 11 == 0 {
                palette.handle_event(&key(KeyCode::Backspace));
            }
            let len = palette.filtered().len();
            if len > 0 {
                assert!(palette.selected() < len);
            } else {
                assert_eq!(palette.selected(), 0);
            }
        }
    }
}
