use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::FloatRect;
use crate::theme;
use crate::ui::UiFrame;

const CLOSE_GLYPH: &str = "✕";

/// What a header-row cell means to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Close,
    None,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: FloatRect, title: &str, focused: bool);

    fn hit_test(&self, rect: FloatRect, column: u16, row: u16) -> HeaderAction;

    /// The content region inside the chrome.
    fn inner(&self, rect: FloatRect) -> FloatRect;
}

#[derive(Debug)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn header_y(rect: FloatRect) -> i32 {
        rect.y + 1
    }

    fn close_x(rect: FloatRect) -> i32 {
        rect.x + i32::from(rect.width) - 3
    }
}

fn put(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < i32::from(bounds.x)
        || x >= i32::from(bounds.x) + i32::from(bounds.width)
        || y < i32::from(bounds.y)
        || y >= i32::from(bounds.y) + i32::from(bounds.height)
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: FloatRect, title: &str, focused: bool) {
        if rect.width < 3 || rect.height < 3 {
            return;
        }
        let bounds = frame.area();
        let buffer = frame.buffer_mut();

        let header_style = if focused {
            Style::default()
                .bg(theme::decorator_header_bg())
                .fg(theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::decorator_header_inactive_bg())
                .fg(theme::decorator_header_fg())
        };
        let border_style = Style::default().fg(theme::decorator_border());
        let body_style = Style::default()
            .bg(theme::overlay_bg())
            .fg(theme::overlay_fg());

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + i32::from(rect.width) - 1;
        let bottom = rect.y + i32::from(rect.height) - 1;
        let header_y = Self::header_y(rect);
        let close_x = Self::close_x(rect);

        // Body fill so underlying surfaces never show through a panel.
        for y in (header_y + 1)..bottom {
            for x in (left + 1)..right {
                put(buffer, bounds, x, y, " ", body_style);
            }
        }

        // Header background, title, close affordance.
        for x in (left + 1)..right {
            put(buffer, bounds, x, header_y, " ", header_style);
        }
        let header_width = (right - left - 1).max(0) as usize;
        let title_len = title.chars().count();
        if title_len <= header_width {
            let start_x = left + 1 + ((header_width - title_len) / 2) as i32;
            for (idx, ch) in title.chars().enumerate() {
                put(
                    buffer,
                    bounds,
                    start_x + idx as i32,
                    header_y,
                    &ch.to_string(),
                    header_style,
                );
            }
        }
        put(buffer, bounds, close_x, header_y, CLOSE_GLYPH, header_style);

        // Borders.
        for x in left..=right {
            let symbol = if x == left {
                "┌"
            } else if x == right {
                "┐"
            } else {
                "─"
            };
            put(buffer, bounds, x, top, symbol, border_style);
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            put(buffer, bounds, x, bottom, symbol, border_style);
        }
        for y in (top + 1)..bottom {
            put(buffer, bounds, left, y, "│", border_style);
            put(buffer, bounds, right, y, "│", border_style);
        }
    }

    fn hit_test(&self, rect: FloatRect, column: u16, row: u16) -> HeaderAction {
        if rect.width < 3 || rect.height < 3 {
            return HeaderAction::None;
        }
        let col = i32::from(column);
        if i32::from(row) != Self::header_y(rect) {
            return HeaderAction::None;
        }
        let left = rect.x + 1;
        let right = rect.x + i32::from(rect.width) - 2;
        if col < left || col > right {
            return HeaderAction::None;
        }
        if col == Self::close_x(rect) {
            HeaderAction::Close
        } else {
            HeaderAction::Drag
        }
    }

    fn inner(&self, rect: FloatRect) -> FloatRect {
        FloatRect {
            x: rect.x + 1,
            y: rect.y + 2,
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: FloatRect = FloatRect {
        x: 4,
        y: 2,
        width: 20,
        height: 8,
    };

    #[test]
    fn header_row_is_draggable_except_the_close_cell() {
        let decorator = DefaultDecorator;
        assert_eq!(decorator.hit_test(RECT, 6, 3), HeaderAction::Drag);
        assert_eq!(decorator.hit_test(RECT, 21, 3), HeaderAction::Close);
        assert_eq!(decorator.hit_test(RECT, 6, 4), HeaderAction::None);
        // top border row is not a drag handle
        assert_eq!(decorator.hit_test(RECT, 6, 2), HeaderAction::None);
    }

    #[test]
    fn inner_region_excludes_chrome() {
        let decorator = DefaultDecorator;
        let inner = decorator.inner(RECT);
        assert_eq!(
            inner,
            FloatRect {
                x: 5,
                y: 4,
                width: 18,
                height: 5,
            }
        );
    }

    #[test]
    fn render_clips_offscreen_cells() {
        use ratatui::layout::Rect;
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 6,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let decorator = DefaultDecorator;
        // partially off the left edge; must not panic and must draw the
        // visible part
        decorator.render_window(
            &mut frame,
            FloatRect {
                x: -5,
                y: 1,
                width: 12,
                height: 4,
            },
            "t",
            true,
        );
        assert_eq!(buf.cell((6, 1)).unwrap().symbol(), "┐");
    }
}
