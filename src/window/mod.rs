pub mod decorator;
pub mod drag;

use ratatui::prelude::Rect;

pub use decorator::{DefaultDecorator, HeaderAction, WindowDecorator};
pub use drag::{DragController, Point};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Signed floating rectangle: origin may sit off-screen in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let col = i32::from(column);
        let row = i32::from(row);
        col >= self.x
            && col < self.x + i32::from(self.width)
            && row >= self.y
            && row < self.y + i32::from(self.height)
    }

    /// The on-screen part of this rect, if any.
    pub fn visible(&self, bounds: Rect) -> Option<Rect> {
        let bx0 = i32::from(bounds.x);
        let by0 = i32::from(bounds.y);
        let bx1 = bx0 + i32::from(bounds.width);
        let by1 = by0 + i32::from(bounds.height);
        let x0 = self.x.max(bx0);
        let y0 = self.y.max(by0);
        let x1 = (self.x + i32::from(self.width)).min(bx1);
        let y1 = (self.y + i32::from(self.height)).min(by1);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// A floating panel's chrome: title bar, close affordance, and the position
/// state machine. Content is supplied by the owner; the chrome only reports
/// a close request and never decides what closing means.
#[derive(Debug)]
pub struct WidgetWindow {
    title: String,
    width: u16,
    height: u16,
    position: Point,
    visible: bool,
    drag: DragController,
    close_requested: bool,
}

/// Height used when the owner does not specify one.
const DEFAULT_HEIGHT: u16 = 10;

impl WidgetWindow {
    pub fn new(
        title: impl Into<String>,
        width: u16,
        height: Option<u16>,
        initial: Point,
    ) -> Self {
        Self {
            title: title.into(),
            width,
            height: height.unwrap_or(DEFAULT_HEIGHT),
            position: initial,
            visible: true,
            drag: DragController::new(),
            close_requested: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn rect(&self) -> FloatRect {
        FloatRect {
            x: self.position.x,
            y: self.position.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Drain the close request raised by a click on the close affordance.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    /// Handle a mouse event aimed at this window's chrome. Returns true when
    /// the chrome consumed the event; body-area events are left to the owner.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, decorator: &dyn WindowDecorator) -> bool {
        if !self.visible {
            return false;
        }
        let pointer = Point {
            x: i32::from(mouse.column),
            y: i32::from(mouse.row),
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match decorator.hit_test(self.rect(), mouse.column, mouse.row) {
                    HeaderAction::Close => {
                        self.close_requested = true;
                        true
                    }
                    HeaderAction::Drag => {
                        self.drag.press(pointer, self.position);
                        true
                    }
                    HeaderAction::None => false,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(position) = self.drag.motion(pointer) {
                    self.position = position;
                    true
                } else {
                    false
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.is_dragging() {
                    self.drag.release();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn float_rect_contains_and_visibility() {
        let rect = FloatRect {
            x: -3,
            y: 2,
            width: 10,
            height: 4,
        };
        assert!(rect.contains(0, 2));
        assert!(rect.contains(6, 5));
        assert!(!rect.contains(7, 2));
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let visible = rect.visible(bounds).unwrap();
        assert_eq!((visible.x, visible.y), (0, 2));
        assert_eq!((visible.width, visible.height), (7, 4));
    }

    #[test]
    fn fully_offscreen_rect_has_no_visible_part() {
        let rect = FloatRect {
            x: -50,
            y: -50,
            width: 10,
            height: 4,
        };
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        assert!(rect.visible(bounds).is_none());
    }

    #[test]
    fn header_drag_moves_window_and_release_freezes_it() {
        let decorator = DefaultDecorator;
        let mut window = WidgetWindow::new("Notes", 20, Some(8),Point { x: 10, y: 5 });
        // header row sits one cell inside the top border
        assert!(window.handle_mouse(
            &mouse(MouseEventKind::Down(MouseButton::Left), 12, 6),
            &decorator,
        ));
        assert!(window.is_dragging());
        assert!(window.handle_mouse(
            &mouse(MouseEventKind::Drag(MouseButton::Left), 20, 9),
            &decorator,
        ));
        assert_eq!(window.position(), Point { x: 18, y: 8 });
        assert!(window.handle_mouse(
            &mouse(MouseEventKind::Up(MouseButton::Left), 20, 9),
            &decorator,
        ));
        assert!(!window.is_dragging());
        // motion after release must not move the window
        assert!(!window.handle_mouse(
            &mouse(MouseEventKind::Drag(MouseButton::Left), 40, 15),
            &decorator,
        ));
        assert_eq!(window.position(), Point { x: 18, y: 8 });
    }

    #[test]
    fn close_cell_click_raises_a_single_close_request() {
        let decorator = DefaultDecorator;
        let mut window = WidgetWindow::new("Notes", 20, Some(8),Point { x: 0, y: 0 });
        // close affordance occupies the right end of the header row
        assert!(window.handle_mouse(
            &mouse(MouseEventKind::Down(MouseButton::Left), 17, 1),
            &decorator,
        ));
        assert!(window.take_close_request());
        assert!(!window.take_close_request());
    }
}
