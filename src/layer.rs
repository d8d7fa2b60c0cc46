//! The widget layer: one floating panel per active, resolvable definition.
//!
//! Panels paint in registry order on a single flat overlay; there is no
//! raise-to-front. Hit testing walks the paint order backwards so the
//! topmost panel under the pointer wins. A live drag captures every mouse
//! event until release, wherever the pointer goes.

use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::components::{Component, ComponentContext};
use crate::registry::WidgetRegistry;
use crate::ui::UiFrame;
use crate::window::{DefaultDecorator, Point, WidgetWindow, WindowDecorator};

/// Message from the layer to its owner. The layer never mutates the
/// registry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerIntent {
    Close(&'static str),
}

struct MountedWidget {
    id: &'static str,
    window: WidgetWindow,
    body: Box<dyn Component>,
}

pub struct WidgetLayer {
    mounted: Vec<MountedWidget>,
    decorator: Box<dyn WindowDecorator>,
    capture: Option<&'static str>,
    focused: Option<&'static str>,
    mount_seq: usize,
    area: Rect,
    intents: Vec<LayerIntent>,
}

impl WidgetLayer {
    pub fn new() -> Self {
        Self {
            mounted: Vec::new(),
            decorator: Box::new(DefaultDecorator),
            capture: None,
            focused: None,
            mount_seq: 0,
            area: Rect::default(),
            intents: Vec::new(),
        }
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.iter().any(|m| m.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.mounted
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.window.position())
    }

    pub fn focused_id(&self) -> Option<&'static str> {
        self.focused
    }

    fn mounted_mut(&mut self, id: &str) -> Option<&mut MountedWidget> {
        self.mounted.iter_mut().find(|m| m.id == id)
    }

    /// Cascade mount positions so panels do not stack exactly.
    fn next_position(&mut self) -> Point {
        let seq = self.mount_seq;
        self.mount_seq += 1;
        Point {
            x: i32::from(self.area.x) + 4 + (seq % 6) as i32 * 3,
            y: i32::from(self.area.y) + 1 + (seq % 4) as i32 * 2,
        }
    }

    /// Reconcile mounted panels against the registry's active set. Runtime
    /// state (position, body) lives exactly as long as the mount.
    pub fn sync(&mut self, registry: &WidgetRegistry) {
        self.mounted.retain(|m| {
            let keep = registry.is_active(m.id);
            if !keep {
                tracing::debug!(widget = m.id, "unmounted widget");
            }
            keep
        });
        if let Some(id) = self.capture
            && !registry.is_active(id)
        {
            self.capture = None;
        }
        if let Some(id) = self.focused
            && !registry.is_active(id)
        {
            self.focused = None;
        }
        for def in registry.list().iter().filter(|def| def.active) {
            if self.is_mounted(def.id) {
                continue;
            }
            let (width, height) = def.kind.preferred_size();
            let position = self.next_position();
            tracing::debug!(widget = def.id, "mounted widget");
            self.mounted.push(MountedWidget {
                id: def.id,
                window: WidgetWindow::new(def.name, width, Some(height), position),
                body: def.kind.build(),
            });
        }
        // paint order follows registry order, not interaction recency
        self.mounted.sort_by_key(|m| {
            registry
                .list()
                .iter()
                .position(|def| def.id == m.id)
                .unwrap_or(usize::MAX)
        });
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.area = area;
        for mounted in &mut self.mounted {
            if !mounted.window.visible() {
                continue;
            }
            let focused = self.focused == Some(mounted.id);
            let rect = mounted.window.rect();
            self.decorator
                .render_window(frame, rect, mounted.window.title(), focused);
            let inner = self.decorator.inner(rect);
            if inner.width == 0 || inner.height == 0 {
                continue;
            }
            // Bodies draw into their logical size, then composite with
            // clipping so off-screen panels never shift their content.
            let local = Rect {
                x: 0,
                y: 0,
                width: inner.width,
                height: inner.height,
            };
            let mut offscreen = Buffer::empty(local);
            {
                let mut body_frame = UiFrame::from_parts(local, &mut offscreen);
                let ctx = ComponentContext::new(focused);
                mounted.body.render(&mut body_frame, local, &ctx);
            }
            frame.blit_from_signed(&offscreen, inner);
        }
    }

    /// Route a mouse event into the layer. Returns true when a panel (or a
    /// live drag capture) consumed it.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if let Some(id) = self.capture {
            let decorator = &*self.decorator;
            if let Some(m) = self.mounted.iter_mut().find(|m| m.id == id) {
                m.window.handle_mouse(mouse, decorator);
            }
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                self.capture = None;
            }
            return true;
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        // topmost panel under the pointer wins
        let hit = self
            .mounted
            .iter()
            .rev()
            .find(|m| m.window.visible() && m.window.rect().contains(mouse.column, mouse.row))
            .map(|m| m.id);
        let Some(id) = hit else {
            self.focused = None;
            return false;
        };
        self.focused = Some(id);
        let decorator = &*self.decorator;
        if let Some(m) = self.mounted.iter_mut().find(|m| m.id == id) {
            m.window.handle_mouse(mouse, decorator);
            if m.window.is_dragging() {
                self.capture = Some(id);
            }
        }
        self.collect_close_requests();
        true
    }

    /// Route a key event to the focused panel's body, if any. Esc drops
    /// focus back to the shell.
    pub fn handle_key(&mut self, event: &Event) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        if let Event::Key(key) = event
            && key.code == KeyCode::Esc
        {
            self.focused = None;
            return true;
        }
        let ctx = ComponentContext::new(true);
        self.mounted_mut(id)
            .map(|m| m.body.handle_event(event, &ctx))
            .unwrap_or(false)
    }

    fn collect_close_requests(&mut self) {
        for m in &mut self.mounted {
            if m.window.take_close_request() {
                self.intents.push(LayerIntent::Close(m.id));
            }
        }
    }

    pub fn take_intents(&mut self) -> Vec<LayerIntent> {
        self.collect_close_requests();
        std::mem::take(&mut self.intents)
    }
}

impl Default for WidgetLayer {
    fn default() -> Self {
        Self::new()
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

    fn layer_with(registry: &mut WidgetRegistry, ids: &[&str]) -> WidgetLayer {
        let mut layer = WidgetLayer::new();
        layer.area = Rect {
            x: 0,
            y: 1,
            width: 80,
            height: 23,
        };
        for id in ids {
            registry.toggle(id);
        }
        layer.sync(registry);
        layer
    }

    #[test]
    fn sync_mounts_one_panel_per_active_definition() {
        let mut registry = WidgetRegistry::new();
        let mut layer = layer_with(&mut registry, &["currency-widget", "calculator-widget"]);
        assert_eq!(layer.mounted_count(), 2);
        // toggling again unmounts and discards runtime state
        registry.toggle("currency-widget");
        layer.sync(&registry);
        assert_eq!(layer.mounted_count(), 1);
        assert!(!layer.is_mounted("currency-widget"));
    }

    #[test]
    fn remount_does_not_retain_position() {
        let mut registry = WidgetRegistry::new();
        let mut layer = layer_with(&mut registry, &["currency-widget"]);
        let origin = layer.position_of("currency-widget").unwrap();
        // drag the panel somewhere else via its header
        let header = (origin.x as u16 + 2, origin.y as u16 + 1);
        assert!(layer.handle_mouse(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            header.0,
            header.1
        )));
        assert!(layer.handle_mouse(&mouse(
            MouseEventKind::Drag(MouseButton::Left),
            header.0 + 10,
            header.1 + 5
        )));
        assert!(layer.handle_mouse(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            header.0 + 10,
            header.1 + 5
        )));
        let moved = layer.position_of("currency-widget").unwrap();
        assert_ne!(moved, origin);
        // hide then show: a fresh mount, fresh position state
        registry.toggle("currency-widget");
        layer.sync(&registry);
        registry.toggle("currency-widget");
        layer.sync(&registry);
        let remounted = layer.position_of("currency-widget").unwrap();
        assert_ne!(remounted, moved);
    }

    #[test]
    fn drag_capture_survives_pointer_leaving_the_panel() {
        let mut registry = WidgetRegistry::new();
        let mut layer = layer_with(&mut registry, &["currency-widget"]);
        let origin = layer.position_of("currency-widget").unwrap();
        let header = (origin.x as u16 + 2, origin.y as u16 + 1);
        layer.handle_mouse(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            header.0,
            header.1,
        ));
        // move far outside the panel bounds; the capture keeps routing
        assert!(layer.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 79, 22)));
        let dragged = layer.position_of("currency-widget").unwrap();
        assert_ne!(dragged, origin);
        // release outside the panel ends the drag on this exit path too
        assert!(layer.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 79, 22)));
        assert!(layer.capture.is_none());
        assert!(!layer.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 10)));
        assert_eq!(layer.position_of("currency-widget").unwrap(), dragged);
    }

    #[test]
    fn close_click_emits_a_close_intent_without_unmounting() {
        let mut registry = WidgetRegistry::new();
        let mut layer = layer_with(&mut registry, &["currency-widget"]);
        let origin = layer.position_of("currency-widget").unwrap();
        let (width, _) = crate::registry::WidgetKind::Currency.preferred_size();
        let close = (origin.x as u16 + width - 3, origin.y as u16 + 1);
        layer.handle_mouse(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            close.0,
            close.1,
        ));
        assert_eq!(
            layer.take_intents(),
            vec![LayerIntent::Close("currency-widget")]
        );
        // the layer itself holds no opinion: still mounted until the owner
        // applies the intent
        assert!(layer.is_mounted("currency-widget"));
    }

    #[test]
    fn click_outside_every_panel_clears_focus() {
        let mut registry = WidgetRegistry::new();
        let mut layer = layer_with(&mut registry, &["currency-widget"]);
        let origin = layer.position_of("currency-widget").unwrap();
        layer.handle_mouse(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            origin.x as u16 + 2,
            origin.y as u16 + 3,
        ));
        assert_eq!(layer.focused_id(), Some("currency-widget"));
        assert!(!layer.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 79, 22)));
        assert_eq!(layer.focused_id(), None);
    }
}
