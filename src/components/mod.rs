use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod command_palette;
pub mod file_browser;
pub mod help_overlay;
pub mod selector;
pub mod status_bar;

pub use command_palette::{CommandPaletteComponent, PaletteIntent};
pub use file_browser::{BrowserError, FileBrowserComponent};
pub use help_overlay::HelpOverlayComponent;
pub use selector::{SelectorIntent, WidgetSelectorComponent};
pub use status_bar::{Toolbar, ToolbarIntent};

pub use crate::component_context::ComponentContext;

/// Anything that paints into a region and optionally consumes input.
/// Widget bodies and the browser shell implement this; overlays own richer
/// signatures and stand alone.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct DummyComp;
    impl Component for DummyComp {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
    }

    #[test]
    fn default_handle_event_returns_false() {
        let mut d = DummyComp;
        assert!(!d.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            &ComponentContext::default()
        ));
    }
}
