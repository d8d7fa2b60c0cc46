//! The desktop app: owns the registry and every surface, routes input, and
//! is the single consumer of intents.
//!
//! Routing order per event: help overlay, then palette, then selector (each
//! modal while open), then global key chords, then the widget layer, then
//! the toolbar, then the browser shell. All drained intents are applied
//! before the handler returns, so every surface observes the same registry
//! state within one event.

use std::path::PathBuf;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::commands::ShellCommand;
use crate::components::{
    CommandPaletteComponent, ComponentContext, Component, FileBrowserComponent,
    HelpOverlayComponent, PaletteIntent, SelectorIntent, Toolbar, ToolbarIntent,
    WidgetSelectorComponent,
};
use crate::keybindings::{Action, KeyBindings};
use crate::layer::{LayerIntent, WidgetLayer};
use crate::registry::WidgetRegistry;
use crate::ui::UiFrame;

pub struct DesktopApp {
    registry: WidgetRegistry,
    layer: WidgetLayer,
    palette: CommandPaletteComponent,
    selector: WidgetSelectorComponent,
    help: HelpOverlayComponent,
    browser: FileBrowserComponent,
    toolbar: Toolbar,
    bindings: KeyBindings,
    status: Option<String>,
    should_quit: bool,
}

impl DesktopApp {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            registry: WidgetRegistry::new(),
            layer: WidgetLayer::new(),
            palette: CommandPaletteComponent::new(),
            selector: WidgetSelectorComponent::new(),
            help: HelpOverlayComponent::new(),
            browser: FileBrowserComponent::new(dir),
            toolbar: Toolbar::new(),
            bindings: KeyBindings::default(),
            status: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn layer(&self) -> &WidgetLayer {
        &self.layer
    }

    pub fn palette(&self) -> &CommandPaletteComponent {
        &self.palette
    }

    pub fn selector(&self) -> &WidgetSelectorComponent {
        &self.selector
    }

    pub fn browser(&self) -> &FileBrowserComponent {
        &self.browser
    }

    pub fn help_visible(&self) -> bool {
        self.help.visible()
    }

    pub fn handle_event(&mut self, event: &Event) {
        self.dispatch(event);
        self.apply_intents();
    }

    fn dispatch(&mut self, event: &Event) {
        if self.help.visible() {
            self.help.handle_event(event);
            return;
        }
        if self.palette.is_open() {
            self.palette.handle_event(event);
            return;
        }
        if self.selector.is_open() {
            self.selector.handle_event(event, &self.registry);
            return;
        }
        match event {
            Event::Key(key) => {
                if let Some(action) = self.bindings.action_for_key(key)
                    && Self::is_global(action)
                {
                    self.apply_action(action);
                    return;
                }
                // focused widget body gets plain keys before the shell
                if self.layer.handle_key(event) {
                    return;
                }
                let ctx = ComponentContext::new(true);
                self.browser.handle_event(event, &ctx);
            }
            Event::Mouse(mouse) => {
                if self.layer.handle_mouse(mouse) {
                    return;
                }
                let _ = self.toolbar.handle_mouse(mouse);
            }
            _ => {}
        }
    }

    /// Plain navigation keys belong to whichever surface has focus; chords
    /// and function keys act globally.
    fn is_global(action: Action) -> bool {
        !matches!(
            action,
            Action::MenuUp
                | Action::MenuDown
                | Action::MenuSelect
                | Action::ToggleSelection
                | Action::BrowseParent
                | Action::NextTab
        )
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::OpenPalette => self.palette.open(),
            Action::OpenWidgetPicker => self.selector.open(),
            Action::OpenHelp => self.help.show(),
            Action::NewFolder => self.browser.create_folder(),
            Action::NewFile => self.browser.create_file(),
            Action::NewTab => self.browser.new_tab(),
            Action::ToggleHidden => self.browser.toggle_hidden(),
            Action::Refresh => self.browser.refresh(),
            Action::MenuUp
            | Action::MenuDown
            | Action::MenuSelect
            | Action::ToggleSelection
            | Action::BrowseParent
            | Action::NextTab => {}
        }
    }

    fn apply_command(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::NewFolder => self.browser.create_folder(),
            ShellCommand::NewFile => self.browser.create_file(),
            ShellCommand::NewTab => self.browser.new_tab(),
            ShellCommand::ToggleHidden => self.browser.toggle_hidden(),
            ShellCommand::Refresh => self.browser.refresh(),
            ShellCommand::OpenWidgetPicker => self.selector.open(),
            ShellCommand::GoHome => self.browser.go_home(),
            ShellCommand::OpenHelp => self.help.show(),
            ShellCommand::ToggleCalculator => self.registry.toggle("calculator-widget"),
            ShellCommand::Quit => self.should_quit = true,
        }
    }

    fn apply_intents(&mut self) {
        for intent in self.palette.take_intents() {
            match intent {
                PaletteIntent::Execute(command) => self.apply_command(command.action),
                PaletteIntent::Close => {}
            }
        }
        for intent in self.selector.take_intents() {
            match intent {
                SelectorIntent::Toggle(id) => self.registry.toggle(id),
                SelectorIntent::Close => {}
            }
        }
        for intent in self.toolbar.take_intents() {
            let ToolbarIntent::Toggle(id) = intent;
            self.registry.toggle(id);
        }
        for intent in self.layer.take_intents() {
            let LayerIntent::Close(id) = intent;
            self.registry.toggle(id);
        }
        self.layer.sync(&self.registry);
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area.width == 0 || area.height < 2 {
            return;
        }
        let toolbar_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        };
        let body = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 1,
        };

        let shell_focused = self.layer.focused_id().is_none()
            && !self.palette.is_open()
            && !self.selector.is_open()
            && !self.help.visible();
        let ctx = ComponentContext::new(shell_focused);
        self.browser.render(frame, body, &ctx);
        self.layer.render(frame, body);

        if let Some(status) = self.browser.take_status() {
            self.status = Some(status);
        }
        let left = match &self.status {
            Some(status) => status.clone(),
            None => format!("term-desk — {}", self.browser.path().display()),
        };
        self.toolbar.render(
            frame,
            toolbar_area,
            &self.registry,
            &left,
            "Ctrl+K palette  F1 help",
        );

        self.selector.render(frame, area, &self.registry);
        self.palette.render(frame, area);
        self.help.render(frame, area);
    }
}
