use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    OpenPalette,
    OpenWidgetPicker,
    OpenHelp,
    // Shared list/menu navigation
    MenuUp,
    MenuDown,
    MenuSelect,
    ToggleSelection,
    // Browser navigation
    BrowseParent,
    NextTab,
    // Shell shortcuts (mirrors the command catalog's shortcut labels)
    NewFolder,
    NewFile,
    NewTab,
    ToggleHidden,
    Refresh,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::OpenPalette => "Open command palette",
            Action::OpenWidgetPicker => "Open widget picker",
            Action::OpenHelp => "Open help",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuSelect => "Menu select",
            Action::ToggleSelection => "Toggle selection / space",
            Action::BrowseParent => "Go to parent directory",
            Action::NextTab => "Next tab",
            Action::NewFolder => "New folder",
            Action::NewFile => "New file",
            Action::NewTab => "New tab",
            Action::ToggleHidden => "Toggle hidden files",
            Action::Refresh => "Refresh listing",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        for (act, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*act);
            }
        }
        None
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(
            OpenPalette,
            KeyCombo::new(KeyCode::Char('k'), KeyModifiers::CONTROL),
        );
        kb.add(
            OpenWidgetPicker,
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        kb.add(OpenHelp, KeyCombo::new(KeyCode::F(1), KeyModifiers::NONE));
        kb.add(MenuUp, KeyCombo::new(KeyCode::Up, KeyModifiers::NONE));
        kb.add(MenuDown, KeyCombo::new(KeyCode::Down, KeyModifiers::NONE));
        kb.add(
            MenuSelect,
            KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE),
        );
        kb.add(
            ToggleSelection,
            KeyCombo::new(KeyCode::Char(' '), KeyModifiers::NONE),
        );
        kb.add(
            BrowseParent,
            KeyCombo::new(KeyCode::Backspace, KeyModifiers::NONE),
        );
        kb.add(NextTab, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(
            NewFolder,
            KeyCombo::new(
                KeyCode::Char('N'),
                KeyModifiers::CONTROL.union(KeyModifiers::SHIFT),
            ),
        );
        kb.add(
            NewFile,
            KeyCombo::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
        );
        kb.add(
            NewTab,
            KeyCombo::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
        );
        kb.add(
            ToggleHidden,
            KeyCombo::new(KeyCode::Char('h'), KeyModifiers::CONTROL),
        );
        kb.add(Refresh, KeyCombo::new(KeyCode::F(5), KeyModifiers::NONE));
        kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
    }

    #[test]
    fn action_for_key_resolves_palette() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(kb.action_for_key(&ev), Some(Action::OpenPalette));
    }

    #[test]
    fn unbound_key_resolves_to_none() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::ALT);
        assert_eq!(kb.action_for_key(&ev), None);
    }
}
