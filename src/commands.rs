//! The command palette's static catalog.
//!
//! Commands carry a zero-argument intent; the app is the single consumer
//! that applies it. Catalog membership and order never change at runtime.

/// Intent applied by the app when a command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    NewFolder,
    NewFile,
    NewTab,
    ToggleHidden,
    Refresh,
    OpenWidgetPicker,
    GoHome,
    OpenHelp,
    ToggleCalculator,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub id: &'static str,
    pub icon: char,
    pub name: &'static str,
    pub shortcut: Option<&'static str>,
    pub action: ShellCommand,
}

static COMMANDS: [Command; 10] = [
    Command {
        id: "new-folder",
        icon: '+',
        name: "New Folder",
        shortcut: Some("Ctrl+Shift+N"),
        action: ShellCommand::NewFolder,
    },
    Command {
        id: "new-file",
        icon: '·',
        name: "New File",
        shortcut: Some("Ctrl+N"),
        action: ShellCommand::NewFile,
    },
    Command {
        id: "new-tab",
        icon: '⊞',
        name: "New Tab",
        shortcut: Some("Ctrl+T"),
        action: ShellCommand::NewTab,
    },
    Command {
        id: "toggle-hidden",
        icon: '∘',
        name: "Toggle Hidden Files",
        shortcut: Some("Ctrl+H"),
        action: ShellCommand::ToggleHidden,
    },
    Command {
        id: "refresh",
        icon: '↻',
        name: "Refresh",
        shortcut: Some("F5"),
        action: ShellCommand::Refresh,
    },
    Command {
        id: "widget-picker",
        icon: '☰',
        name: "Widget Picker",
        shortcut: Some("Ctrl+W"),
        action: ShellCommand::OpenWidgetPicker,
    },
    Command {
        id: "go-home",
        icon: '⌂',
        name: "Go Home",
        shortcut: None,
        action: ShellCommand::GoHome,
    },
    Command {
        id: "help",
        icon: '?',
        name: "Help",
        shortcut: Some("F1"),
        action: ShellCommand::OpenHelp,
    },
    Command {
        id: "calculator",
        icon: '±',
        name: "Calculator",
        shortcut: None,
        action: ShellCommand::ToggleCalculator,
    },
    Command {
        id: "quit",
        icon: '✕',
        name: "Quit",
        shortcut: Some("Ctrl+Q"),
        action: ShellCommand::Quit,
    },
];

pub fn catalog() -> &'static [Command] {
    &COMMANDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_commands_with_unique_ids() {
        let commands = catalog();
        assert_eq!(commands.len(), 10);
        for command in commands {
            assert_eq!(
                commands.iter().filter(|c| c.id == command.id).count(),
                1,
                "duplicate id {}",
                command.id
            );
        }
    }

    #[test]
    fn new_prefixed_commands_lead_the_catalog() {
        let names: Vec<&str> = catalog().iter().take(3).map(|c| c.name).collect();
        assert_eq!(names, vec!["New Folder", "New File", "New Tab"]);
    }
}
