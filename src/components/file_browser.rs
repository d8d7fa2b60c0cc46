//! The file-browser backdrop the desktop layers everything over.
//!
//! Listings are read once per navigation; there is no caching and no
//! watching. Filesystem failures never propagate: they surface as a status
//! line and leave the previous listing in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("read {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
struct Tab {
    path: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
}

pub struct FileBrowserComponent {
    tabs: Vec<Tab>,
    active: usize,
    show_hidden: bool,
    status: Option<String>,
    bindings: KeyBindings,
}

fn read_entries(path: &Path, show_hidden: bool) -> Result<Vec<Entry>, BrowserError> {
    let reader = fs::read_dir(path).map_err(|source| BrowserError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    for dirent in reader {
        let dirent = dirent.map_err(|source| BrowserError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;
        let name = dirent.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let is_dir = dirent.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry { name, is_dir });
    }
    // directories first, names alphabetical within each group
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then(a.name.cmp(&b.name)));
    Ok(entries)
}

/// First of `base`, `base-2`, `base-3`, ... not present in `dir`.
fn unique_name(dir: &Path, base: &str) -> PathBuf {
    let candidate = dir.join(base);
    if !candidate.exists() {
        return candidate;
    }
    for n in 2.. {
        let candidate = dir.join(format!("{base}-{n}"));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}

impl FileBrowserComponent {
    pub fn new(dir: PathBuf) -> Self {
        let mut browser = Self {
            tabs: Vec::new(),
            active: 0,
            show_hidden: false,
            status: None,
            bindings: KeyBindings::default(),
        };
        let entries = match read_entries(&dir, false) {
            Ok(entries) => entries,
            Err(err) => {
                browser.report(&err);
                Vec::new()
            }
        };
        browser.tabs.push(Tab {
            path: dir,
            entries,
            selected: 0,
        });
        browser
    }

    pub fn path(&self) -> &Path {
        &self.tabs[self.active].path
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.tabs[self.active].entries
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Most recent status or error line, drained by the toolbar.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    fn report(&mut self, err: &BrowserError) {
        tracing::warn!(error = %err, "browser operation failed");
        self.status = Some(err.to_string());
    }

    fn reload_active(&mut self) {
        let path = self.tabs[self.active].path.clone();
        match read_entries(&path, self.show_hidden) {
            Ok(entries) => {
                let tab = &mut self.tabs[self.active];
                tab.entries = entries;
                tab.selected = tab.selected.min(tab.entries.len().saturating_sub(1));
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn refresh(&mut self) {
        self.reload_active();
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.reload_active();
    }

    pub fn new_tab(&mut self) {
        let tab = self.tabs[self.active].clone();
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
    }

    pub fn next_tab(&mut self) {
        self.active = (self.active + 1) % self.tabs.len();
    }

    pub fn navigate(&mut self, path: PathBuf) {
        match read_entries(&path, self.show_hidden) {
            Ok(entries) => {
                let tab = &mut self.tabs[self.active];
                tab.path = path;
                tab.entries = entries;
                tab.selected = 0;
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn go_home(&mut self) {
        match home::home_dir() {
            Some(dir) => self.navigate(dir),
            None => self.status = Some("home directory not found".to_string()),
        }
    }

    fn enter_selected(&mut self) {
        let tab = &self.tabs[self.active];
        let Some(entry) = tab.entries.get(tab.selected) else {
            return;
        };
        if entry.is_dir {
            let next = tab.path.join(&entry.name);
            self.navigate(next);
        }
    }

    fn go_parent(&mut self) {
        if let Some(parent) = self.tabs[self.active].path.parent() {
            self.navigate(parent.to_path_buf());
        }
    }

    pub fn create_folder(&mut self) {
        let target = unique_name(self.path(), "untitled-folder");
        match fs::create_dir(&target).map_err(|source| BrowserError::Create {
            path: target.clone(),
            source,
        }) {
            Ok(()) => {
                self.status = Some(format!("created {}", target.display()));
                self.reload_active();
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn create_file(&mut self) {
        let target = unique_name(self.path(), "untitled.txt");
        match fs::File::create(&target).map_err(|source| BrowserError::Create {
            path: target.clone(),
            source,
        }) {
            Ok(_) => {
                self.status = Some(format!("created {}", target.display()));
                self.reload_active();
            }
            Err(err) => self.report(&err),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let tab = &mut self.tabs[self.active];
        if tab.entries.is_empty() {
            tab.selected = 0;
            return;
        }
        if delta.is_negative() {
            tab.selected = tab.selected.saturating_sub(delta.unsigned_abs());
        } else {
            tab.selected = (tab.selected + delta as usize).min(tab.entries.len() - 1);
        }
    }
}

impl Component for FileBrowserComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height < 2 {
            return;
        }
        // tab strip
        let mut spans: Vec<Span> = Vec::new();
        for (index, tab) in self.tabs.iter().enumerate() {
            let label = format!(
                " {}:{} ",
                index + 1,
                tab.path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| tab.path.display().to_string())
            );
            let style = if index == self.active {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme::overlay_dim_fg())
            };
            spans.push(Span::styled(label, style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: 1,
            },
        );

        let tab = &self.tabs[self.active];
        let list = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 1,
        };
        let visible = list.height as usize;
        let skip = tab.selected.saturating_sub(visible.saturating_sub(1));
        for (row, (index, entry)) in tab
            .entries
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .enumerate()
        {
            let style = if index == tab.selected {
                Style::default()
                    .bg(theme::browser_selected_bg())
                    .fg(theme::browser_selected_fg())
            } else if entry.is_dir {
                Style::default().fg(theme::browser_dir_fg())
            } else {
                Style::default()
            };
            let suffix = if entry.is_dir { "/" } else { "" };
            frame.render_widget(
                Paragraph::new(Line::styled(format!(" {}{suffix}", entry.name), style)),
                Rect {
                    x: list.x,
                    y: list.y + row as u16,
                    width: list.width,
                    height: 1,
                },
            );
        }
        if tab.entries.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    " (empty)",
                    Style::default().fg(theme::overlay_dim_fg()),
                )),
                Rect {
                    x: list.x,
                    y: list.y,
                    width: list.width,
                    height: 1,
                },
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if self.bindings.matches(Action::MenuUp, key) {
            self.move_selection(-1);
            true
        } else if self.bindings.matches(Action::MenuDown, key) {
            self.move_selection(1);
            true
        } else if self.bindings.matches(Action::MenuSelect, key) {
            self.enter_selected();
            true
        } else if self.bindings.matches(Action::BrowseParent, key) {
            self.go_parent();
            true
        } else if self.bindings.matches(Action::NextTab, key) {
            self.next_tab();
            true
        } else {
            false
        }
    }
}
