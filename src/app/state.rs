use crate::app::event::Overlay;
use crate::config::AppConfig;
use crate::menu::{ItemKind, ItemPath, MenuBar, MenuItem};
use crate::tree::{FileList, KernelList};

/// Ticks a status line stays up (the tick task runs at 20 Hz).
const STATUS_TICKS: u64 = 100;

/// Single-line text input with history, used by the command prompt and the
/// running-list filter.
#[derive(Debug, Default)]
pub struct PromptState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl PromptState {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    /// Take the line, remembering non-empty entries for history recall.
    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.clear();
        if !text.is_empty() && self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        let idx = match self.history_index {
            Some(0) => return,
            Some(i) => i - 1,
            None if self.history.is_empty() => return,
            None => self.history.len() - 1,
        };
        self.recall(Some(idx));
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => self.recall(Some(i + 1)),
            Some(_) => self.recall(None),
            None => {}
        }
    }

    fn recall(&mut self, idx: Option<usize>) {
        self.history_index = idx;
        self.text = idx
            .and_then(|i| self.history.get(i).cloned())
            .unwrap_or_default();
        self.cursor = self.text.len();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Menu,
    Running,
    Files,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Command,
    Filter,
}

/// Which menu is highlighted and, while its dropdown is open, which item at
/// each nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuCursor {
    pub menu: usize,
    pub open: bool,
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    set_at: u64,
}

pub struct AppState {
    pub config: AppConfig,
    pub menubar: MenuBar,
    pub kernels: KernelList,
    pub files: FileList,
    pub focus: FocusPanel,
    /// The list a filter prompt applies to.
    pub filter_panel: FocusPanel,
    pub cursor: MenuCursor,
    pub prompt: PromptState,
    pub prompt_mode: PromptMode,
    pub overlay: Option<Overlay>,
    pub status: Option<StatusLine>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AsMut<MenuBar> for AppState {
    fn as_mut(&mut self) -> &mut MenuBar {
        &mut self.menubar
    }
}

impl AsMut<KernelList> for AppState {
    fn as_mut(&mut self) -> &mut KernelList {
        &mut self.kernels
    }
}

impl AsMut<FileList> for AppState {
    fn as_mut(&mut self) -> &mut FileList {
        &mut self.files
    }
}

impl AppState {
    pub fn new(config: AppConfig, menubar: MenuBar, kernels: KernelList, files: FileList) -> Self {
        Self {
            config,
            menubar,
            kernels,
            files,
            focus: FocusPanel::Menu,
            filter_panel: FocusPanel::Running,
            cursor: MenuCursor::default(),
            prompt: PromptState::default(),
            prompt_mode: PromptMode::Command,
            overlay: None,
            status: None,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), false);
    }

    pub fn fail(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!("{}", text);
        self.set_status(text, true);
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusLine {
            text,
            is_error,
            set_at: self.tick_count,
        });
        self.dirty = true;
    }

    /// Advance the clock and drop a status line that has been up long enough.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        let expired = self
            .status
            .as_ref()
            .is_some_and(|s| self.tick_count.wrapping_sub(s.set_at) >= STATUS_TICKS);
        if expired {
            self.status = None;
            self.dirty = true;
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Menu => FocusPanel::Running,
            FocusPanel::Running => FocusPanel::Files,
            FocusPanel::Files | FocusPanel::Prompt => FocusPanel::Menu,
        };
        self.cursor.open = false;
        self.dirty = true;
    }

    pub fn start_prompt(&mut self, mode: PromptMode) {
        self.prompt_mode = mode;
        self.prompt.clear();
        if mode == PromptMode::Filter {
            self.filter_panel = match self.focus {
                FocusPanel::Files => FocusPanel::Files,
                _ => FocusPanel::Running,
            };
            self.prompt.text = self.list_filter().to_string();
            self.prompt.cursor = self.prompt.text.len();
        }
        self.focus = FocusPanel::Prompt;
        self.cursor.open = false;
        self.dirty = true;
    }

    pub fn list_filter(&self) -> &str {
        match self.filter_panel {
            FocusPanel::Files => self.files.list().filter(),
            _ => self.kernels.list().filter(),
        }
    }

    pub fn set_list_filter(&mut self, text: &str) {
        match self.filter_panel {
            FocusPanel::Files => self.files.list_mut().set_filter(text),
            _ => self.kernels.list_mut().set_filter(text),
        }
    }

    // --- menu cursor ---

    /// Items at nesting level `depth` along the cursor path (0 = the menu).
    pub fn items_at(&self, depth: usize) -> &[MenuItem] {
        let Some(menu) = self.menubar.tree().menus.get(self.cursor.menu) else {
            return &[];
        };
        let mut items = menu.items.as_slice();
        for idx in self.cursor.path.iter().take(depth) {
            match items.get(*idx) {
                Some(item) => items = &item.children,
                None => return &[],
            }
        }
        items
    }

    pub fn selected_path(&self) -> Option<ItemPath> {
        if !self.cursor.open || self.cursor.path.is_empty() {
            return None;
        }
        Some(ItemPath {
            menu: self.cursor.menu,
            indices: self.cursor.path.clone(),
        })
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected_path()
            .and_then(|path| self.menubar.tree().item_at(&path))
    }

    pub fn open_menu(&mut self) {
        self.cursor.open = true;
        self.cursor.path = first_selectable(self.items_at(0)).into_iter().collect();
        self.dirty = true;
    }

    pub fn close_menu(&mut self) {
        self.cursor.open = false;
        self.cursor.path.clear();
        self.dirty = true;
    }

    pub fn switch_menu(&mut self, forward: bool) {
        let count = self.menubar.tree().menus.len();
        if count == 0 {
            return;
        }
        self.cursor.menu = if forward {
            (self.cursor.menu + 1) % count
        } else {
            (self.cursor.menu + count - 1) % count
        };
        if self.cursor.open {
            self.open_menu();
        }
        self.dirty = true;
    }

    /// Move within the current level, skipping dividers. Stops at the ends.
    pub fn move_item(&mut self, forward: bool) {
        let Some(&current) = self.cursor.path.last() else {
            return;
        };
        let depth = self.cursor.path.len() - 1;
        let items = self.items_at(depth);
        let next = if forward {
            (current + 1..items.len()).find(|i| !items[*i].is_divider())
        } else {
            (0..current).rev().find(|i| !items[*i].is_divider())
        };
        if let Some(next) = next {
            if let Some(last) = self.cursor.path.last_mut() {
                *last = next;
            }
            self.dirty = true;
        }
    }

    /// Descend into the selected submenu. Returns false when the selection
    /// is not a submenu with something to select.
    pub fn enter_submenu(&mut self) -> bool {
        let child = match self.selected_item() {
            Some(item) if item.kind == ItemKind::Submenu => first_selectable(&item.children),
            _ => None,
        };
        match child {
            Some(idx) => {
                self.cursor.path.push(idx);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Climb out of a submenu. Returns false at the top level.
    pub fn leave_submenu(&mut self) -> bool {
        if self.cursor.path.len() > 1 {
            self.cursor.path.pop();
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Keep the cursor on a real item after an updater rewrote a fragment.
    pub fn clamp_cursor(&mut self) {
        if !self.cursor.open {
            return;
        }
        let valid = self
            .selected_item()
            .is_some_and(|item| !item.is_divider());
        if !valid {
            self.open_menu();
        }
    }
}

fn first_selectable(items: &[MenuItem]) -> Option<usize> {
    items.iter().position(|item| !item.is_divider())
}
