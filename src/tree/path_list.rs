//! Sortable, filterable list of path entries.
//!
//! The list builds rows itself and hands each one to a [`RowDecorator`],
//! which is the only extension point: a specialized view supplies its own
//! decorator instead of reimplementing the list.

use crate::app::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    Notebook,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowButton {
    pub label: String,
    pub action: Action,
}

/// One rendered row. A freshly created row is blank until a link is added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub entry: Option<PathEntry>,
    pub labels: Vec<String>,
    pub buttons: Vec<RowButton>,
}

pub trait RowDecorator {
    /// Extra per-row data the decorator needs beyond the entry.
    type Extra;

    /// Offer a "Duplicate" control on notebook rows.
    fn add_duplicate_button(&self, entry: &PathEntry, row: &mut Row);

    fn decorate(&self, entry: &PathEntry, extra: &Self::Extra, row: &mut Row);
}

/// Decoration of the plain file browser.
#[derive(Debug, Default)]
pub struct FileDecorator;

impl RowDecorator for FileDecorator {
    type Extra = ();

    fn add_duplicate_button(&self, entry: &PathEntry, row: &mut Row) {
        row.buttons.push(RowButton {
            label: "Duplicate".to_string(),
            action: Action::DuplicateNotebook {
                path: entry.path.clone(),
            },
        });
    }

    fn decorate(&self, _entry: &PathEntry, _extra: &(), _row: &mut Row) {}
}

pub struct PathList<D: RowDecorator> {
    element_name: &'static str,
    rows: Vec<Row>,
    filter: String,
    selected: usize,
    decorator: D,
}

impl<D: RowDecorator> PathList<D> {
    pub fn new(element_name: &'static str, decorator: D) -> Self {
        Self {
            element_name,
            rows: Vec::new(),
            filter: String::new(),
            selected: 0,
            decorator,
        }
    }

    pub fn element_name(&self) -> &'static str {
        self.element_name
    }

    pub fn clear_list(&mut self) {
        self.rows.clear();
        self.selected = 0;
    }

    /// Insert a blank row at `index` (appended when `None` or out of range)
    /// and return where it went.
    pub fn new_item(&mut self, index: Option<usize>) -> usize {
        let at = index.filter(|i| *i <= self.rows.len()).unwrap_or(self.rows.len());
        self.rows.insert(at, Row::default());
        at
    }

    /// Fill the row at `index` with `entry`, replacing anything it showed.
    pub fn add_link(&mut self, index: usize, entry: PathEntry, extra: &D::Extra) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        *row = Row::default();
        self.decorator.decorate(&entry, extra, row);
        if entry.kind == EntryKind::Notebook {
            self.decorator.add_duplicate_button(&entry, row);
        }
        row.entry = Some(entry);
    }

    /// Directories first, then case-insensitive by name.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| match (&a.entry, &b.entry) {
            (Some(a), Some(b)) => a
                .kind
                .cmp(&b.kind)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.selected = 0;
    }

    /// Rows whose name contains the filter, ignoring case.
    pub fn visible(&self) -> Vec<&Row> {
        let needle = self.filter.to_lowercase();
        self.rows
            .iter()
            .filter(|row| match &row.entry {
                Some(entry) => needle.is_empty() || entry.name.to_lowercase().contains(&needle),
                None => needle.is_empty(),
            })
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.visible().get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.visible().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    /// Action of the first button on the selected row.
    pub fn activate_selected(&self) -> Option<Action> {
        self.selected_row()
            .and_then(|row| row.buttons.first())
            .map(|button| button.action.clone())
    }
}
