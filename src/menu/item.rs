//! The menu tree: menus, entries, submenus and their click bindings.

use super::binder::Effect;
use crate::error::{MenuError, MenuResult};

/// What a click on a control does. A control holds at most one binding;
/// binding again replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Invoke a named command, resolved through the registry at click time.
    Command(String),
    Effect(Effect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Entry,
    Divider,
    Submenu,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: Option<String>,
    pub kind: ItemKind,
    pub label: String,
    pub disabled: bool,
    pub binding: Option<Binding>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn entry(id: &str, label: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::row(label)
        }
    }

    /// An entry without a stable id, generated by an updater.
    pub fn row(label: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: ItemKind::Entry,
            label: label.into(),
            disabled: false,
            binding: None,
            children: Vec::new(),
        }
    }

    pub fn divider() -> Self {
        Self {
            kind: ItemKind::Divider,
            ..Self::row("")
        }
    }

    /// A divider that other code finds by id.
    pub fn marker(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::divider()
        }
    }

    pub fn submenu(id: &str, label: &str, children: Vec<MenuItem>) -> Self {
        Self {
            kind: ItemKind::Submenu,
            children,
            ..Self::entry(id, label)
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn bound(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn is_divider(&self) -> bool {
        self.kind == ItemKind::Divider
    }

    /// Identifier reported to commands: the id, or the label for rows.
    pub fn control_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: &str, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.to_string(),
            items,
        }
    }
}

/// Position of an item: the top-level menu, then one index per nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath {
    pub menu: usize,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuTree {
    pub menus: Vec<Menu>,
}

impl MenuTree {
    pub fn new(menus: Vec<Menu>) -> Self {
        Self { menus }
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.menus.iter().find_map(|m| find_in(&m.items, id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        self.menus
            .iter_mut()
            .find_map(|m| find_in_mut(&mut m.items, id))
    }

    #[cfg(test)]
    pub fn path_of(&self, id: &str) -> Option<ItemPath> {
        self.menus.iter().enumerate().find_map(|(menu, m)| {
            let mut indices = Vec::new();
            path_in(&m.items, id, &mut indices).then_some(ItemPath { menu, indices })
        })
    }

    pub fn item_at(&self, path: &ItemPath) -> Option<&MenuItem> {
        let (first, rest) = path.indices.split_first()?;
        let mut item = self.menus.get(path.menu)?.items.get(*first)?;
        for idx in rest {
            item = item.children.get(*idx)?;
        }
        Some(item)
    }

    #[cfg(test)]
    pub fn menu(&self, title: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.title == title)
    }

    pub fn menu_mut(&mut self, title: &str) -> Option<&mut Menu> {
        self.menus.iter_mut().find(|m| m.title == title)
    }

    /// Children of the submenu `id`.
    #[cfg(test)]
    pub fn children(&self, id: &str) -> &[MenuItem] {
        self.find(id).map(|i| i.children.as_slice()).unwrap_or(&[])
    }

    pub fn children_mut(&mut self, id: &str) -> Option<&mut Vec<MenuItem>> {
        self.find_mut(id).map(|i| &mut i.children)
    }

    /// Replace the binding of `id`. The previous binding is dropped, so it
    /// can never fire again.
    pub fn bind(&mut self, id: &str, binding: Binding) -> MenuResult<()> {
        let item = self
            .find_mut(id)
            .ok_or_else(|| MenuError::UnknownControl(id.to_string()))?;
        item.binding = Some(binding);
        Ok(())
    }
}

fn find_in<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    for item in items {
        if item.id.as_deref() == Some(id) {
            return Some(item);
        }
        if let Some(found) = find_in(&item.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(items: &'a mut [MenuItem], id: &str) -> Option<&'a mut MenuItem> {
    for item in items.iter_mut() {
        if item.id.as_deref() == Some(id) {
            return Some(item);
        }
        if let Some(found) = find_in_mut(&mut item.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
fn path_in(items: &[MenuItem], id: &str, indices: &mut Vec<usize>) -> bool {
    for (i, item) in items.iter().enumerate() {
        indices.push(i);
        if item.id.as_deref() == Some(id) || path_in(&item.children, id, indices) {
            return true;
        }
        indices.pop();
    }
    false
}
