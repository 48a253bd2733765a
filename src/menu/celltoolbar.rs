//! The "Cell Toolbar" submenu, kept in step with the preset registry.
//!
//! Rows are identified by their [`PresetKey`], carried in the row's binding.
//! The "no preset" row is a distinct variant, so no registered name, however
//! it is spelled, can be mistaken for it or for another preset.

use super::binder::Effect;
use super::item::{Binding, MenuItem};
use super::layout::CELL_TOOLBAR_SUBMENU;
use super::MenuBar;
use crate::bus::{BusEvent, EventBus, Topic};
use crate::notebook::PresetRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PresetKey {
    NoPreset,
    Named(String),
}

impl PresetKey {
    pub fn label(&self) -> &str {
        match self {
            PresetKey::NoPreset => "None",
            PresetKey::Named(name) => name,
        }
    }
}

fn row_key(item: &MenuItem) -> Option<&PresetKey> {
    match &item.binding {
        Some(Binding::Effect(Effect::SelectPreset(key))) => Some(key),
        _ => None,
    }
}

impl MenuBar {
    /// Render the "None" row and every preset registered so far.
    pub(super) fn add_celltoolbar_list(&mut self, presets: &dyn PresetRegistry) {
        self.append_preset_row(PresetKey::NoPreset);
        for name in presets.list_presets() {
            self.append_preset_row(PresetKey::Named(name));
        }
    }

    pub fn preset_added(&mut self, name: &str) {
        self.append_preset_row(PresetKey::Named(name.to_string()));
    }

    pub fn preset_removed(&mut self, name: &str) {
        let key = PresetKey::Named(name.to_string());
        if let Some(rows) = self.tree.children_mut(CELL_TOOLBAR_SUBMENU) {
            rows.retain(|row| row_key(row) != Some(&key));
        }
    }

    /// Preset rows in display order.
    #[cfg(test)]
    pub fn preset_rows(&self) -> Vec<&PresetKey> {
        self.tree
            .children(CELL_TOOLBAR_SUBMENU)
            .iter()
            .filter_map(row_key)
            .collect()
    }

    fn append_preset_row(&mut self, key: PresetKey) {
        let Some(rows) = self.tree.children_mut(CELL_TOOLBAR_SUBMENU) else {
            return;
        };
        if rows.iter().any(|row| row_key(row) == Some(&key)) {
            tracing::debug!(preset = key.label(), "preset already listed");
            return;
        }
        rows.push(MenuItem::row(key.label()).bound(Binding::Effect(Effect::SelectPreset(key))));
    }
}

pub(super) fn subscribe<C: AsMut<MenuBar> + 'static>(bus: &mut EventBus<C>) {
    bus.subscribe(Topic::PresetAdded, |ctx: &mut C, event| {
        if let BusEvent::PresetAdded(name) = event {
            ctx.as_mut().preset_added(name);
        }
        Ok(())
    });
    bus.subscribe(Topic::PresetRemoved, |ctx: &mut C, event| {
        if let BusEvent::PresetRemoved(name) = event {
            ctx.as_mut().preset_removed(name);
        }
        Ok(())
    });
}
