//! The notebook menubar: a static tree of controls, the bindings that make
//! them do something, and the updaters that keep the dynamic parts current.

pub mod binder;
pub mod celltoolbar;
pub mod item;
pub mod layout;
pub mod updaters;
pub mod url;

pub use item::{ItemKind, ItemPath, MenuItem};

use item::{Binding, MenuTree};

use crate::app::action::{Action, Target};
use crate::bus::EventBus;
use crate::commands::{ClickEvent, CommandRegistry};
use crate::config::AppConfig;
use crate::error::{MenuError, MenuResult};
use crate::notebook::{Document, PresetRegistry};

#[derive(Debug, Clone, PartialEq)]
pub struct MenuOptions {
    pub base_url: String,
    pub open_target: Target,
    pub checkpoint_format: String,
    pub tour_available: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            open_target: Target::Blank,
            checkpoint_format: "%A, %B %-d, %Y %-I:%M %p".to_string(),
            tour_available: true,
        }
    }
}

impl MenuOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.server.base_url.clone(),
            open_target: config.ui.open_target,
            checkpoint_format: config.ui.checkpoint_format.clone(),
            tour_available: config.ui.tour_enabled,
        }
    }
}

/// Collaborators consulted while handling one click.
pub struct ClickContext<'a> {
    pub registry: &'a dyn CommandRegistry,
    pub document: &'a dyn Document,
}

pub struct MenuBar {
    tree: MenuTree,
    base_url: String,
    open_target: Target,
    checkpoint_format: String,
    next_window: u64,
}

impl AsMut<MenuBar> for MenuBar {
    fn as_mut(&mut self) -> &mut MenuBar {
        self
    }
}

impl MenuBar {
    /// Build the menubar, bind every control once and subscribe the
    /// updaters on `bus`.
    pub fn new<C>(
        options: MenuOptions,
        registry: &dyn CommandRegistry,
        presets: &dyn PresetRegistry,
        bus: &mut EventBus<C>,
    ) -> Self
    where
        C: AsMut<MenuBar> + 'static,
    {
        let mut bar = Self {
            tree: MenuTree::new(layout::default_menus()),
            base_url: options.base_url,
            open_target: options.open_target,
            checkpoint_format: options.checkpoint_format,
            next_window: 0,
        };
        bar.bind_events(registry, options.tour_available);
        bar.update_restore_checkpoint(&[]);
        bar.add_celltoolbar_list(presets);
        updaters::subscribe(bus);
        celltoolbar::subscribe(bus);
        bar
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn click(&mut self, id: &str, ctx: &ClickContext<'_>) -> MenuResult<Vec<Action>> {
        let item = self
            .tree
            .find(id)
            .ok_or_else(|| MenuError::UnknownControl(id.to_string()))?;
        let (disabled, binding) = (item.disabled, item.binding.clone());
        self.fire(id.to_string(), disabled, binding, ctx)
    }

    /// Click the item at `path`. Controls with an id go through
    /// [`MenuBar::click`]; generated rows are clicked in place.
    pub fn click_at(&mut self, path: &ItemPath, ctx: &ClickContext<'_>) -> MenuResult<Vec<Action>> {
        let item = self
            .tree
            .item_at(path)
            .ok_or_else(|| MenuError::UnknownControl(format!("{:?}", path)))?;
        if let Some(id) = item.id.clone() {
            return self.click(&id, ctx);
        }
        let control = item.control_name().to_string();
        let (disabled, binding) = (item.disabled, item.binding.clone());
        self.fire(control, disabled, binding, ctx)
    }

    fn fire(
        &mut self,
        control: String,
        disabled: bool,
        binding: Option<Binding>,
        ctx: &ClickContext<'_>,
    ) -> MenuResult<Vec<Action>> {
        let binding = match binding {
            Some(b) if !disabled => b,
            _ => return Ok(Vec::new()),
        };
        let mut actions = match &binding {
            Binding::Command(name) => ctx.registry.invoke(name, &ClickEvent::new(control))?,
            Binding::Effect(effect) => self.effect_actions(effect, ctx.document),
        };
        // Opening the menu took focus away from the selected cell.
        actions.push(Action::ReselectCell);
        Ok(actions)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::notebook::{Completion, LanguageInfo};
    use anyhow::Result;

    pub struct FakeDocument {
        pub path: String,
        pub dirty: bool,
    }

    impl FakeDocument {
        pub fn clean(path: &str) -> Self {
            Self { path: path.to_string(), dirty: false }
        }

        pub fn dirty(path: &str) -> Self {
            Self { path: path.to_string(), dirty: true }
        }
    }

    impl Document for FakeDocument {
        fn path(&self) -> &str {
            &self.path
        }
        fn is_dirty(&self) -> bool {
            self.dirty
        }
        fn language_info(&self) -> Option<LanguageInfo> {
            None
        }
        fn save(&mut self, done: Completion) {
            done(Ok(()))
        }
        fn copy(&mut self) -> Result<()> {
            Ok(())
        }
        fn trust(&mut self) -> Result<()> {
            Ok(())
        }
        fn edit_metadata(&mut self) -> Result<()> {
            Ok(())
        }
        fn restore_checkpoint(&mut self, _checkpoint_id: &str) -> Result<()> {
            Ok(())
        }
        fn revert_to_checkpoint(&mut self, _checkpoint_id: &str) -> Result<()> {
            Ok(())
        }
        fn set_celltoolbar(&mut self, _preset: Option<&str>) {}
        fn reselect_cell(&mut self) {}
    }

    pub struct FixedPresets(pub Vec<String>);

    impl PresetRegistry for FixedPresets {
        fn list_presets(&self) -> Vec<String> {
            self.0.clone()
        }
        fn activate_preset(&mut self, _name: &str) -> Result<()> {
            Ok(())
        }
        fn global_show(&mut self) {}
        fn global_hide(&mut self) {}
        fn register_preset(&mut self, name: &str) -> bool {
            !self.0.iter().any(|p| p == name) && {
                self.0.push(name.to_string());
                true
            }
        }
        fn unregister_preset(&mut self, name: &str) -> bool {
            let before = self.0.len();
            self.0.retain(|p| p != name);
            self.0.len() != before
        }
    }

    pub fn bar_with(registry: &dyn CommandRegistry, presets: &[&str]) -> (MenuBar, EventBus<MenuBar>) {
        let presets = FixedPresets(presets.iter().map(|p| p.to_string()).collect());
        let mut bus = EventBus::new();
        let bar = MenuBar::new(MenuOptions::default(), registry, &presets, &mut bus);
        (bar, bus)
    }

    pub fn bar_without_tour(registry: &dyn CommandRegistry) -> MenuBar {
        let mut bus: EventBus<MenuBar> = EventBus::new();
        let options = MenuOptions { tour_available: false, ..MenuOptions::default() };
        MenuBar::new(options, registry, &FixedPresets(Vec::new()), &mut bus)
    }
}
