//! Fragments re-rendered from bus events: checkpoints, trust, the script
//! export label and the kernel help links.
//!
//! Every updater rebuilds its whole fragment from the payload, so delivering
//! the same event twice leaves the same menu behind.

use super::binder::Effect;
use super::item::{Binding, ItemKind, MenuItem};
use super::layout::{
    DOWNLOAD_SCRIPT, HELP_MENU, KERNEL_HELP_LINKS, NOTEBOOK_ABOUT, RESTORE_CHECKPOINT,
    TRUST_NOTEBOOK,
};
use super::MenuBar;
use crate::bus::{BusEvent, EventBus, Topic};
use crate::notebook::{Checkpoint, HelpLink, LanguageInfo};

/// "Download as" label for a language, e.g. `Python (.py)`.
///
/// Only an absent name or extension falls back to `Script` / `txt`; an empty
/// name stays empty.
pub fn script_label(info: Option<&LanguageInfo>) -> String {
    let name = info.and_then(|i| i.name.as_deref()).unwrap_or("Script");
    let extension = info
        .and_then(|i| i.file_extension.as_deref())
        .unwrap_or("txt");
    format!("{} ({})", capitalize(name), extension)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl MenuBar {
    pub fn update_restore_checkpoint(&mut self, checkpoints: &[Checkpoint]) {
        let rows: Vec<MenuItem> = if checkpoints.is_empty() {
            vec![MenuItem::row("No checkpoints").disabled()]
        } else {
            checkpoints
                .iter()
                .map(|cp| {
                    let label = cp
                        .last_modified
                        .with_timezone(&chrono::Local)
                        .format(&self.checkpoint_format)
                        .to_string();
                    MenuItem::row(label)
                        .bound(Binding::Effect(Effect::RestoreCheckpoint(cp.id.clone())))
                })
                .collect()
        };
        if let Some(children) = self.tree.children_mut(RESTORE_CHECKPOINT) {
            *children = rows;
        }
    }

    pub fn update_trust(&mut self, trusted: bool) {
        let Some(item) = self.tree.find_mut(TRUST_NOTEBOOK) else {
            return;
        };
        if trusted {
            item.disabled = true;
            item.binding = None;
            item.label = "Trusted Notebook".to_string();
        } else {
            item.disabled = false;
            item.binding = Some(Binding::Effect(Effect::TrustNotebook));
            item.label = "Trust Notebook".to_string();
        }
    }

    pub fn update_nbconvert_script(&mut self, info: Option<&LanguageInfo>) {
        if let Some(item) = self.tree.find_mut(DOWNLOAD_SCRIPT) {
            item.label = script_label(info);
        }
    }

    /// Replace the kernel-provided links of the Help menu.
    pub fn add_kernel_help_links(&mut self, links: &[HelpLink]) {
        let Some(help) = self.tree.menu_mut(HELP_MENU) else {
            return;
        };
        let items = &mut help.items;

        let marker = match items
            .iter()
            .position(|i| i.id.as_deref() == Some(KERNEL_HELP_LINKS))
        {
            Some(idx) => idx,
            None => {
                // Above the divider that precedes "About".
                let about = items
                    .iter()
                    .position(|i| i.id.as_deref() == Some(NOTEBOOK_ABOUT))
                    .unwrap_or(items.len());
                let at = about.saturating_sub(1);
                items.insert(at, MenuItem::marker(KERNEL_HELP_LINKS));
                at
            }
        };

        let end = items[marker + 1..]
            .iter()
            .position(|i| i.kind == ItemKind::Divider)
            .map(|offset| marker + 1 + offset)
            .unwrap_or(items.len());
        items.drain(marker + 1..end);

        if links.is_empty() {
            items.remove(marker);
            return;
        }
        let rows = links.iter().map(|link| {
            MenuItem::row(link.text.clone()).bound(Binding::Effect(Effect::OpenLink(link.url.clone())))
        });
        items.splice(marker + 1..marker + 1, rows);
    }
}

pub(super) fn subscribe<C: AsMut<MenuBar> + 'static>(bus: &mut EventBus<C>) {
    bus.subscribe(Topic::TrustChanged, |ctx: &mut C, event| {
        if let BusEvent::TrustChanged(trusted) = event {
            ctx.as_mut().update_trust(*trusted);
        }
        Ok(())
    });
    for topic in [Topic::CheckpointsListed, Topic::CheckpointCreated] {
        bus.subscribe(topic, |ctx: &mut C, event| {
            if let BusEvent::CheckpointsListed(list) | BusEvent::CheckpointCreated(list) = event {
                ctx.as_mut().update_restore_checkpoint(list);
            }
            Ok(())
        });
    }
    bus.subscribe(Topic::NotebookLoaded, |ctx: &mut C, event| {
        if let BusEvent::NotebookLoaded(info) = event {
            ctx.as_mut().update_nbconvert_script(info.as_ref());
        }
        Ok(())
    });
    bus.subscribe(Topic::KernelReady, |ctx: &mut C, event| {
        if let BusEvent::KernelReady(info) = event {
            let bar = ctx.as_mut();
            bar.update_nbconvert_script(info.language_info.as_ref());
            bar.add_kernel_help_links(&info.help_links);
        }
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::commands::ActionRegistry;
    use crate::menu::testing::{bar_with, FakeDocument};
    use crate::menu::ClickContext;
    use crate::notebook::KernelInfo;
    use chrono::{TimeZone, Utc};

    fn checkpoint(id: &str, hour: u32) -> Checkpoint {
        Checkpoint {
            id: id.to_string(),
            last_modified: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    fn help_labels(bar: &MenuBar) -> Vec<String> {
        bar.tree()
            .menu(HELP_MENU)
            .unwrap()
            .items
            .iter()
            .map(|i| i.id.clone().unwrap_or_else(|| i.label.clone()))
            .collect()
    }

    #[test]
    fn test_script_label() {
        assert_eq!(script_label(Some(&LanguageInfo::new("python", ".py"))), "Python (.py)");
        assert_eq!(script_label(None), "Script (txt)");
        let empty = LanguageInfo { name: Some(String::new()), file_extension: None };
        assert_eq!(script_label(Some(&empty)), " (txt)");
        let julia = LanguageInfo { name: Some("julia".into()), file_extension: None };
        assert_eq!(script_label(Some(&julia)), "Julia (txt)");
    }

    #[test]
    fn test_no_checkpoints_shows_single_disabled_placeholder() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let initial = bar.tree().children(RESTORE_CHECKPOINT).to_vec();
        assert_eq!(initial.len(), 1);
        assert!(initial[0].disabled);
        assert_eq!(initial[0].label, "No checkpoints");

        bus.publish(&mut bar, &BusEvent::CheckpointsListed(vec![])).unwrap();
        assert_eq!(bar.tree().children(RESTORE_CHECKPOINT), initial.as_slice());
    }

    #[test]
    fn test_checkpoint_rows_keep_order_and_own_ids() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let cps = vec![checkpoint("late", 18), checkpoint("early", 9), checkpoint("mid", 12)];
        bus.publish(&mut bar, &BusEvent::CheckpointsListed(cps)).unwrap();

        let doc = FakeDocument::clean("nb.ipynb");
        let ctx = ClickContext { registry: &registry, document: &doc };
        let base = bar.tree().path_of(RESTORE_CHECKPOINT).unwrap();
        assert_eq!(bar.tree().children(RESTORE_CHECKPOINT).len(), 3);
        for (i, id) in ["late", "early", "mid"].iter().enumerate() {
            let mut path = base.clone();
            path.indices.push(i);
            let actions = bar.click_at(&path, &ctx).unwrap();
            assert_eq!(actions[0], Action::RestoreCheckpoint { checkpoint_id: id.to_string() });
        }
    }

    #[test]
    fn test_checkpoint_updates_are_idempotent() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let event = BusEvent::CheckpointCreated(vec![checkpoint("a", 1), checkpoint("b", 2)]);
        bus.publish(&mut bar, &event).unwrap();
        let once = bar.tree().clone();
        bus.publish(&mut bar, &event).unwrap();
        assert_eq!(bar.tree(), &once);
    }

    #[test]
    fn test_trust_toggle_reattaches_handler() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let doc = FakeDocument::clean("nb.ipynb");

        for trusted in [false, true, false] {
            bus.publish(&mut bar, &BusEvent::TrustChanged(trusted)).unwrap();
        }
        let ctx = ClickContext { registry: &registry, document: &doc };
        let actions = bar.click(TRUST_NOTEBOOK, &ctx).unwrap();
        let trusts = actions.iter().filter(|a| **a == Action::TrustNotebook).count();
        assert_eq!(trusts, 1);
        assert_eq!(bar.tree().find(TRUST_NOTEBOOK).unwrap().label, "Trust Notebook");
    }

    #[test]
    fn test_trusted_notebook_is_inert() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let doc = FakeDocument::clean("nb.ipynb");
        bus.publish(&mut bar, &BusEvent::TrustChanged(true)).unwrap();

        let item = bar.tree().find(TRUST_NOTEBOOK).unwrap();
        assert!(item.disabled);
        assert_eq!(item.label, "Trusted Notebook");
        let ctx = ClickContext { registry: &registry, document: &doc };
        assert!(bar.click(TRUST_NOTEBOOK, &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_export_label_follows_notebook_and_kernel() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        bus.publish(&mut bar, &BusEvent::NotebookLoaded(None)).unwrap();
        assert_eq!(bar.tree().find(DOWNLOAD_SCRIPT).unwrap().label, "Script (txt)");

        let info = KernelInfo {
            language_info: Some(LanguageInfo::new("python", ".py")),
            help_links: vec![],
        };
        bus.publish(&mut bar, &BusEvent::KernelReady(info)).unwrap();
        assert_eq!(bar.tree().find(DOWNLOAD_SCRIPT).unwrap().label, "Python (.py)");
    }

    #[test]
    fn test_help_links_replace_then_remove_then_recreate() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let static_help = help_labels(&bar);

        let two = KernelInfo {
            language_info: None,
            help_links: vec![
                HelpLink::new("Python", "https://docs.python.org"),
                HelpLink::new("NumPy", "https://numpy.org/doc"),
            ],
        };
        bus.publish(&mut bar, &BusEvent::KernelReady(two.clone())).unwrap();
        bus.publish(&mut bar, &BusEvent::KernelReady(two)).unwrap();
        let labels = help_labels(&bar);
        let marker = labels.iter().position(|l| l == KERNEL_HELP_LINKS).unwrap();
        assert_eq!(&labels[marker + 1..marker + 3], &["Python", "NumPy"]);
        assert_eq!(labels.len(), static_help.len() + 3);

        let none = KernelInfo::default();
        bus.publish(&mut bar, &BusEvent::KernelReady(none)).unwrap();
        assert_eq!(help_labels(&bar), static_help);

        let one = KernelInfo {
            language_info: None,
            help_links: vec![HelpLink::new("Pandas", "https://pandas.pydata.org")],
        };
        bus.publish(&mut bar, &BusEvent::KernelReady(one)).unwrap();
        let labels = help_labels(&bar);
        assert_eq!(labels.len(), static_help.len() + 2);
        let marker = labels.iter().position(|l| l == KERNEL_HELP_LINKS).unwrap();
        assert_eq!(labels[marker + 1], "Pandas");
        assert_eq!(labels[marker + 2], "");
        assert_eq!(labels.last().map(String::as_str), Some(NOTEBOOK_ABOUT));
    }

    #[test]
    fn test_help_link_opens_new_context() {
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);
        let info = KernelInfo {
            language_info: None,
            help_links: vec![HelpLink::new("Python", "https://docs.python.org")],
        };
        bus.publish(&mut bar, &BusEvent::KernelReady(info)).unwrap();
        let path = bar.tree().path_of(KERNEL_HELP_LINKS).unwrap();
        let row = crate::menu::ItemPath { menu: path.menu, indices: vec![path.indices[0] + 1] };
        let doc = FakeDocument::clean("nb.ipynb");
        let actions = bar
            .click_at(&row, &ClickContext { registry: &registry, document: &doc })
            .unwrap();
        assert_eq!(
            actions[0],
            Action::OpenWindow {
                window: crate::app::action::WindowId(1),
                url: Some("https://docs.python.org".into()),
                target: crate::app::action::Target::Blank,
            }
        );
    }
}
