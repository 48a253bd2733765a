use super::EventSink;
use crate::app::event::AppEvent;
use crate::bus::BusEvent;
use crate::notebook::PresetRegistry;
use anyhow::{bail, Result};

/// Presets every notebook ships with.
pub const BUILTIN_PRESETS: [&str; 3] = ["Edit Metadata", "Raw Cell Format", "Slideshow"];

/// Cell toolbar preset registry. At most one preset is active.
pub struct LocalToolbar {
    presets: Vec<String>,
    active: Option<String>,
    visible: bool,
    events: EventSink,
}

impl LocalToolbar {
    pub fn new(events: EventSink) -> Self {
        Self {
            presets: BUILTIN_PRESETS.iter().map(|p| p.to_string()).collect(),
            active: None,
            visible: false,
            events,
        }
    }

    fn announce(&self, event: BusEvent) {
        let _ = self.events.send(AppEvent::Bus(event));
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl PresetRegistry for LocalToolbar {
    fn list_presets(&self) -> Vec<String> {
        self.presets.clone()
    }

    fn activate_preset(&mut self, name: &str) -> Result<()> {
        if !self.presets.iter().any(|p| p == name) {
            bail!("Unknown cell toolbar preset {}", name);
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    fn global_show(&mut self) {
        if !self.visible {
            tracing::debug!("cell toolbar shown");
        }
        self.visible = true;
    }

    fn global_hide(&mut self) {
        if self.visible {
            tracing::debug!(preset = ?self.active, "cell toolbar hidden");
        }
        self.visible = false;
        self.active = None;
    }

    fn register_preset(&mut self, name: &str) -> bool {
        if self.presets.iter().any(|p| p == name) {
            return false;
        }
        self.presets.push(name.to_string());
        self.announce(BusEvent::PresetAdded(name.to_string()));
        true
    }

    fn unregister_preset(&mut self, name: &str) -> bool {
        let Some(idx) = self.presets.iter().position(|p| p == name) else {
            return false;
        };
        self.presets.remove(idx);
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        self.announce(BusEvent::PresetRemoved(name.to_string()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionRegistry;
    use crate::menu::testing::bar_with;
    use tokio::sync::mpsc;

    #[test]
    fn test_register_announces_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut toolbar = LocalToolbar::new(tx);
        assert!(toolbar.register_preset("Tags"));
        assert!(!toolbar.register_preset("Tags"));
        assert!(!toolbar.register_preset("Slideshow"));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::Bus(BusEvent::PresetAdded(name)) if name == "Tags"
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(toolbar.list_presets().last().map(String::as_str), Some("Tags"));
    }

    #[test]
    fn test_activate_show_hide() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut toolbar = LocalToolbar::new(tx);
        assert!(toolbar.activate_preset("Nope").is_err());
        toolbar.global_show();
        toolbar.activate_preset("Slideshow").unwrap();
        assert_eq!(toolbar.active(), Some("Slideshow"));
        assert!(toolbar.is_visible());
        toolbar.global_hide();
        assert_eq!(toolbar.active(), None);
        assert!(!toolbar.is_visible());
    }

    #[test]
    fn test_register_register_unregister_reaches_the_submenu() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut toolbar = LocalToolbar::new(tx);
        let registry = ActionRegistry::new();
        let (mut bar, bus) = bar_with(&registry, &[]);

        assert!(toolbar.register_preset("Foo"));
        assert!(toolbar.register_preset("Bar"));
        assert!(toolbar.unregister_preset("Foo"));
        assert!(!toolbar.unregister_preset("Foo"));

        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Bus(event) = event {
                bus.publish(&mut bar, &event).unwrap();
            }
        }
        let labels: Vec<&str> = bar.preset_rows().into_iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["None", "Bar"]);
    }

    #[test]
    fn test_unregistering_the_active_preset_clears_it() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut toolbar = LocalToolbar::new(tx);
        toolbar.activate_preset("Slideshow").unwrap();
        toolbar.unregister_preset("Raw Cell Format");
        assert_eq!(toolbar.active(), Some("Slideshow"));
        toolbar.unregister_preset("Slideshow");
        assert_eq!(toolbar.active(), None);
        assert!(toolbar.activate_preset("Slideshow").is_err());
    }
}
