use super::EventSink;
use crate::app::action::{Target, WindowId};
use crate::app::event::{AppEvent, Overlay};
use crate::notebook::{Browser, HelpSurface};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;

/// Hands the URLs menu clicks open to the system browser when launching is
/// enabled. Windows opened without a URL wait in `pending` until navigated.
pub struct LocalBrowser {
    origin: String,
    launch: bool,
    pending: HashMap<WindowId, Target>,
    events: EventSink,
}

impl LocalBrowser {
    pub fn new(origin: &str, launch: bool, events: EventSink) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            launch,
            pending: HashMap::new(),
            events,
        }
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            format!("{}/{}", self.origin, url)
        }
    }

    fn show(&self, url: &str, target: Target) -> Result<()> {
        let full = self.absolute(url);
        if self.launch {
            open::that(&full).with_context(|| format!("Failed to open {}", full))?;
        }
        let place = match target {
            Target::Blank => "new window",
            Target::SelfWindow => "this window",
        };
        let _ = self
            .events
            .send(AppEvent::Status(format!("Opened {} ({})", full, place)));
        Ok(())
    }
}

impl Browser for LocalBrowser {
    fn open(&mut self, window: WindowId, url: Option<&str>, target: Target) -> Result<()> {
        match url {
            Some(url) => self.show(url, target),
            None => {
                self.pending.insert(window, target);
                Ok(())
            }
        }
    }

    fn navigate(&mut self, window: WindowId, url: &str) -> Result<()> {
        let Some(target) = self.pending.remove(&window) else {
            bail!("Window {} is not waiting for a URL", window.0);
        };
        self.show(url, target)
    }

    fn close_current(&mut self) {
        let _ = self.events.send(AppEvent::CloseRequested);
    }
}

/// Help surfaces rendered as popups.
pub struct LocalHelp {
    events: EventSink,
}

impl LocalHelp {
    pub fn new(events: EventSink) -> Self {
        Self { events }
    }

    fn show(&self, overlay: Overlay) {
        let _ = self.events.send(AppEvent::ShowOverlay(overlay));
    }
}

impl HelpSurface for LocalHelp {
    fn start_tour(&mut self) {
        self.show(Overlay::Tour);
    }

    fn show_keyboard_shortcuts(&mut self) {
        self.show(Overlay::KeyboardShortcuts);
    }

    fn show_about(&mut self) {
        self.show(Overlay::About);
    }
}
