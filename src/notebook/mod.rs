//! Interfaces of the collaborators the menu engine talks to: the open
//! document, the session transport, the cell toolbar preset registry, the
//! directory contents, the browser and the help surfaces.
//!
//! The engine never holds these for longer than a click. Anything that takes
//! time reports back through a [`Completion`] instead of blocking.

pub mod model;

pub use model::*;

use crate::app::action::{Target, WindowId};
use anyhow::Result;

/// Continuation run once an asynchronous collaborator operation settles.
pub type Completion = Box<dyn FnOnce(Result<()>) + Send>;

pub trait Document {
    fn path(&self) -> &str;
    fn is_dirty(&self) -> bool;
    fn language_info(&self) -> Option<LanguageInfo>;

    /// Start saving. `done` runs when the save settles, possibly much later.
    fn save(&mut self, done: Completion);
    fn copy(&mut self) -> Result<()>;
    fn trust(&mut self) -> Result<()>;
    fn edit_metadata(&mut self) -> Result<()>;

    /// Ask the user to confirm restoring `checkpoint_id`. Nothing changes
    /// until [`Document::revert_to_checkpoint`] is called.
    fn restore_checkpoint(&mut self, checkpoint_id: &str) -> Result<()>;

    /// Replace the notebook with the snapshot taken at `checkpoint_id`.
    fn revert_to_checkpoint(&mut self, checkpoint_id: &str) -> Result<()>;

    /// Overwrite the single `celltoolbar` metadata field, or delete it.
    fn set_celltoolbar(&mut self, preset: Option<&str>);
    fn reselect_cell(&mut self);
}

pub trait SessionTransport {
    fn delete_session(&mut self, done: Completion);
    fn reconnect_kernel(&mut self) -> Result<()>;
    fn shutdown_session(&mut self, path: &str) -> Result<()>;
}

pub trait PresetRegistry {
    /// Registered preset names in registration order.
    fn list_presets(&self) -> Vec<String>;
    fn activate_preset(&mut self, name: &str) -> Result<()>;
    fn global_show(&mut self);
    fn global_hide(&mut self);

    /// Returns false when `name` is already registered.
    fn register_preset(&mut self, name: &str) -> bool;
    /// Returns false when `name` was not registered.
    fn unregister_preset(&mut self, name: &str) -> bool;
}

/// Files next to the open notebook.
pub trait Contents {
    /// Publish the current directory listing.
    fn list_directory(&mut self) -> Result<()>;
    /// Copy the notebook at `path` to a free `-CopyN` name beside it.
    fn duplicate(&mut self, path: &str) -> Result<()>;
}

pub trait Browser {
    /// Open a browsing context. `url` may be `None` for a window that will be
    /// navigated once its content is ready.
    fn open(&mut self, window: WindowId, url: Option<&str>, target: Target) -> Result<()>;
    fn navigate(&mut self, window: WindowId, url: &str) -> Result<()>;
    fn close_current(&mut self);
}

pub trait HelpSurface {
    fn start_tour(&mut self);
    fn show_keyboard_shortcuts(&mut self);
    fn show_about(&mut self);
}
