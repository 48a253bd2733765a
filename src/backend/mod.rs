//! In-process collaborators so the menubar runs against a notebook on local
//! disk without a notebook server.
//!
//! Each collaborator reports back to the run loop by sending `AppEvent`s:
//! bus notifications for the views, status text for the user.

pub mod browser;
pub mod contents;
pub mod notebook;
pub mod sessions;
pub mod toolbar;

pub use browser::{LocalBrowser, LocalHelp};
pub use contents::LocalContents;
pub use notebook::LocalNotebook;
pub use sessions::LocalSessions;
pub use toolbar::LocalToolbar;

use crate::app::event::AppEvent;
use tokio::sync::mpsc::UnboundedSender;

pub type EventSink = UnboundedSender<AppEvent>;
