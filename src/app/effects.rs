//! Carries out the actions produced by menu clicks, list rows and commands.

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::notebook::{
    Browser, Completion, Contents, Document, HelpSurface, PresetRegistry, SessionTransport,
};
use anyhow::{bail, Result};
use tokio::sync::mpsc::UnboundedSender;

/// Everything an action can touch outside the views.
pub struct Collaborators {
    pub document: Box<dyn Document>,
    pub sessions: Box<dyn SessionTransport>,
    pub presets: Box<dyn PresetRegistry>,
    pub contents: Box<dyn Contents>,
    pub browser: Box<dyn Browser>,
    pub help: Box<dyn HelpSurface>,
}

pub struct Executor {
    collab: Collaborators,
    event_tx: UnboundedSender<AppEvent>,
}

impl Executor {
    pub fn new(collab: Collaborators, event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { collab, event_tx }
    }

    pub fn document(&self) -> &dyn Document {
        self.collab.document.as_ref()
    }

    pub fn execute_all(&mut self, state: &mut AppState, actions: Vec<Action>) {
        for action in actions {
            self.execute(state, action);
        }
    }

    /// Run one action. Failures land on the status line; they never stop
    /// the remaining actions of the same click.
    pub fn execute(&mut self, state: &mut AppState, action: Action) {
        let name = action.name();
        if let Err(e) = self.try_execute(state, action) {
            state.fail(format!("{} failed: {:#}", name, e));
        }
    }

    fn try_execute(&mut self, state: &mut AppState, action: Action) -> Result<()> {
        let c = &mut self.collab;
        match action {
            Action::OpenWindow { window, url, target } => {
                c.browser.open(window, url.as_deref(), target)?;
            }
            Action::Navigate { window, url } => c.browser.navigate(window, &url)?,
            Action::SaveNotebook { then } => {
                let tx = self.event_tx.clone();
                let done: Completion = Box::new(move |result| {
                    let event = match (result, then) {
                        (Ok(()), Some(next)) => AppEvent::Deferred(*next),
                        (Ok(()), None) => AppEvent::Status("Notebook saved".to_string()),
                        (Err(e), _) => AppEvent::Failure(format!("Save failed: {:#}", e)),
                    };
                    let _ = tx.send(event);
                });
                c.document.save(done);
            }
            Action::CopyNotebook => {
                c.document.copy()?;
                c.contents.list_directory()?;
            }
            Action::TrustNotebook => c.document.trust()?,
            Action::EditMetadata => c.document.edit_metadata()?,
            Action::RestoreCheckpoint { checkpoint_id } => {
                c.document.restore_checkpoint(&checkpoint_id)?;
            }
            Action::RevertToCheckpoint { checkpoint_id } => {
                c.document.revert_to_checkpoint(&checkpoint_id)?;
            }
            Action::DuplicateNotebook { path } => c.contents.duplicate(&path)?,
            Action::DeleteSessionAndClose => {
                let tx = self.event_tx.clone();
                c.sessions.delete_session(Box::new(move |result| {
                    if let Err(e) = result {
                        tracing::warn!("session delete failed, closing anyway: {:#}", e);
                    }
                    let _ = tx.send(AppEvent::Deferred(Action::CloseWindow));
                }));
            }
            Action::CloseWindow => c.browser.close_current(),
            Action::ReconnectKernel => c.sessions.reconnect_kernel()?,
            Action::StartTour => c.help.start_tour(),
            Action::ShowKeyboardShortcuts => c.help.show_keyboard_shortcuts(),
            Action::ShowAbout => c.help.show_about(),
            Action::SetCellToolbar { preset: None } => {
                c.document.set_celltoolbar(None);
                c.presets.global_hide();
            }
            Action::SetCellToolbar { preset: Some(name) } => {
                c.presets.global_show();
                c.presets.activate_preset(&name)?;
                c.document.set_celltoolbar(Some(&name));
            }
            Action::RegisterPreset { name } => {
                if !c.presets.register_preset(&name) {
                    bail!("preset {} is already registered", name);
                }
            }
            Action::UnregisterPreset { name } => {
                if !c.presets.unregister_preset(&name) {
                    bail!("no preset named {}", name);
                }
            }
            Action::ReselectCell => c.document.reselect_cell(),
            Action::ShutdownSession { path } => {
                tracing::info!(path = %path, "shutdown requested");
                c.sessions.shutdown_session(&path)?;
            }
            Action::Notify(text) => state.notify(text),
            Action::Quit => state.should_quit = true,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::{Target, WindowId};
    use crate::bus::EventBus;
    use crate::commands::ActionRegistry;
    use crate::config::AppConfig;
    use crate::menu::testing::FixedPresets;
    use crate::menu::{MenuBar, MenuOptions};
    use crate::notebook::LanguageInfo;
    use crate::tree::{FileList, KernelList};
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        log: Log,
        fail_save: bool,
        fail_delete: bool,
    }

    impl Recorder {
        fn push(&self, entry: impl Into<String>) {
            self.log.lock().unwrap().push(entry.into());
        }
    }

    impl Document for Recorder {
        fn path(&self) -> &str {
            "nb.ipynb"
        }
        fn is_dirty(&self) -> bool {
            true
        }
        fn language_info(&self) -> Option<LanguageInfo> {
            None
        }
        fn save(&mut self, done: Completion) {
            self.push("save");
            done(if self.fail_save { Err(anyhow!("disk full")) } else { Ok(()) });
        }
        fn copy(&mut self) -> Result<()> {
            self.push("copy");
            Ok(())
        }
        fn trust(&mut self) -> Result<()> {
            self.push("trust");
            Ok(())
        }
        fn edit_metadata(&mut self) -> Result<()> {
            self.push("edit_metadata");
            Ok(())
        }
        fn restore_checkpoint(&mut self, id: &str) -> Result<()> {
            bail!("no checkpoint {}", id)
        }
        fn revert_to_checkpoint(&mut self, id: &str) -> Result<()> {
            self.push(format!("revert {}", id));
            Ok(())
        }
        fn set_celltoolbar(&mut self, preset: Option<&str>) {
            self.push(format!("celltoolbar={:?}", preset));
        }
        fn reselect_cell(&mut self) {
            self.push("reselect");
        }
    }

    impl SessionTransport for Recorder {
        fn delete_session(&mut self, done: Completion) {
            self.push("delete_session");
            done(if self.fail_delete { Err(anyhow!("gone")) } else { Ok(()) });
        }
        fn reconnect_kernel(&mut self) -> Result<()> {
            self.push("reconnect");
            Ok(())
        }
        fn shutdown_session(&mut self, path: &str) -> Result<()> {
            self.push(format!("shutdown {}", path));
            Ok(())
        }
    }

    impl PresetRegistry for Recorder {
        fn list_presets(&self) -> Vec<String> {
            Vec::new()
        }
        fn activate_preset(&mut self, name: &str) -> Result<()> {
            self.push(format!("activate {}", name));
            Ok(())
        }
        fn global_show(&mut self) {
            self.push("show");
        }
        fn global_hide(&mut self) {
            self.push("hide");
        }
        fn register_preset(&mut self, name: &str) -> bool {
            self.push(format!("register {}", name));
            true
        }
        fn unregister_preset(&mut self, name: &str) -> bool {
            self.push(format!("unregister {}", name));
            name != "Missing"
        }
    }

    impl Contents for Recorder {
        fn list_directory(&mut self) -> Result<()> {
            self.push("list");
            Ok(())
        }
        fn duplicate(&mut self, path: &str) -> Result<()> {
            self.push(format!("duplicate {}", path));
            Ok(())
        }
    }

    impl Browser for Recorder {
        fn open(&mut self, window: WindowId, url: Option<&str>, _target: Target) -> Result<()> {
            self.push(format!("open {} {:?}", window.0, url));
            Ok(())
        }
        fn navigate(&mut self, window: WindowId, url: &str) -> Result<()> {
            self.push(format!("navigate {} {}", window.0, url));
            Ok(())
        }
        fn close_current(&mut self) {
            self.push("close");
        }
    }

    impl HelpSurface for Recorder {
        fn start_tour(&mut self) {
            self.push("tour");
        }
        fn show_keyboard_shortcuts(&mut self) {
            self.push("shortcuts");
        }
        fn show_about(&mut self) {
            self.push("about");
        }
    }

    struct Harness {
        executor: Executor,
        state: AppState,
        log: Log,
        rx: mpsc::UnboundedReceiver<AppEvent>,
    }

    fn harness(fail_save: bool, fail_delete: bool) -> Harness {
        let log: Log = Arc::default();
        let make = || {
            Box::new(Recorder {
                log: log.clone(),
                fail_save,
                fail_delete,
            })
        };
        let collab = Collaborators {
            document: make(),
            sessions: make(),
            presets: make(),
            contents: make(),
            browser: make(),
            help: make(),
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let mut bus: EventBus<AppState> = EventBus::new();
        let registry = ActionRegistry::new();
        let menubar =
            MenuBar::new(MenuOptions::default(), &registry, &FixedPresets(Vec::new()), &mut bus);
        let kernels = KernelList::new(&mut bus);
        let files = FileList::new(&mut bus);
        Harness {
            executor: Executor::new(collab, tx),
            state: AppState::new(AppConfig::default(), menubar, kernels, files),
            log,
            rx,
        }
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_save_continuation_is_deferred() {
        let mut h = harness(false, false);
        let next = Action::Navigate { window: WindowId(1), url: "/nbconvert/html/nb.ipynb?download=false".into() };
        h.executor.execute(
            &mut h.state,
            Action::SaveNotebook { then: Some(Box::new(next.clone())) },
        );
        assert_eq!(entries(&h.log), vec!["save"]);
        match h.rx.try_recv().unwrap() {
            AppEvent::Deferred(action) => assert_eq!(action, next),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_failed_save_drops_continuation() {
        let mut h = harness(true, false);
        h.executor.execute(
            &mut h.state,
            Action::SaveNotebook { then: Some(Box::new(Action::CloseWindow)) },
        );
        assert!(matches!(h.rx.try_recv().unwrap(), AppEvent::Failure(_)));
        assert!(h.rx.try_recv().is_err());
    }

    #[test]
    fn test_close_follows_delete_even_on_failure() {
        for fail in [false, true] {
            let mut h = harness(false, fail);
            h.executor.execute(&mut h.state, Action::DeleteSessionAndClose);
            match h.rx.try_recv().unwrap() {
                AppEvent::Deferred(action) => {
                    assert_eq!(action, Action::CloseWindow);
                    h.executor.execute(&mut h.state, action);
                }
                other => panic!("unexpected {:?}", other),
            }
            assert_eq!(entries(&h.log), vec!["delete_session", "close"]);
        }
    }

    #[test]
    fn test_revert_goes_to_the_document() {
        let mut h = harness(false, false);
        h.executor.execute(
            &mut h.state,
            Action::RevertToCheckpoint { checkpoint_id: "checkpoint-1".into() },
        );
        assert_eq!(entries(&h.log), vec!["revert checkpoint-1"]);
    }

    #[test]
    fn test_copy_and_duplicate_refresh_the_directory() {
        let mut h = harness(false, false);
        h.executor.execute_all(
            &mut h.state,
            vec![
                Action::CopyNotebook,
                Action::DuplicateNotebook { path: "other.ipynb".into() },
            ],
        );
        assert_eq!(entries(&h.log), vec!["copy", "list", "duplicate other.ipynb"]);
    }

    #[test]
    fn test_unknown_preset_removal_is_reported() {
        let mut h = harness(false, false);
        h.executor.execute_all(
            &mut h.state,
            vec![
                Action::RegisterPreset { name: "Tags".into() },
                Action::UnregisterPreset { name: "Missing".into() },
            ],
        );
        assert_eq!(entries(&h.log), vec!["register Tags", "unregister Missing"]);
        let status = h.state.status.clone().unwrap();
        assert_eq!(status.text, "UnregisterPreset failed: no preset named Missing");
    }

    #[test]
    fn test_preset_selection_order() {
        let mut h = harness(false, false);
        h.executor.execute_all(
            &mut h.state,
            vec![
                Action::SetCellToolbar { preset: Some("Slideshow".into()) },
                Action::SetCellToolbar { preset: None },
                Action::ReselectCell,
            ],
        );
        assert_eq!(
            entries(&h.log),
            vec![
                "show",
                "activate Slideshow",
                "celltoolbar=Some(\"Slideshow\")",
                "celltoolbar=None",
                "hide",
                "reselect",
            ]
        );
    }

    #[test]
    fn test_failure_reaches_status_line_and_later_actions_still_run() {
        let mut h = harness(false, false);
        h.executor.execute_all(
            &mut h.state,
            vec![
                Action::RestoreCheckpoint { checkpoint_id: "cp-9".into() },
                Action::ReselectCell,
            ],
        );
        let status = h.state.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("RestoreCheckpoint failed"), "{}", status.text);
        assert_eq!(entries(&h.log), vec!["reselect"]);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::SaveNotebook { then: None }.name(), "SaveNotebook");
        assert_eq!(Action::Notify("x (y)".into()).name(), "Notify");
    }
}
