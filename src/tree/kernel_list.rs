//! The "Running" list: live sessions rendered on top of [`PathList`].

use super::path_list::{EntryKind, PathEntry, PathList, Row, RowButton, RowDecorator};
use crate::app::action::Action;
use crate::bus::{BusEvent, EventBus, Topic};
use crate::error::{MenuError, MenuResult};
use crate::notebook::{KernelSpecCatalog, SessionMap};

/// Decoration for session rows: kernel name plus a Shutdown button, and no
/// Duplicate button.
#[derive(Debug, Default)]
pub struct SessionDecorator;

impl RowDecorator for SessionDecorator {
    /// Kernel display name.
    type Extra = String;

    fn add_duplicate_button(&self, _entry: &PathEntry, _row: &mut Row) {}

    fn decorate(&self, entry: &PathEntry, kernel_display_name: &String, row: &mut Row) {
        row.labels.push(kernel_display_name.clone());
        row.buttons.push(RowButton {
            label: "Shutdown".to_string(),
            action: Action::ShutdownSession {
                path: entry.path.clone(),
            },
        });
    }
}

/// Holds the catalog and the session map until both have arrived.
#[derive(Debug, Default)]
pub struct SessionJoin {
    catalog: Option<KernelSpecCatalog>,
    sessions: Option<SessionMap>,
}

impl SessionJoin {
    pub fn set_catalog(&mut self, catalog: KernelSpecCatalog) {
        self.catalog = Some(catalog);
    }

    pub fn set_sessions(&mut self, sessions: SessionMap) {
        self.sessions = Some(sessions);
    }

    /// Both sources have been seen at least once.
    pub fn is_ready(&self) -> bool {
        self.catalog.is_some() && self.sessions.is_some()
    }

    pub fn parts(&self) -> Option<(&KernelSpecCatalog, &SessionMap)> {
        Some((self.catalog.as_ref()?, self.sessions.as_ref()?))
    }
}

pub struct KernelList {
    list: PathList<SessionDecorator>,
    join: SessionJoin,
    renders: usize,
    error: Option<MenuError>,
}

impl AsMut<KernelList> for KernelList {
    fn as_mut(&mut self) -> &mut KernelList {
        self
    }
}

impl KernelList {
    pub fn new<C>(bus: &mut EventBus<C>) -> Self
    where
        C: AsMut<KernelList> + 'static,
    {
        bus.subscribe(Topic::KernelSpecsLoaded, |ctx: &mut C, event| match event {
            BusEvent::KernelSpecsLoaded(catalog) => ctx.as_mut().kernelspecs_loaded(catalog.clone()),
            _ => Ok(()),
        });
        bus.subscribe(Topic::SessionsLoaded, |ctx: &mut C, event| match event {
            BusEvent::SessionsLoaded(sessions) => ctx.as_mut().sessions_loaded(sessions.clone()),
            _ => Ok(()),
        });
        Self {
            list: PathList::new("running", SessionDecorator),
            join: SessionJoin::default(),
            renders: 0,
            error: None,
        }
    }

    pub fn kernelspecs_loaded(&mut self, catalog: KernelSpecCatalog) -> MenuResult<()> {
        self.join.set_catalog(catalog);
        self.render_if_ready()
    }

    pub fn sessions_loaded(&mut self, sessions: SessionMap) -> MenuResult<()> {
        self.join.set_sessions(sessions);
        self.render_if_ready()
    }

    /// Render, remembering the failure until a later render succeeds.
    fn render_if_ready(&mut self) -> MenuResult<()> {
        let result = self.render();
        self.error = result.as_ref().err().cloned();
        result
    }

    fn render(&mut self) -> MenuResult<()> {
        let Some((catalog, sessions)) = self.join.parts() else {
            return Ok(());
        };

        // Resolve every row before touching the list so a bad session leaves
        // the previous render in place.
        let resolved = sessions
            .iter()
            .map(|(path, session)| {
                let spec = catalog.get(&session.kernel_name).ok_or_else(|| {
                    MenuError::MissingKernelSpec {
                        kernel: session.kernel_name.clone(),
                        path: path.clone(),
                    }
                })?;
                Ok((path.clone(), spec.display_name.clone()))
            })
            .collect::<MenuResult<Vec<_>>>()?;

        self.list.clear_list();
        for (path, display_name) in resolved {
            let idx = self.list.new_item(None);
            let entry = PathEntry::new(path.clone(), path, EntryKind::Notebook);
            self.list.add_link(idx, entry, &display_name);
        }
        self.renders += 1;
        tracing::debug!(sessions = self.list.rows().len(), "running list rendered");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.join.is_ready()
    }

    /// Number of completed render passes.
    #[cfg(test)]
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Why the latest render did not happen, if it failed.
    pub fn error(&self) -> Option<&MenuError> {
        self.error.as_ref()
    }

    /// The "nothing running" placeholder shows once rendered with no sessions.
    pub fn placeholder_visible(&self) -> bool {
        self.error.is_none() && self.renders > 0 && self.list.rows().is_empty()
    }

    pub fn list(&self) -> &PathList<SessionDecorator> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut PathList<SessionDecorator> {
        &mut self.list
    }
}
