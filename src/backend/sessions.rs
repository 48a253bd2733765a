use super::EventSink;
use crate::app::event::AppEvent;
use crate::bus::BusEvent;
use crate::notebook::{Completion, KernelSpecCatalog, Session, SessionMap, SessionTransport};
use anyhow::{anyhow, bail, Context, Result};

/// In-process session manager: one session per open notebook, kernels
/// described by the configured catalog.
pub struct LocalSessions {
    catalog: KernelSpecCatalog,
    sessions: SessionMap,
    current: Option<String>,
    events: EventSink,
}

impl LocalSessions {
    pub fn new(catalog: KernelSpecCatalog, events: EventSink) -> Self {
        Self {
            catalog,
            sessions: SessionMap::new(),
            current: None,
            events,
        }
    }

    /// Start a session for `path`. Falls back to the first catalog kernel
    /// when `kernel_name` is absent or unknown.
    pub fn start(&mut self, path: &str, kernel_name: Option<&str>) -> Result<()> {
        let kernel = kernel_name
            .filter(|name| self.catalog.get(name).is_some())
            .map(str::to_string)
            .or_else(|| self.catalog.names().next().map(str::to_string))
            .context("No kernel specs configured")?;
        self.sessions.insert(
            path.to_string(),
            Session {
                path: path.to_string(),
                kernel_name: kernel,
            },
        );
        self.current = Some(path.to_string());

        // Sessions usually come back before the kernelspec catalog.
        self.publish_sessions();
        self.publish(BusEvent::KernelSpecsLoaded(self.catalog.clone()));
        self.announce_kernel()
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    fn publish(&self, event: BusEvent) {
        let _ = self.events.send(AppEvent::Bus(event));
    }

    fn publish_sessions(&self) {
        self.publish(BusEvent::SessionsLoaded(self.sessions.clone()));
    }

    fn announce_kernel(&self) -> Result<()> {
        let session = self
            .current
            .as_ref()
            .and_then(|path| self.sessions.get(path))
            .context("The notebook has no running session")?;
        let spec = self
            .catalog
            .get(&session.kernel_name)
            .with_context(|| format!("Unknown kernel {}", session.kernel_name))?;
        self.publish(BusEvent::KernelReady(spec.kernel_info()));
        Ok(())
    }
}

impl SessionTransport for LocalSessions {
    fn delete_session(&mut self, done: Completion) {
        let removed = self
            .current
            .take()
            .and_then(|path| self.sessions.shift_remove(&path));
        let result = match removed {
            Some(session) => {
                tracing::info!(path = %session.path, "session deleted");
                self.publish_sessions();
                Ok(())
            }
            None => Err(anyhow!("The notebook has no running session")),
        };
        done(result);
    }

    fn reconnect_kernel(&mut self) -> Result<()> {
        self.announce_kernel()?;
        let _ = self
            .events
            .send(AppEvent::Status("Kernel reconnected".to_string()));
        Ok(())
    }

    fn shutdown_session(&mut self, path: &str) -> Result<()> {
        if self.sessions.shift_remove(path).is_none() {
            bail!("No session for {}", path);
        }
        if self.current.as_deref() == Some(path) {
            self.current = None;
        }
        self.publish_sessions();
        Ok(())
    }
}
