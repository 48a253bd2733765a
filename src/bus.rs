//! Typed publish/subscribe channel between the collaborators and the views.
//!
//! Topics form a closed set and every payload variant belongs to exactly one
//! topic, so a subscriber can never receive a payload shape it does not
//! expect. Delivery is synchronous: `publish` runs every subscriber of the
//! topic to completion, in subscription order, before returning.

use crate::error::MenuResult;
use crate::notebook::{Checkpoint, KernelInfo, KernelSpecCatalog, LanguageInfo, SessionMap};
use crate::tree::PathEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CheckpointsListed,
    CheckpointCreated,
    TrustChanged,
    NotebookLoaded,
    KernelReady,
    PresetAdded,
    PresetRemoved,
    KernelSpecsLoaded,
    SessionsLoaded,
    DirectoryListed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    /// The document's full checkpoint list.
    CheckpointsListed(Vec<Checkpoint>),
    /// The full checkpoint list after a new checkpoint was taken.
    CheckpointCreated(Vec<Checkpoint>),
    TrustChanged(bool),
    NotebookLoaded(Option<LanguageInfo>),
    KernelReady(KernelInfo),
    PresetAdded(String),
    PresetRemoved(String),
    KernelSpecsLoaded(KernelSpecCatalog),
    SessionsLoaded(SessionMap),
    /// Entries of the notebook's directory, unsorted.
    DirectoryListed(Vec<PathEntry>),
}

impl BusEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::CheckpointsListed(_) => Topic::CheckpointsListed,
            BusEvent::CheckpointCreated(_) => Topic::CheckpointCreated,
            BusEvent::TrustChanged(_) => Topic::TrustChanged,
            BusEvent::NotebookLoaded(_) => Topic::NotebookLoaded,
            BusEvent::KernelReady(_) => Topic::KernelReady,
            BusEvent::PresetAdded(_) => Topic::PresetAdded,
            BusEvent::PresetRemoved(_) => Topic::PresetRemoved,
            BusEvent::KernelSpecsLoaded(_) => Topic::KernelSpecsLoaded,
            BusEvent::SessionsLoaded(_) => Topic::SessionsLoaded,
            BusEvent::DirectoryListed(_) => Topic::DirectoryListed,
        }
    }
}

type Handler<C> = Box<dyn Fn(&mut C, &BusEvent) -> MenuResult<()>>;

struct Subscriber<C> {
    topic: Topic,
    handler: Handler<C>,
}

/// Event bus whose handlers mutate a shared context `C` (the application
/// state in the binary, a single view in tests).
pub struct EventBus<C> {
    subscribers: Vec<Subscriber<C>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, topic: Topic, handler: F)
    where
        F: Fn(&mut C, &BusEvent) -> MenuResult<()> + 'static,
    {
        self.subscribers.push(Subscriber {
            topic,
            handler: Box::new(handler),
        });
    }

    #[cfg(test)]
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers.iter().filter(|s| s.topic == topic).count()
    }

    /// Deliver `event` to every subscriber of its topic.
    ///
    /// A failing subscriber does not stop delivery to the ones after it; the
    /// first error is returned once everyone has run.
    pub fn publish(&self, ctx: &mut C, event: &BusEvent) -> MenuResult<()> {
        let topic = event.topic();
        let mut first_err = None;
        let mut delivered = 0usize;
        for sub in self.subscribers.iter().filter(|s| s.topic == topic) {
            delivered += 1;
            if let Err(e) = (sub.handler)(ctx, event) {
                tracing::error!(?topic, error = %e, "bus subscriber failed");
                first_err.get_or_insert(e);
            }
        }
        tracing::debug!(?topic, delivered, "published");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;

    #[test]
    fn test_delivers_in_subscription_order() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.subscribe(Topic::TrustChanged, |log, _| {
            log.push("first");
            Ok(())
        });
        bus.subscribe(Topic::PresetAdded, |log, _| {
            log.push("other topic");
            Ok(())
        });
        bus.subscribe(Topic::TrustChanged, |log, _| {
            log.push("second");
            Ok(())
        });

        let mut log = Vec::new();
        bus.publish(&mut log, &BusEvent::TrustChanged(true)).unwrap();
        assert_eq!(log, vec!["first", "second"]);
        assert_eq!(bus.subscriber_count(Topic::TrustChanged), 2);
    }

    #[test]
    fn test_failing_subscriber_does_not_starve_later_ones() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.subscribe(Topic::PresetRemoved, |_, _| {
            Err(MenuError::UnknownControl("x".into()))
        });
        bus.subscribe(Topic::PresetRemoved, |n, _| {
            *n += 1;
            Ok(())
        });

        let mut n = 0;
        let err = bus
            .publish(&mut n, &BusEvent::PresetRemoved("Foo".into()))
            .unwrap_err();
        assert_eq!(err, MenuError::UnknownControl("x".into()));
        assert_eq!(n, 1);
    }
}
