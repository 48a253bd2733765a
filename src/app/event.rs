use crate::app::action::Action;
use crate::bus::BusEvent;
use crossterm::event::Event as CrosstermEvent;

/// Popups drawn over the panels. Help popups only need dismissing; a
/// confirmation carries what the user is asked to agree to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Tour,
    KeyboardShortcuts,
    About,
    ConfirmRestore { checkpoint_id: String, label: String },
}

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Notification from a collaborator, fanned out to the views.
    Bus(BusEvent),

    /// Continuation of an asynchronous collaborator operation.
    Deferred(Action),

    /// Status line text from a collaborator.
    Status(String),
    Failure(String),

    ShowOverlay(Overlay),

    /// The notebook window is going away.
    CloseRequested,

    /// Tick for UI refresh
    Tick,
}
