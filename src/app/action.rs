use serde::{Deserialize, Serialize};

/// Handle of a browsing context opened by a menu click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Where a new browsing context opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Blank,
    #[serde(rename = "self")]
    SelfWindow,
}

/// Side effects requested by menu clicks and list rows. The run loop executes
/// them in order against the collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenWindow { window: WindowId, url: Option<String>, target: Target },
    Navigate { window: WindowId, url: String },
    /// Save, then run `then` once the save completes.
    SaveNotebook { then: Option<Box<Action>> },
    CopyNotebook,
    TrustNotebook,
    EditMetadata,
    /// Ask the user whether to restore `checkpoint_id`.
    RestoreCheckpoint { checkpoint_id: String },
    /// Restore `checkpoint_id`; only issued once the user confirmed.
    RevertToCheckpoint { checkpoint_id: String },
    DuplicateNotebook { path: String },
    /// Delete the session and close the window whatever the outcome.
    DeleteSessionAndClose,
    CloseWindow,
    ReconnectKernel,
    StartTour,
    ShowKeyboardShortcuts,
    ShowAbout,
    /// `None` clears the preset and hides the toolbar.
    SetCellToolbar { preset: Option<String> },
    RegisterPreset { name: String },
    UnregisterPreset { name: String },
    ReselectCell,
    ShutdownSession { path: String },
    Notify(String),
    Quit,
}

impl Action {
    /// Variant name, used when reporting a failed action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenWindow { .. } => "OpenWindow",
            Action::Navigate { .. } => "Navigate",
            Action::SaveNotebook { .. } => "SaveNotebook",
            Action::CopyNotebook => "CopyNotebook",
            Action::TrustNotebook => "TrustNotebook",
            Action::EditMetadata => "EditMetadata",
            Action::RestoreCheckpoint { .. } => "RestoreCheckpoint",
            Action::RevertToCheckpoint { .. } => "RevertToCheckpoint",
            Action::DuplicateNotebook { .. } => "DuplicateNotebook",
            Action::DeleteSessionAndClose => "DeleteSessionAndClose",
            Action::CloseWindow => "CloseWindow",
            Action::ReconnectKernel => "ReconnectKernel",
            Action::StartTour => "StartTour",
            Action::ShowKeyboardShortcuts => "ShowKeyboardShortcuts",
            Action::ShowAbout => "ShowAbout",
            Action::SetCellToolbar { .. } => "SetCellToolbar",
            Action::RegisterPreset { .. } => "RegisterPreset",
            Action::UnregisterPreset { .. } => "UnregisterPreset",
            Action::ReselectCell => "ReselectCell",
            Action::ShutdownSession { .. } => "ShutdownSession",
            Action::Notify(_) => "Notify",
            Action::Quit => "Quit",
        }
    }
}
