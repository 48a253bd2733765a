//! Errors surfaced by the menu engine.
//!
//! Binding-time problems are only logged; everything here is a failure that
//! reaches the caller of a click or a bus delivery.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A control invoked a command the registry cannot resolve.
    #[error("command {0} is not registered")]
    CommandNotFound(String),

    #[error("no control with id {0}")]
    UnknownControl(String),

    /// A session references a kernel that the catalog does not describe.
    #[error("kernel spec {kernel:?} is missing for session {path}")]
    MissingKernelSpec { kernel: String, path: String },
}

pub type MenuResult<T> = Result<T, MenuError>;
