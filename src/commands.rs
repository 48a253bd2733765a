//! Named command registry and the command prompt parser.
//!
//! Menu entries refer to commands by name only. The registry is consulted on
//! every click, so a command can be registered or replaced after the menubar
//! was bound and the existing entries pick it up.

use crate::app::action::Action;
use crate::error::{MenuError, MenuResult};
use std::collections::HashMap;

/// Namespace shared by every notebook command.
pub const COMMAND_PREFIX: &str = "jupyter-notebook:";

/// What the registry learns about the click that invoked a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub control: String,
    /// Text typed after the command name at the prompt.
    pub argument: Option<String>,
}

impl ClickEvent {
    pub fn new(control: impl Into<String>) -> Self {
        Self {
            control: control.into(),
            argument: None,
        }
    }

    pub fn with_argument(mut self, argument: Option<String>) -> Self {
        self.argument = argument;
        self
    }
}

pub trait CommandRegistry {
    fn exists(&self, name: &str) -> bool;
    fn invoke(&self, name: &str, event: &ClickEvent) -> MenuResult<Vec<Action>>;
}

type CommandHandler = Box<dyn Fn(&ClickEvent) -> Vec<Action>>;

/// In-process registry standing in for the keyboard shortcut dispatcher.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, CommandHandler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the commands this terminal front end can carry out.
    /// Renaming and find/replace need a cell editor and stay unregistered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(qualified("save-notebook"), |_| {
            vec![Action::SaveNotebook { then: None }]
        });
        registry.register(qualified("trust-notebook"), |_| vec![Action::TrustNotebook]);
        for name in [
            "confirm-restart-kernel",
            "confirm-restart-kernel-and-clear-output",
            "confirm-restart-kernel-and-run-all-cells",
        ] {
            registry.register(qualified(name), |_| {
                vec![
                    Action::ReconnectKernel,
                    Action::Notify("Kernel restarted".to_string()),
                ]
            });
        }
        registry.register(qualified("interrupt-kernel"), |_| {
            vec![Action::Notify("Kernel interrupted".to_string())]
        });
        registry.register(qualified("register-preset"), |event| {
            preset_command(event, |name| Action::RegisterPreset { name })
        });
        registry.register(qualified("unregister-preset"), |event| {
            preset_command(event, |name| Action::UnregisterPreset { name })
        });
        for name in CELL_COMMANDS {
            registry.register(qualified(name), move |event| {
                vec![Action::Notify(format!("{} ({})", name, event.control))]
            });
        }
        registry
    }

    /// Register `name`, replacing any previous handler of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&ClickEvent) -> Vec<Action> + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

}

fn preset_command(event: &ClickEvent, action: fn(String) -> Action) -> Vec<Action> {
    match &event.argument {
        Some(name) => vec![action(name.clone())],
        None => vec![Action::Notify("A preset name is required".to_string())],
    }
}

impl CommandRegistry for ActionRegistry {
    fn exists(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    fn invoke(&self, name: &str, event: &ClickEvent) -> MenuResult<Vec<Action>> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| MenuError::CommandNotFound(name.to_string()))?;
        tracing::debug!(command = name, control = %event.control, "invoking command");
        Ok(handler(event))
    }
}

const CELL_COMMANDS: &[&str] = &[
    "cut-cell",
    "copy-cell",
    "delete-cell",
    "undo-cell-deletion",
    "split-cell-at-cursor",
    "merge-cell-with-previous-cell",
    "merge-cell-with-next-cell",
    "move-cell-up",
    "move-cell-down",
    "toggle-header",
    "toggle-toolbar",
    "insert-cell-above",
    "insert-cell-below",
    "run-cell",
    "run-cell-and-select-next",
    "run-cell-and-insert-below",
    "run-all-cells",
    "run-all-cells-above",
    "run-all-cells-below",
    "change-cell-to-code",
    "change-cell-to-markdown",
    "change-cell-to-raw",
    "toggle-cell-output-collapsed",
    "toggle-cell-output-scrolled",
    "clear-cell-output",
    "toggle-all-cells-output-collapsed",
    "toggle-all-cells-output-scrolled",
    "clear-all-cells-output",
];

/// Full command name for a short action name.
pub fn qualified(action: &str) -> String {
    format!("{}{}", COMMAND_PREFIX, action)
}

/// A command line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCommand {
    pub name: String,
    pub argument: Option<String>,
}

/// Parse a command prompt line into a full command name and its argument.
///
/// Accepts `:run-cell`, `run-cell` or an already namespaced
/// `jupyter-notebook:run-cell`. Everything after the first run of whitespace
/// is the argument. Returns `None` for a blank line.
pub fn parse_prompt(input: &str) -> Option<PromptCommand> {
    let input = input.trim();
    let line = input.strip_prefix(':').unwrap_or(input).trim_start();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    if name.is_empty() {
        return None;
    }
    let name = if name.contains(':') {
        name.to_string()
    } else {
        qualified(name)
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());
    Some(PromptCommand { name, argument })
}
