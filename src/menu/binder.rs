//! Wires every static control to what it does.
//!
//! Most controls name a command that the registry resolves at click time.
//! The rest need more than one step (save before exporting, close after
//! deleting the session) and get a bespoke [`Effect`].

use super::celltoolbar::PresetKey;
use super::item::Binding;
use super::url::{encode_path_components, url_path_join, url_path_split};
use super::MenuBar;
use crate::app::action::{Action, Target, WindowId};
use crate::commands::{qualified, CommandRegistry};
use crate::notebook::Document;

/// Control id -> command action name (without the namespace).
pub const COMMAND_BINDINGS: &[(&str, &str)] = &[
    ("trust_notebook", "trust-notebook"),
    ("rename_notebook", "rename-notebook"),
    ("find_and_replace", "find-and-replace"),
    ("save_checkpoint", "save-notebook"),
    ("restart_kernel", "confirm-restart-kernel"),
    ("restart_clear_output", "confirm-restart-kernel-and-clear-output"),
    ("restart_run_all", "confirm-restart-kernel-and-run-all-cells"),
    ("int_kernel", "interrupt-kernel"),
    ("cut_cell", "cut-cell"),
    ("copy_cell", "copy-cell"),
    ("delete_cell", "delete-cell"),
    ("undelete_cell", "undo-cell-deletion"),
    ("split_cell", "split-cell-at-cursor"),
    ("merge_cell_above", "merge-cell-with-previous-cell"),
    ("merge_cell_below", "merge-cell-with-next-cell"),
    ("move_cell_up", "move-cell-up"),
    ("move_cell_down", "move-cell-down"),
    ("toggle_header", "toggle-header"),
    ("toggle_toolbar", "toggle-toolbar"),
    ("insert_cell_above", "insert-cell-above"),
    ("insert_cell_below", "insert-cell-below"),
    ("run_cell", "run-cell"),
    ("run_cell_select_below", "run-cell-and-select-next"),
    ("run_cell_insert_below", "run-cell-and-insert-below"),
    ("run_all_cells", "run-all-cells"),
    ("run_all_cells_above", "run-all-cells-above"),
    ("run_all_cells_below", "run-all-cells-below"),
    ("to_code", "change-cell-to-code"),
    ("to_markdown", "change-cell-to-markdown"),
    ("to_raw", "change-cell-to-raw"),
    ("toggle_current_output", "toggle-cell-output-collapsed"),
    ("toggle_current_output_scroll", "toggle-cell-output-scrolled"),
    ("clear_current_output", "clear-cell-output"),
    ("toggle_all_output", "toggle-all-cells-output-collapsed"),
    ("toggle_all_output_scroll", "toggle-all-cells-output-scrolled"),
    ("clear_all_output", "clear-all-cells-output"),
];

const NOTEBOOK_HELP_URL: &str =
    "http://nbviewer.jupyter.org/github/ipython/ipython/blob/3.x/examples/Notebook/Index.ipynb";
const MARKDOWN_HELP_URL: &str = "https://help.github.com/articles/markdown-basics/";

/// The "Print Preview" and "Download as" conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    HtmlPreview,
    Html,
    Markdown,
    Rst,
    Pdf,
    Script,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::HtmlPreview,
        ExportFormat::Html,
        ExportFormat::Markdown,
        ExportFormat::Rst,
        ExportFormat::Pdf,
        ExportFormat::Script,
    ];

    pub fn control_id(self) -> &'static str {
        match self {
            ExportFormat::HtmlPreview => "print_preview",
            ExportFormat::Html => "download_html",
            ExportFormat::Markdown => "download_markdown",
            ExportFormat::Rst => "download_rst",
            ExportFormat::Pdf => "download_pdf",
            ExportFormat::Script => "download_script",
        }
    }

    /// Converter name on the export endpoint.
    pub fn converter(self) -> &'static str {
        match self {
            ExportFormat::HtmlPreview | ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Rst => "rst",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Script => "script",
        }
    }

    pub fn download(self) -> bool {
        self != ExportFormat::HtmlPreview
    }
}

/// Bespoke click behaviors that are not a single registry command.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenTree,
    CopyNotebook,
    DownloadNotebook,
    Export(ExportFormat),
    KillAndExit,
    EditMetadata,
    ReconnectKernel,
    StartTour,
    KeyboardShortcuts,
    ShowAbout,
    TrustNotebook,
    RestoreCheckpoint(String),
    SelectPreset(PresetKey),
    /// Open a link in a new browsing context.
    OpenLink(String),
}

impl MenuBar {
    /// Attach every static control. Runs once, from [`MenuBar::new`].
    pub(super) fn bind_events(&mut self, registry: &dyn CommandRegistry, tour_available: bool) {
        let mut bespoke = vec![
            ("open_notebook", Effect::OpenTree),
            ("copy_notebook", Effect::CopyNotebook),
            ("download_ipynb", Effect::DownloadNotebook),
            ("kill_and_exit", Effect::KillAndExit),
            ("edit_nb_metadata", Effect::EditMetadata),
            ("reconnect_kernel", Effect::ReconnectKernel),
            ("keyboard_shortcuts", Effect::KeyboardShortcuts),
            ("notebook_help", Effect::OpenLink(NOTEBOOK_HELP_URL.to_string())),
            ("markdown_help", Effect::OpenLink(MARKDOWN_HELP_URL.to_string())),
            ("notebook_about", Effect::ShowAbout),
        ];
        bespoke.extend(
            ExportFormat::ALL
                .iter()
                .map(|f| (f.control_id(), Effect::Export(*f))),
        );
        for (id, effect) in bespoke {
            self.bind_control(id, Binding::Effect(effect));
        }

        if tour_available {
            self.bind_control("notebook_tour", Binding::Effect(Effect::StartTour));
        } else if let Some(item) = self.tree.find_mut("notebook_tour") {
            item.disabled = true;
            item.binding = None;
        }

        for (id, action) in COMMAND_BINDINGS {
            let name = qualified(action);
            if !registry.exists(&name) {
                tracing::warn!(
                    command = %name,
                    "command does not exist, still binding it in case it is defined later"
                );
            }
            self.bind_control(id, Binding::Command(name));
        }
    }

    fn bind_control(&mut self, id: &str, binding: Binding) {
        if let Err(e) = self.tree.bind(id, binding) {
            tracing::warn!(error = %e, "menubar is missing a control");
        }
    }

    /// Translate an effect into the actions the run loop executes.
    pub(super) fn effect_actions(&mut self, effect: &Effect, document: &dyn Document) -> Vec<Action> {
        match effect {
            Effect::OpenTree => {
                let (parent, _) = url_path_split(document.path());
                let parent = encode_path_components(parent);
                let url = url_path_join(&[self.base_url.as_str(), "tree", parent.as_str()]);
                vec![Action::OpenWindow {
                    window: self.next_window(),
                    url: Some(url),
                    target: self.open_target,
                }]
            }
            Effect::CopyNotebook => {
                if document.is_dirty() {
                    vec![Action::SaveNotebook {
                        then: Some(Box::new(Action::CopyNotebook)),
                    }]
                } else {
                    vec![Action::CopyNotebook]
                }
            }
            Effect::DownloadNotebook => {
                let path = encode_path_components(document.path());
                let url =
                    url_path_join(&[self.base_url.as_str(), "files", path.as_str()]) + "?download=1";
                self.open_then_navigate(url, Target::Blank, document)
            }
            Effect::Export(format) => {
                let path = encode_path_components(document.path());
                let url = url_path_join(&[
                    self.base_url.as_str(),
                    "nbconvert",
                    format.converter(),
                    path.as_str(),
                ]) + &format!("?download={}", format.download());
                let target = self.open_target;
                self.open_then_navigate(url, target, document)
            }
            Effect::KillAndExit => vec![Action::DeleteSessionAndClose],
            Effect::EditMetadata => vec![Action::EditMetadata],
            Effect::ReconnectKernel => vec![Action::ReconnectKernel],
            Effect::StartTour => vec![Action::StartTour],
            Effect::KeyboardShortcuts => vec![Action::ShowKeyboardShortcuts],
            Effect::ShowAbout => vec![Action::ShowAbout],
            Effect::TrustNotebook => vec![Action::TrustNotebook],
            Effect::RestoreCheckpoint(id) => vec![Action::RestoreCheckpoint {
                checkpoint_id: id.clone(),
            }],
            Effect::SelectPreset(PresetKey::NoPreset) => {
                vec![Action::SetCellToolbar { preset: None }]
            }
            Effect::SelectPreset(PresetKey::Named(name)) => vec![Action::SetCellToolbar {
                preset: Some(name.clone()),
            }],
            Effect::OpenLink(url) => vec![Action::OpenWindow {
                window: self.next_window(),
                url: Some(url.clone()),
                target: Target::Blank,
            }],
        }
    }

    /// Open the target window first, while the click is still being handled,
    /// then navigate it: right away when saved, after the save otherwise.
    fn open_then_navigate(&mut self, url: String, target: Target, document: &dyn Document) -> Vec<Action> {
        let window = self.next_window();
        let navigate = Action::Navigate { window, url };
        let follow_up = if document.is_dirty() {
            Action::SaveNotebook {
                then: Some(Box::new(navigate)),
            }
        } else {
            navigate
        };
        vec![
            Action::OpenWindow {
                window,
                url: None,
                target,
            },
            follow_up,
        ]
    }

    fn next_window(&mut self) -> WindowId {
        self.next_window += 1;
        WindowId(self.next_window)
    }
}
