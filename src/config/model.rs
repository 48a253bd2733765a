//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a default so the application runs without a config file.

use crate::app::action::Target;
use crate::notebook::{HelpLink, KernelSpec};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_kernelspecs")]
    pub kernelspecs: Vec<KernelSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            kernelspecs: default_kernelspecs(),
        }
    }
}

/// Where the notebook server lives and which notebook is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL prefix every generated link starts with.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Scheme and host prepended when a link is handed to the system browser.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Notebook opened at startup, relative to the working directory.
    #[serde(default = "default_notebook_path")]
    pub notebook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            notebook_path: default_notebook_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub open_target: Target,
    /// chrono format string for checkpoint rows.
    #[serde(default = "default_checkpoint_format")]
    pub checkpoint_format: String,
    #[serde(default = "default_true")]
    pub tour_enabled: bool,
    /// Hand opened links to the system browser instead of only reporting them.
    #[serde(default)]
    pub launch_browser: bool,
    /// Cell toolbar presets registered after startup, as extensions would.
    #[serde(default = "default_extra_presets")]
    pub extra_presets: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            open_target: Target::Blank,
            checkpoint_format: default_checkpoint_format(),
            tour_enabled: true,
            launch_browser: false,
            extra_presets: default_extra_presets(),
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_origin() -> String {
    "http://localhost:8888".to_string()
}
fn default_notebook_path() -> String {
    "Untitled.ipynb".to_string()
}
fn default_checkpoint_format() -> String {
    "%A, %B %-d, %Y %-I:%M %p".to_string()
}
fn default_extra_presets() -> Vec<String> {
    vec!["Attachments".to_string(), "Tags".to_string()]
}
fn default_log_dir() -> String {
    "~/.local/share/nbmenu/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_kernelspecs() -> Vec<KernelSpec> {
    vec![
        KernelSpec {
            name: "python3".into(),
            display_name: "Python 3".into(),
            language: Some("python".into()),
            file_extension: Some(".py".into()),
            help_links: vec![
                HelpLink::new("Python Reference", "https://docs.python.org/3/"),
                HelpLink::new("NumPy Reference", "https://docs.scipy.org/doc/numpy/reference/"),
            ],
        },
        KernelSpec {
            name: "ir".into(),
            display_name: "R".into(),
            language: Some("R".into()),
            file_extension: Some(".r".into()),
            help_links: vec![HelpLink::new("R Reference", "https://cran.r-project.org/manuals.html")],
        },
    ]
}
