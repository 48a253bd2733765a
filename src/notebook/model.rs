//! Data carried between the notebook collaborators and the menu engine.
//!
//! Everything here derives `Serialize`/`Deserialize` so the same types can be
//! read from notebook metadata and from the TOML kernelspec catalog.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Language metadata from a notebook or a kernel info reply.
///
/// Both fields are optional; an absent field and an empty string are
/// different things for the export label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_extension: Option<String>,
}

impl LanguageInfo {
    pub fn new(name: impl Into<String>, file_extension: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_extension: Some(file_extension.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    pub text: String,
    pub url: String,
}

impl HelpLink {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// The parts of a kernel info reply the menubar cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelInfo {
    pub language_info: Option<LanguageInfo>,
    pub help_links: Vec<HelpLink>,
}

/// A saved snapshot of a notebook. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub file_extension: Option<String>,
    #[serde(default)]
    pub help_links: Vec<HelpLink>,
}

impl KernelSpec {
    /// Kernel info reply a kernel of this spec would send once ready.
    pub fn kernel_info(&self) -> KernelInfo {
        KernelInfo {
            language_info: Some(LanguageInfo {
                name: self.language.clone(),
                file_extension: self.file_extension.clone(),
            }),
            help_links: self.help_links.clone(),
        }
    }
}

/// Kernel type name -> display metadata, in the order the specs were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelSpecCatalog {
    specs: IndexMap<String, KernelSpec>,
}

impl KernelSpecCatalog {
    pub fn from_specs(specs: impl IntoIterator<Item = KernelSpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&KernelSpec> {
        self.specs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}

/// A live notebook session on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub path: String,
    pub kernel_name: String,
}

/// Live sessions keyed by notebook path, in server order.
pub type SessionMap = IndexMap<String, Session>;
