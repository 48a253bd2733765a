use super::EventSink;
use crate::app::event::AppEvent;
use crate::bus::BusEvent;
use crate::notebook::Contents;
use crate::tree::{EntryKind, PathEntry};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The directory holding the open notebook.
pub struct LocalContents {
    root: PathBuf,
    events: EventSink,
}

impl LocalContents {
    /// Contents of the directory that holds `notebook`.
    pub fn beside(notebook: &str, events: EventSink) -> Self {
        let root = Path::new(notebook)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { root, events }
    }

    fn entries(&self) -> Result<Vec<PathEntry>> {
        let dir = std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?;
        let mut entries = Vec::new();
        for item in dir {
            let item = item.with_context(|| format!("Failed to list {}", self.root.display()))?;
            let name = item.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let kind = if item.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                EntryKind::Directory
            } else if name.ends_with(".ipynb") {
                EntryKind::Notebook
            } else {
                EntryKind::File
            };
            entries.push(PathEntry::new(name.clone(), name, kind));
        }
        Ok(entries)
    }
}

impl Contents for LocalContents {
    fn list_directory(&mut self) -> Result<()> {
        let entries = self.entries()?;
        tracing::debug!(dir = %self.root.display(), entries = entries.len(), "directory listed");
        let _ = self
            .events
            .send(AppEvent::Bus(BusEvent::DirectoryListed(entries)));
        Ok(())
    }

    fn duplicate(&mut self, path: &str) -> Result<()> {
        let source = self.root.join(path);
        let target = free_copy_path(&source);
        std::fs::copy(&source, &target)
            .with_context(|| format!("Failed to duplicate {}", source.display()))?;
        let _ = self.events.send(AppEvent::Status(format!(
            "Duplicated {} as {}",
            path,
            target.file_name().and_then(|n| n.to_str()).unwrap_or(path)
        )));
        self.list_directory()
    }
}

/// First `<stem>-CopyN.ipynb` beside `file` that does not exist yet.
pub(super) fn free_copy_path(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    (1..)
        .map(|n| dir.join(format!("{}-Copy{}.ipynb", stem, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dir.join(format!("{}-Copy.ipynb", stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn listed(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<PathEntry> {
        std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|event| match event {
                AppEvent::Bus(BusEvent::DirectoryListed(entries)) => Some(entries),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }

    #[test]
    fn test_listing_classifies_and_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nb.ipynb"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let notebook = dir.path().join("nb.ipynb");
        let mut contents = LocalContents::beside(notebook.to_str().unwrap(), tx);
        contents.list_directory().unwrap();

        let mut entries = listed(&mut rx);
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let kinds: Vec<(&str, EntryKind)> =
            entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("data", EntryKind::Directory),
                ("nb.ipynb", EntryKind::Notebook),
                ("notes.md", EntryKind::File),
            ]
        );
    }

    #[test]
    fn test_duplicate_copies_and_relists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nb.ipynb"), "{\"cells\": []}").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notebook = dir.path().join("nb.ipynb");
        let mut contents = LocalContents::beside(notebook.to_str().unwrap(), tx);

        contents.duplicate("nb.ipynb").unwrap();
        contents.duplicate("nb.ipynb").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("nb-Copy2.ipynb")).unwrap(),
            "{\"cells\": []}"
        );
        assert_eq!(listed(&mut rx).len(), 3);
        assert!(contents.duplicate("missing.ipynb").is_err());
    }

    #[test]
    fn test_bare_file_name_lists_current_directory() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let contents = LocalContents::beside("Untitled.ipynb", tx);
        assert_eq!(contents.root, PathBuf::from("."));
    }
}
