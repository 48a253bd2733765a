use super::contents::free_copy_path;
use super::EventSink;
use crate::app::event::{AppEvent, Overlay};
use crate::bus::BusEvent;
use crate::notebook::{Checkpoint, Completion, Document, LanguageInfo};
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// A notebook file on local disk with an in-memory checkpoint store.
pub struct LocalNotebook {
    file: PathBuf,
    path: String,
    document: Value,
    dirty: bool,
    trusted: bool,
    checkpoints: Vec<(Checkpoint, Value)>,
    next_checkpoint: u64,
    selected_cell: usize,
    events: EventSink,
}

impl LocalNotebook {
    /// Load `path`, or start an empty notebook when the file does not exist.
    pub fn open(path: &str, events: EventSink) -> Result<Self> {
        let file = PathBuf::from(path);
        let (document, dirty, trusted) = if file.exists() {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read notebook {}", file.display()))?;
            let document: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a notebook document", file.display()))?;
            (document, false, false)
        } else {
            (empty_notebook(), true, true)
        };
        Ok(Self {
            file,
            path: path.trim_start_matches("./").to_string(),
            document,
            dirty,
            trusted,
            checkpoints: Vec::new(),
            next_checkpoint: 1,
            selected_cell: 0,
            events,
        })
    }

    /// Tell the views what was loaded.
    pub fn announce(&self) {
        self.publish(BusEvent::NotebookLoaded(self.language_info()));
        self.publish(BusEvent::TrustChanged(self.trusted));
        self.publish(BusEvent::CheckpointsListed(self.checkpoint_list()));
    }

    /// Kernel recorded in the notebook metadata.
    pub fn kernel_name(&self) -> Option<String> {
        self.document
            .pointer("/metadata/kernelspec/name")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn celltoolbar(&self) -> Option<&str> {
        self.document
            .pointer("/metadata/celltoolbar")
            .and_then(Value::as_str)
    }

    pub fn checkpoint_list(&self) -> Vec<Checkpoint> {
        self.checkpoints.iter().map(|(cp, _)| cp.clone()).collect()
    }

    fn publish(&self, event: BusEvent) {
        let _ = self.events.send(AppEvent::Bus(event));
    }

    fn status(&self, text: String) {
        let _ = self.events.send(AppEvent::Status(text));
    }

    fn write_to(&self, file: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.document)
            .context("Failed to serialize notebook")?;
        std::fs::write(file, bytes)
            .with_context(|| format!("Failed to write notebook {}", file.display()))
    }

    fn take_checkpoint(&mut self) {
        let checkpoint = Checkpoint {
            id: format!("checkpoint-{}", self.next_checkpoint),
            last_modified: Utc::now(),
        };
        self.next_checkpoint += 1;
        self.checkpoints.push((checkpoint, self.document.clone()));
        self.publish(BusEvent::CheckpointCreated(self.checkpoint_list()));
    }

    fn metadata_mut(&mut self) -> Option<&mut serde_json::Map<String, Value>> {
        let root = self.document.as_object_mut()?;
        let metadata = root.entry("metadata").or_insert_with(|| json!({}));
        if !metadata.is_object() {
            *metadata = json!({});
        }
        metadata.as_object_mut()
    }

    fn snapshot(&self, checkpoint_id: &str) -> Result<&(Checkpoint, Value)> {
        self.checkpoints
            .iter()
            .find(|(cp, _)| cp.id == checkpoint_id)
            .with_context(|| format!("no checkpoint with id {}", checkpoint_id))
    }
}

impl Document for LocalNotebook {
    fn path(&self) -> &str {
        &self.path
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn language_info(&self) -> Option<LanguageInfo> {
        let info = self.document.pointer("/metadata/language_info")?;
        serde_json::from_value(info.clone()).ok()
    }

    fn save(&mut self, done: Completion) {
        let result = self.write_to(&self.file);
        if result.is_ok() {
            self.dirty = false;
            self.take_checkpoint();
        }
        done(result);
    }

    fn copy(&mut self) -> Result<()> {
        let target = free_copy_path(&self.file);
        self.write_to(&target)?;
        self.status(format!("Copied to {}", target.display()));
        Ok(())
    }

    fn trust(&mut self) -> Result<()> {
        self.trusted = true;
        self.publish(BusEvent::TrustChanged(true));
        self.status("Notebook trusted".to_string());
        Ok(())
    }

    fn edit_metadata(&mut self) -> Result<()> {
        let metadata = serde_json::to_string(&self.document["metadata"])
            .context("Failed to serialize notebook metadata")?;
        self.status(format!("Notebook metadata: {}", metadata));
        Ok(())
    }

    fn restore_checkpoint(&mut self, checkpoint_id: &str) -> Result<()> {
        let (checkpoint, _) = self.snapshot(checkpoint_id)?;
        let label = checkpoint
            .last_modified
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let _ = self.events.send(AppEvent::ShowOverlay(Overlay::ConfirmRestore {
            checkpoint_id: checkpoint.id.clone(),
            label,
        }));
        Ok(())
    }

    fn revert_to_checkpoint(&mut self, checkpoint_id: &str) -> Result<()> {
        let (_, snapshot) = self.snapshot(checkpoint_id)?;
        self.document = snapshot.clone();
        self.write_to(&self.file)?;
        self.dirty = false;
        self.publish(BusEvent::NotebookLoaded(self.language_info()));
        self.status(format!("Reverted to {}", checkpoint_id));
        Ok(())
    }

    fn set_celltoolbar(&mut self, preset: Option<&str>) {
        let Some(metadata) = self.metadata_mut() else {
            return;
        };
        match preset {
            Some(name) => {
                metadata.insert("celltoolbar".to_string(), Value::String(name.to_string()));
            }
            None => {
                metadata.remove("celltoolbar");
            }
        }
        self.dirty = true;
    }

    fn reselect_cell(&mut self) {
        let cells = self.document["cells"].as_array().map_or(0, Vec::len);
        self.selected_cell = self.selected_cell.min(cells.saturating_sub(1));
        tracing::trace!(cell = self.selected_cell, "cell reselected");
    }
}

fn empty_notebook() -> Value {
    json!({
        "cells": [],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 5
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn write_notebook(dir: &Path) -> PathBuf {
        let file = dir.join("analysis.ipynb");
        let doc = json!({
            "cells": [{"cell_type": "code", "source": "1 + 1", "metadata": {}, "outputs": []}],
            "metadata": {
                "kernelspec": {"name": "python3", "display_name": "Python 3"},
                "language_info": {"name": "python", "file_extension": ".py"}
            },
            "nbformat": 4,
            "nbformat_minor": 5
        });
        std::fs::write(&file, doc.to_string()).unwrap();
        file
    }

    #[test]
    fn test_open_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_notebook(dir.path());
        let (tx, _rx) = mpsc::unbounded_channel();
        let nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();
        assert!(!nb.is_dirty());
        assert_eq!(nb.kernel_name().as_deref(), Some("python3"));
        assert_eq!(nb.language_info(), Some(LanguageInfo::new("python", ".py")));
    }

    #[test]
    fn test_missing_file_starts_empty_and_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("new.ipynb");
        let (tx, _rx) = mpsc::unbounded_channel();
        let nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();
        assert!(nb.is_dirty());
        assert_eq!(nb.language_info(), None);
        assert_eq!(nb.kernel_name(), None);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.ipynb");
        std::fs::write(&file, "not json").unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(LocalNotebook::open(file.to_str().unwrap(), tx).is_err());
    }

    #[test]
    fn test_save_takes_checkpoint_and_restore_brings_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_notebook(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        nb.save(Box::new(move |r| done_tx.send(r.is_ok()).unwrap()));
        assert!(done_rx.recv().unwrap());
        let checkpoints = nb.checkpoint_list();
        assert_eq!(checkpoints.len(), 1);
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            AppEvent::Bus(BusEvent::CheckpointCreated(list)) if *list == checkpoints
        )));

        nb.set_celltoolbar(Some("Slideshow"));
        assert!(nb.is_dirty());
        assert_eq!(nb.celltoolbar(), Some("Slideshow"));

        nb.revert_to_checkpoint(&checkpoints[0].id).unwrap();
        assert!(!nb.is_dirty());
        assert_eq!(nb.celltoolbar(), None);
        assert!(nb.revert_to_checkpoint("checkpoint-99").is_err());
    }

    #[test]
    fn test_restore_only_asks_for_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_notebook(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();
        nb.save(Box::new(|_| {}));
        let id = nb.checkpoint_list()[0].id.clone();

        nb.set_celltoolbar(Some("Slideshow"));
        nb.save(Box::new(|_| {}));
        let on_disk = std::fs::read_to_string(&file).unwrap();
        drain(&mut rx);

        nb.restore_checkpoint(&id).unwrap();
        assert_eq!(nb.celltoolbar(), Some("Slideshow"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), on_disk);
        match drain(&mut rx).as_slice() {
            [AppEvent::ShowOverlay(Overlay::ConfirmRestore { checkpoint_id, .. })] => {
                assert_eq!(*checkpoint_id, id)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(nb.restore_checkpoint("checkpoint-99").is_err());
    }

    #[test]
    fn test_celltoolbar_none_removes_field() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut nb =
            LocalNotebook::open(dir.path().join("n.ipynb").to_str().unwrap(), tx).unwrap();
        nb.set_celltoolbar(Some("Tags"));
        nb.set_celltoolbar(Some("Slideshow"));
        assert_eq!(nb.celltoolbar(), Some("Slideshow"));
        nb.set_celltoolbar(None);
        assert!(nb.document["metadata"].get("celltoolbar").is_none());
    }

    #[test]
    fn test_copy_picks_free_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_notebook(dir.path());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();
        nb.copy().unwrap();
        nb.copy().unwrap();
        assert!(dir.path().join("analysis-Copy1.ipynb").exists());
        assert!(dir.path().join("analysis-Copy2.ipynb").exists());
    }

    #[test]
    fn test_trust_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_notebook(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut nb = LocalNotebook::open(file.to_str().unwrap(), tx).unwrap();
        nb.trust().unwrap();
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::Bus(BusEvent::TrustChanged(true)))));
    }
}
