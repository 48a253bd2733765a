//! The "Files" list: the notebook's directory with the plain file decoration.

use super::path_list::{FileDecorator, PathEntry, PathList};
use crate::bus::{BusEvent, EventBus, Topic};

pub struct FileList {
    list: PathList<FileDecorator>,
    loaded: bool,
}

impl AsMut<FileList> for FileList {
    fn as_mut(&mut self) -> &mut FileList {
        self
    }
}

impl FileList {
    pub fn new<C>(bus: &mut EventBus<C>) -> Self
    where
        C: AsMut<FileList> + 'static,
    {
        bus.subscribe(Topic::DirectoryListed, |ctx: &mut C, event| {
            if let BusEvent::DirectoryListed(entries) = event {
                ctx.as_mut().directory_listed(entries);
            }
            Ok(())
        });
        Self {
            list: PathList::new("files", FileDecorator),
            loaded: false,
        }
    }

    /// Replace the rows with `entries`, directories first.
    pub fn directory_listed(&mut self, entries: &[PathEntry]) {
        let filter = self.list.filter().to_string();
        self.list.clear_list();
        for entry in entries {
            let idx = self.list.new_item(None);
            self.list.add_link(idx, entry.clone(), &());
        }
        self.list.sort();
        if !filter.is_empty() {
            self.list.set_filter(&filter);
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn list(&self) -> &PathList<FileDecorator> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut PathList<FileDecorator> {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::tree::EntryKind;

    fn entries() -> Vec<PathEntry> {
        vec![
            PathEntry::new("results.csv", "results.csv", EntryKind::File),
            PathEntry::new("b.ipynb", "b.ipynb", EntryKind::Notebook),
            PathEntry::new("data", "data", EntryKind::Directory),
            PathEntry::new("A.ipynb", "A.ipynb", EntryKind::Notebook),
        ]
    }

    fn names(list: &FileList) -> Vec<&str> {
        list.list()
            .rows()
            .iter()
            .filter_map(|r| r.entry.as_ref().map(|e| e.name.as_str()))
            .collect()
    }

    #[test]
    fn test_listing_is_sorted_and_decorated() {
        let mut bus: EventBus<FileList> = EventBus::new();
        let mut files = FileList::new(&mut bus);
        assert!(!files.is_loaded());

        bus.publish(&mut files, &BusEvent::DirectoryListed(entries())).unwrap();
        assert!(files.is_loaded());
        assert_eq!(names(&files), vec!["data", "A.ipynb", "b.ipynb", "results.csv"]);

        files.list_mut().move_down();
        assert_eq!(
            files.list().activate_selected(),
            Some(Action::DuplicateNotebook { path: "A.ipynb".into() })
        );
    }

    #[test]
    fn test_relisting_replaces_rows_and_keeps_filter() {
        let mut bus: EventBus<FileList> = EventBus::new();
        let mut files = FileList::new(&mut bus);
        bus.publish(&mut files, &BusEvent::DirectoryListed(entries())).unwrap();
        files.list_mut().set_filter("ipynb");

        let mut more = entries();
        more.push(PathEntry::new("b-Copy1.ipynb", "b-Copy1.ipynb", EntryKind::Notebook));
        bus.publish(&mut files, &BusEvent::DirectoryListed(more)).unwrap();

        assert_eq!(files.list().rows().len(), 5);
        assert_eq!(files.list().filter(), "ipynb");
        assert_eq!(files.list().visible().len(), 3);
    }
}
