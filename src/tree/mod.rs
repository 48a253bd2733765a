pub mod file_list;
pub mod kernel_list;
pub mod path_list;

pub use file_list::FileList;
pub use kernel_list::KernelList;
pub use path_list::{EntryKind, PathEntry, PathList, RowDecorator};
