//! The static menubar: every control the binder and the updaters address.

use super::item::{Menu, MenuItem};

pub const RESTORE_CHECKPOINT: &str = "restore_checkpoint";
pub const CELL_TOOLBAR_SUBMENU: &str = "menu-cell-toolbar-submenu";
pub const KERNEL_HELP_LINKS: &str = "kernel-help-links";
pub const NOTEBOOK_ABOUT: &str = "notebook_about";
pub const TRUST_NOTEBOOK: &str = "trust_notebook";
pub const DOWNLOAD_SCRIPT: &str = "download_script";
pub const HELP_MENU: &str = "Help";

pub fn default_menus() -> Vec<Menu> {
    vec![
        Menu::new(
            "File",
            vec![
                MenuItem::entry("open_notebook", "Open..."),
                MenuItem::divider(),
                MenuItem::entry("copy_notebook", "Make a Copy..."),
                MenuItem::entry("rename_notebook", "Rename..."),
                MenuItem::entry("save_checkpoint", "Save and Checkpoint"),
                MenuItem::divider(),
                MenuItem::submenu(RESTORE_CHECKPOINT, "Revert to Checkpoint", Vec::new()),
                MenuItem::divider(),
                MenuItem::entry("print_preview", "Print Preview"),
                MenuItem::submenu(
                    "download_menu",
                    "Download as",
                    vec![
                        MenuItem::entry("download_ipynb", "Notebook (.ipynb)"),
                        MenuItem::entry(DOWNLOAD_SCRIPT, "Script (txt)"),
                        MenuItem::entry("download_html", "HTML (.html)"),
                        MenuItem::entry("download_markdown", "Markdown (.md)"),
                        MenuItem::entry("download_rst", "reST (.rst)"),
                        MenuItem::entry("download_pdf", "PDF via LaTeX (.pdf)"),
                    ],
                ),
                MenuItem::divider(),
                MenuItem::entry(TRUST_NOTEBOOK, "Trust Notebook"),
                MenuItem::divider(),
                MenuItem::entry("kill_and_exit", "Close and Halt"),
            ],
        ),
        Menu::new(
            "Edit",
            vec![
                MenuItem::entry("cut_cell", "Cut Cell"),
                MenuItem::entry("copy_cell", "Copy Cell"),
                MenuItem::entry("delete_cell", "Delete Cell"),
                MenuItem::entry("undelete_cell", "Undo Delete Cell"),
                MenuItem::divider(),
                MenuItem::entry("split_cell", "Split Cell"),
                MenuItem::entry("merge_cell_above", "Merge Cell Above"),
                MenuItem::entry("merge_cell_below", "Merge Cell Below"),
                MenuItem::divider(),
                MenuItem::entry("move_cell_up", "Move Cell Up"),
                MenuItem::entry("move_cell_down", "Move Cell Down"),
                MenuItem::divider(),
                MenuItem::entry("edit_nb_metadata", "Edit Notebook Metadata"),
                MenuItem::entry("find_and_replace", "Find and Replace"),
            ],
        ),
        Menu::new(
            "View",
            vec![
                MenuItem::entry("toggle_header", "Toggle Header"),
                MenuItem::entry("toggle_toolbar", "Toggle Toolbar"),
                MenuItem::submenu(CELL_TOOLBAR_SUBMENU, "Cell Toolbar", Vec::new()),
            ],
        ),
        Menu::new(
            "Insert",
            vec![
                MenuItem::entry("insert_cell_above", "Insert Cell Above"),
                MenuItem::entry("insert_cell_below", "Insert Cell Below"),
            ],
        ),
        Menu::new(
            "Cell",
            vec![
                MenuItem::entry("run_cell", "Run Cells"),
                MenuItem::entry("run_cell_select_below", "Run Cells and Select Below"),
                MenuItem::entry("run_cell_insert_below", "Run Cells and Insert Below"),
                MenuItem::entry("run_all_cells", "Run All"),
                MenuItem::entry("run_all_cells_above", "Run All Above"),
                MenuItem::entry("run_all_cells_below", "Run All Below"),
                MenuItem::divider(),
                MenuItem::submenu(
                    "change_cell_type",
                    "Cell Type",
                    vec![
                        MenuItem::entry("to_code", "Code"),
                        MenuItem::entry("to_markdown", "Markdown"),
                        MenuItem::entry("to_raw", "Raw NBConvert"),
                    ],
                ),
                MenuItem::divider(),
                MenuItem::submenu(
                    "current_outputs",
                    "Current Outputs",
                    vec![
                        MenuItem::entry("toggle_current_output", "Toggle"),
                        MenuItem::entry("toggle_current_output_scroll", "Toggle Scrolling"),
                        MenuItem::entry("clear_current_output", "Clear"),
                    ],
                ),
                MenuItem::submenu(
                    "all_outputs",
                    "All Output",
                    vec![
                        MenuItem::entry("toggle_all_output", "Toggle"),
                        MenuItem::entry("toggle_all_output_scroll", "Toggle Scrolling"),
                        MenuItem::entry("clear_all_output", "Clear"),
                    ],
                ),
            ],
        ),
        Menu::new(
            "Kernel",
            vec![
                MenuItem::entry("int_kernel", "Interrupt"),
                MenuItem::entry("restart_kernel", "Restart"),
                MenuItem::entry("restart_clear_output", "Restart & Clear Output"),
                MenuItem::entry("restart_run_all", "Restart & Run All"),
                MenuItem::entry("reconnect_kernel", "Reconnect"),
            ],
        ),
        Menu::new(
            HELP_MENU,
            vec![
                MenuItem::entry("notebook_tour", "User Interface Tour"),
                MenuItem::entry("keyboard_shortcuts", "Keyboard Shortcuts"),
                MenuItem::divider(),
                MenuItem::entry("notebook_help", "Notebook Help"),
                MenuItem::entry("markdown_help", "Markdown"),
                MenuItem::divider(),
                MenuItem::entry(NOTEBOOK_ABOUT, "About"),
            ],
        ),
    ]
}
