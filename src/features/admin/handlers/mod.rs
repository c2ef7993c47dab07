pub mod admin_handlers;

pub use admin_handlers::{show_add, show_edit, show_list, submit_add, submit_edit};
