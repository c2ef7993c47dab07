pub mod embed_handlers;

pub use embed_handlers::{show_embed, show_map_page};
