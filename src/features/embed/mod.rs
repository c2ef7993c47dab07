//! Public map embeds.
//!
//! A content author references a point with the `[poimap id="N"]` directive;
//! the renderer replaces it with a container element the client-side map
//! binding picks up. Lookup failures always degrade to a placeholder
//! paragraph so a bad id can never break page rendering.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::EmbedService;
