//! Canvas content resolution: turn a site page's layout tree into a flat,
//! readable document.
//!
//! Three layers, leaf-first: [`resolve_content`] extracts displayable content
//! from one web part, [`render_layout`] walks sections → columns → web parts
//! in document order, and [`page_content`] orchestrates the fetch-and-render
//! for one page.

mod layout;
mod resolver;
mod service;

pub use layout::render_layout;
pub use resolver::resolve_content;
pub use service::{page_content, render_page};
