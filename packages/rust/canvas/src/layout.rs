//! Layout tree traversal.
//!
//! Walks horizontal sections (in document order), their columns, and their
//! web parts, then the vertical section's web parts, assembling the page
//! body. Empty or absent levels contribute nothing; a web part with no
//! extractable content is silently skipped.

use graphscout_client::{CanvasLayout, WebPart};
use graphscout_shared::RenderFormat;

use crate::resolver::resolve_content;

/// Produce the ordered body text for a canvas layout.
pub fn render_layout(layout: &CanvasLayout, format: RenderFormat) -> String {
    let mut body = String::new();

    if let Some(sections) = &layout.horizontal_sections {
        for section in sections {
            if let Some(columns) = &section.columns {
                for column in columns {
                    append_parts(&mut body, column.webparts.as_deref(), format);
                }
            }
        }
    }

    if let Some(vertical) = &layout.vertical_section {
        append_parts(&mut body, vertical.webparts.as_deref(), format);
    }

    body
}

fn append_parts(body: &mut String, parts: Option<&[WebPart]>, format: RenderFormat) {
    for part in parts.unwrap_or_default() {
        if let Some(content) = resolve_content(part, format) {
            body.push_str(&content);
            body.push_str("\n\n");
        }
    }
}
