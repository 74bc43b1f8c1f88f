pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod parse;
pub mod resolve;
pub mod tree;

pub use engine::Documentation;

use error::RenderError;

/// Turns the raw `notes` of an endpoint into the text that is documented.
pub trait NotesRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError>;
}

/// Documents notes verbatim. Used whenever markdown is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNotes;

impl NotesRenderer for PlainNotes {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        Ok(text.to_string())
    }
}
