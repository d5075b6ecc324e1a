// PDF text extraction module
use std::path::Path;

use anyhow::Result;

pub mod lopdf_text;
pub mod poppler;

pub use lopdf_text::LopdfSource;
pub use poppler::PopplerSource;

/// A parsed document that hands out per-page plain text.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Plain text of the page at `page_index` (0-based). A page with no
    /// text content yields an empty string, not an error.
    fn page_text(&self, page_index: usize) -> Result<String>;
}

/// Which extraction engine to run a document through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Built-in content-stream extraction via lopdf
    Lopdf,
    /// Shell out to pdftotext (requires poppler-utils)
    Poppler,
}

pub fn open(path: &Path, engine: Engine) -> Result<Box<dyn PageSource>> {
    match engine {
        Engine::Lopdf => Ok(Box::new(LopdfSource::load(path)?)),
        Engine::Poppler => Ok(Box::new(PopplerSource::open(path)?)),
    }
}
