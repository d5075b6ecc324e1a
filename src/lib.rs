//! parrot - pick a PDF, extract its text, read it aloud.

pub mod config;
pub mod file_picker;
pub mod narrate;
pub mod pdf_extraction;
pub mod speech;
pub mod theme;
