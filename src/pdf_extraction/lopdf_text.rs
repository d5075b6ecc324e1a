// PDF TEXT EXTRACTION - Pure Rust Implementation
use anyhow::{anyhow, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use std::path::Path;

use super::PageSource;

// TJ adjustments are in thousandths of an em; gaps this wide separate words
const WORD_GAP_THRESHOLD: i64 = -150;

pub struct LopdfSource {
    document: Document,
}

impl LopdfSource {
    pub fn load(path: &Path) -> Result<Self> {
        let document = Document::load(path)?;
        Ok(Self { document })
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    fn page_text(&self, page_index: usize) -> Result<String> {
        let pages = self.document.get_pages();
        let page_id = pages
            .get(&(page_index as u32 + 1))
            .copied()
            .ok_or_else(|| anyhow!("page {} not found", page_index + 1))?;

        // A page without content streams is legal; it just has no text.
        let data = self.document.get_page_content(page_id)?;
        if data.is_empty() {
            return Ok(String::new());
        }

        let content = Content::decode(&data)?;
        Ok(text_from_operations(&content.operations))
    }
}

// Walk the content-stream operations and collect shown text in reading
// order. Text-positioning operators become line breaks.
fn text_from_operations(operations: &[Operation]) -> String {
    let mut out = String::new();

    for op in operations {
        match op.operator.as_str() {
            // Show text
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    out.push_str(&decode_text_bytes(bytes));
                }
            }
            // Move to next line, then show text
            "'" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    break_line(&mut out);
                    out.push_str(&decode_text_bytes(bytes));
                }
            }
            // Set spacing, move to next line, then show text
            "\"" => {
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    break_line(&mut out);
                    out.push_str(&decode_text_bytes(bytes));
                }
            }
            // Show text with individual glyph positioning
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                out.push_str(&decode_text_bytes(bytes));
                            }
                            Object::Integer(adjust) if *adjust <= WORD_GAP_THRESHOLD => {
                                push_space(&mut out);
                            }
                            Object::Real(adjust)
                                if *adjust <= WORD_GAP_THRESHOLD as f32 =>
                            {
                                push_space(&mut out);
                            }
                            _ => {}
                        }
                    }
                }
            }
            // Text positioning operators
            "Td" | "TD" | "T*" | "Tm" | "ET" => {
                break_line(&mut out);
            }
            _ => {}
        }
    }

    out
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(|c: char| c.is_whitespace()) {
        out.push(' ');
    }
}

// PDF string objects carry either UTF-16BE (with BOM) or a single-byte
// encoding close enough to Latin-1 for speech purposes.
fn decode_text_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
