// Text extraction by shelling out to pdftotext
use anyhow::{bail, Context, Result};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::PageSource;

// pdftotext cannot report a page count, so lopdf supplies it up front.
pub struct PopplerSource {
    path: PathBuf,
    page_count: usize,
}

impl PopplerSource {
    pub fn open(path: &Path) -> Result<Self> {
        let page_count = Document::load(path)?.get_pages().len();
        Ok(Self {
            path: path.to_path_buf(),
            page_count,
        })
    }
}

impl PageSource for PopplerSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page_index: usize) -> Result<String> {
        let page = (page_index + 1).to_string();
        let output = Command::new("pdftotext")
            .args(["-f", &page, "-l", &page, "-layout"])
            .arg(&self.path)
            .arg("-")
            .output()
            .context("failed to run pdftotext (is poppler installed?)")?;

        if !output.status.success() {
            bail!("pdftotext failed on page {}", page_index + 1);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
