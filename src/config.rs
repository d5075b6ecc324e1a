// Configuration constants for parrot
use std::env;
use std::path::PathBuf;
use std::time::Duration;

// How often to poll the speech engine while the queue drains
pub const SPEAK_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Playback estimate for engines that cannot report speaking state
pub const ESTIMATED_CHARS_PER_SECOND: f32 = 15.0;

// Directories the file picker scans for PDFs, override with PARROT_SEARCH_DIRS
pub fn picker_search_dirs() -> Vec<PathBuf> {
    if let Ok(paths) = env::var("PARROT_SEARCH_DIRS") {
        return env::split_paths(&paths).collect();
    }

    let mut search = vec![PathBuf::from(".")];
    if let Some(documents) = dirs::document_dir() {
        search.push(documents);
    }
    if let Some(desktop) = dirs::desktop_dir() {
        search.push(desktop);
    }
    search
}
