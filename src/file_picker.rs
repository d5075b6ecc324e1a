// Interactive PDF picker with fuzzy finding
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use nucleo::{Config, Nucleo, Utf32String};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::theme::ParrotTheme;

/// Let the user pick a PDF with interactive fuzzy finding.
/// `Ok(None)` means the picker was cancelled.
pub fn pick_pdf_file() -> Result<Option<PathBuf>> {
    let pdf_files = find_pdf_files()?;

    if pdf_files.is_empty() {
        println!("No PDF files found in the search directories.");
        return Ok(None);
    }

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;

    let result = run_fuzzy_picker(&pdf_files);

    terminal::disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

/// Run the interactive fuzzy picker
fn run_fuzzy_picker(files: &[String]) -> Result<Option<PathBuf>> {
    let mut stdout = io::stdout();

    let mut nucleo = Nucleo::<Arc<str>>::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

    let injector = nucleo.injector();
    for file in files {
        let file_arc: Arc<str> = Arc::from(file.as_str());
        let _ = injector.push(file_arc, |data, cols: &mut [Utf32String]| {
            cols[0] = data.as_ref().into();
        });
    }

    let home = dirs::home_dir();
    let mut query = String::new();
    let mut selected_index = 0usize;
    let mut scroll_offset = 0usize;

    loop {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        let (term_width, term_height) = terminal::size().unwrap_or((80, 24));

        // Header line
        let header_text = "🦜 parrot - pick a PDF to read aloud";
        execute!(
            stdout,
            MoveTo(0, 0),
            SetBackgroundColor(ParrotTheme::header_bg()),
            SetForegroundColor(ParrotTheme::header_text()),
            SetAttribute(Attribute::Bold),
            Print(format!("  {:<width$}", header_text, width = (term_width.saturating_sub(2)) as usize)),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )?;

        // Search box
        execute!(
            stdout,
            MoveTo(0, 2),
            SetForegroundColor(ParrotTheme::accent()),
            Print("  Search: "),
            SetForegroundColor(ParrotTheme::text_primary()),
            Print(&query),
            SetForegroundColor(ParrotTheme::text_dim()),
            Print("_"),
            ResetColor
        )?;

        // Filtered results
        let snapshot = nucleo.snapshot();
        let all_matches = snapshot.matched_items(..).collect::<Vec<_>>();

        let max_path_width = (term_width as usize).saturating_sub(5);
        let max_display_items = (term_height as usize).saturating_sub(8).clamp(1, 15);

        // Keep the selected item visible
        if selected_index >= scroll_offset + max_display_items {
            scroll_offset = selected_index.saturating_sub(max_display_items - 1);
        } else if selected_index < scroll_offset {
            scroll_offset = selected_index;
        }

        let visible_matches = all_matches
            .iter()
            .skip(scroll_offset)
            .take(max_display_items)
            .collect::<Vec<_>>();

        for (display_i, item) in visible_matches.iter().enumerate() {
            let actual_index = scroll_offset + display_i;
            let display = display_path(item.data.as_ref(), home.as_deref(), max_path_width);
            let line_pos = 4 + display_i as u16;

            execute!(stdout, MoveTo(0, line_pos), Clear(ClearType::CurrentLine))?;

            if actual_index == selected_index {
                execute!(
                    stdout,
                    SetForegroundColor(ParrotTheme::selected()),
                    Print("  ▶ "),
                    SetForegroundColor(ParrotTheme::text_primary()),
                    Print(&display),
                    ResetColor
                )?;
            } else {
                execute!(
                    stdout,
                    Print("    "),
                    SetForegroundColor(ParrotTheme::text_secondary()),
                    Print(&display),
                    ResetColor
                )?;
            }
        }

        // Footer: count + key help
        let count_line = if all_matches.len() > max_display_items {
            format!(
                "  Showing {}-{} of {} files",
                scroll_offset + 1,
                (scroll_offset + visible_matches.len()).min(all_matches.len()),
                all_matches.len()
            )
        } else {
            format!("  {} files", all_matches.len())
        };

        let help_line = (4 + max_display_items + 1) as u16;
        execute!(
            stdout,
            MoveTo(0, help_line),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(ParrotTheme::text_dim()),
            Print(&count_line),
            MoveTo(0, help_line + 1),
            Clear(ClearType::CurrentLine),
            Print("  ↑/↓ Navigate  •  Enter Select  •  Esc Cancel  •  Type to search"),
            ResetColor
        )?;

        stdout.flush()?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('c') | KeyCode::Char('q') => return Ok(None),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Esc => return Ok(None),
                        KeyCode::Enter => {
                            if let Some(item) = all_matches.get(selected_index) {
                                return Ok(Some(PathBuf::from(item.data.as_ref())));
                            }
                        }
                        KeyCode::Up => {
                            selected_index = selected_index.saturating_sub(1);
                        }
                        KeyCode::Down => {
                            selected_index =
                                (selected_index + 1).min(all_matches.len().saturating_sub(1));
                        }
                        KeyCode::PageUp => {
                            selected_index = selected_index.saturating_sub(max_display_items);
                        }
                        KeyCode::PageDown => {
                            selected_index = (selected_index + max_display_items)
                                .min(all_matches.len().saturating_sub(1));
                        }
                        KeyCode::Home => {
                            selected_index = 0;
                        }
                        KeyCode::End => {
                            selected_index = all_matches.len().saturating_sub(1);
                        }
                        KeyCode::Backspace => {
                            query.pop();
                            selected_index = 0;
                            scroll_offset = 0;
                            nucleo.pattern.reparse(
                                0,
                                &query,
                                nucleo::pattern::CaseMatching::Smart,
                                nucleo::pattern::Normalization::Smart,
                                false,
                            );
                        }
                        KeyCode::Char(c) => {
                            query.push(c);
                            selected_index = 0;
                            scroll_offset = 0;
                            nucleo.pattern.reparse(
                                0,
                                &query,
                                nucleo::pattern::CaseMatching::Smart,
                                nucleo::pattern::Normalization::Smart,
                                false,
                            );
                        }
                        _ => {}
                    }
                }
            }
        }

        nucleo.tick(10);
    }
}

// Shorten a path for display: strip the home prefix, truncate to the
// terminal width, fall back to the bare filename.
fn display_path(path: &str, home: Option<&Path>, max_width: usize) -> String {
    let clean = home
        .and_then(|h| h.to_str())
        .and_then(|h| path.strip_prefix(h))
        .map(|rest| format!("~{}", rest))
        .unwrap_or_else(|| path.to_string());

    if clean.chars().count() <= max_width {
        return clean;
    }

    if let Some(filename) = clean.rsplit('/').next() {
        if filename.chars().count() + 4 <= max_width {
            return format!(".../{}", filename);
        }
    }

    clean.chars().take(max_width).collect()
}

/// Find all PDF files under the configured search directories
fn find_pdf_files() -> Result<Vec<String>> {
    let mut all_files = Vec::new();

    for search_dir in config::picker_search_dirs() {
        all_files.extend(find_pdfs_in_dir(&search_dir)?);
    }

    all_files.sort();
    all_files.dedup();

    Ok(all_files)
}

fn find_pdfs_in_dir(search_dir: &Path) -> Result<Vec<String>> {
    // Prefer fd (faster), fall back to find
    let output = if command_exists("fd") {
        Command::new("fd")
            .args(["-e", "pdf", "-t", "f", "."])
            .arg(search_dir)
            .output()
    } else {
        Command::new("find")
            .arg(search_dir)
            .args(["-name", "*.pdf", "-type", "f"])
            .output()
    };

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout
                .lines()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
