// parrot - pick a PDF, extract its text, read it aloud
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parrot::file_picker;
use parrot::narrate;
use parrot::pdf_extraction::{self, Engine};
use parrot::speech::{self, NullVoice, SystemVoice};

#[derive(Parser, Debug)]
#[command(author, version, about = "Reads a PDF aloud with the system speech engine")]
struct Args {
    /// PDF to read; launches the file picker when omitted
    pdf_file: Option<PathBuf>,

    /// First page to read (1-based)
    #[arg(long)]
    from: Option<usize>,

    /// Last page to read (1-based)
    #[arg(long)]
    to: Option<usize>,

    /// Text extraction engine
    #[arg(long, value_enum, default_value_t = Engine::Lopdf)]
    engine: Engine,

    /// Pick a voice by (partial) name
    #[arg(long)]
    voice: Option<String>,

    /// Speech rate as a percentage of the engine's range
    #[arg(long)]
    rate: Option<f32>,

    /// List installed voices and exit
    #[arg(long)]
    list_voices: bool,

    /// Extract and report without speaking
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    if args.list_voices {
        speech::list_voices()?;
        return Ok(());
    }

    let pdf_path = match resolve_pdf_path(args.pdf_file)? {
        Some(path) => path,
        None => {
            println!("No file selected.");
            return Ok(());
        }
    };

    info!(pdf = %pdf_path.display(), engine = ?args.engine, "opening document");
    let source = pdf_extraction::open(&pdf_path, args.engine)?;

    let summary = if args.dry_run {
        narrate::narrate(source.as_ref(), &mut NullVoice, args.from, args.to)?
    } else {
        let mut voice = SystemVoice::new(args.voice.as_deref(), args.rate)?;
        narrate::narrate(source.as_ref(), &mut voice, args.from, args.to)?
    };

    println!(
        "{}: {} of {} pages spoken, {} blank",
        pdf_path.display(),
        summary.pages_spoken,
        summary.pages_total,
        summary.pages_skipped,
    );

    Ok(())
}

fn resolve_pdf_path(arg: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = arg {
        return Ok(Some(path));
    }
    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!("no PDF given and no terminal available for the file picker");
    }
    file_picker::pick_pdf_file()
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parrot=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
