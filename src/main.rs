//! epubmd - EPUB to Markdown converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "epubmd")]
#[command(version, about = "Convert an EPUB ebook to a single Markdown file", long_about = None)]
#[command(after_help = "EXAMPLES:
    epubmd book.epub              Write book's <title>.md next to book.epub
    epubmd book.epub -o notes/    Write <title>.md into notes/")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "EPUB")]
    input: PathBuf,

    /// Directory for the Markdown file (default: the EPUB's directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match epubmd::convert(&cli.input, cli.output_dir.as_deref()) {
        Ok(written) => {
            println!("Converted {} -> {}", cli.input.display(), written.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
