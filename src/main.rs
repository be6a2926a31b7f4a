use anyhow::{Context, Result};
use book::Book;
use cli::Cli;
use metadata::BookMetadata;
use std::process::ExitCode;

mod book;
mod chapters;
mod cli;
mod document;
mod epub;
mod logging;
mod metadata;
mod xhtml;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let metadata = BookMetadata::from_cli(&cli)?;
    let outfile = cli.output_path();

    let book = Book::from_html_file(&cli.html_path, metadata)
        .with_context(|| format!("Failed to split {} into chapters", cli.html_path.display()))?;
    for entry in book.table_of_contents() {
        tracing::debug!("{} -> {}", entry.href, entry.title);
    }

    book.write_epub(&outfile)
        .with_context(|| format!("Failed to write EPUB to {}", outfile.display()))?;

    println!("EPUB created: {}", outfile.display());
    Ok(())
}
