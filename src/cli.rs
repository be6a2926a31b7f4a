use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to the input HTML file (must end with .html)
    #[clap(long = "html_path", value_parser = validate_html_path)]
    pub html_path: PathBuf,

    /// Where to write the EPUB; defaults to the input path with an .epub extension
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Book author
    #[clap(long, env = "BOOK_AUTHOR")]
    pub author: String,

    /// Unique book identifier (a UUID, or any string to derive one from)
    #[clap(long, env = "BOOK_IDENTIFIER")]
    pub identifier: String,

    /// Book language, as a BCP 47 code such as "en" or "fr"
    #[clap(long, env = "BOOK_LANGUAGE")]
    pub language: String,

    /// Book title
    #[clap(long, env = "BOOK_TITLE")]
    pub title: String,

    /// Increase logging verbosity (can be repeated)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The EPUB path to write, either given explicitly or derived from the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.html_path.with_extension("epub"))
    }
}

/// Checks that the path exists and carries an `.html` extension (any case).
pub fn validate_html_path(path: &str) -> Result<PathBuf, io::Error> {
    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        ));
    }

    if !has_html_extension(&path) {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("File must have an .html extension, got: {extension:?}"),
        ));
    }

    Ok(path)
}

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"))
}
