use crate::cli::Cli;
use anyhow::{Context, Result};
use derive_builder::Builder;

/// Descriptive metadata attached to the generated book.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct BookMetadata {
    pub identifier: String,
    pub title: String,
    pub language: String,
    pub author: String,
}

impl BookMetadata {
    pub fn from_cli(cli: &Cli) -> Result<BookMetadata> {
        BookMetadataBuilder::default()
            .identifier(cli.identifier.as_str())
            .title(cli.title.as_str())
            .language(cli.language.as_str())
            .author(cli.author.as_str())
            .build()
            .with_context(|| "Failed to build book metadata")
    }
}
