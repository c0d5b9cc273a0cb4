use std::{fs::File, io::{BufWriter, Write}, path::Path};

use sequence::FolderContent;

use anyhow::{Context, Result};

mod error;
pub use error::PresenterError;

/// Output flavor of a [`Presenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {Text, Json}

/// A buffered folder-listing writer (file or stdout).
///
/// Text output prints the folder name, its directories and its files one per
/// line, using each item's display form. JSON output prints one
/// `{path, directories, files}` object per folder.
pub struct Presenter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>,
    format: OutputFormat,
}

impl<'a> Presenter<'a> {
    /// Instantiate a new `Presenter`, linked to a file.
    ///
    /// # Errors
    /// If `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(format: OutputFormat, path: Option<impl AsRef<Path>>) -> Result<Presenter<'a>> {
        use PresenterError::IOError;
        Ok(Presenter { format, source: match path {
            Some(path) => {
                let file = File::create(path).map_err(IOError).context("While creating file")?;
                BufWriter::new(Box::new(file))
            },
            None => {
                BufWriter::new(Box::new(std::io::stdout()))
            }
        }})
    }

    /// Instantiate a new `Presenter`, linked to the standard output.
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Presenter<'a> {
        Presenter { format, source: BufWriter::new(Box::new(std::io::stdout())) }
    }

    /// Write one folder's listing and flush.
    ///
    /// # Errors
    /// If any write to the underlying sink fails.
    pub fn write_folder(&mut self, content: &FolderContent) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(content),
            OutputFormat::Json => self.write_json(content),
        }?;
        self.source.flush().map_err(PresenterError::IOError)
            .context("While flushing buffer contents of Presenter")
    }

    fn write_text(&mut self, content: &FolderContent) -> Result<(), PresenterError> {
        writeln!(self.source, "\n* {}", content.name)?;
        for directory in &content.directories {
            writeln!(self.source, "{directory}")?;
        }
        writeln!(self.source)?;
        for file in &content.files {
            writeln!(self.source, "{file}")?;
        }
        Ok(())
    }

    fn write_json(&mut self, content: &FolderContent) -> Result<(), PresenterError> {
        serde_json::to_writer(&mut self.source, content)?;
        writeln!(self.source)?;
        Ok(())
    }
}
