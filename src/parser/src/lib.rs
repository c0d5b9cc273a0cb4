use std::{
    ffi::OsStr,
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use sequence::{Configuration, SplitStrategy};

use clap::{ArgEnum, Parser};
use anyhow::{Context, Result};

mod error;
pub use error::ParserError;

#[derive(Parser, Debug)]
#[clap(name="lss", author, version, about, long_about = None)]
/// lss: list directories, collapsing numbered file sequences
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences))]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long)]
    pub quiet: bool,

    /// Merge sequences which only differ by the width of their number.
    ///
    /// With this flag, 'file99.ext' and 'file100.ext' collapse into a single 'file#.ext'
    /// sequence of varying width, reported with a padding of 0. Without it, each width
    /// keeps its own sequence.
    #[clap(short='m', long)]
    pub merge_padding: bool,

    /// Drop explicit index lists and replace them with contiguous chunks.
    ///
    /// Each sequence is reported as one or several '[start:end]' ranges sharing a common
    /// step, rather than as the exhaustive list of its indices.
    #[clap(short='p', long)]
    pub pack: bool,

    /// Replace sequences carrying a single index by the corresponding filename.
    #[clap(short='b', long)]
    pub bake_singleton: bool,

    /// Print folders and files lexicographically sorted.
    #[clap(short='s', long)]
    pub sort: bool,

    /// Parse folders recursively.
    ///
    /// Sub-folders are walked breadth-first, each one printed as its own listing.
    #[clap(short='r', long)]
    pub recursive: bool,

    /// Output each listing as a JSON object rather than plain text.
    #[clap(short='j', long)]
    pub json: bool,

    /// Strategy used to settle ambiguous filenames carrying several numbers.
    ///
    /// Only one number may remain the sequence index; the others are baked back into the
    /// pattern as plain digits.{n}
    ///
    ///   none          flattens the set into individual files{n}
    ///   first         keeps the first number{n}
    ///   last          keeps the last number{n}
    ///   max-variance  keeps the number with the highest variance (default).
    ///                 Backs up to 'none' when two numbers tie.{n}
    #[clap(short='k', long, arg_enum, default_value("max-variance"))]
    pub keep: Keep,

    /// Folder to parse.
    #[clap(default_value("."), parse(try_from_os_str=valid_input_directory))]
    pub folder: PathBuf,
}

impl Cli {
    /// Translate command line arguments into an engine configuration.
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration {
            split_strategy: self.keep.into(),
            merge_padding : self.merge_padding,
            pack          : self.pack,
            bake_singleton: self.bake_singleton,
            sort          : self.sort,
        }
    }
}

/// User-facing spelling of the available split strategies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum)]
pub enum Keep {
    None,
    First,
    Last,
    MaxVariance,
}

impl Default for Keep {
    fn default() -> Self { Self::MaxVariance }
}

impl Display for Keep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None        => write!(f, "none"),
            Self::First       => write!(f, "first"),
            Self::Last        => write!(f, "last"),
            Self::MaxVariance => write!(f, "max-variance"),
        }
    }
}

impl From<Keep> for SplitStrategy {
    fn from(keep: Keep) -> Self {
        match keep {
            Keep::None        => Self::RetainNone,
            Keep::First       => Self::RetainFirst,
            Keep::Last        => Self::RetainLast,
            Keep::MaxVariance => Self::RetainHighestVariance,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(&self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(*self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: &FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(*entity, path.display().to_string()))
            .context("While parsing arguments.")
    }

    entity.validate(path).context("While parsing arguments.")
}

fn valid_input_directory(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, &FileEntity::Directory)
        .context("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["lss"]);
        assert_eq!(cli.keep, Keep::MaxVariance);
        assert_eq!(cli.folder, PathBuf::from("."));
        assert!(!cli.merge_padding && !cli.pack && !cli.bake_singleton && !cli.sort);
        assert!(!cli.recursive && !cli.json);

        let configuration = cli.configuration();
        assert_eq!(configuration, Configuration::default());
    }

    #[test]
    fn flags_map_onto_the_configuration() {
        let cli = Cli::parse_from(["lss", "-m", "-p", "-b", "-s", "--keep", "none"]);
        let configuration = cli.configuration();
        assert_eq!(configuration, Configuration {
            split_strategy: SplitStrategy::RetainNone,
            merge_padding : true,
            pack          : true,
            bake_singleton: true,
            sort          : true,
        });
    }

    #[test]
    fn keep_strategies() {
        for (value, expected) in [
            ("none",         SplitStrategy::RetainNone),
            ("first",        SplitStrategy::RetainFirst),
            ("last",         SplitStrategy::RetainLast),
            ("max-variance", SplitStrategy::RetainHighestVariance),
        ] {
            let cli = Cli::parse_from(["lss", "--keep", value]);
            assert_eq!(SplitStrategy::from(cli.keep), expected);
        }
    }

    #[test]
    fn missing_folders_are_rejected() {
        assert!(Cli::try_parse_from(["lss", "/nonexistent-lss-folder"]).is_err());
    }
}
